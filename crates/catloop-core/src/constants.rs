//! Tuning parameters and session defaults.

/// Frame rate the scheduler targets (Hz). Matches a typical display refresh.
pub const FRAME_RATE_HZ: u32 = 60;

// --- Projection ---

/// Default horizontal field of view of the camera viewport (degrees).
pub const DEFAULT_FOV_DEG: f64 = 60.0;

/// Narrowest field of view accepted from a zoom command (degrees).
pub const MIN_FOV_DEG: f64 = 10.0;

/// Widest field of view accepted from a zoom command (degrees).
pub const MAX_FOV_DEG: f64 = 120.0;

/// Pixels beyond each viewport edge within which a point still counts as visible,
/// so markers and lines slide in from the edge instead of popping.
pub const DEFAULT_OVERSCAN_PX: f64 = 150.0;

/// Default viewport width (pixels, portrait phone).
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1080.0;

/// Default viewport height (pixels, portrait phone).
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 1920.0;

// --- Orientation smoothing ---

/// Exponential smoothing factor applied to each orientation channel per frame.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.08;

// --- Lock ---

/// Distance from the viewport center (pixels) below which a target is centered.
/// The boundary is exclusive: a target exactly this far away is not centered.
pub const DEFAULT_LOCK_RADIUS_PX: f64 = 40.0;

// --- Observer ---

/// Observer latitude used until the first location fix arrives (Bangkok).
pub const DEFAULT_OBSERVER_LATITUDE: f64 = 13.73;

/// Observer longitude used until the first location fix arrives (Bangkok).
pub const DEFAULT_OBSERVER_LONGITUDE: f64 = 100.52;

// --- Astronomy ---

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Julian Date of the J2000.0 epoch (2000-01-01T12:00:00 TT).
pub const JD_J2000: f64 = 2_451_545.0;

/// Milliseconds per day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Greenwich mean sidereal time at J2000.0 (degrees).
pub const GMST_AT_J2000_DEG: f64 = 280.460_618_37;

/// Sidereal rotation per solar day (degrees).
pub const GMST_DEG_PER_DAY: f64 = 360.985_647_366_29;

// --- Markers ---

/// Magnitude at which a marker shrinks to its minimum size.
pub const MARKER_FAINT_LIMIT_MAG: f64 = 5.0;

/// Marker radius growth per magnitude step brighter than the faint limit (pixels).
pub const MARKER_PX_PER_MAG: f64 = 2.0;

/// Smallest marker radius (pixels).
pub const MARKER_MIN_RADIUS_PX: f64 = 1.0;
