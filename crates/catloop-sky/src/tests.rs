//! Tests for the sky engine: frame pipeline, lock and dwell scenarios, commands.

use chrono::{DateTime, Duration, FixedOffset};

use catloop_astro::{equatorial_to_horizontal, local_sidereal_time};
use catloop_core::catalog::Catalog;
use catloop_core::commands::SessionCommand;
use catloop_core::config::SessionConfig;
use catloop_core::enums::{CompletionKind, DwellPhase};
use catloop_core::mission::{self, CompletionCriterion, Mission};
use catloop_core::types::{GeoLocation, RawOrientation};

use crate::engine::{FrameInput, SkyEngine};

const BANGKOK: GeoLocation = GeoLocation {
    latitude: 13.73,
    longitude: 100.52,
};

fn t0() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2025-01-15T20:00:00+07:00").unwrap()
}

fn at_secs(secs: f64) -> DateTime<FixedOffset> {
    t0() + Duration::milliseconds((secs * 1000.0).round() as i64)
}

/// Orientation that puts `object_id` dead center at `instant`.
fn aim_at(object_id: &str, instant: DateTime<FixedOffset>) -> RawOrientation {
    let catalog = Catalog::builtin();
    let obj = catalog.get(object_id).unwrap();
    let config = SessionConfig::default();
    let lst = local_sidereal_time(&instant, BANGKOK.longitude, config.julian_convention);
    let h = equatorial_to_horizontal(obj.ra, obj.dec, BANGKOK.latitude, lst);
    RawOrientation::new(h.azimuth, 90.0 - h.altitude, 0.0)
}

/// Orientation pointing roughly opposite `object_id`.
fn aim_away(object_id: &str, instant: DateTime<FixedOffset>) -> RawOrientation {
    let mut o = aim_at(object_id, instant);
    o.azimuth = (o.azimuth + 180.0) % 360.0;
    o
}

fn frame(secs: f64, orientation: RawOrientation) -> FrameInput {
    FrameInput::new(at_secs(secs))
        .with_orientation(orientation)
        .with_observer(BANGKOK)
}

fn engine() -> SkyEngine {
    SkyEngine::new(Catalog::builtin(), SessionConfig::default())
}

fn jupiter_mission() -> Mission {
    mission::find_builtin("m1").unwrap()
}

// ---- Projection pipeline ----

#[test]
fn test_aimed_object_projects_to_center() {
    let mut engine = engine();
    let snap = engine.tick(frame(0.0, aim_at("vega", t0())));

    let vega = snap.object("vega").unwrap();
    let center = snap.viewport.center();
    assert!((vega.screen.x - center.x).abs() < 1e-6, "x {}", vega.screen.x);
    assert!((vega.screen.y - center.y).abs() < 1e-6, "y {}", vega.screen.y);
    assert!(vega.screen.visible);
    assert_eq!(snap.objects.len(), Catalog::builtin().len());
}

#[test]
fn test_objects_behind_observer_are_not_visible() {
    let mut engine = engine();
    let snap = engine.tick(frame(0.0, aim_away("jupiter", t0())));
    assert!(!snap.object("jupiter").unwrap().screen.visible);
}

#[test]
fn test_orion_lines_visible_when_aimed_at_orion() {
    let mut engine = engine();
    let snap = engine.tick(frame(0.0, aim_at("alnilam", t0())));
    assert_eq!(snap.edges.len(), 7, "all Orion lines should be drawn");
    for edge in &snap.edges {
        assert!(edge.from_point.visible && edge.to_point.visible);
    }

    let mut engine = self::engine();
    let snap = engine.tick(frame(0.0, aim_away("alnilam", t0())));
    assert!(snap.edges.is_empty());
}

#[test]
fn test_horizontal_coordinates_in_range() {
    let mut engine = engine();
    let snap = engine.tick(frame(0.0, RawOrientation::new(10.0, 80.0, 0.0)));
    for obj in &snap.objects {
        assert!((-90.0..=90.0).contains(&obj.horizontal.altitude), "{}", obj.id);
        assert!((0.0..360.0).contains(&obj.horizontal.azimuth), "{}", obj.id);
    }
    assert!((0.0..360.0).contains(&snap.lst_deg));
}

#[test]
fn test_snapshots_deterministic_for_same_inputs() {
    let mut a = engine();
    let mut b = engine();
    a.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    b.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });

    for i in 0..120 {
        let secs = i as f64 / 60.0;
        let orientation = RawOrientation::new(290.0 + i as f64 * 0.1, 85.0, 3.0);
        let json_a = serde_json::to_string(&a.tick(frame(secs, orientation))).unwrap();
        let json_b = serde_json::to_string(&b.tick(frame(secs, orientation))).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at frame {i}");
    }
}

// ---- Sensors ----

#[test]
fn test_sensor_dropout_keeps_last_known_values() {
    let mut engine = engine();
    let aim = aim_at("sirius", t0());
    let first = engine.tick(frame(0.0, aim));

    // No new samples: boresight and observer hold.
    let second = engine.tick(FrameInput::new(at_secs(1.0 / 60.0)));
    assert_eq!(first.boresight, second.boresight);
    assert_eq!(second.observer, BANGKOK);
}

#[test]
fn test_no_samples_at_all_still_produces_frames() {
    let config = SessionConfig::default();
    let mut engine = engine();
    let snap = engine.tick(FrameInput::new(t0()));
    assert_eq!(snap.observer, config.default_observer);
    assert_eq!(snap.boresight.azimuth, 0.0);
    assert_eq!(snap.objects.len(), Catalog::builtin().len());
}

// ---- Dwell scenarios ----

#[test]
fn test_jupiter_dwell_completes_at_three_seconds() {
    let mut engine = engine();
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    let aim = aim_at("jupiter", t0());

    let mut completions = Vec::new();
    for secs in [0.0, 1.0, 2.0, 3.0, 4.0] {
        let snap = engine.tick(frame(secs, aim));
        assert!(snap.lock.centered, "jupiter should be centered at t={secs}");
        assert_eq!(snap.lock.target_object_id.as_deref(), Some("jupiter"));
        if let Some(event) = snap.completion {
            completions.push((secs, event));
        }
    }

    assert_eq!(completions.len(), 1);
    let (when, event) = &completions[0];
    assert!(*when >= 3.0, "completed too early at t={when}");
    assert_eq!(event.mission_id, "m1");
    assert_eq!(event.kind, CompletionKind::Dwell);
    assert!(engine.tracker().is_completed());
}

#[test]
fn test_progress_rises_while_centered() {
    let mut engine = engine();
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    let aim = aim_at("jupiter", t0());

    let mut last = -1.0;
    for i in 0..=90 {
        let snap = engine.tick(frame(i as f64 / 60.0, aim));
        assert!(snap.lock.progress > last || i == 0);
        assert!((0.0..=1.0).contains(&snap.lock.progress));
        assert_eq!(snap.lock.phase, DwellPhase::Dwelling);
        last = snap.lock.progress;
    }
    assert!((last - 0.5).abs() < 1e-9, "progress after 1.5 s of 3 s: {last}");
}

#[test]
fn test_looking_away_resets_dwell() {
    let mut engine = engine();
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    let aim = aim_at("jupiter", t0());
    let away = aim_away("jupiter", t0());

    for secs in [0.0, 1.0, 2.0] {
        engine.tick(frame(secs, aim));
    }

    // Jump the smoother away in one go by feeding many frames quickly.
    let mut secs = 2.0;
    let mut snap = engine.tick(frame(secs, away));
    while snap.lock.centered {
        secs += 0.01;
        snap = engine.tick(frame(secs, away));
    }
    assert!(secs < 2.9, "smoother took too long to leave the target");
    assert_eq!(snap.lock.progress, 0.0);
    assert_eq!(snap.lock.phase, DwellPhase::Idle);

    // Back on target: the full three seconds are needed again.
    let restart = 10.0;
    let mut engine_completed_at = None;
    let mut t = restart;
    // Warm the smoother back onto the target before counting.
    let mut snap = engine.tick(frame(t, aim));
    while !snap.lock.centered {
        t += 0.01;
        snap = engine.tick(frame(t, aim));
    }
    let centered_from = t;
    while engine_completed_at.is_none() && t < centered_from + 10.0 {
        t += 0.5;
        if engine.tick(frame(t, aim)).completion.is_some() {
            engine_completed_at = Some(t);
        }
    }
    let done = engine_completed_at.expect("should complete after a fresh dwell");
    assert!(done - centered_from >= 3.0 - 1e-9);
}

#[test]
fn test_mission_change_discards_progress() {
    let mut engine = engine();
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    let aim = aim_at("jupiter", t0());
    engine.tick(frame(0.0, aim));
    engine.tick(frame(2.5, aim));

    let mut retargeted = jupiter_mission();
    retargeted.id = "m1b".into();
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: retargeted,
    });
    let snap = engine.tick(frame(3.0, aim));
    assert!(snap.completion.is_none());
    assert_eq!(snap.lock.progress, 0.0);

    let snap = engine.tick(frame(6.0, aim));
    assert_eq!(snap.completion.map(|e| e.mission_id).as_deref(), Some("m1b"));
}

#[test]
fn test_reselecting_same_mission_starts_new_attempt() {
    let mut engine = engine();
    let aim = aim_at("jupiter", t0());
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    engine.tick(frame(0.0, aim));
    assert!(engine.tick(frame(3.0, aim)).completion.is_some());
    assert!(engine.tick(frame(6.0, aim)).completion.is_none());

    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    engine.tick(frame(7.0, aim));
    assert!(engine.tick(frame(10.0, aim)).completion.is_some());
}

#[test]
fn test_clear_mission_goes_idle() {
    let mut engine = engine();
    let aim = aim_at("jupiter", t0());
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    engine.tick(frame(0.0, aim));
    engine.queue_command(SessionCommand::ClearActiveMission);
    let snap = engine.tick(frame(5.0, aim));
    assert!(snap.completion.is_none());
    assert_eq!(snap.lock.target_object_id, None);
    assert!(!snap.lock.centered);
    assert!(snap.objects.iter().all(|o| !o.is_target));
}

#[test]
fn test_unknown_target_stays_idle() {
    let mut engine = engine();
    let ghost = Mission {
        id: "ghost".into(),
        title: "Nothing".into(),
        target_object_id: "not-in-catalog".into(),
        criterion: CompletionCriterion::TimedDwell { seconds: 1.0 },
        reward: Default::default(),
    };
    engine.queue_command(SessionCommand::SetActiveMission { mission: ghost });
    for secs in 0..5 {
        let snap = engine.tick(frame(secs as f64, aim_at("vega", t0())));
        assert!(!snap.lock.centered);
        assert!(snap.completion.is_none());
    }
}

#[test]
fn test_capture_mission_completes_on_signal_only() {
    let mut engine = engine();
    let capture = mission::find_builtin("m2").unwrap();
    let aim = aim_at("moon", t0());
    engine.queue_command(SessionCommand::SetActiveMission { mission: capture });

    for secs in 0..10 {
        let snap = engine.tick(frame(secs as f64, aim));
        assert!(snap.completion.is_none(), "capture mission must not dwell");
        assert_eq!(snap.lock.phase, DwellPhase::Idle);
    }

    engine.queue_command(SessionCommand::SignalCapture {
        mission_id: "m2".into(),
    });
    let snap = engine.tick(frame(10.0, aim));
    let event = snap.completion.expect("capture should complete");
    assert_eq!(event.kind, CompletionKind::Captured);

    engine.queue_command(SessionCommand::SignalCapture {
        mission_id: "m2".into(),
    });
    assert!(engine.tick(frame(11.0, aim)).completion.is_none());
}

#[test]
fn test_end_session_discards_dwell() {
    let mut engine = engine();
    let aim = aim_at("jupiter", t0());
    engine.queue_command(SessionCommand::SetActiveMission {
        mission: jupiter_mission(),
    });
    engine.tick(frame(0.0, aim));
    engine.tick(frame(2.0, aim));
    engine.end_session();

    assert_eq!(engine.tracker().phase(), DwellPhase::Idle);
    assert!(engine.active_mission().is_none());
    let snap = engine.tick(frame(3.0, aim));
    assert!(snap.completion.is_none());
    assert_eq!(snap.lock.target_object_id, None);
}

// ---- View commands ----

#[test]
fn test_field_of_view_is_clamped() {
    let mut engine = engine();
    engine.queue_command(SessionCommand::SetFieldOfView { degrees: 500.0 });
    assert_eq!(engine.tick(FrameInput::new(t0())).fov_deg, 120.0);
    engine.queue_command(SessionCommand::SetFieldOfView { degrees: 1.0 });
    assert_eq!(engine.tick(FrameInput::new(t0())).fov_deg, 10.0);
    engine.queue_command(SessionCommand::SetFieldOfView { degrees: f64::NAN });
    assert_eq!(engine.tick(FrameInput::new(t0())).fov_deg, 10.0);
}

#[test]
fn test_resize_moves_center() {
    let mut engine = engine();
    engine.queue_command(SessionCommand::ResizeViewport {
        width: 800.0,
        height: 600.0,
    });
    let snap = engine.tick(frame(0.0, aim_at("vega", t0())));
    let vega = snap.object("vega").unwrap();
    assert!((vega.screen.x - 400.0).abs() < 1e-6);
    assert!((vega.screen.y - 300.0).abs() < 1e-6);

    engine.queue_command(SessionCommand::ResizeViewport {
        width: 0.0,
        height: 600.0,
    });
    assert_eq!(engine.tick(FrameInput::new(t0())).viewport.width, 800.0);
}

#[test]
fn test_malformed_catalog_records_do_not_stop_frames() {
    let json = r#"{ "objects": [
        { "id": "ok", "ra": 10.0, "dec": 10.0 },
        { "id": "bad", "ra": 10.0 }
    ] }"#;
    let (catalog, report) = Catalog::from_json_str(json).unwrap();
    assert_eq!(report.issues.len(), 1);

    let mut engine = SkyEngine::new(catalog, SessionConfig::default());
    let snap = engine.tick(FrameInput::new(t0()));
    assert_eq!(snap.objects.len(), 1);
    assert_eq!(snap.objects[0].id, "ok");
}
