//! Static sky catalog: objects and constellation line figures.
//!
//! A catalog is loaded once per session and never changes afterwards.
//! Bad records are skipped one at a time and reported; they never fail
//! the whole load.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{MARKER_FAINT_LIMIT_MAG, MARKER_MIN_RADIUS_PX, MARKER_PX_PER_MAG};
use crate::enums::ObjectKind;
use crate::error::CatalogError;

/// A validated catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub id: String,
    pub name: String,
    /// Right ascension (degrees, [0, 360)).
    pub ra: f64,
    /// Declination (degrees, [-90, 90]).
    pub dec: f64,
    /// Apparent magnitude; lower is brighter.
    pub magnitude: f64,
    /// Display color as a CSS hex string.
    pub color: String,
    pub kind: ObjectKind,
}

/// A line between two catalog objects, by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstellationEdge {
    pub from: String,
    pub to: String,
}

/// A named line figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub id: String,
    pub name: String,
    pub lines: Vec<ConstellationEdge>,
}

/// Object record as it appears in a catalog document, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ra: Option<f64>,
    #[serde(default)]
    pub dec: Option<f64>,
    #[serde(default, alias = "mag")]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub kind: ObjectKind,
}

/// Raw catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
    #[serde(default)]
    pub constellations: Vec<Constellation>,
}

/// Why a record was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CatalogIssue {
    EmptyId { index: usize },
    DuplicateId { id: String },
    MissingCoordinate { id: String, field: &'static str },
    OutOfRange { id: String, field: &'static str, value: f64 },
    UnknownEdgeEndpoint { constellation: String, id: String },
}

/// Records skipped while building a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogReport {
    pub issues: Vec<CatalogIssue>,
}

/// A validated, immutable catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    objects: Vec<CelestialObject>,
    constellations: Vec<Constellation>,
}

impl CelestialObject {
    /// Marker radius hint in pixels: brighter objects draw larger.
    pub fn marker_radius(&self) -> f64 {
        ((MARKER_FAINT_LIMIT_MAG - self.magnitude) * MARKER_PX_PER_MAG).max(MARKER_MIN_RADIUS_PX)
    }
}

impl ConstellationEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl Catalog {
    /// Parse and validate a JSON catalog document.
    pub fn from_json_str(json: &str) -> Result<(Self, CatalogReport), CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }

    /// Read, parse and validate a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, CatalogReport), CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validate a raw document. Every skipped record is logged and reported.
    pub fn from_document(doc: CatalogDocument) -> (Self, CatalogReport) {
        let mut report = CatalogReport::default();
        let mut seen = HashSet::new();
        let mut objects = Vec::with_capacity(doc.objects.len());

        for (index, record) in doc.objects.into_iter().enumerate() {
            match validate_record(index, record, &seen) {
                Ok(object) => {
                    seen.insert(object.id.clone());
                    objects.push(object);
                }
                Err(issue) => {
                    warn!(?issue, "skipping catalog object");
                    report.issues.push(issue);
                }
            }
        }

        let constellations = doc
            .constellations
            .into_iter()
            .map(|c| {
                let mut lines = Vec::with_capacity(c.lines.len());
                for edge in c.lines {
                    let unknown = [&edge.from, &edge.to]
                        .into_iter()
                        .find(|id| !seen.contains(id.as_str()))
                        .cloned();
                    match unknown {
                        Some(id) => {
                            let issue = CatalogIssue::UnknownEdgeEndpoint {
                                constellation: c.id.clone(),
                                id,
                            };
                            warn!(?issue, "skipping constellation line");
                            report.issues.push(issue);
                        }
                        None => lines.push(edge),
                    }
                }
                Constellation {
                    id: c.id,
                    name: c.name,
                    lines,
                }
            })
            .collect();

        (
            Self {
                objects,
                constellations,
            },
            report,
        )
    }

    /// Objects in catalog order.
    pub fn objects(&self) -> &[CelestialObject] {
        &self.objects
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    /// All constellation lines, flattened in catalog order.
    pub fn edges(&self) -> impl Iterator<Item = &ConstellationEdge> {
        self.constellations.iter().flat_map(|c| c.lines.iter())
    }

    pub fn get(&self, id: &str) -> Option<&CelestialObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The bright-star set shipped with the app, with the Orion figure.
    pub fn builtin() -> Self {
        let objects = [
            ("sirius", "Sirius", 101.28, -16.71, -1.46, ObjectKind::Star, "#ffffff"),
            ("jupiter", "Jupiter", 65.5, 22.1, -2.5, ObjectKind::Planet, "#ffccaa"),
            ("mars", "Mars", 155.0, 10.0, 0.1, ObjectKind::Planet, "#ff6666"),
            ("saturn", "Saturn", 330.0, -12.0, 0.7, ObjectKind::Planet, "#ffeeb3"),
            ("vega", "Vega", 279.23, 38.78, 0.03, ObjectKind::Star, "#eef2ff"),
            ("moon", "Moon", 180.0, -10.0, -12.0, ObjectKind::Moon, "#f0f0f0"),
            ("canopus", "Canopus", 95.98, -52.69, -0.74, ObjectKind::Star, "#fff9e6"),
            ("arcturus", "Arcturus", 213.91, 19.18, -0.05, ObjectKind::Star, "#ffcc99"),
            ("rigel", "Rigel", 78.63, -8.20, 0.12, ObjectKind::Star, "#b3d9ff"),
            ("betelgeuse", "Betelgeuse", 88.79, 7.40, 0.42, ObjectKind::Star, "#ff6666"),
            ("bellatrix", "Bellatrix", 81.28, 6.35, 1.64, ObjectKind::Star, "#ffffff"),
            ("alnilam", "Alnilam", 84.05, -1.20, 1.69, ObjectKind::Star, "#ffffff"),
            ("alnitak", "Alnitak", 84.69, -1.94, 1.74, ObjectKind::Star, "#ffffff"),
            ("mintaka", "Mintaka", 83.00, -0.30, 2.25, ObjectKind::Star, "#ffffff"),
        ]
        .into_iter()
        .map(|(id, name, ra, dec, magnitude, kind, color)| CelestialObject {
            id: id.into(),
            name: name.into(),
            ra,
            dec,
            magnitude,
            color: color.into(),
            kind,
        })
        .collect();

        let orion = Constellation {
            id: "orion".into(),
            name: "Orion".into(),
            lines: [
                ("betelgeuse", "bellatrix"),
                ("bellatrix", "mintaka"),
                ("mintaka", "alnilam"),
                ("alnilam", "alnitak"),
                ("alnitak", "rigel"),
                ("rigel", "alnitak"),
                ("betelgeuse", "alnitak"),
            ]
            .into_iter()
            .map(|(from, to)| ConstellationEdge::new(from, to))
            .collect(),
        };

        Self {
            objects,
            constellations: vec![orion],
        }
    }
}

fn validate_record(
    index: usize,
    record: ObjectRecord,
    seen: &HashSet<String>,
) -> Result<CelestialObject, CatalogIssue> {
    if record.id.trim().is_empty() {
        return Err(CatalogIssue::EmptyId { index });
    }
    if seen.contains(&record.id) {
        return Err(CatalogIssue::DuplicateId { id: record.id });
    }

    let id = record.id;
    let require = |value: Option<f64>, field: &'static str| {
        value.ok_or_else(|| CatalogIssue::MissingCoordinate {
            id: id.clone(),
            field,
        })
    };
    let ra = require(record.ra, "ra")?;
    let dec = require(record.dec, "dec")?;
    let magnitude = record.magnitude.unwrap_or(MARKER_FAINT_LIMIT_MAG);

    let out_of_range = |field: &'static str, value: f64| CatalogIssue::OutOfRange {
        id: id.clone(),
        field,
        value,
    };
    if !ra.is_finite() || !(0.0..360.0).contains(&ra) {
        return Err(out_of_range("ra", ra));
    }
    if !dec.is_finite() || !(-90.0..=90.0).contains(&dec) {
        return Err(out_of_range("dec", dec));
    }
    if !magnitude.is_finite() {
        return Err(out_of_range("magnitude", magnitude));
    }

    Ok(CelestialObject {
        name: record.name.unwrap_or_else(|| id.clone()),
        id,
        ra,
        dec,
        magnitude,
        color: record.color.unwrap_or_else(|| "#ffffff".into()),
        kind: record.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 14);
        for edge in catalog.edges() {
            assert!(catalog.get(&edge.from).is_some(), "unknown {}", edge.from);
            assert!(catalog.get(&edge.to).is_some(), "unknown {}", edge.to);
        }
        assert_eq!(catalog.get("moon").map(|o| o.kind), Some(ObjectKind::Moon));
    }

    #[test]
    fn test_builtin_orion_figure() {
        let catalog = Catalog::builtin();
        let lines: Vec<(&str, &str)> = catalog
            .edges()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(lines.len(), 7);
        assert!(lines.contains(&("alnitak", "rigel")));
        assert!(lines.contains(&("rigel", "alnitak")));
    }

    #[test]
    fn test_malformed_records_are_skipped_individually() {
        let json = r#"{
            "objects": [
                { "id": "vega", "name": "Vega", "ra": 279.23, "dec": 38.78, "mag": 0.03 },
                { "id": "nora", "dec": 10.0 },
                { "id": "wide", "ra": 360.0, "dec": 0.0 },
                { "id": "deep", "ra": 10.0, "dec": -91.0 },
                { "id": "", "ra": 10.0, "dec": 0.0 },
                { "id": "vega", "ra": 1.0, "dec": 1.0 },
                { "id": "mars", "ra": 155.0, "dec": 10.0, "kind": "planet" }
            ],
            "constellations": [
                { "id": "c", "name": "C", "lines": [
                    { "from": "vega", "to": "mars" },
                    { "from": "vega", "to": "wide" }
                ] }
            ]
        }"#;

        let (catalog, report) = Catalog::from_json_str(json).unwrap();

        let ids: Vec<&str> = catalog.objects().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["vega", "mars"]);
        assert_eq!(catalog.get("mars").unwrap().kind, ObjectKind::Planet);
        assert_eq!(catalog.get("vega").unwrap().ra, 279.23);
        assert_eq!(catalog.edges().count(), 1);

        assert_eq!(report.issues.len(), 6);
        assert!(report.issues.contains(&CatalogIssue::MissingCoordinate {
            id: "nora".into(),
            field: "ra",
        }));
        assert!(report.issues.contains(&CatalogIssue::OutOfRange {
            id: "wide".into(),
            field: "ra",
            value: 360.0,
        }));
        assert!(report.issues.contains(&CatalogIssue::DuplicateId { id: "vega".into() }));
        assert!(report.issues.contains(&CatalogIssue::EmptyId { index: 4 }));
        assert!(report.issues.contains(&CatalogIssue::UnknownEdgeEndpoint {
            constellation: "c".into(),
            id: "wide".into(),
        }));
    }

    #[test]
    fn test_broken_document_is_an_error() {
        assert!(matches!(
            Catalog::from_json_str("{ objects: "),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_marker_radius_scales_with_brightness() {
        let catalog = Catalog::builtin();
        let sirius = catalog.get("sirius").unwrap();
        let mintaka = catalog.get("mintaka").unwrap();
        assert!(sirius.marker_radius() > mintaka.marker_radius());

        let mut faint = mintaka.clone();
        faint.magnitude = 6.5;
        assert_eq!(faint.marker_radius(), MARKER_MIN_RADIUS_PX);
    }
}
