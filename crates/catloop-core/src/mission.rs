//! Missions: objectives gated on aiming at a target.
//!
//! Owned by the external mission controller. The tracker only reads the
//! target id and the completion criterion; rewards pass through untouched.

use serde::{Deserialize, Serialize};

/// How a mission is completed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CompletionCriterion {
    /// Hold the target centered for `seconds`.
    TimedDwell { seconds: f64 },
    /// Completed by the caller (a photo capture); never timed.
    Capture,
}

/// Reward bookkeeping, opaque to the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    #[serde(default)]
    pub badge_id: Option<String>,
    #[serde(default)]
    pub unlock_knowledge_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub target_object_id: String,
    pub criterion: CompletionCriterion,
    #[serde(default)]
    pub reward: Reward,
}

impl Mission {
    /// Required dwell time, if this mission is completed by dwelling.
    /// A non-positive or non-finite duration is not a usable dwell mission.
    pub fn dwell_seconds(&self) -> Option<f64> {
        match self.criterion {
            CompletionCriterion::TimedDwell { seconds } if seconds.is_finite() && seconds > 0.0 => {
                Some(seconds)
            }
            _ => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self.criterion, CompletionCriterion::Capture)
    }
}

/// Missions shipped with the app.
pub fn builtin() -> Vec<Mission> {
    vec![
        Mission {
            id: "m1".into(),
            title: "Solar Sentinel".into(),
            target_object_id: "jupiter".into(),
            criterion: CompletionCriterion::TimedDwell { seconds: 3.0 },
            reward: Reward {
                xp: 120,
                badge_id: Some("b1".into()),
                unlock_knowledge_ids: vec!["k1".into()],
            },
        },
        Mission {
            id: "m2".into(),
            title: "Lunar Gaze".into(),
            target_object_id: "moon".into(),
            criterion: CompletionCriterion::Capture,
            reward: Reward {
                xp: 150,
                badge_id: Some("b2".into()),
                unlock_knowledge_ids: vec!["k2".into()],
            },
        },
        Mission {
            id: "m3".into(),
            title: "Hunter of Orion".into(),
            target_object_id: "betelgeuse".into(),
            criterion: CompletionCriterion::TimedDwell { seconds: 5.0 },
            reward: Reward {
                xp: 200,
                badge_id: Some("b3".into()),
                unlock_knowledge_ids: vec!["k3".into()],
            },
        },
    ]
}

/// Look up a built-in mission by id.
pub fn find_builtin(id: &str) -> Option<Mission> {
    builtin().into_iter().find(|m| m.id == id)
}
