//! Events emitted by the tracker for the app shell.

use serde::{Deserialize, Serialize};

use crate::enums::CompletionKind;

/// A mission objective was met. Emitted at most once per attempt;
/// granting rewards idempotently is the consumer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub mission_id: String,
    pub kind: CompletionKind,
    /// Frame on which the completion happened.
    pub frame: u64,
}
