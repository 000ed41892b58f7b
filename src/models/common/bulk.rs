use serde::{Deserialize, Serialize};

/// Outcome of a best-effort bulk update.
///
/// The underlying store does not update many rows atomically, so callers get
/// the real matched/modified counts instead of a boolean that would imply an
/// all-or-nothing guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdate {
    pub matched: u64,
    pub modified: u64,
}
