use serde::{Deserialize, Serialize};

use super::NO_FIFO_INDEX;

/// Module singleton: id counter and the two ends of the expiry queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub next_id: u64,
    pub fifo_head_index: String,
    pub fifo_tail_index: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            next_id: 1,
            fifo_head_index: NO_FIFO_INDEX.to_string(),
            fifo_tail_index: NO_FIFO_INDEX.to_string(),
        }
    }
}
