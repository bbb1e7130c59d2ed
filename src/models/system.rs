// Local host snapshot

use serde::{Deserialize, Serialize};

/// Direct read of host counters at request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    pub hostname: String,
    pub platform: String,
    pub uptime: u64,
    pub cpus: u32,
    pub total_memory: u64,
    pub free_memory: u64,
    /// 1, 5 and 15 minute load averages.
    pub load_average: [f64; 3],
}
