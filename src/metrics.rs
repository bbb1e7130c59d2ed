// Pure metric calculators: raw counters -> percentages and human-scaled units.
// All percentage clamping happens here, never in the adapters or routes.

use crate::models::{MemoryUsage, UptimeBreakdown};

const MIB: f64 = 1024.0 * 1024.0;
const TIB: f64 = 1024.0 * 1024.0 * 1024.0 * 1024.0;

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// CPU percent from two samples of Docker-style cumulative counters.
///
/// `((cur_total - prev_total) / (cur_system - prev_system)) * online_cpus * 100`, rounded to
/// two decimals and clamped to `[0, 100 * online_cpus]`. Returns 0 when the system delta is
/// zero or negative, or when no CPUs are reported online.
pub fn cpu_percent(
    cur_total_usage: u64,
    prev_total_usage: u64,
    cur_system_usage: u64,
    prev_system_usage: u64,
    online_cpus: u32,
) -> f64 {
    let system_delta = cur_system_usage as i128 - prev_system_usage as i128;
    if system_delta <= 0 || online_cpus == 0 {
        return 0.0;
    }
    let cpu_delta = cur_total_usage as i128 - prev_total_usage as i128;
    let online = online_cpus as f64;
    let percent = (cpu_delta as f64 / system_delta as f64) * online * 100.0;
    round2(percent.clamp(0.0, 100.0 * online))
}

/// Memory usage in whole MiB plus percent of limit. Zeroes when the limit is 0.
pub fn memory_usage(used_bytes: u64, limit_bytes: u64) -> MemoryUsage {
    if limit_bytes == 0 {
        return MemoryUsage::default();
    }
    MemoryUsage {
        used: (used_bytes as f64 / MIB).round() as u64,
        limit: (limit_bytes as f64 / MIB).round() as u64,
        percent: percent_of(used_bytes, limit_bytes),
    }
}

/// `part / whole * 100`, rounded to two decimals, clamped to [0, 100]; 0 when `whole` is 0.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2((part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0))
}

/// Split an uptime in seconds into whole days, hours and minutes.
pub fn uptime_breakdown(secs: u64) -> UptimeBreakdown {
    UptimeBreakdown {
        days: secs / 86_400,
        hours: (secs % 86_400) / 3_600,
        minutes: (secs % 3_600) / 60,
    }
}

/// Bytes as terabytes (binary), two decimals, e.g. "1.50 TB".
pub fn human_terabytes(bytes: u64) -> String {
    format!("{:.2} TB", bytes as f64 / TIB)
}
