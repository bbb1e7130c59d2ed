// Process a raw Docker stats API response into per-container usage.

use crate::metrics;
use crate::models::MemoryUsage;
use bollard::models::ContainerStatsResponse;

/// Usage figures for one running container. All zero when stats are unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageSample {
    pub cpu_usage: f64,
    pub memory_usage: MemoryUsage,
    pub network_rx: u64,
    pub network_tx: u64,
}

/// Reduce one non-streaming stats response (which carries both `cpu_stats` and
/// `precpu_stats`) to a [`UsageSample`]. CPU is 0 when either sample is missing.
pub(crate) fn process_statistics(s: &ContainerStatsResponse) -> UsageSample {
    let cpu_usage = match (s.cpu_stats.as_ref(), s.precpu_stats.as_ref()) {
        (Some(cpu), Some(precpu)) => metrics::cpu_percent(
            cpu.cpu_usage
                .as_ref()
                .and_then(|u| u.total_usage)
                .unwrap_or(0),
            precpu
                .cpu_usage
                .as_ref()
                .and_then(|u| u.total_usage)
                .unwrap_or(0),
            cpu.system_cpu_usage.unwrap_or(0),
            precpu.system_cpu_usage.unwrap_or(0),
            cpu.online_cpus.unwrap_or(1) as u32,
        ),
        _ => 0.0,
    };

    let mem_usage = s.memory_stats.as_ref().and_then(|m| m.usage).unwrap_or(0);
    let mem_limit = s.memory_stats.as_ref().and_then(|m| m.limit).unwrap_or(0);

    let (network_rx, network_tx) = s.networks.as_ref().map_or((0u64, 0u64), |n| {
        let mut rx = 0u64;
        let mut tx = 0u64;
        for v in n.values() {
            rx = rx.saturating_add(v.rx_bytes.unwrap_or(0));
            tx = tx.saturating_add(v.tx_bytes.unwrap_or(0));
        }
        (rx, tx)
    });

    UsageSample {
        cpu_usage,
        memory_usage: metrics::memory_usage(mem_usage, mem_limit),
        network_rx,
        network_tx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::{
        ContainerCpuStats, ContainerCpuUsage, ContainerMemoryStats, ContainerNetworkStats,
        ContainerStatsResponse,
    };
    use std::collections::HashMap;

    fn minimal_cpu_stats(total_usage: u64, system_cpu_usage: u64) -> ContainerCpuStats {
        ContainerCpuStats {
            cpu_usage: Some(ContainerCpuUsage {
                total_usage: Some(total_usage),
                ..Default::default()
            }),
            system_cpu_usage: Some(system_cpu_usage),
            online_cpus: Some(2),
            throttling_data: None,
        }
    }

    fn net(rx: u64, tx: u64) -> ContainerNetworkStats {
        ContainerNetworkStats {
            rx_bytes: Some(rx),
            tx_bytes: Some(tx),
            ..Default::default()
        }
    }

    #[test]
    fn process_statistics_zero_cpu_when_precpu_missing() {
        let s = ContainerStatsResponse {
            cpu_stats: Some(minimal_cpu_stats(100, 1000)),
            precpu_stats: None,
            ..Default::default()
        };
        assert_eq!(process_statistics(&s).cpu_usage, 0.0);
    }

    #[test]
    fn process_statistics_computes_cpu_memory_and_network() {
        let s = ContainerStatsResponse {
            cpu_stats: Some(minimal_cpu_stats(100_000_000, 1_000_000_000)),
            precpu_stats: Some(minimal_cpu_stats(50_000_000, 500_000_000)),
            memory_stats: Some(ContainerMemoryStats {
                usage: Some(256 * 1024 * 1024),
                limit: Some(512 * 1024 * 1024),
                ..Default::default()
            }),
            networks: Some(HashMap::from([
                ("eth0".to_string(), net(1000, 2000)),
                ("eth1".to_string(), net(10, 20)),
            ])),
            ..Default::default()
        };
        let out = process_statistics(&s);
        assert_eq!(out.cpu_usage, 20.0);
        assert_eq!(out.memory_usage.used, 256);
        assert_eq!(out.memory_usage.limit, 512);
        assert_eq!(out.memory_usage.percent, 50.0);
        assert_eq!(out.network_rx, 1010);
        assert_eq!(out.network_tx, 2020);
    }

    #[test]
    fn process_statistics_zero_system_delta_returns_zero_cpu_percent() {
        let s = ContainerStatsResponse {
            cpu_stats: Some(minimal_cpu_stats(100, 500)),
            precpu_stats: Some(minimal_cpu_stats(50, 500)),
            ..Default::default()
        };
        assert_eq!(process_statistics(&s).cpu_usage, 0.0);
    }

    #[test]
    fn process_statistics_empty_response_is_all_zero() {
        let out = process_statistics(&ContainerStatsResponse::default());
        assert_eq!(out, UsageSample::default());
    }

    #[test]
    fn process_statistics_network_sum_saturates() {
        let s = ContainerStatsResponse {
            networks: Some(HashMap::from([
                ("eth0".to_string(), net(u64::MAX, 1)),
                ("eth1".to_string(), net(5, 2)),
            ])),
            ..Default::default()
        };
        let out = process_statistics(&s);
        assert_eq!(out.network_rx, u64::MAX);
        assert_eq!(out.network_tx, 3);
    }
}
