// Local host snapshot via sysinfo

use crate::models::SystemSnapshot;
use std::sync::{Arc, Mutex};
use sysinfo::System;
use tracing::instrument;

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Arc::new(Mutex::new(sys)),
        }
    }

    /// Hostname, platform, uptime, logical CPUs, memory and load averages, read now.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_system_snapshot"))]
    pub async fn get_system_snapshot(&self) -> anyhow::Result<SystemSnapshot> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let load = System::load_average();
            Ok(SystemSnapshot {
                hostname: System::host_name().unwrap_or_default(),
                platform: std::env::consts::OS.to_string(),
                uptime: System::uptime(),
                cpus: sys.cpus().len() as u32,
                total_memory: sys.total_memory(),
                free_memory: sys.available_memory(),
                load_average: [load.one, load.five, load.fifteen],
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}
