// Canonical records shared by the adapters and the HTTP layer

mod container;
mod envelope;
mod network;
mod storage;
mod system;

pub use container::{
    ContainerGroup, ContainerRecord, ContainerState, MemoryUsage, PortMapping,
    TRAEFIK_HTTPS_RULE_LABEL, normalize_name, ports_summary, published_ports, traefik_url,
};
pub use envelope::{
    ActionResponse, ApiResponse, ContainerListResponse, GroupsResponse, OverviewResponse,
};
pub use network::{
    DEVICE_STATE_ONLINE, NetworkDevice, NetworkReport, NetworkSummary, SubsystemHealth,
    UptimeBreakdown,
};
pub use storage::{StorageVolume, SynologyOverview};
pub use system::SystemSnapshot;
