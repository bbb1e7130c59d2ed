// Library for tests to access modules

pub mod categories;
pub mod config;
pub mod docker_repo;
pub mod error;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod synology_repo;
pub mod sysinfo_repo;
pub mod unifi_repo;
pub mod version;
