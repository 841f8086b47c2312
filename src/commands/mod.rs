//! CLI command implementations.
//!
//! - **cluster**: load terms, run the clustering engine and write a report
//! - **init**: write a default `.richcluster.toml`

pub mod cluster;
pub mod init;

pub use cluster::{handle_cluster, ClusterCommand, ClusterOverrides};
pub use init::init_config;
