//! Configuration: validated run settings and the `.richcluster.toml` loader

mod core;
mod loader;

pub use self::core::{
    default_distance_cutoff, default_distance_metric, default_gene_delimiter,
    default_include_unclustered, default_linkage_method, default_linkage_threshold,
    default_parallel, ClusterConfig, ClusteringSettings, InputSettings, OutputSettings,
    RichClusterConfig,
};
pub use self::loader::{
    default_config_toml, directory_ancestors, discover_config_path, load_config,
    load_config_from_path, parse_and_validate_config, CONFIG_FILE_NAME,
};
