use anyhow::Result;
use richcluster::cli::{self, Commands};
use richcluster::commands::{self, ClusterCommand, ClusterOverrides};

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        command @ Commands::Cluster { .. } => handle_cluster_command(command),
        Commands::Init { force } => {
            cli::init_runtime(0);
            commands::init_config(force)
        }
    }
}

fn handle_cluster_command(command: Commands) -> Result<()> {
    let Commands::Cluster {
        input,
        config,
        distance_metric,
        distance_cutoff,
        linkage_method,
        linkage_threshold,
        delimiter,
        min_membership,
        max_passes,
        format,
        output,
        no_singletons,
        matrix,
        no_parallel,
        jobs,
        verbosity,
    } = command
    else {
        anyhow::bail!("Invalid command");
    };

    cli::init_runtime(verbosity);
    cli::configure_thread_pool(jobs);

    commands::handle_cluster(ClusterCommand {
        input,
        config,
        overrides: ClusterOverrides {
            distance_metric,
            distance_cutoff,
            linkage_method,
            linkage_threshold,
            gene_delimiter: delimiter,
            min_membership,
            no_parallel,
            no_singletons,
        },
        max_passes,
        format,
        output,
        include_matrix: matrix,
    })
}
