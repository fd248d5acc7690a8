use clap::{Parser, Subcommand};
use collab_graph::config::load_config_from;
use collab_graph::db::client::{attach_source_db, open_graph_db};
use collab_graph::graph::store::SocialGraph;
use collab_graph::ingestion::pipeline::build_graph;
use collab_graph::logger::{self, init_logger, StdoutLogger};
use collab_graph::server::HttpServer;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "collab-graph")]
#[command(about = "Collaboration Graph Build & Query Engine", long_about = None)]
struct Cli {
    /// Path to the SQLite graph database
    #[arg(long, default_value = "./graph.db")]
    db_path: String,

    /// Path to the configuration file
    #[arg(long, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the graph from the configured collaboration source
    Build,
    /// Serve the neighborhood query API
    Serve {
        /// Port to listen on (overrides the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logger(StdoutLogger);

    let cli = Cli::parse();
    let config = load_config_from(&cli.config)?;

    match cli.command {
        Commands::Build => {
            let conn = open_graph_db(Path::new(&cli.db_path))?;
            if config.ingestion.source_db != cli.db_path {
                attach_source_db(&conn, Path::new(&config.ingestion.source_db))?;
            }
            let conn = Arc::new(Mutex::new(conn));

            let cancel = CancellationToken::new();
            let interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    logger::warn("Interrupt received, stopping at the next batch boundary");
                    interrupt.cancel();
                }
            });

            let summary = build_graph(conn, &config.ingestion, cancel).await?;
            logger::info(&format!(
                "Graph build complete: {} nodes, {} edges",
                summary.nodes_written, summary.edges_written
            ));
        }
        Commands::Serve { port } => {
            let graph = Arc::new(SocialGraph::open(Path::new(&cli.db_path))?);
            let port = port.unwrap_or(config.server.port);

            HttpServer::new(graph, port).start().await?;
        }
    }

    Ok(())
}
