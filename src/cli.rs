use clap::Parser;
use std::path::PathBuf;

/// Dupi - turn an interface definition into a live mock-data endpoint
#[derive(Parser, Debug, Clone)]
#[command(name = "dupi", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "DUPI_CONFIG", default_value = "dupi.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "DUPI_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "DUPI_PORT")]
    pub port: Option<u16>,

    /// Public base URL used when reporting mock endpoint URLs
    #[arg(long, env = "DUPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Largest array generated for `[]` fields
    #[arg(long, env = "DUPI_MAX_ARRAY_SIZE")]
    pub max_array_size: Option<usize>,
}
