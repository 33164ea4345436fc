use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mf_explorer::api::{ServerConfig, run_http_server};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "mf_explorer=info";

#[derive(Parser, Debug)]
#[command(
    name = "mf-explorer",
    about = "Mutual fund NAV explorer with SIP, lumpsum and SWP simulators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API over HTTP.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "MFX_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,
    #[arg(long, env = "MFX_PORT", default_value_t = 8080)]
    port: u16,
    #[arg(
        long,
        env = "MFX_DATA_DIR",
        default_value = "./data",
        help = "Directory holding schemes.json and schemes/<code>.json"
    )]
    data_dir: PathBuf,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        ServerConfig {
            addr: SocketAddr::new(args.host, args.port),
            data_dir: args.data_dir,
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Serve(args) => {
            if let Err(e) = run_http_server(args.into()).await {
                tracing::error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_accepts_explicit_flags() {
        let cli = Cli::try_parse_from([
            "mf-explorer",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--data-dir",
            "/srv/nav",
        ])
        .expect("valid args");
        let Command::Serve(args) = cli.command;
        let config = ServerConfig::from(args);
        assert_eq!(config.addr, "127.0.0.1:9000".parse::<SocketAddr>().expect("socket addr"));
        assert_eq!(config.data_dir, PathBuf::from("/srv/nav"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["mf-explorer"]).is_err());
    }
}
