//! mp-gateway: Meta page backend main binary
//!
//! Usage:
//!   mp-gateway                   - Start the HTTP server
//!   mp-gateway --config <path>   - Start with an explicit config file
//!   mp-gateway --help            - Show help

use std::path::PathBuf;

use mp_core::Config;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Serve the webhook and proxy endpoints
    Server { config_path: Option<PathBuf> },
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("mp-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server { config_path } => config_path,
    };

    // Load .env file before the log filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting mp-gateway...");
    tracing::info!("Graph API version: {}", config.meta.api_version);

    mp_api::start_server(config).await
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> anyhow::Result<RunMode>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(RunMode::Server { config_path })
}

/// Print help message
fn print_help() {
    println!("mp-gateway - Meta page webhook relay");
    println!();
    println!("Usage:");
    println!("  mp-gateway                  Start the HTTP server");
    println!("  mp-gateway --config <path>  Read settings from a TOML file");
    println!("  mp-gateway --help           Show this help message");
    println!("  mp-gateway --version        Show version");
    println!();
    println!("Environment Variables:");
    println!("  PAGE_ID                Managed page id (required)");
    println!("  PAGE_ACCESS_TOKEN      Page access token (required)");
    println!("  API_VERSION            Graph API version (default: v18.0)");
    println!("  META_VERIFY_TOKEN      Webhook verify token (default: ren_verify_12345)");
    println!("  GRAPH_BASE_URL         Graph API host (default: https://graph.facebook.com)");
    println!("  TRIGGER_TEST_PHRASE    Text answered with the promotion sequence");
    println!("  TRIGGER_BOOKING_LABEL  Postback title answered with the booking link");
    println!("  API_PORT               HTTP port (default: 3000)");
    println!("  RUST_LOG               Log filter (default: info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_is_server() {
        assert_eq!(
            parse_args(args(&[])).unwrap(),
            RunMode::Server { config_path: None }
        );
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            parse_args(args(&["--config", "prod.toml"])).unwrap(),
            RunMode::Server {
                config_path: Some(PathBuf::from("prod.toml"))
            }
        );
        assert!(parse_args(args(&["--config"])).is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(args(&["-h"])).unwrap(), RunMode::Help);
        assert_eq!(parse_args(args(&["--version"])).unwrap(), RunMode::Version);
    }

    #[test]
    fn test_unknown_argument() {
        assert!(parse_args(args(&["--cli"])).is_err());
    }
}
