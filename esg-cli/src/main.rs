//! ESG CLI - command line dashboard for company energy and soil-carbon reporting.

use clap::Parser;
use esg_api::client::{ClientConfig, DEFAULT_BASE_URL};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "esg-cli",
    version,
    about = "ESG energy and soil-carbon reporting dashboard"
)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "ESG_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Bearer token for authenticated endpoints
    #[arg(long, global = true, env = "ESG_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: esg_cmd::Command,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.client_config();
    match esg_cmd::run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_build_config() {
        let cli = Cli::try_parse_from([
            "esg-cli",
            "energy",
            "--company",
            "kse-001",
            "--base-url",
            "https://esg.example.com",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        let config = cli.client_config();
        assert_eq!(config.base_url, "https://esg.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
