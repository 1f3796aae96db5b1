// Command-line configuration

use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser};
use std::net::SocketAddr;
use std::path::PathBuf;
use stockroom_core::logging::{LogConfig, LogFormat, LogLevel, LogOutput};

/// Inventory REST API with photo uploads
#[derive(Parser, Debug, Clone)]
#[command(name = "stockroom")]
#[command(version)]
#[command(about = "Inventory REST API with photo uploads")]
#[command(disable_help_flag = true)]
pub struct ServerConfig {
    /// Address to bind (name or IP)
    #[arg(short = 'h', long)]
    pub host: String,

    /// Port to bind
    #[arg(short, long)]
    pub port: u16,

    /// Directory uploaded photos are written to; created if missing
    #[arg(short, long, value_name = "PATH")]
    pub cache: PathBuf,

    /// OpenAPI document served under /docs
    #[arg(long, value_name = "FILE", default_value = "swagger.yaml")]
    pub docs: PathBuf,

    /// Directory holding RegisterForm.html and SearchForm.html
    #[arg(long, value_name = "DIR", default_value = "public")]
    pub public: PathBuf,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log format: json, plain, pretty or compact
    #[arg(long, value_name = "FORMAT", default_value = "plain")]
    pub log_format: LogFormat,

    /// Where logs go: stdout, stderr or a file path
    #[arg(long, value_name = "TARGET", default_value = "stdout")]
    pub log_output: LogOutput,

    /// Colored log lines (terminal output only)
    #[arg(long)]
    pub log_color: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl ServerConfig {
    /// `http://<host>:<port>` as given on the command line
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Resolve host and port to the first matching socket address
    pub async fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Failed to resolve host {}", self.host))?
            .next()
            .ok_or_else(|| anyhow!("Host {} resolved to no addresses", self.host))
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::new()
            .level(self.log_level)
            .format(self.log_format)
            .output(self.log_output.clone())
            .with_colors(self.log_color)
    }
}
