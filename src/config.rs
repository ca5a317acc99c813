use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Per-region latency and uptime summaries over a static telemetry file.
#[derive(Debug, Clone, Parser)]
#[command(name = "latency-checker", version, about)]
pub struct Config {
    /// JSON array of telemetry records, read once at startup
    #[arg(long, env = "TELEMETRY_PATH", default_value = "telemetry.json")]
    pub data_path: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}
