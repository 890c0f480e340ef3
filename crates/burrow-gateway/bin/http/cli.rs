use burrow_telemetry::LogFormat;
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::num::{NonZeroU32, NonZeroU64};
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "BURROW_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "BURROW_PUBLIC_BASE_URL";
pub const DEFAULT_VALIDITY_ENV: &str = "BURROW_DEFAULT_VALIDITY_MINUTES";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";
pub const LOG_SINK_URL_ENV: &str = "BURROW_LOG_SINK_URL";
pub const LOG_SINK_TOKEN_ENV: &str = "BURROW_LOG_SINK_TOKEN";
pub const GEOIP_DB_ENV: &str = "BURROW_GEOIP_DB";
pub const SWEEP_INTERVAL_ENV: &str = "BURROW_SWEEP_INTERVAL_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_VALIDITY_MINUTES: &str = "1440";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Pretty => write!(f, "pretty"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "burrow-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Origin prepended to short codes in `shortUrl`.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    /// Validity applied when a request does not set one.
    #[arg(long, env = DEFAULT_VALIDITY_ENV, default_value = DEFAULT_VALIDITY_MINUTES)]
    pub default_validity_minutes: NonZeroU32,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,

    /// Remote collector for application log events. Off when unset.
    #[arg(long, env = LOG_SINK_URL_ENV)]
    pub log_sink_url: Option<String>,

    #[arg(long, env = LOG_SINK_TOKEN_ENV, requires = "log_sink_url")]
    pub log_sink_token: Option<String>,

    /// MaxMind GeoLite2 City database. Without it every location is "Unknown".
    #[arg(long, env = GEOIP_DB_ENV)]
    pub geoip_db: Option<PathBuf>,

    /// Evict expired records on this interval. Off when unset.
    #[arg(long, env = SWEEP_INTERVAL_ENV)]
    pub sweep_interval_secs: Option<NonZeroU64>,
}
