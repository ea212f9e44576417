use clap::Parser;

/// Relays DNS lookups through Tor's SOCKS RESOLVE extension.
#[derive(Parser, Debug, Default)]
#[command(about)]
pub(crate) struct Args {
    /// listen on TCP instead of UDP
    #[arg(long, short)]
    pub(crate) tcp: bool,
    #[arg(long, short = 'H')]
    pub(crate) host: Option<String>,
    #[arg(long, short)]
    pub(crate) port: Option<u16>,
    /// SOCKS4a proxy as host:port, or a bare IP on port 9050
    #[arg(long, short = 'x')]
    pub(crate) proxy: Option<String>,
    /// give up on the proxy after this long, e.g. 10s
    #[arg(long, short = 'T')]
    pub(crate) timeout: Option<String>,
    #[arg(long, short)]
    pub(crate) config: Option<String>,
    #[arg(long, short, default_value = "info")]
    pub(crate) log_level: String,
}
