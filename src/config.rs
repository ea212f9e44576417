use std::path::PathBuf;
use anyhow::{Context, Result};
use serde::Deserialize;
use crate::args::Args;
use crate::fs::default_config_file;

#[derive(Default, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub listener: ListenerConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Command line flags win over whatever the file said.
    pub fn apply_args(mut self, args: &Args) -> Self {
        self.listener.host = args.host.clone().or(self.listener.host);
        self.listener.port = args.port.or(self.listener.port);
        if args.tcp {
            self.listener.proto = Some("tcp".to_string());
        }

        if let Some(addr) = &args.proxy {
            self.proxy.addr = Some(addr.clone());
        }
        self.proxy.timeout = args.timeout.clone().or(self.proxy.timeout);

        self
    }
}

#[derive(Default, Deserialize, Debug)]
pub struct ListenerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub proto: Option<String>,
    pub max_packet_buf: Option<usize>
}

#[derive(Default, Deserialize, Debug)]
pub struct ProxyConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// `host:port` or a bare address, set from the command line
    #[serde(skip_deserializing)]
    pub addr: Option<String>,
    pub timeout: Option<String>,
}

#[derive(Default, Deserialize, Debug)]
pub struct ServerConfig {
    pub answer_ttl: Option<u32>,
}

/// Loads `path` if given, otherwise the config in the home directory, and
/// falls back to the defaults when neither exists.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    if let Some(path) = path {
        return load(PathBuf::from(path));
    }

    match default_config_file() {
        Some(path) => load(path),
        None => Ok(Config::default())
    }
}

fn load(p: PathBuf) -> Result<Config> {
    let file = std::fs::read_to_string(&p)
        .with_context(|| format!("reading config file {}", p.display()))?;

    parse(&file).with_context(|| format!("parsing config file {}", p.display()))
}

fn parse(s: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(s)?;

    Ok(cfg)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_every_section() {
        let cfg = parse(r#"
            [listener]
            host = "127.0.0.2"
            port = 5353
            proto = "tcp"
            max_packet_buf = 1024

            [proxy]
            host = "10.1.1.1"
            port = 9150
            timeout = "10s"

            [server]
            answer_ttl = 60
        "#).unwrap();

        assert_eq!(cfg.listener.host.as_deref(), Some("127.0.0.2"));
        assert_eq!(cfg.listener.port, Some(5353));
        assert_eq!(cfg.listener.proto.as_deref(), Some("tcp"));
        assert_eq!(cfg.listener.max_packet_buf, Some(1024));
        assert_eq!(cfg.proxy.host.as_deref(), Some("10.1.1.1"));
        assert_eq!(cfg.proxy.port, Some(9150));
        assert_eq!(cfg.proxy.timeout.as_deref(), Some("10s"));
        assert_eq!(cfg.server.answer_ttl, Some(60));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = parse("").unwrap();

        assert!(cfg.listener.port.is_none());
        assert!(cfg.proxy.timeout.is_none());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(parse("[cache]\nsize = 10\n").is_err());
    }

    #[test]
    fn args_override_the_file() {
        let cfg = parse("[listener]\nport = 5353\nhost = \"127.0.0.2\"\n[proxy]\ntimeout = \"1s\"\n").unwrap();

        let args = Args {
            tcp: true,
            port: Some(53),
            timeout: Some("3s".to_string()),
            proxy: Some("127.0.0.1:9150".to_string()),
            ..Default::default()
        };
        let cfg = cfg.apply_args(&args);

        assert_eq!(cfg.listener.port, Some(53));
        assert_eq!(cfg.listener.host.as_deref(), Some("127.0.0.2"));
        assert_eq!(cfg.listener.proto.as_deref(), Some("tcp"));
        assert_eq!(cfg.proxy.timeout.as_deref(), Some("3s"));
        assert_eq!(cfg.proxy.addr.as_deref(), Some("127.0.0.1:9150"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load_config(Some("/nonexistent/tor-dns-proxy.toml")).is_err());
    }
}
