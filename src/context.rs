use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use anyhow::{bail, Context as _, Result};
use crate::config::{Config, ListenerConfig, ProxyConfig};
use crate::duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_DNS_PORT: u16 = 53;
pub const DEFAULT_SOCKS_PORT: u16 = 9050;
pub const DEFAULT_MAX_PACKET_BUF: usize = 512;

/// Runtime settings, fixed once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Context {
    pub(crate) listener: ListenerContext,
    pub(crate) proxy: ProxyContext,
    pub(crate) server: ServerContext,
}

impl Context {
    pub fn from(cfg: Config) -> Result<Self> {
        Ok(Self {
            listener: ListenerContext::from(&cfg.listener),
            proxy: ProxyContext::from(&cfg.proxy)?,
            server: ServerContext {
                answer_ttl: cfg.server.answer_ttl.unwrap_or_default(),
            },
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ServerContext {
    pub answer_ttl: u32,
}

#[derive(Debug, Clone)]
pub struct ListenerContext {
    pub port: u16,
    pub host: String,
    pub proto: ListenerProtocol,
    pub max_packet_buf: usize
}

impl ListenerContext {
    pub fn new(proto: ListenerProtocol, host: &str, port: u16, max_packet_buf: usize) -> Self {
        Self {
            host: host.to_string(),
            port,
            proto,
            max_packet_buf
        }
    }

    pub fn to_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    fn from(cfg: &ListenerConfig) -> Self {
        Self::new(
            cfg.proto.as_deref().map(ListenerProtocol::from).unwrap_or_default(),
            cfg.host.as_deref().unwrap_or(DEFAULT_HOST),
            cfg.port.unwrap_or(DEFAULT_DNS_PORT),
            cfg.max_packet_buf.unwrap_or(DEFAULT_MAX_PACKET_BUF),
        )
    }
}

impl Display for ListenerContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}:{}", self.proto, self.host, self.port)
    }
}

#[derive(Default, Debug, PartialEq, Eq, Copy, Clone)]
pub enum ListenerProtocol {
    #[default]
    UDP,
    TCP
}

impl ListenerProtocol {
    pub fn from(proto: &str) -> Self {
        match proto.to_lowercase().as_str() {
            "tcp" => Self::TCP,
            _ => Self::UDP
        }
    }
}

impl Display for ListenerProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerProtocol::UDP => write!(f, "udp"),
            ListenerProtocol::TCP => write!(f, "tcp")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyContext {
    pub addr: SocketAddr,
    pub timeout: Option<Duration>,
}

impl ProxyContext {
    fn from(cfg: &ProxyConfig) -> Result<Self> {
        let addr = match &cfg.addr {
            Some(addr) => to_socket_addr(addr, DEFAULT_SOCKS_PORT)?,
            None => {
                let host = cfg.host.as_deref().unwrap_or(DEFAULT_HOST);
                SocketAddr::new(to_ip_addr(host)?, cfg.port.unwrap_or(DEFAULT_SOCKS_PORT))
            }
        };

        let timeout = match &cfg.timeout {
            Some(timeout) => Some(
                duration::parse(timeout).with_context(|| format!("invalid proxy timeout {:?}", timeout))?
            ),
            None => None
        };

        Ok(Self {
            addr,
            timeout
        })
    }
}

impl Display for ProxyContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "socks4a://{}", self.addr)
    }
}

// the proxy host must be an IP literal, never a name
fn to_ip_addr(host: &str) -> Result<IpAddr> {
    match IpAddr::from_str(host) {
        Ok(addr) => Ok(addr),
        Err(_e) => bail!("{} is not a valid proxy address", host)
    }
}

fn to_socket_addr(addr: &str, default_port: u16) -> Result<SocketAddr> {
    match SocketAddr::from_str(addr) {
        Ok(addr) => Ok(addr),
        Err(_e) => Ok(SocketAddr::new(to_ip_addr(addr)?, default_port))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::ServerConfig;

    #[test]
    fn defaults() {
        let ctx = Context::from(Config::default()).unwrap();

        assert_eq!(ctx.listener.to_string(), "udp://127.0.0.1:53");
        assert_eq!(ctx.listener.max_packet_buf, 512);
        assert_eq!(ctx.proxy.addr, SocketAddr::from(([127, 0, 0, 1], 9050)));
        assert_eq!(ctx.proxy.timeout, None);
        assert_eq!(ctx.server.answer_ttl, 0);
    }

    #[test]
    fn proxy_address_forms() {
        assert_eq!(
            to_socket_addr("10.0.0.5:9150", DEFAULT_SOCKS_PORT).unwrap(),
            SocketAddr::from(([10, 0, 0, 5], 9150))
        );
        assert_eq!(
            to_socket_addr("10.0.0.5", DEFAULT_SOCKS_PORT).unwrap(),
            SocketAddr::from(([10, 0, 0, 5], 9050))
        );
        assert!(to_socket_addr("localhost:9050", DEFAULT_SOCKS_PORT).is_err());
    }

    #[test]
    fn configured_values() {
        let cfg = Config {
            listener: ListenerConfig {
                proto: Some("TCP".to_string()),
                port: Some(5353),
                ..Default::default()
            },
            proxy: ProxyConfig {
                host: Some("::1".to_string()),
                timeout: Some("2s".to_string()),
                ..Default::default()
            },
            server: ServerConfig {
                answer_ttl: Some(30),
            },
        };

        let ctx = Context::from(cfg).unwrap();

        assert_eq!(ctx.listener.proto, ListenerProtocol::TCP);
        assert_eq!(ctx.listener.to_string(), "tcp://127.0.0.1:5353");
        assert_eq!(ctx.proxy.to_string(), "socks4a://[::1]:9050");
        assert_eq!(ctx.proxy.timeout, Some(Duration::from_secs(2)));
        assert_eq!(ctx.server.answer_ttl, 30);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let cfg = Config {
            proxy: ProxyConfig {
                timeout: Some("soon".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(Context::from(cfg).is_err());
    }
}
