use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::time::Duration;
use tracing::trace;
use crate::context::ProxyContext;
use crate::error::{ProxyError, Result};
use crate::socks::{status_text, ResolveReply, ResolveRequest};

/// Turns a name into an IPv4 address. Every failure is reported as an
/// error; callers treat them all alike.
pub trait Resolver: Send + Sync {
    fn resolve(&self, name: &[u8]) -> Result<Ipv4Addr>;
}

/// Resolves through a SOCKS4a proxy's `RESOLVE` extension, one fresh
/// connection per lookup.
pub struct SocksResolver {
    proxy: SocketAddr,
    timeout: Option<Duration>,
}

impl SocksResolver {
    pub fn new(proxy: SocketAddr, timeout: Option<Duration>) -> Self {
        Self {
            proxy,
            timeout
        }
    }

    pub fn from(ctx: &ProxyContext) -> Self {
        Self::new(ctx.addr, ctx.timeout)
    }

    fn connect(&self) -> Result<TcpStream> {
        let stream = match self.timeout {
            Some(timeout) => TcpStream::connect_timeout(&self.proxy, timeout),
            None => TcpStream::connect(self.proxy),
        }.map_err(|e| self.failure("connecting", e))?;

        stream.set_read_timeout(self.timeout).map_err(|e| self.failure("configuring", e))?;
        stream.set_write_timeout(self.timeout).map_err(|e| self.failure("configuring", e))?;

        Ok(stream)
    }

    fn failure(&self, action: &str, err: std::io::Error) -> ProxyError {
        ProxyError::ResolveFailure(format!("{} proxy {}: {}", action, self.proxy, err))
    }
}

impl Resolver for SocksResolver {
    fn resolve(&self, name: &[u8]) -> Result<Ipv4Addr> {
        let req = ResolveRequest::new(name)?;

        let mut stream = self.connect()?;
        trace!("sending RESOLVE {} to {}", String::from_utf8_lossy(name), self.proxy);

        req.write_to(&mut stream).map_err(|e| self.failure("writing to", e))?;
        let reply = ResolveReply::read_from(&mut stream)?;

        if !reply.is_granted() {
            return Err(ProxyError::ResolveFailure(format!(
                "proxy answered status {} ({})",
                reply.status,
                status_text(reply.status)
            )));
        }

        Ok(reply.addr)
    }
}
