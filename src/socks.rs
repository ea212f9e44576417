//! SOCKS4a `RESOLVE` framing as understood by Tor.
//!
//! The request is a SOCKS4 header carrying command `0xF0` and the
//! placeholder address `0.0.0.1` (which tells the proxy a hostname follows),
//! an empty user id and the NUL-terminated name. The reply is the regular
//! 8-byte SOCKS4 reply with the resolved IPv4 address in place of the
//! destination.

use std::io::{Read, Write};
use std::net::Ipv4Addr;
use crate::error::{ProxyError, Result};

pub const SOCKS_VER_4: u8 = 4u8;
pub const SOCKS_CMD_RESOLVE: u8 = 0xF0;
pub const SOCKS4A_PLACEHOLDER_ADDR: [u8; 4] = [0, 0, 0, 1];
pub const SOCKS4_REPLY_GRANTED: u8 = 90;
pub const SOCKS4_REPLY_REJECTED: u8 = 91;
pub const SOCKS4_REPLY_NO_IDENTD: u8 = 92;
pub const SOCKS4_REPLY_BAD_USER: u8 = 93;
pub const SOCKS4_REPLY_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    name: Vec<u8>,
}

impl ResolveRequest {
    /// `name` is sent as is; it only has to be non-empty and free of NUL.
    pub fn new(name: &[u8]) -> Result<Self> {
        if name.is_empty() || name.contains(&0) {
            return Err(ProxyError::InvalidName(String::from_utf8_lossy(name).into_owned()));
        }

        Ok(Self {
            name: name.to_vec(),
        })
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SOCKS4_REPLY_LEN + self.name.len() + 2);

        buf.push(SOCKS_VER_4);
        buf.push(SOCKS_CMD_RESOLVE);
        // port is unused for a resolve
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&SOCKS4A_PLACEHOLDER_ADDR);
        // empty user id
        buf.push(0);
        buf.extend_from_slice(&self.name);
        buf.push(0);

        buf
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.bytes())?;
        writer.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveReply {
    pub version: u8,
    pub status: u8,
    pub port: u16,
    pub addr: Ipv4Addr,
}

impl ResolveReply {
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < SOCKS4_REPLY_LEN {
            return Err(ProxyError::malformed(format!(
                "socks reply is {} bytes, expected {}",
                buf.len(),
                SOCKS4_REPLY_LEN
            )));
        }

        Ok(Self {
            version: buf[0],
            status: buf[1],
            port: u16::from_be_bytes([buf[2], buf[3]]),
            addr: Ipv4Addr::new(buf[4], buf[5], buf[6], buf[7]),
        })
    }

    /// Reads exactly one reply off a stream. Running out of bytes first is
    /// a resolve failure rather than a malformed request.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; SOCKS4_REPLY_LEN];

        reader.read_exact(&mut buf).map_err(|e| {
            ProxyError::ResolveFailure(format!("reading socks reply: {}", e))
        })?;

        Self::parse(&buf)
    }

    pub fn is_granted(&self) -> bool {
        self.status == SOCKS4_REPLY_GRANTED
    }
}

pub fn status_text(status: u8) -> &'static str {
    match status {
        SOCKS4_REPLY_GRANTED => "request granted",
        SOCKS4_REPLY_REJECTED => "request rejected or failed",
        SOCKS4_REPLY_NO_IDENTD => "identd unreachable",
        SOCKS4_REPLY_BAD_USER => "identd user mismatch",
        _ => "unknown status",
    }
}
