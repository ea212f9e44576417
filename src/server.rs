use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, UdpSocket};
use std::sync::Arc;
use std::thread;
use anyhow::{Context as _, Result};
use tracing::{error, info, warn};
use crate::context::{Context, ListenerContext, ListenerProtocol};
use crate::handler::QueryHandler;
use crate::pair::BytesPair;
use crate::resolver::SocksResolver;

pub trait DnsServer {
    fn start(&self) -> Result<()>;
}

/// Framing for one inbound exchange: one message in, at most one reply out.
pub trait Transport {
    fn peer(&self) -> SocketAddr;
    fn read_message(&mut self) -> Result<Vec<u8>>;
    fn write_reply(&mut self, buf: &[u8]) -> Result<()>;
}

/// DNS over a stream: every message carries a 2-byte big-endian length.
pub struct StreamTransport<S> {
    stream: S,
    peer: SocketAddr,
}

impl<S: Read + Write> StreamTransport<S> {
    pub fn new(stream: S, peer: SocketAddr) -> Self {
        Self {
            stream,
            peer
        }
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn peer(&self) -> SocketAddr {
        self.peer
    }

    // The length prefix is trusted: exactly that many bytes are read and
    // anything after them is left on the stream. A connection that ends
    // before the prefixed length is an error and gets no reply.
    fn read_message(&mut self) -> Result<Vec<u8>> {
        let len = BytesPair::read(&mut self.stream)?.to_u16();

        let mut buf = vec![0u8; len as usize];
        self.stream
            .read_exact(&mut buf)
            .with_context(|| format!("reading a {} byte message", len))?;

        Ok(buf)
    }

    fn write_reply(&mut self, buf: &[u8]) -> Result<()> {
        let len = u16::try_from(buf.len()).context("reply does not fit a length prefix")?;

        BytesPair::from(len).write(&mut self.stream)?;
        self.stream.write_all(buf).context("write reply")?;
        self.stream.flush().context("flush reply")?;

        Ok(())
    }
}

/// DNS over datagrams: the datagram is the message, the reply goes back
/// unframed to the sender.
pub struct DatagramTransport {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
    message: Vec<u8>,
}

impl DatagramTransport {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr, message: Vec<u8>) -> Self {
        Self {
            socket,
            peer,
            message
        }
    }
}

impl Transport for DatagramTransport {
    fn peer(&self) -> SocketAddr {
        self.peer
    }

    fn read_message(&mut self) -> Result<Vec<u8>> {
        Ok(std::mem::take(&mut self.message))
    }

    fn write_reply(&mut self, buf: &[u8]) -> Result<()> {
        self.socket
            .send_to(buf, self.peer)
            .with_context(|| format!("send reply to {}", self.peer))?;

        Ok(())
    }
}

/// Runs one exchange. A malformed query is dropped without a reply.
pub fn serve<T: Transport>(handler: &QueryHandler, transport: &mut T) -> Result<()> {
    let msg = transport.read_message()?;

    match handler.handle(&msg) {
        Ok(reply) => transport.write_reply(&reply),
        Err(e) => {
            warn!("Dropping query from {}: {}", transport.peer(), e);

            Ok(())
        }
    }
}

fn spawn_unit<T: Transport + Send + 'static>(handler: &QueryHandler, mut transport: T) {
    let handler = handler.clone();
    let peer = transport.peer();

    let spawned = thread::Builder::new()
        .name(format!("query-{}", peer))
        .spawn(move || {
            if let Err(e) = serve(&handler, &mut transport) {
                error!("Error serving {}: {:#}", transport.peer(), e);
            }
        });

    if let Err(e) = spawned {
        error!("Failed to spawn a handler for {}: {}", peer, e);
    }
}

pub struct UdpDnsServer {
    listener: ListenerContext,
    handler: QueryHandler,
}

impl UdpDnsServer {
    pub fn new(listener: ListenerContext, handler: QueryHandler) -> Self {
        Self {
            listener,
            handler
        }
    }

    pub fn serve_on(&self, socket: UdpSocket) -> Result<()> {
        let socket = Arc::new(socket);
        let mut buf = vec![0u8; self.listener.max_packet_buf];

        loop {
            match socket.recv_from(&mut buf) {
                Ok((size, source)) => {
                    let transport = DatagramTransport::new(socket.clone(), source, buf[..size].to_vec());

                    spawn_unit(&self.handler, transport);
                }
                Err(e) => {
                    error!("Error receiving query: {}", e);
                }
            }
        }
    }
}

impl DnsServer for UdpDnsServer {
    fn start(&self) -> Result<()> {
        let socket = UdpSocket::bind(self.listener.to_addr())
            .with_context(|| format!("failed to bind {}", self.listener))?;
        info!("Listening on {}", self.listener);

        self.serve_on(socket)
    }
}

pub struct TcpDnsServer {
    listener: ListenerContext,
    handler: QueryHandler,
}

impl TcpDnsServer {
    pub fn new(listener: ListenerContext, handler: QueryHandler) -> Self {
        Self {
            listener,
            handler
        }
    }

    pub fn serve_on(&self, listener: TcpListener) -> Result<()> {
        loop {
            match listener.accept() {
                Ok((stream, source)) => {
                    spawn_unit(&self.handler, StreamTransport::<TcpStream>::new(stream, source));
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

impl DnsServer for TcpDnsServer {
    fn start(&self) -> Result<()> {
        let listener = TcpListener::bind(self.listener.to_addr())
            .with_context(|| format!("failed to bind {}", self.listener))?;
        info!("Listening on {}", self.listener);

        self.serve_on(listener)
    }
}

pub fn new_server(ctx: &Context) -> Box<dyn DnsServer> {
    let resolver = Arc::new(SocksResolver::from(&ctx.proxy));
    let handler = QueryHandler::new(resolver, ctx.server.answer_ttl);

    match ctx.listener.proto {
        ListenerProtocol::UDP => Box::new(UdpDnsServer::new(ctx.listener.clone(), handler)),
        ListenerProtocol::TCP => Box::new(TcpDnsServer::new(ctx.listener.clone(), handler)),
    }
}
