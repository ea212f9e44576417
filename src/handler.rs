use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::{debug, info};
use crate::error::{ProxyError, Result};
use crate::packet::Packet;
use crate::parser::decode_query;
use crate::resolver::Resolver;
use crate::writer::encode_reply;

/// Turns one raw query into one raw reply. Shared by every transport.
#[derive(Clone)]
pub struct QueryHandler {
    resolver: Arc<dyn Resolver>,
    answer_ttl: u32,
}

impl QueryHandler {
    pub fn new(resolver: Arc<dyn Resolver>, answer_ttl: u32) -> Self {
        Self {
            resolver,
            answer_ttl
        }
    }

    /// Only a malformed query is an error; any other failure becomes a
    /// SERVFAIL reply.
    pub fn handle(&self, buf: &[u8]) -> Result<Vec<u8>> {
        let query = decode_query(buf)?;

        let res = match self.lookup(&query) {
            Ok(addr) => Packet::answer(&query, addr, self.answer_ttl),
            Err(_) => Packet::server_failure(&query),
        };

        encode_reply(res)
    }

    fn lookup(&self, query: &Packet) -> Result<Ipv4Addr> {
        let question = query
            .first_question()
            .ok_or_else(|| ProxyError::malformed("query carries no questions"))?;

        // the requested type is not checked, any IN query gets an A answer
        let res = if question.is_internet() {
            self.resolver.resolve(&question.domain.to_bytes())
        } else {
            Err(ProxyError::UnsupportedClass(question.qclass.to_num()))
        };

        match &res {
            Ok(addr) => info!("{} -> {}", question.domain, addr),
            Err(e) => {
                info!("{} -> FAILURE", question.domain);
                debug!("{}: {}", question.domain, e);
            }
        }

        res
    }
}
