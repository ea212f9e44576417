use std::net::Ipv4Addr;
use crate::dns_class::DNSClass;
use crate::dns_type::DNSType;
use crate::name::DomainName;

/// An answer record. The relay only ever answers with IPv4 addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub domain: DomainName,
    pub rtype: DNSType,
    pub rclass: DNSClass,
    pub ttl: u32,
    pub addr: Ipv4Addr,
}

impl Record {
    pub fn a(domain: &DomainName, addr: Ipv4Addr, ttl: u32) -> Record {
        Record {
            domain: domain.clone(),
            rtype: DNSType::A,
            rclass: DNSClass::IN,
            ttl,
            addr,
        }
    }

    pub fn data(&self) -> [u8; 4] {
        self.addr.octets()
    }
}
