use crate::dns_class::DNSClass;
use crate::dns_type::DNSType;
use crate::name::DomainName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub domain: DomainName,
    pub qtype: DNSType,
    pub qclass: DNSClass
}

impl Question {
    pub fn new(name: DomainName, qtype: DNSType, qclass: DNSClass) -> Question {
        Question {
            domain: name,
            qtype,
            qclass,
        }
    }

    pub fn is_internet(&self) -> bool {
        self.qclass == DNSClass::IN
    }
}
