#[derive(Default, PartialEq, Eq, Debug, Clone, Hash, Copy)]
pub enum DNSType {
    #[default]
    A, // 1
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA, // 28
    SRV,
    OPT,
    HTTPS, // 65
    ASTERISK, // 255
    Unknown(u16),
}

impl DNSType {
    pub fn from(value: u16) -> DNSType {
        match value {
            1 => DNSType::A,
            2 => DNSType::NS,
            5 => DNSType::CNAME,
            6 => DNSType::SOA,
            12 => DNSType::PTR,
            15 => DNSType::MX,
            16 => DNSType::TXT,
            28 => DNSType::AAAA,
            33 => DNSType::SRV,
            41 => DNSType::OPT,
            65 => DNSType::HTTPS,
            255 => DNSType::ASTERISK,
            n => DNSType::Unknown(n),
        }
    }

    pub fn to_num(&self) -> u16 {
        match *self {
            DNSType::A => 1,
            DNSType::NS => 2,
            DNSType::CNAME => 5,
            DNSType::SOA => 6,
            DNSType::PTR => 12,
            DNSType::MX => 15,
            DNSType::TXT => 16,
            DNSType::AAAA => 28,
            DNSType::SRV => 33,
            DNSType::OPT => 41,
            DNSType::HTTPS => 65,
            DNSType::ASTERISK => 255,
            DNSType::Unknown(n) => n,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_types_keep_their_number() {
        assert_eq!(DNSType::from(28), DNSType::AAAA);
        assert_eq!(DNSType::from(99), DNSType::Unknown(99));
        assert_eq!(DNSType::from(99).to_num(), 99);
    }
}
