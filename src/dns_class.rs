/// Question and record class. Only `IN` can be relayed.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DNSClass {
    #[default]
    IN, // 1
    CH, // 3
    HS, // 4
    NONE, // 254
    ASTERISK, // 255
    Unknown(u16),
}

impl DNSClass {
    pub fn from(value: u16) -> Self {
        match value {
            1 => DNSClass::IN,
            3 => DNSClass::CH,
            4 => DNSClass::HS,
            254 => DNSClass::NONE,
            255 => DNSClass::ASTERISK,
            n => DNSClass::Unknown(n),
        }
    }

    pub fn to_num(&self) -> u16 {
        match *self {
            DNSClass::IN => 1,
            DNSClass::CH => 3,
            DNSClass::HS => 4,
            DNSClass::NONE => 254,
            DNSClass::ASTERISK => 255,
            DNSClass::Unknown(n) => n,
        }
    }
}
