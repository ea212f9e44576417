use crate::pair::BytesPair;
use crate::result_code::ResultCode;

pub const HEADER_LEN: usize = 12;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    pub response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncation: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub reserved: u8,
    pub code: ResultCode,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16
}

impl Header {
    pub fn new() -> Header {
        Header::default()
    }

    #[cfg(test)]
    pub fn new_with_id(id: u16) -> Header {
        Header {
            id,
            ..Default::default()
        }
    }

    /// Header of the response to a query carrying `self`. Section counts are
    /// left at zero; the writer fills them in.
    pub fn reply(&self, code: ResultCode) -> Header {
        Header {
            id: self.id,
            response: true,
            opcode: self.opcode,
            recursion_desired: self.recursion_desired,
            recursion_available: true,
            code,
            ..Default::default()
        }
    }

    pub fn write(&self) -> [u8; HEADER_LEN] {
        let mut res: [u8; HEADER_LEN] = Default::default();

        (res[0], res[1]) = split(self.id);
        (res[2], res[3]) = self.write_flags();
        (res[4], res[5]) = split(self.question_count);
        (res[6], res[7]) = split(self.answer_count);
        (res[8], res[9]) = split(self.authority_count);
        (res[10], res[11]) = split(self.additional_count);

        res
    }

    pub fn read_flags(&mut self, flags: BytesPair) {
        self.response = flags.0 & 0x80 != 0;
        self.opcode = (flags.0 >> 3) & 0x0F;
        self.authoritative = flags.0 & 0x04 != 0;
        self.truncation = flags.0 & 0x02 != 0;
        self.recursion_desired = flags.0 & 0x01 != 0;

        self.recursion_available = flags.1 & 0x80 != 0;
        self.reserved = (flags.1 >> 4) & 0x07;
        self.code = ResultCode::from(flags.1);
    }

    fn write_flags(&self) -> (u8, u8) {
        let first = self.recursion_desired as u8
            | (self.truncation as u8) << 1
            | (self.authoritative as u8) << 2
            | (self.opcode & 0x0F) << 3
            | (self.response as u8) << 7;

        let second = self.code.to_u8()
            | (self.reserved & 0x07) << 4
            | (self.recursion_available as u8) << 7;

        (first, second)
    }
}

fn split(value: u16) -> (u8, u8) {
    let pair = BytesPair::from(value);

    (pair.0, pair.1)
}
