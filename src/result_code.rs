#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResultCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl ResultCode {
    pub fn from(value: u8) -> ResultCode {
        match value & 0x0F {
            0 => ResultCode::NoError,
            1 => ResultCode::FormErr,
            2 => ResultCode::ServFail,
            3 => ResultCode::NXDomain,
            4 => ResultCode::NotImp,
            5 => ResultCode::Refused,
            n => ResultCode::Other(n),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            ResultCode::NoError => 0,
            ResultCode::FormErr => 1,
            ResultCode::ServFail => 2,
            ResultCode::NXDomain => 3,
            ResultCode::NotImp => 4,
            ResultCode::Refused => 5,
            ResultCode::Other(n) => n & 0x0F,
        }
    }
}
