use anyhow::{Context, Result};
use std::io::{Read, Write};

/// A big-endian u16 split into its two octets.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct BytesPair(pub(crate) u8, pub(crate) u8);

impl BytesPair {
    pub fn from(value: u16) -> Self {
        Self((value >> 8) as u8, (value & 0xFF) as u8)
    }

    pub fn to_u16(&self) -> u16 {
        (self.0 as u16) << 8 | self.1 as u16
    }

    pub fn bytes(&self) -> Vec<u8> {
        [self.0, self.1].to_vec()
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; 2];

        reader.read_exact(&mut buf).context("read length prefix")?;

        Ok(Self(buf[0], buf[1]))
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[self.0, self.1]).context("write length prefix")?;

        Ok(())
    }
}
