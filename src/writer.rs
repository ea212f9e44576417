use crate::error::{ProxyError, Result};
use crate::name::DomainName;
use crate::packet::Packet;
use crate::pair::BytesPair;
use crate::question::Question;
use crate::record::Record;

/// Encodes a reply for transmission.
pub fn encode_reply(packet: Packet) -> Result<Vec<u8>> {
    PacketWriter::from(packet).write()
}

/// Serializes a packet without name compression. Section counts in the
/// header are taken from the sections themselves.
pub struct PacketWriter {
    pub packet: Packet,
    buf: Vec<u8>,
}

impl PacketWriter {
    pub fn from(packet: Packet) -> PacketWriter {
        PacketWriter {
            packet,
            buf: Vec::with_capacity(512),
        }
    }

    pub fn write(&mut self) -> Result<Vec<u8>> {
        // reset the buffer before any writes to the buf
        self.buf.clear();

        self.write_header()?;

        for question in &self.packet.questions {
            Self::write_question(&mut self.buf, question)?;
        }

        for record in &self.packet.answers {
            Self::write_record(&mut self.buf, record)?;
        }

        Ok(self.buf.clone())
    }

    fn write_header(&mut self) -> Result<()> {
        let mut header = self.packet.header.clone();

        header.question_count = count(self.packet.questions.len())?;
        header.answer_count = count(self.packet.answers.len())?;
        header.authority_count = 0;
        header.additional_count = 0;

        self.buf.extend_from_slice(&header.write());

        Ok(())
    }

    fn write_question(buf: &mut Vec<u8>, question: &Question) -> Result<()> {
        Self::write_domain(buf, &question.domain)?;

        buf.append(&mut BytesPair::from(question.qtype.to_num()).bytes());
        buf.append(&mut BytesPair::from(question.qclass.to_num()).bytes());

        Ok(())
    }

    fn write_record(buf: &mut Vec<u8>, record: &Record) -> Result<()> {
        Self::write_domain(buf, &record.domain)?;

        buf.append(&mut BytesPair::from(record.rtype.to_num()).bytes());
        buf.append(&mut BytesPair::from(record.rclass.to_num()).bytes());
        buf.extend_from_slice(&record.ttl.to_be_bytes());

        let data = record.data();
        buf.append(&mut BytesPair::from(data.len() as u16).bytes());
        buf.extend_from_slice(&data);

        Ok(())
    }

    /// Labels are written verbatim, so a decoded name comes back out
    /// byte for byte.
    pub fn write_domain(buf: &mut Vec<u8>, domain: &DomainName) -> Result<()> {
        for label in domain.labels() {
            if label.is_empty() || label.len() > 63 {
                return Err(ProxyError::malformed(format!(
                    "label of {} octets in {:?}", label.len(), domain.to_string()
                )));
            }

            buf.push(label.len() as u8);
            buf.extend_from_slice(label);
        }

        buf.push(0x00);

        Ok(())
    }
}

fn count(n: usize) -> Result<u16> {
    u16::try_from(n).map_err(|_| ProxyError::malformed(format!("{} records do not fit in a section", n)))
}
