use crate::dns_class::DNSClass;
use crate::dns_type::DNSType;
use crate::error::{ProxyError, Result};
use crate::header::Header;
use crate::name::DomainName;
use crate::packet::Packet;
use crate::pair::BytesPair;
use crate::question::Question;

const MAX_JUMPS: usize = 5;
const MAX_NAME_LEN: usize = 255;

/// Decodes an inbound query. Only the header and question section are read.
pub fn decode_query(buf: &[u8]) -> Result<Packet> {
    PacketParser::new(buf).parse()
}

pub struct PacketParser<'a> {
    buf: &'a [u8],
    offset: usize
}

impl<'a> PacketParser<'a> {
    pub fn new(data: &'a [u8]) -> PacketParser<'a> {
        PacketParser {
            buf: data,
            offset: 0,
        }
    }

    pub fn next(&mut self) -> Result<u8> {
        let res = self.get(self.offset)?;
        self.offset += 1;

        Ok(res)
    }

    pub fn next_u16(&mut self) -> Result<u16> {
        let res = ((self.next()? as u16) << 8) | self.next()? as u16;

        Ok(res)
    }

    pub fn get(&self, n: usize) -> Result<u8> {
        self.buf.get(n).copied().ok_or_else(|| {
            ProxyError::malformed(format!("unexpected end of message at offset {}", n))
        })
    }

    pub fn range(&self, start: usize, len: usize) -> Result<&'a [u8]> {
        self.buf.get(start..start + len).ok_or_else(|| {
            ProxyError::malformed(format!(
                "label of {} bytes at offset {} runs past the end of a {} byte message",
                len, start, self.buf.len()
            ))
        })
    }

    pub fn parse(&mut self) -> Result<Packet> {
        let mut packet = Packet::new();

        packet.header = self.parse_header()?;

        if packet.header.question_count == 0 {
            return Err(ProxyError::malformed("query carries no questions"));
        }

        for _ in 0..packet.header.question_count {
            packet.questions.push(self.parse_question()?);
        }

        Ok(packet)
    }

    pub fn parse_header(&mut self) -> Result<Header> {
        let mut header = Header::new();

        // the header always starts the message
        self.offset = 0;

        header.id = self.next_u16()?;
        header.read_flags(BytesPair::from(self.next_u16()?));
        header.question_count = self.next_u16()?;
        header.answer_count = self.next_u16()?;
        header.authority_count = self.next_u16()?;
        header.additional_count = self.next_u16()?;

        Ok(header)
    }

    pub fn parse_question(&mut self) -> Result<Question> {
        let name = self.parse_domain_name()?;
        let qtype = self.next_u16()?;
        let qclass = self.next_u16()?;

        Ok(Question::new(name, DNSType::from(qtype), DNSClass::from(qclass)))
    }

    /// Reads a possibly compressed name at the current offset and leaves the
    /// offset just past it. Labels are kept as raw octets and the root name
    /// has none.
    pub fn parse_domain_name(&mut self) -> Result<DomainName> {
        let mut labels: Vec<Vec<u8>> = Vec::new();
        let mut wire_len = 1;

        let mut pos = self.offset;
        let mut jumps = 0;
        let mut jumped = false;

        loop {
            let len = self.get(pos)?;

            match len & 0xC0 {
                0xC0 => {
                    if jumps == MAX_JUMPS {
                        return Err(ProxyError::malformed("too many compression pointers in a name"));
                    }

                    let next_byte = self.get(pos + 1)? as usize;
                    if !jumped {
                        self.offset = pos + 2;
                        jumped = true;
                    }

                    pos = ((len as usize & 0x3F) << 8) | next_byte;
                    jumps += 1;
                },
                0x00 => {
                    pos += 1;

                    if len == 0 {
                        break;
                    }

                    let bytes = self.range(pos, len as usize)?;
                    wire_len += len as usize + 1;
                    if wire_len > MAX_NAME_LEN {
                        return Err(ProxyError::malformed("name is longer than 255 octets"));
                    }

                    labels.push(bytes.to_vec());
                    pos += len as usize;
                },
                _ => {
                    return Err(ProxyError::malformed(format!("reserved label type {:#04x}", len & 0xC0)));
                }
            }
        }

        if !jumped {
            self.offset = pos;
        }

        Ok(DomainName::new(labels))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::writer::PacketWriter;
    use rand::Rng;

    fn query(id: u16, questions: Vec<Question>) -> Packet {
        let mut packet = Packet::new();
        packet.header = Header::new_with_id(id);
        packet.header.recursion_desired = true;
        packet.header.question_count = questions.len() as u16;
        packet.questions = questions;

        packet
    }

    fn header_bytes(question_count: u16) -> Vec<u8> {
        let mut header = Header::new_with_id(0x1234);
        header.question_count = question_count;

        header.write().to_vec()
    }

    #[test]
    fn empty_buffer_is_malformed() {
        let err = decode_query(&[]).unwrap_err();

        assert!(err.is_malformed());
    }

    #[test]
    fn zero_questions_is_malformed() {
        let err = decode_query(&header_bytes(0)).unwrap_err();

        assert!(err.is_malformed());
    }

    #[test]
    fn more_questions_than_bytes_is_malformed() {
        let mut buf = header_bytes(3);
        buf.extend_from_slice(&[3, b'c', b'o', b'm', 0, 0, 1, 0, 1]);

        let err = decode_query(&buf).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn label_longer_than_buffer_is_malformed() {
        let mut buf = header_bytes(1);
        buf.extend_from_slice(&[10, b'a', b'b']);

        assert!(decode_query(&buf).unwrap_err().is_malformed());
    }

    #[test]
    fn truncated_class_is_malformed() {
        let mut buf = header_bytes(1);
        buf.extend_from_slice(&[1, b'a', 0, 0, 1, 0]);

        assert!(decode_query(&buf).unwrap_err().is_malformed());
    }

    #[test]
    fn parses_a_single_question() {
        let mut buf = header_bytes(1);
        buf.extend_from_slice(&[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e']);
        buf.extend_from_slice(&[5, b'o', b'n', b'i', b'o', b'n', 0]);
        buf.extend_from_slice(&[0, 28, 0, 1]);

        let packet = decode_query(&buf).unwrap();

        assert_eq!(packet.header.id, 0x1234);
        assert_eq!(packet.questions.len(), 1);
        assert_eq!(packet.questions[0].domain, DomainName::from("example.onion"));
        assert_eq!(packet.questions[0].qtype, DNSType::AAAA);
        assert!(packet.questions[0].is_internet());
    }

    #[test]
    fn follows_compression_pointers() {
        let mut buf = header_bytes(2);
        // first question at offset 12
        buf.extend_from_slice(&[3, b'f', b'o', b'o', 3, b'c', b'o', b'm', 0, 0, 1, 0, 1]);
        // "www" + pointer to "foo.com"
        buf.extend_from_slice(&[3, b'w', b'w', b'w', 0xC0, 12, 0, 1, 0, 1]);

        let packet = decode_query(&buf).unwrap();

        assert_eq!(packet.questions[0].domain, DomainName::from("foo.com"));
        assert_eq!(packet.questions[1].domain, DomainName::from("www.foo.com"));
        assert_eq!(packet.questions[1].qclass, DNSClass::IN);
    }

    #[test]
    fn pointer_loop_is_malformed() {
        let mut buf = header_bytes(1);
        buf.extend_from_slice(&[0xC0, 12, 0, 1, 0, 1]);

        assert!(decode_query(&buf).unwrap_err().is_malformed());
    }

    #[test]
    fn root_name_has_no_labels() {
        let mut buf = header_bytes(1);
        buf.extend_from_slice(&[0, 0, 2, 0, 1]);

        let packet = decode_query(&buf).unwrap();
        assert!(packet.questions[0].domain.labels().is_empty());
        assert_eq!(packet.questions[0].qtype, DNSType::NS);
    }

    #[test]
    fn labels_keep_their_raw_octets() {
        let mut buf = header_bytes(1);
        buf.push(63);
        buf.extend_from_slice(&[0xFF; 63]);
        buf.extend_from_slice(&[3, b'a', b'.', b'b', 0, 0, 1, 0, 1]);

        let packet = decode_query(&buf).unwrap();
        let labels = packet.questions[0].domain.labels();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], vec![0xFF; 63]);
        assert_eq!(labels[1], b"a.b".to_vec());
    }

    #[test]
    fn decode_inverts_the_writer() {
        let mut rng = rand::thread_rng();
        let alphabet = b"abcdefghijklmnopqrstuvwxyz0123456789-.\xC3\xFF";

        for _ in 0..200 {
            let mut questions = Vec::new();

            for _ in 0..rng.gen_range(1..4) {
                let labels: Vec<Vec<u8>> = (0..rng.gen_range(1..5))
                    .map(|_| {
                        (0..rng.gen_range(1..20))
                            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                            .collect()
                    })
                    .collect();

                questions.push(Question::new(
                    DomainName::new(labels),
                    DNSType::from(rng.gen_range(1..300)),
                    DNSClass::from(rng.gen_range(1..5)),
                ));
            }

            let packet = query(rng.gen(), questions);
            let buf = PacketWriter::from(packet.clone()).write().unwrap();

            assert_eq!(decode_query(&buf).unwrap(), packet);
        }
    }
}
