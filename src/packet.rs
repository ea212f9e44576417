use std::net::Ipv4Addr;
use crate::header::Header;
use crate::question::Question;
use crate::record::Record;
use crate::result_code::ResultCode;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
}

impl Packet {
    pub fn new() -> Packet {
        Packet {
            ..Default::default()
        }
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Successful response: the question section is echoed and the first
    /// question's name is answered with `addr`, whatever type was asked.
    pub fn answer(query: &Packet, addr: Ipv4Addr, ttl: u32) -> Packet {
        let mut res = Self::reply(query, ResultCode::NoError);

        if let Some(question) = query.first_question() {
            res.answers.push(Record::a(&question.domain, addr, ttl));
        }

        res
    }

    pub fn server_failure(query: &Packet) -> Packet {
        Self::reply(query, ResultCode::ServFail)
    }

    fn reply(query: &Packet, code: ResultCode) -> Packet {
        Packet {
            header: query.header.reply(code),
            questions: query.questions.clone(),
            answers: Vec::new(),
        }
    }
}
