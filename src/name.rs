use std::fmt::{Display, Formatter};

/// A domain name as it appeared on the wire. Labels are arbitrary octets,
/// so they are kept raw and only rendered lossily for logs.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    labels: Vec<Vec<u8>>,
}

impl DomainName {
    pub fn new(labels: Vec<Vec<u8>>) -> DomainName {
        DomainName {
            labels
        }
    }

    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    /// Labels joined with `.`, the form handed to the proxy.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.labels.join(&b'.')
    }
}

impl From<&str> for DomainName {
    fn from(name: &str) -> Self {
        Self::new(
            name.split('.')
                .filter(|label| !label.is_empty())
                .map(|label| label.as_bytes().to_vec())
                .collect()
        )
    }
}

impl Display for DomainName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.to_bytes()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dotted_form_splits_labels() {
        let name = DomainName::from("www.example.onion.");

        assert_eq!(name.labels().len(), 3);
        assert_eq!(name.to_bytes(), b"www.example.onion".to_vec());
        assert_eq!(name.to_string(), "www.example.onion");
    }

    #[test]
    fn raw_labels_survive_untouched() {
        let name = DomainName::new(vec![b"a.b".to_vec(), vec![0xFF; 3]]);

        assert_eq!(name.labels()[0], b"a.b".to_vec());
        assert_eq!(name.to_bytes(), vec![b'a', b'.', b'b', b'.', 0xFF, 0xFF, 0xFF]);
        assert!(name.to_string().starts_with("a.b."));
    }

    #[test]
    fn root_has_no_labels() {
        let name = DomainName::from("");

        assert!(name.labels().is_empty());
        assert!(name.to_bytes().is_empty());
        assert_eq!(name.to_string(), "");
    }
}
