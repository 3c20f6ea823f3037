/// Decoded answers of a single lookup, grouped by kind in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    pub ipv4: Vec<String>,
    pub ipv6: Vec<String>,
    pub cname: Vec<String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty() && self.cname.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ipv4.len() + self.ipv6.len() + self.cname.len()
    }
}
