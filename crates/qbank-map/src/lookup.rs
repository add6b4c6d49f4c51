use std::collections::HashMap;

/// Case-insensitive header lookup that preserves original spelling.
///
/// Keys are trimmed and lower-cased. When two headers collide, the first one
/// in sheet order wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderLookup {
    /// Maps folded header -> original header
    inner: HashMap<String, String>,
    order: Vec<String>,
}

impl HeaderLookup {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inner = HashMap::new();
        let mut order = Vec::new();
        for header in headers {
            let header = header.as_ref();
            order.push(header.to_string());
            inner
                .entry(fold(header))
                .or_insert_with(|| header.to_string());
        }
        Self { inner, order }
    }

    /// Original header for a name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(&fold(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&fold(name))
    }

    /// Headers in sheet order.
    pub fn headers(&self) -> &[String] {
        &self.order
    }

    /// Whether any header is a bare option letter B-F.
    pub fn has_bare_option_letters(&self) -> bool {
        ["b", "c", "d", "e", "f"]
            .iter()
            .any(|letter| self.inner.contains_key(*letter))
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_keeps_first() {
        let lookup = HeaderLookup::new(["Question", " question ", "答案"]);
        assert_eq!(lookup.get("QUESTION"), Some("Question"));
        assert_eq!(lookup.get("答案"), Some("答案"));
        assert!(!lookup.contains("answer"));
        assert_eq!(lookup.headers().len(), 3);
    }

    #[test]
    fn bare_letters_detected() {
        assert!(HeaderLookup::new(["题干", "A", "b"]).has_bare_option_letters());
        assert!(!HeaderLookup::new(["Q", "A"]).has_bare_option_letters());
    }
}
