//! Request header sets

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Ordered headers for a single call. Names are unique (case-insensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<Header>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, replacing an existing entry of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|h| h.name.eq_ignore_ascii_case(&name)) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Header {
                name,
                value,
            }),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|h| h.name.eq_ignore_ascii_case(name)).map(|h| h.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.entries.iter()
    }

    /// Copy without `Content-Type`, for multipart bodies whose boundary the
    /// transport must set itself. Every other entry keeps its position.
    pub fn without_content_type(&self) -> HeaderSet {
        HeaderSet {
            entries: self
                .entries
                .iter()
                .filter(|h| !h.name.eq_ignore_ascii_case(CONTENT_TYPE))
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_name() {
        let headers = HeaderSet::new()
            .with(CONTENT_TYPE, APPLICATION_JSON)
            .with("content-type", "text/plain");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(CONTENT_TYPE), Some("text/plain"));
    }

    #[test]
    fn test_without_content_type_keeps_other_entries() {
        let headers = HeaderSet::new()
            .with(AUTHORIZATION, "Bearer t")
            .with(CONTENT_TYPE, APPLICATION_JSON)
            .with("X-Device", "web");

        let stripped = headers.without_content_type();

        let names: Vec<&str> = stripped.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec![AUTHORIZATION, "X-Device"]);
        assert_eq!(stripped.get(AUTHORIZATION), Some("Bearer t"));
        assert_eq!(stripped.get("X-Device"), Some("web"));
        // The source set is untouched.
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_without_content_type_on_empty_set() {
        assert!(HeaderSet::new().without_content_type().is_empty());
    }
}
