use std::fmt;

use url::form_urlencoded;

/// Ordered multimap of query-string pairs, serialised as
/// `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a search string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Replaces every value of `key` with `value`, keeping the position of the
    /// first occurrence. Appends when the key is absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    /// Removes every value of `key`. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        self.pairs.len() != before
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&encoded)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_question_mark_and_decodes() {
        let params = QueryParams::parse("?name=~Acme+Corp&status=active&status=pending");
        assert_eq!(params.get("name"), Some("~Acme Corp"));
        assert_eq!(params.get_all("status").collect::<Vec<_>>(), ["active", "pending"]);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn display_encodes_operator_prefixes() {
        let params: QueryParams = [("amount", "<100"), ("name", "~a b")].into_iter().collect();
        assert_eq!(params.to_string(), "amount=%3C100&name=%7Ea+b");
        assert_eq!(QueryParams::parse(&params.to_string()), params);
    }

    #[test]
    fn set_replaces_all_values_in_place() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        params.set("a", "9");
        assert_eq!(params.to_string(), "a=9&b=2");

        params.set("c", "4");
        assert_eq!(params.to_string(), "a=9&b=2&c=4");
    }

    #[test]
    fn delete_removes_every_value() {
        let mut params = QueryParams::parse("a=1&b=2&a=3");
        assert!(params.delete("a"));
        assert!(!params.delete("a"));
        assert_eq!(params.to_string(), "b=2");
    }

    #[test]
    fn empty_params_serialize_to_empty_string() {
        assert_eq!(QueryParams::new().to_string(), "");
        assert!(QueryParams::parse("?").is_empty());
    }
}
