//! Navigation state carried in the location fragment.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// Reserved key selecting the active page.
pub const PAGE_KEY: &str = "p";

/// Key/value navigation state parsed from a `#key=value&...` fragment.
///
/// The `p` key selects the page; every other key is a page argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    entries: BTreeMap<String, String>,
}

impl NavigationState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a fragment, with or without its leading `#`.
    ///
    /// Pairs are form-url-decoded. When a key repeats, the last value wins.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment);
        let entries = form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { entries }
    }

    /// Serializes to fragment form without the leading `#`.
    ///
    /// `p` is written first, the remaining keys follow in key order.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(page) = self.entries.get(PAGE_KEY) {
            serializer.append_pair(PAGE_KEY, page);
        }
        for (key, value) in self.args() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Returns the raw page identifier, if any.
    #[must_use]
    pub fn page_id(&self) -> Option<&str> {
        self.get(PAGE_KEY)
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns a copy with `p` set to `page_id` and all other keys kept.
    #[must_use]
    pub fn with_page(&self, page_id: &str) -> Self {
        self.clone().with(PAGE_KEY, page_id)
    }

    /// Iterates over page arguments (every key except `p`).
    pub fn args(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(key, _)| key.as_str() != PAGE_KEY)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns page arguments as a state of their own.
    #[must_use]
    pub fn without_page(&self) -> Self {
        let mut args = self.clone();
        args.remove(PAGE_KEY);
        args
    }

    /// Number of entries, `p` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the state has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.serialize())
    }
}

impl<K, V> FromIterator<(K, V)> for NavigationState
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_parse_page_and_args() {
        let state = NavigationState::parse("#p=edit-organization&id=42");

        assert_eq!(state.page_id(), Some("edit-organization"));
        assert_eq!(state.get("id"), Some("42"));
        assert_eq!(state.len(), 2);
    }

    #[test_case("" ; "empty")]
    #[test_case("#" ; "hash_only")]
    fn test_parse_empty_fragment(fragment: &str) {
        assert!(NavigationState::parse(fragment).is_empty());
    }

    #[test]
    fn test_parse_without_leading_hash() {
        let state = NavigationState::parse("p=home");
        assert_eq!(state.page_id(), Some("home"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let state = NavigationState::parse("#id=1&id=2&p=home&id=3");
        assert_eq!(state.get("id"), Some("3"));
    }

    #[test]
    fn test_key_without_value() {
        let state = NavigationState::parse("#flag&p=home");
        assert_eq!(state.get("flag"), Some(""));
    }

    #[test]
    fn test_parse_decodes_like_query_strings() {
        let state = NavigationState::parse("#name=Strawberry+Theatre%20Workshop");
        assert_eq!(state.get("name"), Some("Strawberry Theatre Workshop"));
    }

    #[test]
    fn test_serialize_puts_page_first() {
        let state = NavigationState::new()
            .with("id", "42")
            .with("b", "x")
            .with(PAGE_KEY, "edit-organization");

        assert_eq!(state.serialize(), "p=edit-organization&b=x&id=42");
        assert_eq!(state.to_string(), "#p=edit-organization&b=x&id=42");
    }

    #[test_case(&[] ; "empty_map")]
    #[test_case(&[("p", "home")] ; "page_only")]
    #[test_case(&[("p", "edit-organization"), ("id", "42")] ; "page_and_id")]
    #[test_case(&[("id", "3f0c0d6e-8b1c-4c55-9f5e-0a4c4f2b7d11")] ; "no_page")]
    #[test_case(&[("q", "a b+c"), ("x", "50%")] ; "needs_encoding")]
    #[test_case(&[("empty", "")] ; "empty_value")]
    fn test_round_trip(pairs: &[(&str, &str)]) {
        let state: NavigationState = pairs.iter().copied().collect();
        assert_eq!(NavigationState::parse(&state.serialize()), state);
    }

    proptest! {
        #[test]
        fn test_round_trip_arbitrary_maps(
            entries in proptest::collection::btree_map(".*", ".*", 0..8)
        ) {
            let state: NavigationState = entries.into_iter().collect();
            prop_assert_eq!(NavigationState::parse(&state.serialize()), state);
        }

        #[test]
        fn test_last_duplicate_wins_for_any_key(
            key in ".*",
            first in ".*",
            last in ".*",
        ) {
            let fragment = NavigationState::new().with(key.as_str(), first).serialize();
            let repeated = NavigationState::new().with(key.as_str(), last.as_str()).serialize();
            let state = NavigationState::parse(&format!("#{fragment}&{repeated}"));
            prop_assert_eq!(state.get(&key), Some(last.as_str()));
        }
    }

    #[test]
    fn test_with_page_preserves_args() {
        let state = NavigationState::parse("#p=unknown&id=7");
        let redirected = state.with_page("home");

        assert_eq!(redirected.page_id(), Some("home"));
        assert_eq!(redirected.get("id"), Some("7"));
    }

    #[test]
    fn test_without_page() {
        let args = NavigationState::parse("#p=edit-organization&id=42").without_page();
        assert_eq!(args, NavigationState::new().with("id", "42"));
    }
}
