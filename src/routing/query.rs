//! Query string decoding.

use std::collections::HashMap;

use url::form_urlencoded;

/// Decode a raw query substring (the part after `?`) into key/value pairs.
///
/// Keys and values are percent-decoded. Duplicate keys keep the last
/// occurrence. An empty input yields an empty map.
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    form_urlencoded::parse(raw.as_bytes()).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_pairs_on_ampersand_and_equals() {
        let query = parse_query("search=rust&page=2");
        assert_eq!(query.get("search").map(String::as_str), Some("rust"));
        assert_eq!(query.get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn percent_decodes_keys_and_values() {
        let query = parse_query("search=caf%C3%A9%20menu");
        assert_eq!(query.get("search").map(String::as_str), Some("café menu"));
    }

    #[test]
    fn last_duplicate_key_wins() {
        let query = parse_query("search=first&search=second");
        assert_eq!(query.get("search").map(String::as_str), Some("second"));
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn valueless_key_decodes_to_empty_string() {
        let query = parse_query("search=");
        assert_eq!(query.get("search").map(String::as_str), Some(""));
    }
}
