//! URL Encoding Helpers
//!
//! Canonical query strings and path segments for API requests.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

/// Join parameters as `a=1&b=2`, skipping any pair whose value is empty
pub fn encode_query<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    params
        .iter()
        .filter(|(_, v)| !v.as_ref().is_empty())
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k.as_ref(), COMPONENT),
                utf8_percent_encode(v.as_ref(), COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Split a query string back into decoded pairs
pub fn decode_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(s: &str) -> String {
    percent_encoding::percent_decode_str(&s.replace('+', " "))
        .decode_utf8_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterOperator, ListQuery, SortDirection};
    use proptest::prelude::*;

    #[test]
    fn reserved_characters_are_escaped() {
        let qs = encode_query(&[("key", "a&b=c d")]);
        assert_eq!(qs, "key=a%26b%3Dc%20d");
        assert_eq!(decode_query(&qs), vec![("key".to_string(), "a&b=c d".to_string())]);
    }

    #[test]
    fn empty_values_are_skipped() {
        assert_eq!(encode_query(&[("a", ""), ("b", "1")]), "b=1");
    }

    fn optional_text() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("   ".to_string())),
            "[a-zA-Z0-9 &=?]{0,12}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn list_query_never_emits_blank_parameters(
            key in optional_text(),
            filter in optional_text(),
            order in optional_text(),
            desc in any::<bool>(),
            with_operator in any::<bool>(),
            page in 0u32..50,
            size in 0u32..100,
        ) {
            let query = ListQuery {
                key,
                filter,
                operator: with_operator.then_some(FilterOperator::Contains),
                order,
                direction: Some(if desc { SortDirection::Desc } else { SortDirection::Asc }),
                page_number: page,
                page_size: size,
            };
            let encoded = encode_query(&query.to_params());
            for (name, value) in decode_query(&encoded) {
                prop_assert!(!value.trim().is_empty(), "{} was sent blank", name);
            }
            let names: Vec<_> = decode_query(&encoded).into_iter().map(|(k, _)| k).collect();
            prop_assert!(names.contains(&"pageNumber".to_string()));
            prop_assert!(names.contains(&"pageSize".to_string()));
        }
    }
}
