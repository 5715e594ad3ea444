//! Query-string parsing, merging, and serialization.
//!
//! Pure functions over raw URL strings and [`ParameterMap`] values. Nothing
//! here touches the network or mutates its inputs, which is what lets the
//! transport compose "query string already in the target" + "explicit
//! parameter map" into a single re-encoded query string without the request
//! type knowing anything about URLs.

use std::collections::BTreeMap;

use crate::encoding;

/// Multi-valued parameter map used for both query parameters and headers.
///
/// Keys map to the ordered sequence of values seen for that key. A `None`
/// value is a present-but-valueless parameter (`?flag=`). A `BTreeMap` keeps
/// key iteration deterministic so serialization round-trips stably.
pub type ParameterMap = BTreeMap<String, Vec<Option<String>>>;

/// Return the query string of `url`, from the first `?` (inclusive) to the
/// end, or `""` when `url` has no `?`.
///
/// Operates on the raw string: only the first `?` is significant, and a `?`
/// embedded in a value is returned as-is.
pub fn extract_query_string(url: &str) -> &str {
    match url.find('?') {
        Some(index) => &url[index..],
        None => "",
    }
}

/// Return `url` truncated at (and excluding) the first `?`, or `url`
/// unchanged when it has no `?`.
pub fn strip_query_string(url: &str) -> &str {
    match url.find('?') {
        Some(index) => &url[..index],
        None => url,
    }
}

/// Parse the query string of `url` into a [`ParameterMap`].
///
/// The segment after the first `?` is split on `&`; each piece splits on its
/// first `=`. Pieces with no `=`, or with `=` in the first position (an
/// empty key), are discarded. A trailing `=` with nothing after it yields a
/// `None` value. Keys and values are percent-decoded. Repeated keys
/// accumulate values in encounter order.
///
/// A `url` without a query string yields an empty map, not an error.
///
/// Note the lossy edge shared with [`create_query_string`]: a `None` value
/// serializes as `key=`, which parses back as `None`, but a bare `?flag`
/// (no `=` at all) is discarded here.
pub fn extract_query_parameters(url: &str) -> ParameterMap {
    let mut parameters = ParameterMap::new();
    let query = extract_query_string(url);
    if query.is_empty() {
        return parameters;
    }

    for pair in query[1..].split('&') {
        let Some(index) = pair.find('=') else {
            continue;
        };
        if index == 0 {
            continue;
        }
        let key = encoding::decode(&pair[..index]);
        let value = if pair.len() > index + 1 {
            Some(encoding::decode(&pair[index + 1..]))
        } else {
            None
        };
        parameters.entry(key).or_default().push(value);
    }

    parameters
}

/// Combine parameter maps left-to-right into a freshly allocated map.
///
/// Value sequences for keys present in more than one input are concatenated
/// in argument order. The inputs are borrowed and never mutated, and the
/// result shares no storage with them -- merging cannot alias caller data.
/// Zero inputs yield an empty map.
pub fn merge_query_parameters<'a, I>(maps: I) -> ParameterMap
where
    I: IntoIterator<Item = &'a ParameterMap>,
{
    let mut merged = ParameterMap::new();
    for map in maps {
        for (key, values) in map {
            merged
                .entry(key.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }
    merged
}

/// Serialize `parameters` into a `?`-prefixed query string.
///
/// Entries with a blank key or an empty value sequence are dropped. `None`
/// values serialize as an empty string (`key=`). Keys and values are
/// percent-encoded. Returns `""` when nothing survives -- an empty map never
/// produces a lone `?`.
pub fn create_query_string(parameters: &ParameterMap) -> String {
    let pairs: Vec<String> = parameters
        .iter()
        .filter(|(key, values)| !key.trim().is_empty() && !values.is_empty())
        .flat_map(|(key, values)| {
            values.iter().map(move |value| {
                format!(
                    "{}={}",
                    encoding::encode(key),
                    encoding::encode(value.as_deref().unwrap_or(""))
                )
            })
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &[Option<&str>])]) -> ParameterMap {
        entries
            .iter()
            .map(|(key, values)| {
                (
                    (*key).to_owned(),
                    values.iter().map(|v| v.map(str::to_owned)).collect(),
                )
            })
            .collect()
    }

    // -- extract_query_string / strip_query_string --

    #[test]
    fn extract_query_string_table() {
        // (url, expected, label)
        let cases: &[(&str, &str, &str)] = &[
            ("http://host/path?a=1&b=2", "?a=1&b=2", "simple query"),
            ("http://host/path", "", "no query"),
            ("", "", "empty input"),
            ("http://host/p?a=1?b=2", "?a=1?b=2", "only the first ? splits"),
            ("?", "?", "bare question mark"),
        ];

        for &(url, expected, label) in cases {
            assert_eq!(extract_query_string(url), expected, "{label}");
        }
    }

    #[test]
    fn strip_query_string_table() {
        // (url, expected, label)
        let cases: &[(&str, &str, &str)] = &[
            ("http://host/path?a=1", "http://host/path", "simple query"),
            ("http://host/path", "http://host/path", "no query"),
            ("", "", "empty input"),
            ("http://host/p?a=1?b=2", "http://host/p", "only the first ? splits"),
            ("?a=1", "", "query-only input"),
        ];

        for &(url, expected, label) in cases {
            assert_eq!(strip_query_string(url), expected, "{label}");
        }
    }

    #[test]
    fn strip_plus_extract_reconstructs_url() {
        let cases: &[&str] = &[
            "http://host/path?a=1&b=2",
            "http://host/path",
            "https://host/?x=",
        ];

        for &url in cases {
            let rebuilt = format!("{}{}", strip_query_string(url), extract_query_string(url));
            assert_eq!(rebuilt, url, "{url}");
        }
    }

    // -- extract_query_parameters --

    #[test]
    fn extract_parameters_splits_and_decodes() {
        let parameters = extract_query_parameters("http://host/p?a=1&b=hello+world&a=%C3%BC");

        let expected = map(&[
            ("a", &[Some("1"), Some("\u{fc}")]),
            ("b", &[Some("hello world")]),
        ]);
        assert_eq!(parameters, expected);
    }

    #[test]
    fn extract_parameters_edge_segments() {
        // no '=' -> discarded; '=' first -> discarded; trailing '=' -> None
        let parameters = extract_query_parameters("http://host/p?flag&=orphan&empty=&k=v&&");

        let expected = map(&[("empty", &[None]), ("k", &[Some("v")])]);
        assert_eq!(parameters, expected);
    }

    #[test]
    fn extract_parameters_without_query_is_empty() {
        assert!(extract_query_parameters("http://host/path").is_empty());
        assert!(extract_query_parameters("").is_empty());
    }

    #[test]
    fn extract_parameters_decodes_keys() {
        let parameters = extract_query_parameters("?key+name=x");
        let expected = map(&[("key name", &[Some("x")])]);
        assert_eq!(parameters, expected);
    }

    // -- merge_query_parameters --

    #[test]
    fn merge_zero_maps_is_empty() {
        assert!(merge_query_parameters([]).is_empty());
    }

    #[test]
    fn merge_single_map_is_identity() {
        let input = map(&[("a", &[Some("1"), None])]);
        assert_eq!(merge_query_parameters([&input]), input);
    }

    #[test]
    fn merge_concatenates_in_argument_order() {
        let first = map(&[("q", &[Some("a")]), ("x", &[Some("1")])]);
        let second = map(&[("q", &[Some("b"), Some("c")])]);

        let merged = merge_query_parameters([&first, &second]);

        let expected = map(&[("q", &[Some("a"), Some("b"), Some("c")]), ("x", &[Some("1")])]);
        assert_eq!(merged, expected);
    }

    #[test]
    fn merge_never_aliases_its_inputs() {
        let first = map(&[("q", &[Some("a")])]);
        let second = map(&[("q", &[Some("b")])]);

        let mut merged = merge_query_parameters([&first, &second]);
        merged.get_mut("q").expect("merged key").push(Some("mutated".to_owned()));

        // The inputs are untouched by mutation of the result.
        assert_eq!(first, map(&[("q", &[Some("a")])]));
        assert_eq!(second, map(&[("q", &[Some("b")])]));
    }

    // -- create_query_string --

    #[test]
    fn create_query_string_table() {
        // (parameters, expected, label)
        let cases: &[(&[(&str, &[Option<&str>])], &str, &str)] = &[
            (&[], "", "empty map"),
            (&[("a", &[Some("1")])], "?a=1", "single pair"),
            (&[("a", &[Some("1"), Some("2")])], "?a=1&a=2", "repeated key"),
            (&[("flag", &[None])], "?flag=", "valueless serializes as key="),
            (&[(" ", &[Some("x")])], "", "blank key dropped"),
            (&[("a", &[]), ("b", &[Some("1")])], "?b=1", "empty sequence dropped"),
            (
                &[("key name", &[Some("a&b")])],
                "?key+name=a%26b",
                "keys and values encoded",
            ),
        ];

        for &(entries, expected, label) in cases {
            assert_eq!(create_query_string(&map(entries)), expected, "{label}");
        }
    }

    #[test]
    fn round_trip_reproduces_parameters() {
        // Serialization followed by parsing reproduces the map, modulo the
        // documented None-vs-empty-string edge.
        let input = map(&[
            ("a", &[Some("1"), Some("2")]),
            ("key name", &[Some("a&b=c")]),
            ("u", &[Some("\u{fc}")]),
        ]);

        let reparsed = extract_query_parameters(&create_query_string(&input));
        assert_eq!(reparsed, input);
    }

    #[test]
    fn round_trip_none_becomes_none_again() {
        // None -> "key=" -> None survives the trip.
        let input = map(&[("flag", &[None])]);
        let reparsed = extract_query_parameters(&create_query_string(&input));
        assert_eq!(reparsed, input);
    }

    #[test]
    fn round_trip_empty_string_collapses_to_none() {
        // The lossy edge: Some("") and None both serialize as "key=", and
        // parsing "key=" always yields None.
        let input = map(&[("e", &[Some("")])]);
        let reparsed = extract_query_parameters(&create_query_string(&input));
        assert_eq!(reparsed, map(&[("e", &[None])]));
    }
}
