//! Percent-encoding of individual query-string tokens.
//!
//! Follows `application/x-www-form-urlencoded` conventions: unreserved
//! characters (`A-Z a-z 0-9 - _ . *`) pass through, space becomes `+`, and
//! every other byte of the charset-encoded value is escaped as `%XX`.
//!
//! The charset defaults to UTF-8 and can be overridden with any WHATWG
//! encoding label (resolved through `encoding_rs`, the same machinery
//! reqwest uses for response bodies). These functions never fail: an
//! unknown charset label, or a malformed percent-sequence on decode,
//! returns the input string unchanged. That silent-degradation policy is
//! deliberate -- query assembly must not abort a request over a bad label.

use encoding_rs::{Encoding, UTF_8};
use percent_encoding::{percent_decode, percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Charset label used when none is given.
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Bytes escaped by [`encode`]: everything except the form-urlencoded
/// unreserved set. Space is in the set too; it is rewritten to `+` after
/// escaping.
const FORM_URLENCODED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Percent-encode `value` using the default UTF-8 charset.
pub fn encode(value: &str) -> String {
    encode_with_charset(value, DEFAULT_CHARSET)
}

/// Percent-encode `value` using the charset named by `charset`.
///
/// A blank `charset` means UTF-8. An unrecognized label returns `value`
/// unchanged.
pub fn encode_with_charset(value: &str, charset: &str) -> String {
    let Some(encoding) = resolve_charset(charset) else {
        return value.to_owned();
    };
    let (bytes, _, _) = encoding.encode(value);
    // The escape set includes space, so the only "%20" sequences in the
    // output are encoded spaces (a literal '%' becomes "%25").
    percent_encode(&bytes, FORM_URLENCODED)
        .to_string()
        .replace("%20", "+")
}

/// Percent-decode `value` using the default UTF-8 charset.
pub fn decode(value: &str) -> String {
    decode_with_charset(value, DEFAULT_CHARSET)
}

/// Percent-decode `value` using the charset named by `charset`.
///
/// `+` decodes to space. A blank `charset` means UTF-8. An unrecognized
/// label, or a `%` not followed by two hex digits, returns `value`
/// unchanged.
pub fn decode_with_charset(value: &str, charset: &str) -> String {
    let Some(encoding) = resolve_charset(charset) else {
        return value.to_owned();
    };
    if !has_valid_percent_sequences(value) {
        return value.to_owned();
    }
    let raw: Vec<u8> = value
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    let bytes: Vec<u8> = percent_decode(&raw).collect();
    let (text, _, _) = encoding.decode(&bytes);
    text.into_owned()
}

/// Resolve a charset label to an encoding. Blank labels mean UTF-8;
/// unknown labels resolve to `None`.
fn resolve_charset(charset: &str) -> Option<&'static Encoding> {
    let label = charset.trim();
    if label.is_empty() {
        return Some(UTF_8);
    }
    Encoding::for_label(label.as_bytes())
}

/// Check every `%` in `value` is followed by two hex digits.
fn has_valid_percent_sequences(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_table() {
        // (input, expected, label)
        let cases: &[(&str, &str, &str)] = &[
            ("", "", "empty"),
            ("plain", "plain", "unreserved passes through"),
            ("a-b_c.d*e", "a-b_c.d*e", "punctuation in the unreserved set"),
            ("hello world", "hello+world", "space becomes plus"),
            ("a&b=c", "a%26b%3Dc", "query metacharacters escaped"),
            ("1+1", "1%2B1", "literal plus escaped"),
            ("100%", "100%25", "literal percent escaped"),
            ("q?x", "q%3Fx", "question mark escaped"),
            ("\u{fc}", "%C3%BC", "non-ascii encodes as utf-8 bytes"),
        ];

        for &(input, expected, label) in cases {
            assert_eq!(encode(input), expected, "{label}");
        }
    }

    #[test]
    fn decode_table() {
        // (input, expected, label)
        let cases: &[(&str, &str, &str)] = &[
            ("", "", "empty"),
            ("plain", "plain", "nothing to decode"),
            ("hello+world", "hello world", "plus becomes space"),
            ("hello%20world", "hello world", "escaped space"),
            ("a%26b%3Dc", "a&b=c", "query metacharacters"),
            ("1%2B1", "1+1", "escaped plus stays a plus"),
            ("%C3%BC", "\u{fc}", "utf-8 bytes decode"),
        ];

        for &(input, expected, label) in cases {
            assert_eq!(decode(input), expected, "{label}");
        }
    }

    #[test]
    fn malformed_percent_sequences_return_input_unchanged() {
        // A failed decode degrades to the original string, it never errors.
        let cases: &[&str] = &["100%", "%", "%2", "%zz", "a%2Gb%20c"];

        for &input in cases {
            assert_eq!(decode(input), input, "{input}");
        }
    }

    #[test]
    fn unknown_charset_returns_input_unchanged() {
        assert_eq!(encode_with_charset("a b", "no-such-charset"), "a b");
        assert_eq!(decode_with_charset("a%20b", "no-such-charset"), "a%20b");
    }

    #[test]
    fn blank_charset_means_utf8() {
        assert_eq!(encode_with_charset("a b", ""), "a+b");
        assert_eq!(encode_with_charset("a b", "  "), "a+b");
        assert_eq!(decode_with_charset("a+b", ""), "a b");
    }

    #[test]
    fn alternate_charset_round_trip() {
        // WHATWG resolves "iso-8859-1" to windows-1252, where e-acute is 0xE9.
        assert_eq!(encode_with_charset("\u{e9}", "iso-8859-1"), "%E9");
        assert_eq!(decode_with_charset("%E9", "iso-8859-1"), "\u{e9}");
    }

    #[test]
    fn encode_decode_round_trip() {
        let cases: &[&str] = &["key name", "a=b&c", "caf\u{e9} crema", "50% + 50%"];

        for &input in cases {
            assert_eq!(decode(&encode(input)), input, "{input}");
        }
    }
}
