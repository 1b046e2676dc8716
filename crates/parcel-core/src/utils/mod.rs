//! Utility functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the RFC 3986 unreserved characters
pub const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode an object key into a single URL path segment
///
/// `/` is escaped too, so the encoded key never introduces extra path segments.
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, URI_ENCODE_SET).to_string()
}

/// Decode an ETag header value
///
/// The store sends the ETag as a quoted string (`"abc123"`), which is decoded
/// as a JSON string literal.
pub fn parse_etag(raw: &str) -> crate::Result<String> {
    serde_json::from_str(raw).map_err(crate::Error::InvalidEtag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key_reserved_characters() {
        assert_eq!(encode_key("hello world"), "hello%20world");
        assert_eq!(encode_key("a/b/c.txt"), "a%2Fb%2Fc.txt");
        assert_eq!(encode_key("what?x=1&y=2"), "what%3Fx%3D1%26y%3D2");
        assert_eq!(encode_key("safe-_.~"), "safe-_.~");
        assert_eq!(encode_key("it's (1)!*"), "it%27s%20%281%29%21%2A");
    }

    #[test]
    fn test_encode_key_round_trip() {
        let keys = [
            "plain",
            "with space",
            "nested/path/to/file.bin",
            "query?and#fragment",
            "percent%20literal",
            "plus+sign",
            "ünïcødé/日本語",
        ];
        for key in keys {
            let encoded = encode_key(key);
            assert!(!encoded.contains('/'), "{} kept a slash", encoded);
            let decoded = urlencoding::decode(&encoded).unwrap();
            assert_eq!(decoded, key);
        }
    }

    #[test]
    fn test_parse_etag() {
        assert_eq!(parse_etag("\"abc123\"").unwrap(), "abc123");
        assert_eq!(
            parse_etag("\"d41d8cd98f00b204e9800998ecf8427e-2\"").unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e-2"
        );
    }

    #[test]
    fn test_parse_etag_unquoted_fails() {
        let err = parse_etag("abc123").unwrap_err();
        assert_eq!(err.code(), "InvalidEtag");
    }
}
