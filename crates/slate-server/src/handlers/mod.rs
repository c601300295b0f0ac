//! HTTP request handlers.

pub(crate) mod pages;
pub(crate) mod reload;

use percent_encoding::percent_decode_str;

/// Split a raw URL path into percent-decoded slug segments.
///
/// Empty segments (double slashes, trailing slash remnants) are dropped;
/// the resolver only ever sees real segments.
pub(crate) fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .map_or_else(|_| segment.to_owned(), |decoded| decoded.into_owned())
        })
        .collect()
}

/// Strip the port from a Host header value.
///
/// Handles bracketed IPv6 literals (`[::1]:7878`).
pub(crate) fn host_without_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split_once(']').map_or(host, |(addr, _)| addr);
    }
    host.split_once(':').map_or(host, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_segments_basic() {
        assert_eq!(split_segments("root/first-level"), vec!["root", "first-level"]);
    }

    #[test]
    fn test_split_segments_drops_empties() {
        assert_eq!(split_segments("root//child/"), vec!["root", "child"]);
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_split_segments_percent_decodes() {
        assert_eq!(split_segments("caf%C3%A9"), vec!["café"]);
    }

    #[test]
    fn test_host_without_port() {
        assert_eq!(host_without_port("localhost:7878"), "localhost");
        assert_eq!(host_without_port("localhost"), "localhost");
        assert_eq!(host_without_port("[::1]:7878"), "::1");
    }
}
