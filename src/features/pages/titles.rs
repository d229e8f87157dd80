use axum::http::HeaderMap;

/// Fallback title when the Host header is absent or unrecognized
const DEFAULT_TITLE: &str = "Shaw Photography";

/// Page title keyed by the serving domain.
///
/// The same binary serves more than one domain; the nav title follows
/// whichever one the request came in on.
fn title_for_domain(domain: &str) -> &'static str {
    match domain {
        "shawphoto.com" => "Shaw Photography",
        "shawdrives.com" => "Shaw Drives",
        _ => DEFAULT_TITLE,
    }
}

/// Resolve the page title from the request's Host header
pub fn site_title(headers: &HeaderMap) -> &'static str {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    // Strip port and www. prefix before matching
    let domain = host.split(':').next().unwrap_or("");
    title_for_domain(domain.trim_start_matches("www."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_host(host: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::HOST,
            HeaderValue::from_str(host).unwrap(),
        );
        headers
    }

    #[test]
    fn test_known_domain_gets_its_title() {
        let headers = headers_with_host("www.shawdrives.com");
        assert_eq!(site_title(&headers), "Shaw Drives");
    }

    #[test]
    fn test_port_is_ignored() {
        let headers = headers_with_host("shawphoto.com:3000");
        assert_eq!(site_title(&headers), "Shaw Photography");
    }

    #[test]
    fn test_unknown_domain_falls_back_to_default() {
        let headers = headers_with_host("localhost");
        assert_eq!(site_title(&headers), DEFAULT_TITLE);
    }

    #[test]
    fn test_missing_host_header_falls_back_to_default() {
        assert_eq!(site_title(&HeaderMap::new()), DEFAULT_TITLE);
    }
}
