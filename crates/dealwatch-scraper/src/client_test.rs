use super::*;

#[test]
fn listing_url_accepts_https() {
    let url = DealsClient::listing_url("https://www.dealabs.com/groupe/lego").unwrap();
    assert_eq!(url.as_str(), "https://www.dealabs.com/groupe/lego");
}

#[test]
fn listing_url_trims_whitespace() {
    let url = DealsClient::listing_url("  https://www.dealabs.com/groupe/lego\n").unwrap();
    assert_eq!(url.host_str(), Some("www.dealabs.com"));
}

#[test]
fn listing_url_rejects_relative() {
    let err = DealsClient::listing_url("/groupe/lego").unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}

#[test]
fn listing_url_rejects_non_http_scheme() {
    let err = DealsClient::listing_url("file:///tmp/lego.html").unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { ref reason, .. } if reason.contains("file")),
        "expected InvalidUrl for file scheme, got: {err:?}"
    );
}
