use jobscout_portal::{Result, ScrapeError};
use url::Url;

/// Build the portal search URL for a query.
///
/// Query parameters are appended to the configured base URL; values are
/// percent-encoded by the `url` crate.
pub fn build_search_url(base: &str, keywords: &str, location: &str, username: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| ScrapeError::InvalidInput(format!("invalid portal search URL: {e}")))?;

    url.query_pairs_mut()
        .append_pair("keywords", keywords)
        .append_pair("location", location)
        .append_pair("user", username);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_url() {
        let url = build_search_url(
            "https://careersonline.example.edu/jobs/search",
            "Software Engineer",
            "Sydney",
            "z1234567",
        )
        .expect("build url");

        assert_eq!(
            url.as_str(),
            "https://careersonline.example.edu/jobs/search?keywords=Software+Engineer&location=Sydney&user=z1234567"
        );
    }

    #[test]
    fn test_build_search_url_encodes_special_characters() {
        let url = build_search_url(
            "https://careersonline.example.edu/jobs/search",
            "C++ & Rust",
            "St. Kilda",
            "z1234567",
        )
        .expect("build url");

        let query = url.query().expect("query string");
        assert!(query.contains("keywords=C%2B%2B+%26+Rust"));
        assert!(query.contains("location=St.+Kilda"));
    }

    #[test]
    fn test_build_search_url_invalid_base() {
        let result = build_search_url("not a url", "Engineer", "Sydney", "z1234567");
        assert!(matches!(result, Err(ScrapeError::InvalidInput(_))));
    }
}
