//! HTML extraction for the careers portal results page.
//!
//! Listing fields are extracted into opaque JSON records; the orchestration
//! core never looks inside them.

use jobscout_portal::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};
use serde_json::{json, Value as JsonValue};
use std::sync::OnceLock;

fn results_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("#job-results").expect("valid selector"))
}

fn listing_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(".job-listing").expect("valid selector"))
}

fn title_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(".job-title").expect("valid selector"))
}

fn employer_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(".job-employer").expect("valid selector"))
}

fn location_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(".job-location").expect("valid selector"))
}

fn closing_date_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(".job-closing-date").expect("valid selector"))
}

fn link_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a[href]").expect("valid selector"))
}

/// Parse job listings out of a portal results page.
///
/// # Errors
/// Returns `ScrapeError::ExtractionFailed` if the results container is
/// missing (page structure changed or the session was bounced to a login
/// page) or a listing lacks its required title.
pub fn parse_listings(html: &str) -> Result<Vec<JsonValue>> {
    let document = Html::parse_document(html);

    let container = document
        .select(results_selector())
        .next()
        .ok_or_else(|| {
            ScrapeError::ExtractionFailed("job results container not found".to_string())
        })?;

    let mut listings = Vec::new();
    for row in container.select(listing_selector()) {
        listings.push(parse_listing(row)?);
    }

    tracing::debug!(count = listings.len(), "parsed job listings");

    Ok(listings)
}

fn parse_listing(row: ElementRef<'_>) -> Result<JsonValue> {
    let title = text_of(row, title_selector()).ok_or_else(|| {
        ScrapeError::ExtractionFailed("listing is missing a job title".to_string())
    })?;

    let link = row
        .select(link_selector())
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string);

    Ok(json!({
        "title": title,
        "employer": text_of(row, employer_selector()),
        "location": text_of(row, location_selector()),
        "closing_date": text_of(row, closing_date_selector()),
        "url": link,
    }))
}

fn text_of(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = row.select(selector).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
        <div id="job-results">
            <div class="job-listing">
                <a href="/jobs/101"><span class="job-title">Software Engineer</span></a>
                <span class="job-employer">Acme Corp</span>
                <span class="job-location">Sydney</span>
                <span class="job-closing-date">2026-09-30</span>
            </div>
            <div class="job-listing">
                <a href="/jobs/102"><span class="job-title">Data Analyst</span></a>
                <span class="job-employer">Initech</span>
                <span class="job-location">Melbourne</span>
            </div>
            <div class="job-listing">
                <span class="job-title">Graduate Developer</span>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_listings() {
        let listings = parse_listings(RESULTS_PAGE).expect("parse listings");
        assert_eq!(listings.len(), 3);

        assert_eq!(listings[0]["title"], "Software Engineer");
        assert_eq!(listings[0]["employer"], "Acme Corp");
        assert_eq!(listings[0]["location"], "Sydney");
        assert_eq!(listings[0]["closing_date"], "2026-09-30");
        assert_eq!(listings[0]["url"], "/jobs/101");

        // Optional fields absent from the row come through as null
        assert!(listings[1]["closing_date"].is_null());
        assert!(listings[2]["employer"].is_null());
        assert!(listings[2]["url"].is_null());
    }

    #[test]
    fn test_parse_empty_results() {
        let html = r#"<html><body><div id="job-results"></div></body></html>"#;
        let listings = parse_listings(html).expect("parse empty results");
        assert!(listings.is_empty());
    }

    #[test]
    fn test_parse_missing_container() {
        // A login redirect page has no results container
        let html = r#"<html><body><form id="login">Please sign in</form></body></html>"#;
        let result = parse_listings(html);
        assert!(matches!(result, Err(ScrapeError::ExtractionFailed(_))));
    }

    #[test]
    fn test_parse_listing_missing_title() {
        let html = r#"
            <div id="job-results">
                <div class="job-listing"><span class="job-employer">Acme</span></div>
            </div>
        "#;
        let result = parse_listings(html);
        assert!(matches!(result, Err(ScrapeError::ExtractionFailed(_))));
    }
}
