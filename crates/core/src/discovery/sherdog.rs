//! Event discovery from the Sherdog organization page.
//!
//! The page lists events in two tabs (`#upcoming_tab`, `#recent_tab`), each a
//! table whose rows carry schema.org `Event` microdata. The first row of each
//! tab is the event of interest.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::config::DiscoveryConfig;
use crate::event::Event;

use super::{DiscoveredEvents, DiscoveryError, EventDiscovery};

const UPCOMING_TAB: &str = "div#upcoming_tab";
const RECENT_TAB: &str = "div#recent_tab";
const EVENT_ROW: &str = r#"tr[itemtype="http://schema.org/Event"]"#;
const NAME: &str = r#"span[itemprop="name"]"#;
const START_DATE: &str = r#"meta[itemprop="startDate"]"#;
const URL: &str = r#"a[itemprop="url"]"#;

/// Discovers events by scraping the configured listing page.
pub struct SherdogDiscovery {
    client: Client,
    config: DiscoveryConfig,
}

impl SherdogDiscovery {
    pub fn new(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| DiscoveryError::FetchFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl EventDiscovery for SherdogDiscovery {
    async fn discover(&self) -> Result<DiscoveredEvents, DiscoveryError> {
        debug!(url = %self.config.url, "Fetching event listing");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| DiscoveryError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DiscoveryError::FetchFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| DiscoveryError::FetchFailed(e.to_string()))?;

        let events = parse_listing(&html)?;
        info!(
            last = %events.last.name,
            next = %events.next.name,
            "Discovered events"
        );
        Ok(events)
    }
}

/// Parse the last and next events out of a listing page.
pub fn parse_listing(html: &str) -> Result<DiscoveredEvents, DiscoveryError> {
    let document = Html::parse_document(html);

    let next = parse_tab(&document, UPCOMING_TAB)?;
    let last = parse_tab(&document, RECENT_TAB)?;

    Ok(DiscoveredEvents { last, next })
}

/// Event name as used for searching: the part before the first `-`, trimmed and lower-cased.
///
/// "UFC 300 - Pereira vs. Hill" becomes "ufc 300".
pub fn normalize_event_name(raw: &str) -> String {
    raw.split('-')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn parse_tab(document: &Html, tab: &str) -> Result<Event, DiscoveryError> {
    let tab_el = first(document.root_element(), tab)?;
    let row = first(tab_el, EVENT_ROW)?;

    let name: String = first(row, NAME)?.text().collect();
    let date = attr(first(row, START_DATE)?, START_DATE, "content")?;
    let url = attr(first(row, URL)?, URL, "href")?;

    let date = DateTime::parse_from_rfc3339(date.trim()).map_err(|e| DiscoveryError::InvalidDate {
        value: date.to_string(),
        message: e.to_string(),
    })?;

    Ok(Event::new(url, normalize_event_name(&name), date))
}

fn first<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, DiscoveryError> {
    let selector = Selector::parse(css)
        .map_err(|e| DiscoveryError::MissingElement(format!("{} (bad selector: {})", css, e)))?;

    scope
        .select(&selector)
        .next()
        .ok_or_else(|| DiscoveryError::MissingElement(css.to_string()))
}

fn attr<'a>(el: ElementRef<'a>, css: &str, name: &str) -> Result<&'a str, DiscoveryError> {
    el.value()
        .attr(name)
        .ok_or_else(|| DiscoveryError::MissingElement(format!("{}@{}", css, name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, date: &str, href: &str) -> String {
        format!(
            r#"<tr itemscope itemtype="http://schema.org/Event">
                 <td><meta itemprop="startDate" content="{date}"><span>Apr 13</span></td>
                 <td><a itemprop="url" href="{href}"><span itemprop="name">{name}</span></a></td>
               </tr>"#
        )
    }

    fn page(upcoming: &str, recent: &str) -> String {
        format!(
            r#"<html><body>
                 <div id="upcoming_tab"><table>
                   <tr class="table_head"><td>Date</td><td>Event</td></tr>
                   {upcoming}
                   {extra}
                 </table></div>
                 <div id="recent_tab"><table>{recent}</table></div>
               </body></html>"#,
            extra = row("UFC 302 - Later", "2024-06-01T18:00:00-07:00", "/events/ufc-302"),
        )
    }

    #[test]
    fn test_parse_listing() {
        let html = page(
            &row(
                "UFC 301 - Pantoja vs. Erceg",
                "2024-05-04T18:00:00-03:00",
                "/events/UFC-301-Pantoja-vs-Erceg-100000",
            ),
            &row(
                "UFC 300 - Pereira vs. Hill",
                "2024-04-13T18:00:00-07:00",
                "/events/UFC-300-Pereira-vs-Hill-99999",
            ),
        );

        let events = parse_listing(&html).unwrap();
        assert_eq!(events.next.name, "ufc 301");
        assert_eq!(events.next.url, "/events/UFC-301-Pantoja-vs-Erceg-100000");
        assert_eq!(events.next.date.to_rfc3339(), "2024-05-04T18:00:00-03:00");
        assert_eq!(events.last.name, "ufc 300");
        assert_eq!(events.last.url, "/events/UFC-300-Pereira-vs-Hill-99999");
        assert!(!events.last.is_complete());
    }

    #[test]
    fn test_invalid_date_is_error() {
        let html = page(
            &row("UFC 301 - X", "May 4th", "/events/301"),
            &row("UFC 300 - Y", "2024-04-13T18:00:00-07:00", "/events/300"),
        );
        let result = parse_listing(&html);
        assert!(matches!(result, Err(DiscoveryError::InvalidDate { .. })));
    }

    #[test]
    fn test_missing_recent_tab_is_error() {
        let html = r#"<div id="upcoming_tab"></div>"#;
        let result = parse_listing(html);
        assert!(matches!(result, Err(DiscoveryError::MissingElement(_))));
    }

    #[test]
    fn test_normalize_event_name() {
        assert_eq!(normalize_event_name("UFC 300 - Pereira vs. Hill"), "ufc 300");
        assert_eq!(
            normalize_event_name("  UFC Fight Night 240 "),
            "ufc fight night 240"
        );
        assert_eq!(normalize_event_name(""), "");
    }
}
