use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Script tag holding the server-rendered Next.js state on seating-plan pages.
const NEXT_DATA_SELECTOR: &str = "script[type=\"application/json\"]#__NEXT_DATA__";

/// Keys from the document root down to the seat-inventory payload.
const INVENTORY_PATH: [&str; 4] = ["props", "pageProps", "initialState", "productInventory"];

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Seam between the batch driver and the network. The production
/// implementation fetches a seating-plan page; tests script the results.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_inventory(&self, url: &str) -> Result<Value>;
}

pub struct InventoryExtractor {
    client: reqwest::Client,
}

impl InventoryExtractor {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl InventorySource for InventoryExtractor {
    #[instrument(skip(self))]
    async fn fetch_inventory(&self, url: &str) -> Result<Value> {
        debug!("Fetching seating-plan page");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ScraperError::Api {
                message: format!("Request failed with status: {}", response.status()),
            });
        }

        let body = response.text().await?;
        extract_product_inventory(&body)
    }
}

/// Extracts the `productInventory` payload embedded in a seating-plan page.
///
/// The Next.js server props are serialized into a
/// `<script id="__NEXT_DATA__" type="application/json">` tag; the inventory
/// lives at `props.pageProps.initialState.productInventory`. The leaf value
/// is returned unchanged.
pub fn extract_product_inventory(html: &str) -> Result<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(NEXT_DATA_SELECTOR).unwrap();

    let element = document.select(&selector).next().ok_or_else(|| ScraperError::Api {
        message: "Could not find __NEXT_DATA__ script tag".to_string(),
    })?;

    debug!("Found __NEXT_DATA__ script tag, parsing JSON");
    let json_text = element.inner_html();
    let data: Value = serde_json::from_str(&json_text)?;

    let mut current = &data;
    for key in INVENTORY_PATH {
        current = current
            .get(key)
            .ok_or_else(|| ScraperError::MissingField(format!("{key} not found")))?;
    }
    Ok(current.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seating_page(next_data: &str) -> String {
        format!(
            "<html><head>\
             <script id=\"__NEXT_DATA__\" type=\"application/json\">{next_data}</script>\
             </head><body><div id=\"seat-map\"></div></body></html>"
        )
    }

    #[test]
    fn extracts_inventory_at_fixed_path() {
        let html = seating_page(
            r#"{"props":{"pageProps":{"initialState":{"productInventory":{
                "sections":[{"name":"Orchestra","availableCount":112}]
            }}}}}"#,
        );

        let inventory = extract_product_inventory(&html).unwrap();
        assert_eq!(
            inventory,
            json!({"sections": [{"name": "Orchestra", "availableCount": 112}]})
        );
    }

    #[test]
    fn missing_script_tag_is_an_api_error() {
        let html = "<html><body>No embedded state here</body></html>";
        let err = extract_product_inventory(html).unwrap_err();
        assert!(matches!(err, ScraperError::Api { .. }), "got {err:?}");
    }

    #[test]
    fn script_tag_without_json_type_is_not_matched() {
        let html = r#"<html><script id="__NEXT_DATA__">{"props":{}}</script></html>"#;
        let err = extract_product_inventory(html).unwrap_err();
        assert!(matches!(err, ScraperError::Api { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let html = seating_page("{not json at all");
        let err = extract_product_inventory(&html).unwrap_err();
        assert!(matches!(err, ScraperError::Json(_)));
    }

    #[test]
    fn missing_path_segment_names_the_key() {
        let html = seating_page(r#"{"props":{"pageProps":{"initialState":{}}}}"#);
        let err = extract_product_inventory(&html).unwrap_err();
        match err {
            ScraperError::MissingField(field) => assert!(field.contains("productInventory")),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_top_level_props_names_the_key() {
        let html = seating_page(r#"{"page":"/seating-plan"}"#);
        let err = extract_product_inventory(&html).unwrap_err();
        match err {
            ScraperError::MissingField(field) => assert!(field.contains("props")),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn leaf_value_is_returned_verbatim() {
        // The extractor makes no assumptions about the inventory's shape
        let html = seating_page(
            r#"{"props":{"pageProps":{"initialState":{"productInventory":[1,"two",null]}}}}"#,
        );
        let inventory = extract_product_inventory(&html).unwrap();
        assert_eq!(inventory, json!([1, "two", null]));
    }
}
