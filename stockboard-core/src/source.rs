use async_trait::async_trait;

use crate::{Document, StockboardError};

/// How a fetch treats intermediate caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Ask for fresh content (no-cache request headers).
    #[default]
    Fresh,
    /// As `Fresh`, and additionally defeat any cache keyed on the URL.
    HardReload,
}

/// A backend that returns the whole snapshot document.
///
/// Implementations must not cache: every call reflects the source as it is
/// now.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Vendor or transport behind the source.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Fetch and decode the current document.
    ///
    /// # Errors
    /// `Fetch`, `NotFound` or `Timeout` when the transport fails, and `Data`
    /// when the body is not a valid document.
    async fn fetch(&self, mode: FetchMode) -> Result<Document, StockboardError>;
}

/// Decode a JSON document body.
///
/// # Errors
/// Returns `StockboardError::Data` when `bytes` is not a valid document.
pub fn decode_document(bytes: &[u8]) -> Result<Document, StockboardError> {
    serde_json::from_slice(bytes)
        .map_err(|e| StockboardError::Data(format!("invalid snapshot document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_document() {
        let body = br#"{"2024-01-01":{"10:00 AM":{"iphone":[{"model":"iPhone 15","price":79999,"stock":"In Stock"}]}}}"#;
        let doc = decode_document(body).unwrap();
        let items = &doc["2024-01-01"]["10:00 AM"]["iphone"];
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].model, "iPhone 15");
        assert!(items[0].online_price.is_none());
    }

    #[test]
    fn null_text_fields_do_not_fail_the_document() {
        let body = br#"{"2024-01-01":{"10:00 AM":{"iphone":[{"model":"X","color":null,"price":1000,"stock":null}]}}}"#;
        let doc = decode_document(body).unwrap();
        let item = &doc["2024-01-01"]["10:00 AM"]["iphone"][0];
        assert_eq!(item.color, "");
        assert_eq!(item.stock, "");
    }

    #[test]
    fn rejects_non_document_json() {
        let err = decode_document(b"[1,2,3]").unwrap_err();
        assert!(matches!(err, StockboardError::Data(_)));
        let err = decode_document(b"not json").unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
