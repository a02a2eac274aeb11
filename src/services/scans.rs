use crate::entities::{product, scan_history};
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

/// Source tag applied to scans when the caller does not supply one.
pub const DEFAULT_SCAN_SOURCE: &str = "scanner";

/// Number of leading barcode characters used for the similarity fallback.
pub const SIMILAR_PREFIX_LEN: usize = 6;

/// Cap on the number of similar products returned.
pub const SIMILAR_LIMIT: u64 = 5;

/// Outcome of a barcode lookup: either an exact match, or a set of
/// prefix-similar products. Never both.
#[derive(Debug, Serialize, ToSchema)]
pub struct BarcodeResolution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<product::Model>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar: Vec<product::Model>,
}

/// Resolves scanned barcodes against the product table, recording every scan.
#[derive(Clone)]
pub struct ScanService {
    db: Arc<DatabaseConnection>,
}

impl ScanService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Resolve a scanned barcode.
    ///
    /// The scan is recorded unconditionally, before resolution, so unknown
    /// barcodes still land in the history. An exact barcode match wins; with
    /// no exact match, up to [`SIMILAR_LIMIT`] products sharing the scanned
    /// code's leading [`SIMILAR_PREFIX_LEN`] characters are returned in the
    /// store's natural order. No match of either kind is a `NotFound`.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        barcode: &str,
        source: Option<&str>,
    ) -> Result<BarcodeResolution, ServiceError> {
        let source = source.unwrap_or(DEFAULT_SCAN_SOURCE);

        let scan = scan_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            barcode: Set(barcode.to_string()),
            source: Set(source.to_string()),
            scanned_at: Set(Utc::now()),
        };
        scan.insert(&*self.db).await?;
        info!(barcode = %barcode, source = %source, "Recorded barcode scan");

        let exact = product::Entity::find()
            .filter(product::Column::Barcode.eq(barcode))
            .one(&*self.db)
            .await?;

        if let Some(exact) = exact {
            return Ok(BarcodeResolution {
                exact: Some(exact),
                similar: Vec::new(),
            });
        }

        let prefix = similarity_prefix(barcode);
        let similar = product::Entity::find()
            .filter(product::Column::Barcode.starts_with(prefix))
            .limit(SIMILAR_LIMIT)
            .all(&*self.db)
            .await?;

        if similar.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No product matches barcode '{}'",
                barcode
            )));
        }

        Ok(BarcodeResolution {
            exact: None,
            similar,
        })
    }
}

/// The leading characters of a scanned barcode used for the similarity
/// fallback: the first [`SIMILAR_PREFIX_LEN`] characters, or the whole string
/// when shorter.
fn similarity_prefix(barcode: &str) -> &str {
    match barcode.char_indices().nth(SIMILAR_PREFIX_LEN) {
        Some((idx, _)) => &barcode[..idx],
        None => barcode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_barcode_is_truncated_to_six_chars() {
        assert_eq!(similarity_prefix("999888777666"), "999888");
    }

    #[test]
    fn exactly_six_chars_is_kept_whole() {
        assert_eq!(similarity_prefix("123456"), "123456");
    }

    #[test]
    fn short_barcode_uses_the_whole_string() {
        assert_eq!(similarity_prefix("123"), "123");
        assert_eq!(similarity_prefix(""), "");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(similarity_prefix("äöüßéñx"), "äöüßéñ");
    }
}
