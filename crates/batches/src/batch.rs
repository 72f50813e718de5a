//! Batch summaries as served by the batch list endpoint.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use stockbatch_core::BatchId;

/// Number of id characters shown when a batch has no display name.
pub const FALLBACK_ID_CHARS: usize = 8;

/// Path of the QR label preview page.
pub const QR_LABELS_PATH: &str = "/stocks/qr-labels";

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    /// Stock-in event.
    In,
    /// Stock-out event. Any kind the client does not know is shown as stock-out.
    #[serde(other)]
    Out,
}

impl BatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            BatchKind::In => "Stock In",
            BatchKind::Out => "Stock Out",
        }
    }
}

/// One entry of the batch list (read-only to the client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub id: BatchId,
    #[serde(rename = "type")]
    pub kind: BatchKind,
    #[serde(rename = "batchName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "itemsCount")]
    pub item_count: u64,
    #[serde(rename = "productTypesCount", default, skip_serializing_if = "Option::is_none")]
    pub product_type_count: Option<u64>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl BatchSummary {
    /// Human label: the display name, or `Batch #<id prefix>` when absent or empty.
    pub fn label(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Batch #{}", self.id.prefix(FALLBACK_ID_CHARS)),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        self.kind.label()
    }

    /// e.g. `3 items · 1 product type`; the product part is omitted when unknown.
    pub fn counts_line(&self) -> String {
        let mut line = format!("{} {}", self.item_count, plural(self.item_count, "item", "items"));
        if let Some(types) = self.product_type_count {
            line.push_str(&format!(
                " · {} {}",
                types,
                plural(types, "product type", "product types")
            ));
        }
        line
    }

    pub fn created_label(&self) -> String {
        match self.created_at {
            Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
            None => "Unknown".to_string(),
        }
    }

    /// Link target of the "View QR Codes" action.
    pub fn qr_labels_path(&self) -> String {
        format!(
            "{}?batchId={}",
            QR_LABELS_PATH,
            urlencoding::encode(self.id.as_str())
        )
    }
}

/// RFC 3339, zone-less date-times (read as UTC) and bare dates are accepted.
/// Anything else, including non-string values, is an unknown timestamp.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn plural(n: u64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}
