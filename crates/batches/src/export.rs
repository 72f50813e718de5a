//! Export request descriptor for batch label files.

use stockbatch_core::{BatchId, ValueObject};

/// Path of the label export endpoint.
pub const EXPORT_PATH: &str = "/batches/export";

/// What to download: one batch's labels at a given row layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub batch_id: BatchId,
    pub items_per_row: u32,
}

impl ValueObject for ExportRequest {}

impl ExportRequest {
    pub fn new(batch_id: BatchId, items_per_row: u32) -> Self {
        Self {
            batch_id,
            items_per_row,
        }
    }

    /// `/batches/export?batchId=<percent-encoded id>&itemsPerRow=<n>`
    pub fn path_and_query(&self) -> String {
        format!(
            "{}?batchId={}&itemsPerRow={}",
            EXPORT_PATH,
            urlencoding::encode(self.batch_id.as_str()),
            self.items_per_row
        )
    }

    /// Absolute address against an API base such as `http://host:8080`.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path_and_query())
    }

    /// `batch_<id>.txt`
    pub fn suggested_filename(&self) -> String {
        format!("batch_{}.txt", self.batch_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_batch_and_layout() {
        let request = ExportRequest::new(BatchId::new("abc123"), 4);
        assert_eq!(
            request.path_and_query(),
            "/batches/export?batchId=abc123&itemsPerRow=4"
        );
        assert_eq!(request.suggested_filename(), "batch_abc123.txt");
    }

    #[test]
    fn batch_id_is_percent_encoded() {
        let request = ExportRequest::new(BatchId::new("a&b=c d"), 2);
        assert_eq!(
            request.path_and_query(),
            "/batches/export?batchId=a%26b%3Dc%20d&itemsPerRow=2"
        );
    }

    #[test]
    fn url_joins_base_without_double_slash() {
        let request = ExportRequest::new(BatchId::new("x"), 3);
        assert_eq!(
            request.url("http://localhost:8080/"),
            "http://localhost:8080/batches/export?batchId=x&itemsPerRow=3"
        );
    }
}
