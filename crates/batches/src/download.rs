//! Download options dialog: collects the items-per-row layout for one batch.
//!
//! `Closed → Open(batch) → Closed`. Options exist only while the dialog is
//! open and are rebuilt from defaults on every `open`.

use stockbatch_core::{DomainError, DomainResult, ValueObject};

use crate::batch::BatchSummary;
use crate::export::ExportRequest;
use crate::query::leading_int;

pub const MIN_ITEMS_PER_ROW: u32 = 1;
pub const MAX_ITEMS_PER_ROW: u32 = 10;
pub const DEFAULT_ITEMS_PER_ROW: u32 = 2;

/// Label layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadOptions {
    items_per_row: u32,
}

impl ValueObject for DownloadOptions {}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            items_per_row: DEFAULT_ITEMS_PER_ROW,
        }
    }
}

impl DownloadOptions {
    pub fn items_per_row(&self) -> u32 {
        self.items_per_row
    }

    /// Resolve raw input by its leading integer (`"7.5"` is 7): no digits or
    /// below range → 1, above range → 10.
    pub fn parse_items_per_row(raw: &str) -> u32 {
        match leading_int(raw) {
            Some(n) if n >= i64::from(MIN_ITEMS_PER_ROW) => {
                n.min(i64::from(MAX_ITEMS_PER_ROW)) as u32
            }
            _ => MIN_ITEMS_PER_ROW,
        }
    }
}

/// Dialog state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open {
        target: BatchSummary,
        options: DownloadOptions,
    },
}

/// Modal state machine feeding the export builder.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptionsCollector {
    state: DialogState,
}

impl DownloadOptionsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open { .. })
    }

    pub fn target(&self) -> Option<&BatchSummary> {
        match &self.state {
            DialogState::Open { target, .. } => Some(target),
            DialogState::Closed => None,
        }
    }

    pub fn options(&self) -> Option<DownloadOptions> {
        match &self.state {
            DialogState::Open { options, .. } => Some(*options),
            DialogState::Closed => None,
        }
    }

    /// Open for `batch`. Re-opening while open replaces the target.
    pub fn open(&mut self, batch: BatchSummary) {
        self.state = DialogState::Open {
            target: batch,
            options: DownloadOptions::default(),
        };
    }

    /// Update items-per-row from raw input. Ignored while closed.
    pub fn set_items_per_row(&mut self, raw: &str) {
        if let DialogState::Open { options, .. } = &mut self.state {
            options.items_per_row = DownloadOptions::parse_items_per_row(raw);
        }
    }

    /// Close the dialog and hand back the export to perform.
    pub fn confirm(&mut self) -> DomainResult<ExportRequest> {
        match core::mem::take(&mut self.state) {
            DialogState::Open { target, options } => {
                Ok(ExportRequest::new(target.id, options.items_per_row))
            }
            DialogState::Closed => Err(DomainError::invariant("download dialog is not open")),
        }
    }

    /// Close the dialog without exporting.
    pub fn cancel(&mut self) {
        self.state = DialogState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchKind;
    use stockbatch_core::BatchId;

    fn batch(id: &str) -> BatchSummary {
        BatchSummary {
            id: BatchId::new(id),
            kind: BatchKind::In,
            display_name: None,
            item_count: 4,
            product_type_count: Some(2),
            created_at: None,
        }
    }

    #[test]
    fn starts_closed() {
        let collector = DownloadOptionsCollector::new();
        assert_eq!(collector.state(), &DialogState::Closed);
        assert!(collector.target().is_none());
    }

    #[test]
    fn open_uses_default_layout() {
        let mut collector = DownloadOptionsCollector::new();
        collector.open(batch("x"));
        assert_eq!(collector.options().unwrap().items_per_row(), 2);
    }

    #[test]
    fn invalid_input_resolves_to_one() {
        for raw in ["0", "-3", "abc", ""] {
            assert_eq!(DownloadOptions::parse_items_per_row(raw), 1, "raw={raw:?}");
        }
        assert_eq!(DownloadOptions::parse_items_per_row("7"), 7);
    }

    #[test]
    fn numeric_prefix_is_taken() {
        assert_eq!(DownloadOptions::parse_items_per_row("7.5"), 7);
        assert_eq!(DownloadOptions::parse_items_per_row("3 per row"), 3);
        assert_eq!(DownloadOptions::parse_items_per_row("0.9"), 1);
    }

    #[test]
    fn input_above_range_is_clamped() {
        assert_eq!(DownloadOptions::parse_items_per_row("11"), 10);
        assert_eq!(DownloadOptions::parse_items_per_row("99999999999999999999999"), 10);
    }

    #[test]
    fn invalid_input_does_not_keep_previous_value() {
        let mut collector = DownloadOptionsCollector::new();
        collector.open(batch("x"));
        collector.set_items_per_row("7");
        collector.set_items_per_row("abc");
        assert_eq!(collector.options().unwrap().items_per_row(), 1);
    }

    #[test]
    fn reopening_replaces_target() {
        let mut collector = DownloadOptionsCollector::new();
        collector.open(batch("X"));
        collector.open(batch("Y"));

        let request = collector.confirm().unwrap();
        assert_eq!(request.batch_id.as_str(), "Y");
    }

    #[test]
    fn reopening_resets_options() {
        let mut collector = DownloadOptionsCollector::new();
        collector.open(batch("X"));
        collector.set_items_per_row("9");
        collector.open(batch("Y"));
        assert_eq!(collector.options().unwrap().items_per_row(), 2);
    }

    #[test]
    fn confirm_emits_request_and_closes() {
        let mut collector = DownloadOptionsCollector::new();
        collector.open(batch("abc123"));
        collector.set_items_per_row("4");

        let request = collector.confirm().unwrap();
        assert_eq!(request, ExportRequest::new(BatchId::new("abc123"), 4));
        assert!(!collector.is_open());
    }

    #[test]
    fn confirm_while_closed_is_rejected() {
        let mut collector = DownloadOptionsCollector::new();
        let err = collector.confirm().unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn cancel_discards_options() {
        let mut collector = DownloadOptionsCollector::new();
        collector.open(batch("x"));
        collector.set_items_per_row("5");
        collector.cancel();

        assert!(!collector.is_open());
        assert!(collector.confirm().is_err());

        collector.open(batch("x"));
        assert_eq!(collector.options().unwrap().items_per_row(), 2);
    }

    #[test]
    fn set_items_per_row_while_closed_is_ignored() {
        let mut collector = DownloadOptionsCollector::new();
        collector.set_items_per_row("5");
        assert_eq!(collector.state(), &DialogState::Closed);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any input resolves inside the advertised range.
            #[test]
            fn items_per_row_always_in_range(raw in ".*") {
                let n = DownloadOptions::parse_items_per_row(&raw);
                prop_assert!((MIN_ITEMS_PER_ROW..=MAX_ITEMS_PER_ROW).contains(&n));
            }

            /// Property: in-range numbers are taken as typed.
            #[test]
            fn in_range_numbers_are_kept(n in MIN_ITEMS_PER_ROW..=MAX_ITEMS_PER_ROW) {
                prop_assert_eq!(DownloadOptions::parse_items_per_row(&n.to_string()), n);
            }
        }
    }
}
