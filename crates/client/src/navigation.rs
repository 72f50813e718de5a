//! Navigable URL state and the query controller bound to it.
//!
//! The address bar is shared state. Components read it through
//! [`NavigableState::read`] and change it only through
//! [`NavigableState::update`], one patch per transition.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stockbatch_batches::query::{PAGE_PARAM, SORT_PARAM};
use stockbatch_batches::{QueryState, SortOrder};

/// Ordered URL query pairs.
pub type QueryParams = Vec<(String, String)>;

/// A set of parameter assignments applied as one navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
    assignments: Vec<(String, String)>,
}

impl QueryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.assignments.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Apply to `params` with `URLSearchParams::set` semantics: the first
    /// occurrence keeps its position and takes the value, later duplicates are
    /// dropped, unknown keys are appended.
    pub fn apply_to(&self, params: &mut QueryParams) {
        for (key, value) in &self.assignments {
            match params.iter().position(|(k, _)| k == key) {
                Some(first) => {
                    params[first].1 = value.clone();
                    let mut idx = 0;
                    params.retain(|(k, _)| {
                        let keep = idx <= first || k != key;
                        idx += 1;
                        keep
                    });
                }
                None => params.push((key.clone(), value.clone())),
            }
        }
    }
}

/// Port over the browser location (or any equivalent navigable state).
pub trait NavigableState: Send + Sync {
    /// Snapshot of the current query parameters.
    fn read(&self) -> QueryParams;

    /// Apply `patch` as a single navigation.
    fn update(&self, patch: QueryPatch);
}

#[derive(Debug)]
struct Location {
    path: String,
    params: QueryParams,
    history: Vec<String>,
}

impl Location {
    fn href(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// In-process navigable state with a history of every transition.
#[derive(Debug)]
pub struct MemoryNavigator {
    location: Mutex<Location>,
}

impl MemoryNavigator {
    pub fn new(path: impl Into<String>) -> Self {
        Self::with_params(path, Vec::new())
    }

    pub fn with_params(path: impl Into<String>, params: QueryParams) -> Self {
        let location = Location {
            path: path.into(),
            params,
            history: Vec::new(),
        };
        let initial = location.href();
        Self {
            location: Mutex::new(Location {
                history: vec![initial],
                ..location
            }),
        }
    }

    /// Parse `path?query` (query optional).
    pub fn from_href(href: &str) -> Self {
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let params = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self::with_params(path, params)
    }

    /// Current `path?query`.
    pub fn href(&self) -> String {
        self.lock().href()
    }

    /// Every location visited, initial one first.
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Location> {
        self.location.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NavigableState for MemoryNavigator {
    fn read(&self) -> QueryParams {
        self.lock().params.clone()
    }

    fn update(&self, patch: QueryPatch) {
        if patch.is_empty() {
            return;
        }
        let mut location = self.lock();
        patch.apply_to(&mut location.params);
        let href = location.href();
        tracing::debug!(%href, "navigated");
        location.history.push(href);
    }
}

/// Derives [`QueryState`] from navigable state and requests URL changes.
#[derive(Clone)]
pub struct QueryStateController {
    nav: Arc<dyn NavigableState>,
}

impl QueryStateController {
    pub fn new(nav: Arc<dyn NavigableState>) -> Self {
        Self { nav }
    }

    /// Fresh query from the current location.
    pub fn current(&self) -> QueryState {
        let params = self.nav.read();
        QueryState::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Change the sort order; pagination restarts at page 1 in the same navigation.
    pub fn set_sort(&self, sort: SortOrder) {
        self.nav.update(
            QueryPatch::new()
                .set(SORT_PARAM, sort.as_str())
                .set(PAGE_PARAM, "1"),
        );
    }

    /// Jump to `page` (values below 1 become 1), keeping sort and limit.
    pub fn go_to_page(&self, page: u32) {
        self.nav
            .update(QueryPatch::new().set(PAGE_PARAM, page.max(1).to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(href: &str) -> (Arc<MemoryNavigator>, QueryStateController) {
        let nav = Arc::new(MemoryNavigator::from_href(href));
        let controller = QueryStateController::new(nav.clone());
        (nav, controller)
    }

    #[test]
    fn current_reads_location() {
        let (_, controller) = controller("/stocks/print-barcodes?page=2&limit=10&sort=asc");
        assert_eq!(
            controller.current(),
            QueryState { page: 2, limit: 10, sort: SortOrder::Asc }
        );
    }

    #[test]
    fn current_coerces_garbage() {
        let (_, controller) = controller("/stocks?page=abc&limit=-1&sort=sideways");
        assert_eq!(controller.current(), QueryState::default());
    }

    #[test]
    fn set_sort_resets_page_in_one_transition() {
        let (nav, controller) = controller("/stocks?tab=labels&page=4&limit=10&sort=desc");

        controller.set_sort(SortOrder::Asc);

        let history = nav.history();
        assert_eq!(history.len(), 2);
        assert_eq!(nav.href(), "/stocks?tab=labels&page=1&limit=10&sort=asc");
        assert_eq!(
            controller.current(),
            QueryState { page: 1, limit: 10, sort: SortOrder::Asc }
        );
    }

    #[test]
    fn set_sort_appends_missing_params() {
        let (nav, controller) = controller("/stocks");
        controller.set_sort(SortOrder::Asc);
        assert_eq!(nav.href(), "/stocks?sort=asc&page=1");
    }

    #[test]
    fn go_to_page_keeps_sort_and_limit() {
        let (_, controller) = controller("/stocks?limit=5&sort=asc");
        controller.go_to_page(3);
        assert_eq!(
            controller.current(),
            QueryState { page: 3, limit: 5, sort: SortOrder::Asc }
        );
    }

    #[test]
    fn go_to_page_zero_is_first_page() {
        let (nav, controller) = controller("/stocks?page=3");
        controller.go_to_page(0);
        assert_eq!(nav.href(), "/stocks?page=1");
    }

    #[test]
    fn patch_drops_duplicate_keys() {
        let mut params: QueryParams = vec![
            ("page".into(), "2".into()),
            ("x".into(), "y".into()),
            ("page".into(), "9".into()),
        ];
        QueryPatch::new().set("page", "1").apply_to(&mut params);
        assert_eq!(
            params,
            vec![("page".to_string(), "1".to_string()), ("x".to_string(), "y".to_string())]
        );
    }

    #[test]
    fn empty_patch_is_not_a_navigation() {
        let (nav, _) = controller("/stocks");
        nav.update(QueryPatch::new());
        assert_eq!(nav.history().len(), 1);
    }
}
