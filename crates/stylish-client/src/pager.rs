//! Infinite-scroll pagination over the product catalog.
//!
//! The controller reacts to two events:
//!
//! - [`context_changed`](PaginationController::context_changed): the
//!   category or keyword changed. The list is reset and the first page of
//!   the new context is fetched.
//! - [`proximity_signal`](PaginationController::proximity_signal): the end
//!   of the rendered list came into view. The next page is fetched and
//!   appended, unless a fetch is already in flight or no pages remain.
//!
//! Every reset and every [`detach`](PaginationController::detach) starts a
//! new generation. A fetch that completes after its generation has passed
//! is dropped without touching the controller.

use crate::PagerError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use stylish_commerce::prelude::{Cursor, Product, ProductPage, QueryContext};
use stylish_data::{FetchError, ProductApi};
use tracing::{debug, warn};

/// Where the controller is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPhase {
    /// Nothing in flight; more pages may exist.
    Idle,
    /// Fetching the first page of a new context.
    FetchingReset,
    /// Fetching the next page of the settled context.
    FetchingAppend,
    /// The last page has been received.
    Exhausted,
    /// The last fetch failed. The next signal retries it.
    Errored,
}

/// Why an event did not start a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A fetch is already in flight.
    InFlight,
    /// No further pages exist for this context.
    Exhausted,
    /// The context is already displayed.
    Unchanged,
}

/// Result of an event that was handled without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The list was replaced by a first page.
    Replaced { items: usize },
    /// A page was appended to the list.
    Appended { added: usize, total: usize },
    /// No fetch was started.
    Skipped(SkipReason),
    /// The fetch finished after a newer reset or a detach and was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    Initial,
    Next(Cursor),
    Exhausted,
}

/// A fetch the controller has committed to.
struct Ticket {
    generation: u64,
    context: QueryContext,
    cursor: Cursor,
    reset: bool,
}

enum Decision {
    Fetch(Ticket),
    Skip(SkipReason),
}

struct PagerState {
    context: QueryContext,
    settled: Option<QueryContext>,
    items: Vec<Product>,
    cursor: CursorState,
    generation: u64,
    in_flight: bool,
    phase: PagerPhase,
    last_error: Option<FetchError>,
}

impl PagerState {
    fn begin_reset(&mut self, context: QueryContext) -> Ticket {
        self.generation += 1;
        self.context = context.clone();
        self.items.clear();
        self.cursor = CursorState::Initial;
        self.in_flight = true;
        self.phase = PagerPhase::FetchingReset;
        Ticket {
            generation: self.generation,
            context,
            cursor: Cursor::initial(),
            reset: true,
        }
    }

    fn begin_append(&mut self, cursor: Cursor) -> Ticket {
        self.in_flight = true;
        self.phase = PagerPhase::FetchingAppend;
        Ticket {
            generation: self.generation,
            context: self.context.clone(),
            cursor,
            reset: false,
        }
    }
}

/// Catalog pagination controller.
///
/// Methods take `&self`; the internal lock is never held while a fetch is
/// awaited.
pub struct PaginationController {
    api: Arc<dyn ProductApi>,
    state: Mutex<PagerState>,
}

impl PaginationController {
    /// Create a controller for `context`. Nothing is fetched until
    /// [`mount`](Self::mount) or the first signal.
    pub fn new(api: Arc<dyn ProductApi>, context: QueryContext) -> Self {
        Self {
            api,
            state: Mutex::new(PagerState {
                context,
                settled: None,
                items: Vec::new(),
                cursor: CursorState::Initial,
                generation: 0,
                in_flight: false,
                phase: PagerPhase::Idle,
                last_error: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, PagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch one page for a context: keyword search when a keyword is set,
    /// otherwise the category listing.
    pub async fn resolve_page(
        &self,
        context: &QueryContext,
        cursor: &Cursor,
    ) -> Result<ProductPage, FetchError> {
        match context.active_keyword() {
            Some(keyword) => self.api.search_by_keyword(keyword, cursor).await,
            None => self.api.fetch_by_category(&context.category, cursor).await,
        }
    }

    /// Show the current context from its first page.
    pub async fn mount(&self) -> Result<PageOutcome, PagerError> {
        let ticket = {
            let mut state = self.state();
            let context = state.context.clone();
            state.begin_reset(context)
        };
        self.run(ticket).await
    }

    /// React to a new category or keyword.
    ///
    /// Any difference from the displayed context resets the list.
    pub async fn context_changed(&self, context: QueryContext) -> Result<PageOutcome, PagerError> {
        let decision = {
            let mut state = self.state();
            if state.context == context {
                if state.phase == PagerPhase::FetchingReset {
                    Decision::Skip(SkipReason::InFlight)
                } else if state.settled.as_ref() == Some(&context) {
                    Decision::Skip(SkipReason::Unchanged)
                } else {
                    Decision::Fetch(state.begin_reset(context))
                }
            } else {
                Decision::Fetch(state.begin_reset(context))
            }
        };
        self.decide(decision).await
    }

    /// React to the end of the list coming into view.
    pub async fn proximity_signal(&self) -> Result<PageOutcome, PagerError> {
        let decision = {
            let mut state = self.state();
            if state.in_flight {
                Decision::Skip(SkipReason::InFlight)
            } else if state.settled.as_ref() != Some(&state.context) {
                // Never loaded, or the last reset failed.
                let context = state.context.clone();
                Decision::Fetch(state.begin_reset(context))
            } else {
                match state.cursor.clone() {
                    CursorState::Exhausted => Decision::Skip(SkipReason::Exhausted),
                    CursorState::Next(cursor) => Decision::Fetch(state.begin_append(cursor)),
                    CursorState::Initial => {
                        let context = state.context.clone();
                        Decision::Fetch(state.begin_reset(context))
                    }
                }
            }
        };
        self.decide(decision).await
    }

    /// Stop accepting results of fetches already started.
    pub fn detach(&self) {
        let mut state = self.state();
        state.generation += 1;
        if state.in_flight {
            state.in_flight = false;
            state.phase = PagerPhase::Idle;
        }
        debug!(generation = state.generation, "pager detached");
    }

    async fn decide(&self, decision: Decision) -> Result<PageOutcome, PagerError> {
        match decision {
            Decision::Fetch(ticket) => self.run(ticket).await,
            Decision::Skip(reason) => {
                debug!(?reason, "page fetch skipped");
                Ok(PageOutcome::Skipped(reason))
            }
        }
    }

    async fn run(&self, ticket: Ticket) -> Result<PageOutcome, PagerError> {
        debug!(
            category = %ticket.context.category,
            keyword = ticket.context.active_keyword(),
            cursor = %ticket.cursor,
            reset = ticket.reset,
            "fetching page"
        );

        let result = self.resolve_page(&ticket.context, &ticket.cursor).await;
        self.reconcile(ticket, result)
    }

    fn reconcile(
        &self,
        ticket: Ticket,
        result: Result<ProductPage, FetchError>,
    ) -> Result<PageOutcome, PagerError> {
        let mut state = self.state();
        if state.generation != ticket.generation {
            debug!(
                generation = ticket.generation,
                current = state.generation,
                "dropping stale page"
            );
            return Ok(PageOutcome::Stale);
        }

        state.in_flight = false;
        match result {
            Ok(page) => {
                let added = page.items.len();
                let outcome = if ticket.reset {
                    state.items = page.items;
                    state.settled = Some(ticket.context);
                    PageOutcome::Replaced { items: added }
                } else {
                    state.items.extend(page.items);
                    PageOutcome::Appended {
                        added,
                        total: state.items.len(),
                    }
                };
                match page.next_cursor {
                    Some(next) => {
                        state.cursor = CursorState::Next(next);
                        state.phase = PagerPhase::Idle;
                    }
                    None => {
                        state.cursor = CursorState::Exhausted;
                        state.phase = PagerPhase::Exhausted;
                    }
                }
                state.last_error = None;
                debug!(total = state.items.len(), phase = ?state.phase, "page reconciled");
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, reset = ticket.reset, "page fetch failed");
                state.phase = PagerPhase::Errored;
                state.last_error = Some(e.clone());
                Err(PagerError::Fetch(e))
            }
        }
    }

    /// Products currently displayed, in order.
    pub fn items(&self) -> Vec<Product> {
        self.state().items.clone()
    }

    pub fn item_count(&self) -> usize {
        self.state().items.len()
    }

    pub fn phase(&self) -> PagerPhase {
        self.state().phase
    }

    /// The context most recently requested.
    pub fn context(&self) -> QueryContext {
        self.state().context.clone()
    }

    /// The context the displayed items were fetched for.
    pub fn settled_context(&self) -> Option<QueryContext> {
        self.state().settled.clone()
    }

    /// Cursor of the next page, if one is known.
    pub fn next_cursor(&self) -> Option<Cursor> {
        match &self.state().cursor {
            CursorState::Next(cursor) => Some(cursor.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state().in_flight
    }

    pub fn is_exhausted(&self) -> bool {
        self.state().phase == PagerPhase::Exhausted
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.state().last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeProducts;

    fn controller(api: &Arc<FakeProducts>) -> Arc<PaginationController> {
        Arc::new(PaginationController::new(api.clone(), QueryContext::default()))
    }

    fn titles(pager: &PaginationController) -> Vec<String> {
        pager.items().into_iter().map(|p| p.title).collect()
    }

    #[tokio::test]
    async fn test_mount_then_append_until_exhausted() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A", "B"], Some("c1"));
        api.page("all", "c1", &["C"], None);
        let pager = controller(&api);

        assert_eq!(pager.mount().await.unwrap(), PageOutcome::Replaced { items: 2 });
        assert_eq!(titles(&pager), ["A", "B"]);
        assert_eq!(pager.next_cursor(), Some(Cursor::new("c1")));

        assert_eq!(
            pager.proximity_signal().await.unwrap(),
            PageOutcome::Appended { added: 1, total: 3 }
        );
        assert_eq!(titles(&pager), ["A", "B", "C"]);
        assert!(pager.is_exhausted());

        assert_eq!(
            pager.proximity_signal().await.unwrap(),
            PageOutcome::Skipped(SkipReason::Exhausted)
        );
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_first_signal_loads_first_page() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A"], None);
        let pager = controller(&api);

        assert_eq!(
            pager.proximity_signal().await.unwrap(),
            PageOutcome::Replaced { items: 1 }
        );
        assert_eq!(pager.settled_context(), Some(QueryContext::default()));
    }

    #[tokio::test]
    async fn test_category_change_resets() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A", "B"], Some("c1"));
        api.page("chairs", "0", &["X"], Some("c9"));
        let pager = controller(&api);
        pager.mount().await.unwrap();

        let outcome = pager
            .context_changed(QueryContext::category("chairs"))
            .await
            .unwrap();

        assert_eq!(outcome, PageOutcome::Replaced { items: 1 });
        assert_eq!(titles(&pager), ["X"]);
        assert_eq!(api.requests().last().unwrap(), "category:chairs@0");
    }

    #[tokio::test]
    async fn test_keyword_takes_precedence() {
        let api = Arc::new(FakeProducts::new());
        api.page("search:dress", "0", &["D"], None);
        let pager = controller(&api);

        pager
            .context_changed(QueryContext::from_params(Some("dress"), Some("women")))
            .await
            .unwrap();

        assert_eq!(api.requests(), ["search:dress@0"]);
        assert_eq!(titles(&pager), ["D"]);
    }

    #[tokio::test]
    async fn test_leaving_search_resets_to_category() {
        let api = Arc::new(FakeProducts::new());
        api.page("search:dress", "0", &["D"], Some("s1"));
        api.page("all", "0", &["A"], Some("c1"));
        let pager = controller(&api);

        pager
            .context_changed(QueryContext::search("dress"))
            .await
            .unwrap();
        pager
            .context_changed(QueryContext::category("all"))
            .await
            .unwrap();

        assert_eq!(titles(&pager), ["A"]);
        assert_eq!(pager.next_cursor(), Some(Cursor::new("c1")));
    }

    #[tokio::test]
    async fn test_same_context_is_unchanged() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A"], Some("c1"));
        let pager = controller(&api);
        pager.mount().await.unwrap();

        assert_eq!(
            pager.context_changed(QueryContext::default()).await.unwrap(),
            PageOutcome::Skipped(SkipReason::Unchanged)
        );
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn test_rapid_signals_fetch_once() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A"], Some("c1"));
        api.page("all", "c1", &["B"], Some("c2"));
        let pager = controller(&api);
        pager.mount().await.unwrap();

        let gate = api.hold();
        let first = {
            let pager = pager.clone();
            tokio::spawn(async move { pager.proximity_signal().await })
        };
        api.wait_for_calls(2).await;

        assert!(pager.is_loading());
        assert_eq!(
            pager.proximity_signal().await.unwrap(),
            PageOutcome::Skipped(SkipReason::InFlight)
        );

        gate.add_permits(1);
        assert_eq!(
            first.await.unwrap().unwrap(),
            PageOutcome::Appended { added: 1, total: 2 }
        );
        assert_eq!(api.calls(), 2);
        assert!(!pager.is_loading());
    }

    #[tokio::test]
    async fn test_failure_releases_guard_and_retries() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A"], Some("c1"));
        api.fail_next(FetchError::Timeout);
        let pager = controller(&api);

        assert!(pager.mount().await.is_err());
        assert_eq!(pager.phase(), PagerPhase::Errored);
        assert!(!pager.is_loading());
        assert_eq!(pager.last_error(), Some(FetchError::Timeout));

        assert_eq!(
            pager.proximity_signal().await.unwrap(),
            PageOutcome::Replaced { items: 1 }
        );
        assert_eq!(pager.phase(), PagerPhase::Idle);
        assert!(pager.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failed_append_keeps_items_and_cursor() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A"], Some("c1"));
        api.page("all", "c1", &["B"], None);
        let pager = controller(&api);
        pager.mount().await.unwrap();

        api.fail_next(FetchError::HttpError {
            status: 502,
            message: "bad gateway".into(),
        });
        assert!(pager.proximity_signal().await.is_err());
        assert_eq!(titles(&pager), ["A"]);

        pager.proximity_signal().await.unwrap();
        assert_eq!(titles(&pager), ["A", "B"]);
        assert_eq!(api.requests(), ["category:all@0", "category:all@c1", "category:all@c1"]);
    }

    #[tokio::test]
    async fn test_reset_during_append_drops_stale_page() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A"], Some("c1"));
        api.page("all", "c1", &["STALE"], None);
        api.page("men", "0", &["M"], Some("m1"));
        let pager = controller(&api);
        pager.mount().await.unwrap();

        let gate = api.hold();
        let append = {
            let pager = pager.clone();
            tokio::spawn(async move { pager.proximity_signal().await })
        };
        api.wait_for_calls(2).await;

        // The reset must not wait for the held append.
        api.release_hold();
        let reset = pager.context_changed(QueryContext::category("men")).await.unwrap();
        assert_eq!(reset, PageOutcome::Replaced { items: 1 });

        gate.add_permits(1);
        assert_eq!(append.await.unwrap().unwrap(), PageOutcome::Stale);

        assert_eq!(titles(&pager), ["M"]);
        assert_eq!(pager.next_cursor(), Some(Cursor::new("m1")));
        assert!(!pager.is_loading());
    }

    #[tokio::test]
    async fn test_detach_drops_in_flight_result() {
        let api = Arc::new(FakeProducts::new());
        api.page("all", "0", &["A"], None);
        let pager = controller(&api);

        let gate = api.hold();
        let pending = {
            let pager = pager.clone();
            tokio::spawn(async move { pager.mount().await })
        };
        api.wait_for_calls(1).await;

        pager.detach();
        gate.add_permits(1);

        assert_eq!(pending.await.unwrap().unwrap(), PageOutcome::Stale);
        assert!(pager.items().is_empty());
        assert!(!pager.is_loading());
    }
}
