use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::edit::{DeleteSession, EditBuffer, EditSession};
use super::viewport::{ScrollMetrics, Viewport, NEAR_BOTTOM_THRESHOLD_PX};
use crate::api::traits::ChartApi;
use crate::errors::CoreError;
use crate::models::chart::Chart;
use crate::models::envelope::PaginatedResponse;
use crate::models::query::{ChartQuery, SortField, SortOrder};
use crate::models::zodiac::ZodiacSign;
use crate::services::filter_service::{ChartFilters, FilterService};

/// Lifecycle of the listing's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingState {
    /// Nothing requested yet.
    Idle,
    /// Page 1 of a fresh load is in flight.
    Loading,
    /// A follow-up page is in flight.
    LoadingMore,
    /// Data present, nothing in flight.
    Ready,
    /// The last fetch failed.
    Error,
}

/// Whether a page request starts over or extends what is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Fresh,
    More,
}

/// A page fetch issued by the listing.
///
/// Obtained from [`ListingView::begin_load`] / [`ListingView::begin_next_page`]
/// and handed back with the outcome to [`ListingView::complete`]. Hosts that
/// drive their own event loop use this split; everyone else calls the async
/// helpers which do both halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    generation: u64,
    kind: LoadKind,
    query: ChartQuery,
}

impl PageRequest {
    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    pub fn query(&self) -> &ChartQuery {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }
}

/// What the listing screen should show.
#[derive(Debug, PartialEq)]
pub enum ListingDisplay<'a> {
    Loading,
    /// A fresh load failed; no data to show.
    Error { message: &'a str },
    /// The server has no charts for the current query.
    NoCharts,
    /// Charts are loaded but the local filters hide all of them.
    NoMatches {
        loaded: usize,
        loading_more: bool,
        /// A follow-up page failed while everything loaded was hidden.
        load_more_error: Option<&'a str>,
    },
    Charts {
        charts: Vec<&'a Chart>,
        loaded: usize,
        loading_more: bool,
        /// Every page has been loaded.
        end_reached: bool,
        /// A follow-up page failed; earlier pages are still shown.
        load_more_error: Option<&'a str>,
    },
}

/// Listing/browsing controller: incremental page loading, local filtering,
/// and the edit/delete modals.
pub struct ListingView {
    api: Arc<dyn ChartApi>,
    filter_service: FilterService,
    page_size: u32,

    state: ListingState,
    all_charts: Vec<Chart>,
    /// Indices into `all_charts`, recomputed after every change.
    filtered: Vec<usize>,

    filters: ChartFilters,
    sort_by: SortField,
    sort_order: SortOrder,

    current_page: u32,
    total_pages: u32,
    total: u32,
    has_more: bool,
    error: Option<String>,

    /// Bumped on every fresh load; completions from older loads are dropped.
    generation: u64,
    failed: Option<PageRequest>,

    edit: Option<EditSession>,
    delete: Option<DeleteSession>,
}

impl std::fmt::Debug for ListingView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingView")
            .field("state", &self.state)
            .field("charts", &self.all_charts.len())
            .field("filtered", &self.filtered.len())
            .field("page", &self.current_page)
            .field("pages", &self.total_pages)
            .field("generation", &self.generation)
            .finish()
    }
}

impl ListingView {
    pub fn new(api: Arc<dyn ChartApi>, page_size: u32) -> Self {
        Self {
            api,
            filter_service: FilterService::new(),
            page_size: page_size.max(1),
            state: ListingState::Idle,
            all_charts: Vec::new(),
            filtered: Vec::new(),
            filters: ChartFilters::default(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            current_page: 1,
            total_pages: 1,
            total: 0,
            has_more: true,
            error: None,
            generation: 0,
            failed: None,
            edit: None,
            delete: None,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn state(&self) -> ListingState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListingState::Loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.state == ListingState::LoadingMore
    }

    /// Every chart fetched so far, in server order.
    pub fn all_charts(&self) -> &[Chart] {
        &self.all_charts
    }

    /// Charts passing the local filters, in server order.
    pub fn filtered_charts(&self) -> Vec<&Chart> {
        self.filtered.iter().map(|&i| &self.all_charts[i]).collect()
    }

    pub fn filters(&self) -> &ChartFilters {
        &self.filters
    }

    pub fn sort_by(&self) -> SortField {
        self.sort_by
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Server-reported chart count across all pages.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Classify the screen. An idle view has not loaded yet and shows as
    /// loading. `NoCharts` is only reported once every page has been fetched.
    pub fn display(&self) -> ListingDisplay<'_> {
        if matches!(self.state, ListingState::Idle | ListingState::Loading) {
            return ListingDisplay::Loading;
        }
        let loading_more = self.state == ListingState::LoadingMore;
        let load_more_error = self
            .failed
            .as_ref()
            .filter(|request| request.kind == LoadKind::More)
            .and(self.error.as_deref());

        if self.all_charts.is_empty() && load_more_error.is_none() {
            if let Some(message) = self.error.as_deref() {
                return ListingDisplay::Error { message };
            }
            if !self.has_more && !loading_more {
                return ListingDisplay::NoCharts;
            }
        }
        if !self.all_charts.is_empty() && self.filtered.is_empty() {
            return ListingDisplay::NoMatches {
                loaded: self.all_charts.len(),
                loading_more,
                load_more_error,
            };
        }
        ListingDisplay::Charts {
            charts: self.filtered_charts(),
            loaded: self.all_charts.len(),
            loading_more,
            end_reached: !self.has_more && !loading_more,
            load_more_error,
        }
    }

    // ── Page loading ────────────────────────────────────────────────

    fn query_for(&self, page: u32) -> ChartQuery {
        ChartQuery {
            page,
            limit: self.page_size,
            sun_sign: self.filters.sun_sign,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }

    /// Start over from page 1, discarding everything loaded.
    pub fn begin_load(&mut self) -> PageRequest {
        let query = self.query_for(1);
        self.begin_fresh(query)
    }

    fn begin_fresh(&mut self, query: ChartQuery) -> PageRequest {
        self.generation += 1;
        self.state = ListingState::Loading;
        self.error = None;
        self.failed = None;
        self.current_page = 1;
        self.has_more = false;
        self.all_charts.clear();
        self.filtered.clear();
        PageRequest {
            generation: self.generation,
            kind: LoadKind::Fresh,
            query,
        }
    }

    /// Request the page after `current_page`, unless a fetch is already in
    /// flight or nothing is left to load.
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if matches!(self.state, ListingState::Loading | ListingState::LoadingMore | ListingState::Idle)
            || !self.has_more
        {
            return None;
        }
        self.state = ListingState::LoadingMore;
        self.error = None;
        self.failed = None;
        Some(PageRequest {
            generation: self.generation,
            kind: LoadKind::More,
            query: self.query_for(self.current_page + 1),
        })
    }

    /// Re-issue the request that failed last, unchanged.
    pub fn begin_retry(&mut self) -> Option<PageRequest> {
        if matches!(self.state, ListingState::Loading | ListingState::LoadingMore) {
            return None;
        }
        let failed = self.failed.take()?;
        match failed.kind {
            LoadKind::Fresh => Some(self.begin_fresh(failed.query)),
            LoadKind::More => {
                self.state = ListingState::LoadingMore;
                self.error = None;
                Some(PageRequest {
                    generation: self.generation,
                    ..failed
                })
            }
        }
    }

    /// Apply the outcome of a page request.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<PaginatedResponse<Chart>, CoreError>,
    ) {
        if request.generation != self.generation {
            debug!(
                "dropping stale page {} response (generation {} < {})",
                request.page(),
                request.generation,
                self.generation
            );
            return;
        }

        match result {
            Ok(response) => {
                let received = response.data.len();
                match request.kind {
                    LoadKind::Fresh => self.all_charts = response.data,
                    LoadKind::More => self.all_charts.extend(response.data),
                }
                self.current_page = request.page();
                self.total_pages = response.pages;
                self.total = response.total;
                self.has_more = self.current_page < self.total_pages;
                self.state = ListingState::Ready;
                self.error = None;
                self.refilter();
                info!(
                    "loaded page {}/{} ({} charts, {} accumulated)",
                    self.current_page,
                    self.total_pages,
                    received,
                    self.all_charts.len()
                );
            }
            Err(e) => {
                error!("failed to load charts page {}: {e}", request.page());
                self.error = Some(e.user_message_or("Failed to load charts"));
                if request.kind == LoadKind::More {
                    // Earlier pages stay; the page counter does not advance.
                    self.has_more = true;
                }
                self.state = ListingState::Error;
                self.failed = Some(request);
            }
        }
    }

    async fn fetch(&mut self, request: PageRequest) {
        let result = self.api.get_all_charts(request.query()).await;
        self.complete(request, result);
    }

    /// Fresh load from page 1. Used on mount and by "reload".
    pub async fn load_charts(&mut self) {
        let request = self.begin_load();
        self.fetch(request).await;
    }

    /// Fetch the next page if allowed. Returns whether a request was made.
    pub async fn load_next_page(&mut self) -> bool {
        match self.begin_next_page() {
            Some(request) => {
                self.fetch(request).await;
                true
            }
            None => false,
        }
    }

    /// Manual "try again": re-issues the failed load.
    pub async fn retry(&mut self) -> bool {
        match self.begin_retry() {
            Some(request) => {
                self.fetch(request).await;
                true
            }
            None => false,
        }
    }

    /// React to a scroll notification. Loads the next page when within
    /// [`NEAR_BOTTOM_THRESHOLD_PX`] of the bottom.
    pub async fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if matches!(self.state, ListingState::Loading | ListingState::LoadingMore) || !self.has_more {
            return false;
        }
        if !metrics.is_near_bottom(NEAR_BOTTOM_THRESHOLD_PX) {
            return false;
        }
        self.load_next_page().await
    }

    pub async fn on_viewport_scroll(&mut self, viewport: &dyn Viewport) -> bool {
        self.on_scroll(viewport.scroll_metrics()).await
    }

    // ── Filters & sort ──────────────────────────────────────────────

    fn refilter(&mut self) {
        self.filtered = self.filter_service.apply(&self.all_charts, &self.filters);
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search_query = query.into();
        self.refilter();
    }

    pub fn set_moon_sign(&mut self, sign: Option<ZodiacSign>) {
        self.filters.moon_sign = sign;
        self.refilter();
    }

    pub fn set_rising_sign(&mut self, sign: Option<ZodiacSign>) {
        self.filters.rising_sign = sign;
        self.refilter();
    }

    pub fn set_date_from(&mut self, date: Option<NaiveDate>) {
        self.filters.date_from = date;
        self.refilter();
    }

    pub fn set_date_to(&mut self, date: Option<NaiveDate>) {
        self.filters.date_to = date;
        self.refilter();
    }

    /// Sun sign is filtered by the server, so changing it reloads.
    pub async fn set_sun_sign(&mut self, sign: Option<ZodiacSign>) {
        self.filters.sun_sign = sign;
        self.load_charts().await;
    }

    /// Sorting happens server-side, so changing it reloads.
    pub async fn set_sort(&mut self, sort_by: SortField, sort_order: SortOrder) {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self.load_charts().await;
    }

    /// Reset every filter and the sort to `createdAt` descending, then reload.
    pub async fn clear_filters(&mut self) {
        self.filters = ChartFilters::default();
        self.sort_by = SortField::default();
        self.sort_order = SortOrder::default();
        self.load_charts().await;
    }

    // ── Canonical list updates ──────────────────────────────────────

    /// Replace the loaded chart with the same id. Returns false when no such
    /// chart is loaded.
    pub fn replace_chart(&mut self, chart: Chart) -> bool {
        match self.all_charts.iter().position(|c| c.id == chart.id) {
            Some(idx) => {
                self.all_charts[idx] = chart;
                self.refilter();
                true
            }
            None => false,
        }
    }

    /// Drop the loaded chart with this id.
    pub fn remove_chart(&mut self, id: &str) -> Option<Chart> {
        let idx = self.all_charts.iter().position(|c| c.id == id)?;
        let removed = self.all_charts.remove(idx);
        self.refilter();
        Some(removed)
    }

    // ── Edit modal ──────────────────────────────────────────────────

    /// Open the edit modal on a loaded chart.
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.all_charts.iter().find(|c| c.id == id) {
            Some(chart) => {
                self.edit = Some(EditSession::open(chart));
                true
            }
            None => false,
        }
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.edit.as_mut().map(|s| &mut s.buffer)
    }

    pub fn close_edit(&mut self) {
        self.edit = None;
    }

    /// Send the edited fields. On success the returned chart replaces the
    /// loaded one and the modal closes; on failure the modal stays open with
    /// the error and the list is untouched.
    pub async fn save_edit(&mut self) -> bool {
        let (id, update) = {
            let Some(session) = self.edit.as_mut() else {
                return false;
            };
            if session.saving {
                return false;
            }
            match session.buffer.to_update() {
                Ok(update) => {
                    session.saving = true;
                    session.error = None;
                    (session.buffer.id().to_string(), update)
                }
                Err(e) => {
                    session.error = Some(e.user_message());
                    return false;
                }
            }
        };

        let result = self.api.update_chart(&id, &update).await;
        match result {
            Ok(updated) => {
                info!("chart {id} updated");
                self.replace_chart(updated);
                self.edit = None;
                true
            }
            Err(e) => {
                warn!("failed to update chart {id}: {e}");
                if let Some(session) = self.edit.as_mut() {
                    session.saving = false;
                    session.error = Some(e.user_message_or("Failed to update chart"));
                }
                false
            }
        }
    }

    // ── Delete modal ────────────────────────────────────────────────

    pub fn confirm_delete(&mut self, id: &str) -> bool {
        match self.all_charts.iter().find(|c| c.id == id) {
            Some(chart) => {
                self.delete = Some(DeleteSession::open(chart));
                true
            }
            None => false,
        }
    }

    pub fn delete_session(&self) -> Option<&DeleteSession> {
        self.delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.delete = None;
    }

    /// Delete the chart named by the open confirmation.
    pub async fn delete_confirmed(&mut self) -> bool {
        let id = {
            let Some(session) = self.delete.as_mut() else {
                return false;
            };
            if session.deleting {
                return false;
            }
            session.deleting = true;
            session.error = None;
            session.target.id.clone()
        };

        let result = self.api.delete_chart(&id).await;
        match result {
            Ok(()) => {
                info!("chart {id} deleted");
                self.remove_chart(&id);
                self.delete = None;
                true
            }
            Err(e) => {
                warn!("failed to delete chart {id}: {e}");
                if let Some(session) = self.delete.as_mut() {
                    session.deleting = false;
                    session.error = Some(e.user_message_or("Failed to delete chart"));
                }
                false
            }
        }
    }
}
