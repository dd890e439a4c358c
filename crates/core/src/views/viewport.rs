/// Distance from the document bottom, in pixels, at which the listing
/// requests the next page.
pub const NEAR_BOTTOM_THRESHOLD_PX: f64 = 200.0;

/// A snapshot of the scroll position reported by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Height of the visible area.
    pub viewport_height: f64,
    /// Distance scrolled from the top.
    pub scroll_y: f64,
    /// Full height of the scrollable content.
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn new(viewport_height: f64, scroll_y: f64, document_height: f64) -> Self {
        Self {
            viewport_height,
            scroll_y,
            document_height,
        }
    }

    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.document_height - threshold
    }
}

/// Sections a view may ask the host to bring on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    CalculationResult,
}

/// Rendering surface capabilities the views depend on.
///
/// The host (browser, terminal UI, test double) implements this; views only
/// react to what it reports and never touch a real window. Implementations
/// are `Send + Sync`, like [`ChartApi`](crate::api::traits::ChartApi).
pub trait Viewport: Send + Sync {
    fn scroll_metrics(&self) -> ScrollMetrics;

    fn scroll_into_view(&self, section: Section);
}
