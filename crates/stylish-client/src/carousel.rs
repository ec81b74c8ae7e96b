//! Promotional carousel on the home page.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use stylish_commerce::prelude::Campaign;
use stylish_data::{FetchError, ProductApi};
use tokio::task::JoinHandle;
use tracing::debug;

/// Time each campaign stays on screen.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);

#[derive(Default)]
struct Slides {
    campaigns: Vec<Campaign>,
    active: usize,
}

impl Slides {
    fn advance(&mut self) {
        if !self.campaigns.is_empty() {
            self.active = (self.active + 1) % self.campaigns.len();
        }
    }
}

fn lock(slides: &Mutex<Slides>) -> MutexGuard<'_, Slides> {
    slides.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Rotates through campaigns on a timer.
///
/// [`start`](Self::start) spawns the timer on the current tokio runtime and
/// [`stop`](Self::stop) cancels it, as when the pointer enters and leaves
/// the banner.
pub struct CarouselController {
    api: Arc<dyn ProductApi>,
    slides: Arc<Mutex<Slides>>,
    interval: Duration,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl CarouselController {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self::with_interval(api, DEFAULT_INTERVAL)
    }

    pub fn with_interval(api: Arc<dyn ProductApi>, interval: Duration) -> Self {
        Self {
            api,
            slides: Arc::new(Mutex::new(Slides::default())),
            interval,
            ticker: Mutex::new(None),
        }
    }

    /// Fetch campaigns and show the first one. Returns how many were loaded.
    pub async fn load(&self) -> Result<usize, FetchError> {
        let campaigns = self.api.fetch_campaigns().await?;
        let count = campaigns.len();

        let mut slides = lock(&self.slides);
        slides.campaigns = campaigns;
        slides.active = 0;
        debug!(campaigns = count, "carousel loaded");
        Ok(count)
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        lock(&self.slides).campaigns.clone()
    }

    pub fn active_index(&self) -> usize {
        lock(&self.slides).active
    }

    /// The campaign on screen, if any are loaded.
    pub fn active(&self) -> Option<Campaign> {
        let slides = lock(&self.slides);
        slides.campaigns.get(slides.active).cloned()
    }

    /// Move to the next campaign, wrapping around.
    pub fn advance(&self) {
        lock(&self.slides).advance();
    }

    /// Jump to a campaign. Out-of-range indexes are ignored.
    pub fn select(&self, index: usize) -> bool {
        let mut slides = lock(&self.slides);
        if index < slides.campaigns.len() {
            slides.active = index;
            true
        } else {
            false
        }
    }

    /// Begin auto-advancing. Does nothing if already running.
    pub fn start(&self) {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if ticker.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let slides = Arc::clone(&self.slides);
        let period = self.interval;
        *ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                lock(&slides).advance();
            }
        }));
        debug!(interval_ms = period.as_millis() as u64, "carousel started");
    }

    /// Pause auto-advancing.
    pub fn stop(&self) {
        let handle = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("carousel stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeProducts;
    use stylish_commerce::prelude::ProductId;

    fn campaign(n: u32) -> Campaign {
        Campaign::new(
            ProductId::new(n.to_string()),
            format!("banner-{}.jpg", n),
            format!("line one\r\nline two\r\nline three\r\nTitle {}", n),
        )
    }

    async fn loaded(count: u32) -> CarouselController {
        let api = Arc::new(FakeProducts::new());
        api.campaigns((1..=count).map(campaign).collect());
        let carousel = CarouselController::new(api);
        carousel.load().await.unwrap();
        carousel
    }

    #[tokio::test]
    async fn test_advance_wraps() {
        let carousel = loaded(3).await;
        assert_eq!(carousel.active_index(), 0);

        carousel.advance();
        carousel.advance();
        assert_eq!(carousel.active_index(), 2);
        carousel.advance();
        assert_eq!(carousel.active_index(), 0);
        assert_eq!(carousel.active().unwrap().title(), Some("Title 1"));
    }

    #[tokio::test]
    async fn test_advance_without_campaigns_is_noop() {
        let carousel = loaded(0).await;
        carousel.advance();
        assert_eq!(carousel.active_index(), 0);
        assert!(carousel.active().is_none());
    }

    #[tokio::test]
    async fn test_select_ignores_out_of_range() {
        let carousel = loaded(3).await;
        assert!(carousel.select(2));
        assert!(!carousel.select(3));
        assert_eq!(carousel.active_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_advances_until_stopped() {
        let carousel = loaded(3).await;
        carousel.start();
        assert!(carousel.is_running());

        tokio::time::sleep(Duration::from_millis(5_100)).await;
        tokio::task::yield_now().await;
        assert_eq!(carousel.active_index(), 1);

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        tokio::task::yield_now().await;
        assert_eq!(carousel.active_index(), 2);

        carousel.stop();
        assert!(!carousel.is_running());
        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert_eq!(carousel.active_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_is_idempotent() {
        let carousel = loaded(4).await;
        carousel.start();
        carousel.start();

        tokio::time::sleep(Duration::from_millis(5_100)).await;
        tokio::task::yield_now().await;
        assert_eq!(carousel.active_index(), 1);
    }

    #[tokio::test]
    async fn test_load_failure() {
        let api = Arc::new(FakeProducts::new());
        api.fail_next(FetchError::Timeout);
        let carousel = CarouselController::new(api);

        assert_eq!(carousel.load().await.unwrap_err(), FetchError::Timeout);
        assert!(carousel.campaigns().is_empty());
    }
}
