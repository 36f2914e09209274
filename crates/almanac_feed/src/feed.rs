//! Cached assembly of a year's event feed.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};

use almanac_cache::{CacheKey, ResultCache};
use almanac_core::Event;
use almanac_detect::{DetectorConfig, detect};
use almanac_refine::{PositionOracle, refine_all};

use crate::aggregate::merge_feeds;
use crate::feed_types::{FeedConfig, FeedError};
use crate::provider::{LunationSource, SampleProvider, SampleRequest};

/// Cached, refinable event feed for calendar years.
///
/// Concurrent loads race on a generation counter: each load takes a
/// fresh token and only the load holding the newest token may commit
/// its result. A superseded load returns `Ok(None)` and its work is
/// discarded.
pub struct EventFeed {
    provider: Arc<dyn SampleProvider>,
    oracle: Arc<dyn PositionOracle>,
    lunations: Option<Arc<dyn LunationSource>>,
    config: FeedConfig,
    cache: Mutex<ResultCache>,
    generation: AtomicU64,
}

impl EventFeed {
    pub fn new(
        provider: Arc<dyn SampleProvider>,
        oracle: Arc<dyn PositionOracle>,
        config: FeedConfig,
    ) -> Result<Self, FeedError> {
        config.validate().map_err(FeedError::InvalidConfig)?;
        let cache = ResultCache::new(config.ttl, config.max_cache_entries);
        Ok(Self {
            provider,
            oracle,
            lunations: None,
            config,
            cache: Mutex::new(cache),
            generation: AtomicU64::new(0),
        })
    }

    /// Attach a lunation source. Its failures degrade to an empty
    /// lunation set rather than failing the feed.
    pub fn with_lunation_source(mut self, source: Arc<dyn LunationSource>) -> Self {
        self.lunations = Some(source);
        self
    }

    fn cache_guard(&self) -> MutexGuard<'_, ResultCache> {
        // A panic while holding the lock leaves the cache consistent;
        // recover the guard instead of propagating the poison.
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load the event feed for one year at one observer location.
    ///
    /// `refresh` bypasses and replaces any cached entry. Returns
    /// `Ok(None)` when a newer load superseded this one before it could
    /// commit.
    pub async fn load(
        &self,
        year: i32,
        latitude: f64,
        longitude: f64,
        refresh: bool,
    ) -> Result<Option<Vec<Event>>, FeedError> {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let key = CacheKey::new(year, latitude, longitude);

        if refresh {
            self.cache_guard().invalidate(&key);
        } else if let Some(events) = self.cache_guard().get(&key) {
            debug!("cache hit for year {year}");
            return Ok(Some(events));
        }

        let request = SampleRequest {
            year,
            latitude,
            longitude,
            interval_hours: self.config.interval_hours,
            bodies: self.config.bodies.clone(),
        };
        let samples = self.provider.samples(&request).await?;
        debug!("provider returned {} samples for year {year}", samples.len());

        let detector = DetectorConfig {
            bodies: self.config.bodies.clone(),
            orb_deg: self.config.orb_deg,
            local_offset: self.config.local_offset,
            ..DetectorConfig::all_bodies()
        };
        let detections = detect(&detector, &samples)?;
        let refined =
            refine_all(detections, Arc::clone(&self.oracle), self.config.refine).await?;
        let events: Vec<Event> = refined.into_iter().map(|d| d.event).collect();

        let lunations = match &self.lunations {
            Some(source) => match source.lunations(year).await {
                Ok(lunations) => lunations,
                Err(e) => {
                    warn!("lunation source failed for year {year}: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        let feed = merge_feeds(events, lunations);

        if self.generation.load(Ordering::SeqCst) != token {
            info!("discarding superseded feed for year {year}");
            return Ok(None);
        }
        self.cache_guard().put(key, feed.clone());
        info!("assembled feed for year {year}: {} events", feed.len());
        Ok(Some(feed))
    }
}
