//! Merging refined detections with externally sourced lunations.

use almanac_core::{Event, LunationEvent};

/// Merge detector output with lunation events into one chronological feed.
///
/// The sort is stable, so events sharing an instant keep their relative
/// source order.
pub fn merge_feeds(mut events: Vec<Event>, lunations: Vec<LunationEvent>) -> Vec<Event> {
    events.extend(lunations.into_iter().map(Event::Lunation));
    events.sort_by(|a, b| a.utc().cmp(&b.utc()));
    events
}
