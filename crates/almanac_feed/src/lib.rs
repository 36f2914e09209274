//! Cached yearly event feed assembly.
//!
//! Ties the pipeline together: coarse samples from a provider, a single
//! detection pass, bisection refinement through the position oracle,
//! merge with externally sourced lunations, and a TTL cache in front of
//! the whole thing.

pub mod aggregate;
pub mod feed;
pub mod feed_types;
pub mod provider;

pub use aggregate::merge_feeds;
pub use feed::EventFeed;
pub use feed_types::{FeedConfig, FeedError};
pub use provider::{LunationSource, ProviderError, SampleProvider, SampleRequest};
