//! Price source abstraction.

use crate::FeedResult;
use async_trait::async_trait;
use ratio_core::{PairConfig, Price};

/// Anything that can quote the current USD price of a DEX pair.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the latest price for `pair`.
    async fn fetch_price(&self, pair: &PairConfig) -> FeedResult<Price>;
}
