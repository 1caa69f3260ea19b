//! DexScreener REST price fetcher.
//!
//! Queries `/latest/dex/pairs/{chain}/{address}` and reads the USD price
//! of the first pair in the response.

use crate::{FeedError, FeedResult, PriceSource};
use async_trait::async_trait;
use ratio_core::{PairConfig, Price};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// DexScreener API client.
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    http: reqwest::Client,
    base_url: String,
}

impl DexScreenerClient {
    pub const BASE_URL: &'static str = "https://api.dexscreener.com";

    /// Create a client against `base_url` (normally [`Self::BASE_URL`]).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> FeedResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of the pair endpoint.
    pub fn pair_url(&self, pair: &PairConfig) -> String {
        format!(
            "{}/latest/dex/pairs/{}/{}",
            self.base_url,
            pair.chain.slug(),
            pair.address
        )
    }
}

#[async_trait]
impl PriceSource for DexScreenerClient {
    async fn fetch_price(&self, pair: &PairConfig) -> FeedResult<Price> {
        let url = self.pair_url(pair);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Http {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let json: Value = serde_json::from_str(&body)?;
        let price = parse_pair_price(&json, &pair.address)?;

        debug!(pair = %pair.key, chain = %pair.chain, %price, "Fetched price");
        Ok(price)
    }
}

/// Extract `pairs[0].priceUsd` from a DexScreener response.
///
/// `priceUsd` is normally a string; plain JSON numbers are accepted too.
pub fn parse_pair_price(json: &Value, address: &str) -> FeedResult<Price> {
    let first = json["pairs"]
        .as_array()
        .and_then(|pairs| pairs.first())
        .ok_or_else(|| FeedError::PairNotFound(address.to_string()))?;

    match &first["priceUsd"] {
        Value::String(s) => Ok(Price::parse(s)?),
        Value::Number(n) => Ok(Price::parse(&n.to_string())?),
        Value::Null => Err(FeedError::MissingPrice(address.to_string())),
        other => Err(FeedError::ParseError(format!(
            "unexpected priceUsd for {}: {}",
            address, other
        ))),
    }
}
