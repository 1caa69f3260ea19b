//! Tracked DEX pair definitions.

use crate::Chain;
use serde::{Deserialize, Serialize};

/// A single DEX pair to poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfig {
    /// Key under which the last price is persisted.
    pub key: String,
    /// Label shown in notifications.
    pub label: String,
    /// Chain the pair contract is deployed on.
    pub chain: Chain,
    /// Pair contract address.
    pub address: String,
}

impl PairConfig {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        chain: Chain,
        address: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            chain,
            address: address.into(),
        }
    }

    /// Numerator of the ratio: the Ethereum pair.
    pub fn default_first() -> Self {
        Self::new(
            "PAIR_1",
            "ETH Pair",
            Chain::Ethereum,
            "0xF10E8cCdb3F065BF24AFA14d08cc6336d4a9A281",
        )
    }

    /// Denominator of the ratio: the Polygon pair.
    pub fn default_second() -> Self {
        Self::new(
            "PAIR_2",
            "MATIC Pair",
            Chain::Polygon,
            "0x45126b956401DAaec92aFba2a9953E14B16fb83f",
        )
    }
}
