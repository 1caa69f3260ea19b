//! Poll loop: fetch both prices, compare with the stored ones, notify and persist.

use ratio_alerts::{format_ratio_update, format_threshold_alert, AlertSink, PriceStore};
use ratio_core::{evaluate, Evaluation, PairConfig, Price, PriceSnapshot};
use ratio_feeds::PriceSource;
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Why a cycle was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// At least one price could not be fetched.
    FeedUnavailable,
    /// At least one price was zero, so the ratio is meaningless.
    ZeroPrice,
    /// A price changed but the ratio does not fit in a decimal.
    RatioUndefined,
}

/// What a single poll cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Skipped(SkipReason),
    Unchanged,
    Updated { ratio: Decimal, alert_sent: bool },
}

/// Tracks the price ratio of two DEX pairs.
pub struct RatioMonitor {
    first: PairConfig,
    second: PairConfig,
    threshold: Decimal,
    interval: Duration,
    source: Arc<dyn PriceSource>,
    sink: Arc<dyn AlertSink>,
    store: PriceStore,
}

impl RatioMonitor {
    pub fn new(
        first: PairConfig,
        second: PairConfig,
        threshold: Decimal,
        interval: Duration,
        source: Arc<dyn PriceSource>,
        sink: Arc<dyn AlertSink>,
        store: PriceStore,
    ) -> Self {
        Self {
            first,
            second,
            threshold,
            interval,
            source,
            sink,
            store,
        }
    }

    /// Run cycles until `shutdown` resolves. Shutdown is checked between cycles.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            interval_secs = self.interval.as_secs(),
            threshold = %self.threshold,
            "Starting ratio monitor"
        );

        tokio::pin!(shutdown);

        loop {
            let outcome = self.run_cycle().await;
            debug!(?outcome, "Cycle finished");

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Ratio monitor stopped");
    }

    /// Run one poll cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let first = self.fetch(&self.first).await;
        let second = self.fetch(&self.second).await;

        let (Some(first), Some(second)) = (first, second) else {
            return CycleOutcome::Skipped(SkipReason::FeedUnavailable);
        };

        if first.is_zero() || second.is_zero() {
            warn!(
                first = %first,
                second = %second,
                "Zero price reported, skipping cycle"
            );
            return CycleOutcome::Skipped(SkipReason::ZeroPrice);
        }

        let stored = self.store.load();
        let previous = PriceSnapshot::new(
            PriceStore::price_from(&stored, &self.first.key),
            PriceStore::price_from(&stored, &self.second.key),
        );
        let current = PriceSnapshot::new(first, second);

        let update = match evaluate(&previous, &current, self.threshold) {
            Evaluation::Changed(update) => update,
            Evaluation::Unchanged => {
                debug!(first = %first, second = %second, "Prices unchanged");
                return CycleOutcome::Unchanged;
            }
            Evaluation::RatioUndefined => {
                warn!(
                    first = %first,
                    second = %second,
                    "Ratio out of range, skipping cycle"
                );
                return CycleOutcome::Skipped(SkipReason::RatioUndefined);
            }
        };

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        info!(
            "[{}] ✅ Ratio: {:.10} ({}: {}, {}: {})",
            timestamp,
            update.ratio.round_dp(10),
            self.first.label,
            first,
            self.second.label,
            second
        );

        let message = format_ratio_update(
            update.ratio,
            (&self.first, first),
            (&self.second, second),
        );
        match self.sink.send(&message).await {
            Ok(()) => info!("📲 Ratio update sent"),
            Err(e) => error!(error = %e, "Failed to send ratio update"),
        }

        // Persist even if the send failed, otherwise every cycle would retry it.
        let entries = [
            (self.first.key.as_str(), first),
            (self.second.key.as_str(), second),
        ];
        if let Err(e) = self.store.save_prices(&entries) {
            error!(error = %e, "Failed to persist prices");
        }

        let mut alert_sent = false;
        if update.threshold_exceeded {
            let alert = format_threshold_alert(update.ratio, self.threshold);
            match self.sink.send(&alert).await {
                Ok(()) => {
                    info!(
                        ratio = %update.ratio,
                        threshold = %self.threshold,
                        "📲 Threshold alert sent"
                    );
                    alert_sent = true;
                }
                Err(e) => error!(error = %e, "Failed to send threshold alert"),
            }
        }

        CycleOutcome::Updated {
            ratio: update.ratio,
            alert_sent,
        }
    }

    async fn fetch(&self, pair: &PairConfig) -> Option<Price> {
        match self.source.fetch_price(pair).await {
            Ok(price) => Some(price),
            Err(e) => {
                warn!(
                    pair = %pair.key,
                    chain = %pair.chain,
                    address = %pair.address,
                    error = %e,
                    "⚠️ Error fetching price"
                );
                None
            }
        }
    }
}
