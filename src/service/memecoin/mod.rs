//! Memecoin price simulation.
//!
//! [`MemecoinEngine`] runs one tick over every active simulated token. For each
//! token, in order:
//!
//! 1. crash check on the current price ([`crash::CrashPolicy`])
//! 2. next price from the tiered random walk ([`volatility`])
//! 3. price persisted, and broadcast when visible at display precision
//! 4. minute and rollup snapshots ([`history::HistoryRetention`])
//! 5. alert matching and delivery ([`alert::AlertEvaluator`])
//! 6. minute-history trim, also run when step 5 fails
//!
//! A failure inside one token's pipeline is logged and the tick moves on to the
//! next token. [`cleanup::CrashCleanup`] purges long-crashed tokens on its own
//! schedule.

pub mod alert;
pub mod cleanup;
pub mod crash;
pub mod history;
pub mod volatility;

#[cfg(test)]
mod test;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::EngineConfig,
    data::{AlertRepository, HistoryRepository, TokenRepository},
    error::AppError,
    model::{event::PriceUpdate, token::SimulatedToken},
    service::notification::NotificationDispatcher,
};

use self::{alert::AlertEvaluator, crash::CrashPolicy, history::HistoryRetention};

/// Counters for one completed tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Tokens that completed the full pipeline.
    pub processed: usize,
    pub crashed: usize,
    /// Tokens whose pipeline failed part-way.
    pub failed: usize,
    pub alerts_fired: usize,
    /// Price moves visible at display precision.
    pub price_updates: usize,
}

enum TokenOutcome {
    Updated { alerts_fired: usize, visible: bool },
    Crashed,
    /// Token crashed elsewhere between listing and processing.
    Skipped,
}

pub struct MemecoinEngine {
    tokens: Arc<dyn TokenRepository>,
    notifier: Arc<dyn NotificationDispatcher>,
    config: EngineConfig,
    crash: CrashPolicy,
    retention: HistoryRetention,
    evaluator: AlertEvaluator,
    rng: Mutex<StdRng>,
    /// Held for the duration of a scheduled tick.
    running: Arc<tokio::sync::Mutex<()>>,
}

impl MemecoinEngine {
    pub fn new(
        tokens: Arc<dyn TokenRepository>,
        alerts: Arc<dyn AlertRepository>,
        history: Arc<dyn HistoryRepository>,
        notifier: Arc<dyn NotificationDispatcher>,
        config: EngineConfig,
    ) -> Self {
        Self {
            crash: CrashPolicy::new(
                tokens.clone(),
                alerts.clone(),
                notifier.clone(),
                config.alert_notify_delay,
            ),
            retention: HistoryRetention::new(history, &config),
            evaluator: AlertEvaluator::new(alerts, notifier.clone(), config.alert_notify_delay),
            tokens,
            notifier,
            config,
            rng: Mutex::new(StdRng::from_os_rng()),
            running: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Replaces the random source with a deterministic one.
    #[cfg(test)]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a tick unless the previous one is still in flight.
    ///
    /// # Returns
    /// - `Some(TickReport)` - Tick completed
    /// - `None` - Tick skipped because another is running, or the active tokens
    ///   could not be loaded (logged)
    pub async fn run_scheduled_tick(&self) -> Option<TickReport> {
        let Ok(_running) = self.running.clone().try_lock_owned() else {
            tracing::warn!("Previous memecoin tick still running, skipping this one");
            return None;
        };

        match self.run_tick_at(Utc::now()).await {
            Ok(report) => {
                tracing::info!(
                    "Memecoin tick: {} processed, {} crashed, {} failed, {} alerts fired, {} price updates",
                    report.processed,
                    report.crashed,
                    report.failed,
                    report.alerts_fired,
                    report.price_updates
                );
                Some(report)
            }
            Err(e) => {
                tracing::error!("Memecoin tick aborted, failed to load active tokens: {}", e);
                None
            }
        }
    }

    /// Runs one tick over all active simulated tokens at time `now`.
    ///
    /// # Returns
    /// - `Ok(TickReport)` - Tick completed; per-token failures are counted, not returned
    /// - `Err(AppError)` - The active token list could not be loaded
    pub async fn run_tick_at(&self, now: DateTime<Utc>) -> Result<TickReport, AppError> {
        let tokens = self.tokens.list_active_simulated().await?;

        let mut report = TickReport::default();
        for token in &tokens {
            match self.process_token(token, now).await {
                Ok(TokenOutcome::Updated {
                    alerts_fired,
                    visible,
                }) => {
                    report.processed += 1;
                    report.alerts_fired += alerts_fired;
                    if visible {
                        report.price_updates += 1;
                    }
                }
                Ok(TokenOutcome::Crashed) => report.crashed += 1,
                Ok(TokenOutcome::Skipped) => {}
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!("Failed to process token {}: {}", token.symbol, e);
                }
            }
        }

        Ok(report)
    }

    async fn process_token(
        &self,
        token: &SimulatedToken,
        now: DateTime<Utc>,
    ) -> Result<TokenOutcome, AppError> {
        if crash::should_crash(token.price_per_unit, self.config.crash_threshold) {
            return Ok(match self.crash.apply(token, now).await? {
                Some(_) => TokenOutcome::Crashed,
                None => TokenOutcome::Skipped,
            });
        }

        let next = {
            let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
            volatility::next_price(
                token.price_per_unit,
                &self.config.tiers,
                self.config.upward_bias,
                &mut *rng,
            )
        }
        .round_dp(self.config.price_precision);

        self.tokens.update_price(token.id, next).await?;

        let display = self.config.display_precision;
        let visible = next.round_dp(display) != token.price_per_unit.round_dp(display);
        if visible {
            self.notifier
                .publish_price_update(&PriceUpdate {
                    token_id: token.id,
                    symbol: token.symbol.clone(),
                    old_price: token.price_per_unit,
                    new_price: next,
                    recorded_at: now,
                })
                .await;
        }

        self.retention.record(token.id, next, now).await?;

        // Trim runs whether or not alert evaluation succeeded.
        let evaluated = self.evaluator.evaluate(&token.symbol, next).await;
        self.retention.trim(token.id).await?;

        let fired = evaluated?;
        if !fired.is_empty() {
            tracing::debug!("{} alert(s) fired for {}", fired.len(), token.symbol);
        }

        Ok(TokenOutcome::Updated {
            alerts_fired: fired.len(),
            visible,
        })
    }
}
