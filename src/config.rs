//! Application configuration loaded from environment variables.
//!
//! Required settings (database, Discord token) must be present. Engine tuning
//! keys are optional and fall back to defaults, but a key that is present and
//! unusable is a startup error rather than a silent default.

use std::{str::FromStr, time::Duration};

use rust_decimal::Decimal;

use crate::{
    error::{config::ConfigError, AppError},
    model::volatility::{LowTier, PriceTier, VolatilityTiers},
};

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    /// Channel receiving public crash announcements, if any.
    pub crash_channel_id: Option<u64>,
    /// Capacity of the live market event broadcast channel.
    pub event_bus_capacity: usize,
    pub engine: EngineConfig,
    pub cleanup: CleanupConfig,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file first.
    ///
    /// # Returns
    /// - `Ok(Config)` - Complete, validated configuration
    /// - `Err(AppError::ConfigErr)` - A required key is missing or a value is invalid
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value for a key, or `None` when unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let crash_channel_id = match lookup("MEMECOIN_CRASH_CHANNEL_ID") {
            Some(raw) => Some(parse_value::<u64>("MEMECOIN_CRASH_CHANNEL_ID", &raw)?),
            None => None,
        };

        let event_bus_capacity: usize = optional(&lookup, "EVENT_BUS_CAPACITY", 1024)?;
        if event_bus_capacity == 0 {
            return Err(ConfigError::invalid(
                "EVENT_BUS_CAPACITY",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            discord_bot_token: required(&lookup, "DISCORD_BOT_TOKEN")?,
            crash_channel_id,
            event_bus_capacity,
            engine: EngineConfig::from_lookup(&lookup)?,
            cleanup: CleanupConfig::from_lookup(&lookup)?,
        })
    }
}

/// Tuning for the simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Probability that a tick moves the price up, in `[0, 1]`.
    pub upward_bias: f64,
    /// Tokens priced strictly below this crash before volatility is applied.
    pub crash_threshold: Decimal,
    pub tiers: VolatilityTiers,
    pub tick_interval: Duration,
    /// Minute-history rows kept per token after a trim pass.
    pub max_history_entries: u64,
    /// Overshoot allowed before a trim pass runs.
    pub history_trim_batch_size: u64,
    pub hourly_dedup: chrono::Duration,
    pub daily_dedup: chrono::Duration,
    pub weekly_dedup: chrono::Duration,
    /// Pause between consecutive owner notifications.
    pub alert_notify_delay: Duration,
    /// Decimal places persisted for a price.
    pub price_precision: u32,
    /// Decimal places at which a price change is worth broadcasting.
    pub display_precision: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            upward_bias: 0.5,
            crash_threshold: Decimal::new(5, 4),
            tiers: VolatilityTiers::default(),
            tick_interval: Duration::from_secs(60),
            max_history_entries: 100,
            history_trim_batch_size: 20,
            hourly_dedup: chrono::Duration::minutes(55),
            daily_dedup: chrono::Duration::minutes(1435),
            weekly_dedup: chrono::Duration::minutes(10075),
            alert_notify_delay: Duration::from_millis(300),
            price_precision: 10,
            display_precision: 6,
        }
    }
}

impl EngineConfig {
    /// Reads every `MEMECOIN_*` engine key, defaulting the unset ones, then validates.
    ///
    /// # Returns
    /// - `Ok(EngineConfig)` - Validated engine configuration
    /// - `Err(ConfigError::InvalidValue)` - A value failed to parse or broke a constraint
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tiers = VolatilityTiers {
            low: LowTier {
                price_threshold: optional(
                    lookup,
                    "MEMECOIN_LOW_PRICE_THRESHOLD",
                    defaults.tiers.low.price_threshold,
                )?,
                min: optional(lookup, "MEMECOIN_LOW_MIN", defaults.tiers.low.min)?,
                max: optional(lookup, "MEMECOIN_LOW_MAX", defaults.tiers.low.max)?,
            },
            mid: PriceTier {
                price_threshold: optional(
                    lookup,
                    "MEMECOIN_MID_PRICE_THRESHOLD",
                    defaults.tiers.mid.price_threshold,
                )?,
                max: optional(lookup, "MEMECOIN_MID_MAX", defaults.tiers.mid.max)?,
            },
            high: PriceTier {
                price_threshold: optional(
                    lookup,
                    "MEMECOIN_HIGH_PRICE_THRESHOLD",
                    defaults.tiers.high.price_threshold,
                )?,
                max: optional(lookup, "MEMECOIN_HIGH_MAX", defaults.tiers.high.max)?,
            },
        };

        let config = Self {
            upward_bias: optional(lookup, "MEMECOIN_UPWARD_BIAS", defaults.upward_bias)?,
            crash_threshold: optional(lookup, "MEMECOIN_CRASH_THRESHOLD", defaults.crash_threshold)?,
            tiers,
            tick_interval: Duration::from_secs(optional(
                lookup,
                "MEMECOIN_TICK_INTERVAL_SECONDS",
                defaults.tick_interval.as_secs(),
            )?),
            max_history_entries: optional(
                lookup,
                "MEMECOIN_MAX_HISTORY_ENTRIES",
                defaults.max_history_entries,
            )?,
            history_trim_batch_size: optional(
                lookup,
                "MEMECOIN_HISTORY_TRIM_BATCH_SIZE",
                defaults.history_trim_batch_size,
            )?,
            hourly_dedup: optional_minutes(
                lookup,
                "MEMECOIN_HOURLY_DEDUP_MINUTES",
                defaults.hourly_dedup,
            )?,
            daily_dedup: optional_minutes(
                lookup,
                "MEMECOIN_DAILY_DEDUP_MINUTES",
                defaults.daily_dedup,
            )?,
            weekly_dedup: optional_minutes(
                lookup,
                "MEMECOIN_WEEKLY_DEDUP_MINUTES",
                defaults.weekly_dedup,
            )?,
            alert_notify_delay: Duration::from_millis(optional(
                lookup,
                "MEMECOIN_ALERT_NOTIFY_DELAY_MS",
                300u64,
            )?),
            price_precision: optional(lookup, "MEMECOIN_PRICE_PRECISION", defaults.price_precision)?,
            display_precision: optional(
                lookup,
                "MEMECOIN_DISPLAY_PRECISION",
                defaults.display_precision,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field constraints the engine relies on.
    ///
    /// Magnitudes must stay below 1 so that a single tick can never move a
    /// price to zero; only the crash transition does that.
    ///
    /// # Returns
    /// - `Ok(())` - Configuration is usable
    /// - `Err(ConfigError::InvalidValue)` - First violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.upward_bias) {
            return Err(ConfigError::invalid(
                "MEMECOIN_UPWARD_BIAS",
                "must be between 0 and 1",
            ));
        }
        if self.crash_threshold <= Decimal::ZERO {
            return Err(ConfigError::invalid(
                "MEMECOIN_CRASH_THRESHOLD",
                "must be positive",
            ));
        }

        let tiers = &self.tiers;
        if tiers.low.price_threshold <= Decimal::ZERO {
            return Err(ConfigError::invalid(
                "MEMECOIN_LOW_PRICE_THRESHOLD",
                "must be positive",
            ));
        }
        if tiers.mid.price_threshold <= tiers.low.price_threshold {
            return Err(ConfigError::invalid(
                "MEMECOIN_MID_PRICE_THRESHOLD",
                "must be greater than the low tier threshold",
            ));
        }
        if tiers.high.price_threshold <= tiers.mid.price_threshold {
            return Err(ConfigError::invalid(
                "MEMECOIN_HIGH_PRICE_THRESHOLD",
                "must be greater than the mid tier threshold",
            ));
        }
        for (key, magnitude) in [
            ("MEMECOIN_LOW_MIN", tiers.low.min),
            ("MEMECOIN_LOW_MAX", tiers.low.max),
            ("MEMECOIN_MID_MAX", tiers.mid.max),
            ("MEMECOIN_HIGH_MAX", tiers.high.max),
        ] {
            if !(0.0..1.0).contains(&magnitude) {
                return Err(ConfigError::invalid(key, "must be in [0, 1)"));
            }
        }
        if tiers.low.min > tiers.low.max {
            return Err(ConfigError::invalid(
                "MEMECOIN_LOW_MIN",
                "must not exceed MEMECOIN_LOW_MAX",
            ));
        }

        if self.tick_interval.is_zero() {
            return Err(ConfigError::invalid(
                "MEMECOIN_TICK_INTERVAL_SECONDS",
                "must be positive",
            ));
        }
        if self.max_history_entries == 0 {
            return Err(ConfigError::invalid(
                "MEMECOIN_MAX_HISTORY_ENTRIES",
                "must be positive",
            ));
        }
        if self.history_trim_batch_size == 0 {
            return Err(ConfigError::invalid(
                "MEMECOIN_HISTORY_TRIM_BATCH_SIZE",
                "must be positive",
            ));
        }
        for (key, window) in [
            ("MEMECOIN_HOURLY_DEDUP_MINUTES", self.hourly_dedup),
            ("MEMECOIN_DAILY_DEDUP_MINUTES", self.daily_dedup),
            ("MEMECOIN_WEEKLY_DEDUP_MINUTES", self.weekly_dedup),
        ] {
            if window <= chrono::Duration::zero() {
                return Err(ConfigError::invalid(key, "must be positive"));
            }
        }
        if self.display_precision > self.price_precision {
            return Err(ConfigError::invalid(
                "MEMECOIN_DISPLAY_PRECISION",
                "must not exceed MEMECOIN_PRICE_PRECISION",
            ));
        }

        Ok(())
    }
}

/// Tuning for the crashed-token maintenance job.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupConfig {
    /// How long a crashed token is kept before it is purged.
    pub grace_period: chrono::Duration,
    /// Six-field cron expression for the cleanup job.
    pub cron: String,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            grace_period: chrono::Duration::hours(24),
            cron: "0 0 * * * *".to_string(),
        }
    }
}

impl CleanupConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        const KEY: &str = "MEMECOIN_CRASH_GRACE_HOURS";
        let grace_hours: i64 = optional(lookup, KEY, defaults.grace_period.num_hours())?;
        if grace_hours < 0 {
            return Err(ConfigError::invalid(KEY, "must not be negative"));
        }
        let grace_period = chrono::Duration::try_hours(grace_hours)
            .ok_or_else(|| ConfigError::invalid(KEY, "out of range"))?;

        Ok(Self {
            grace_period,
            cron: lookup("MEMECOIN_CLEANUP_CRON").unwrap_or(defaults.cron),
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parses `key` as `T`, returning `default` when the key is unset.
fn optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

/// Reads a non-negative whole number of minutes, returning `default` when unset.
fn optional_minutes<F>(
    lookup: &F,
    key: &str,
    default: chrono::Duration,
) -> Result<chrono::Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let minutes: i64 = optional(lookup, key, default.num_minutes())?;
    if minutes < 0 {
        return Err(ConfigError::invalid(key, "must not be negative"));
    }
    chrono::Duration::try_minutes(minutes).ok_or_else(|| ConfigError::invalid(key, "out of range"))
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{raw}'")))
}
