//! Volatility tier configuration.
//!
//! Magnitudes are fractions of the current price (`0.10` = 10%). Thresholds
//! are prices and must be strictly increasing from low to high.

use rust_decimal::Decimal;

/// The cheapest band, which moves by at least `min` every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LowTier {
    /// Prices strictly below this belong to the low tier.
    pub price_threshold: Decimal,
    pub min: f64,
    pub max: f64,
}

/// A band whose magnitude is drawn from `[0, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTier {
    /// Upper (exclusive) price bound of the band.
    pub price_threshold: Decimal,
    pub max: f64,
}

/// The three price bands driving the volatility model.
///
/// - below `low.price_threshold`: magnitude in `[low.min, low.max]`
/// - below `mid.price_threshold`: magnitude in `[0, mid.max]`
/// - below `high.price_threshold`: magnitude in `[0, m]` where `m` slides
///   linearly from `mid.max` to `high.max` across the band
/// - otherwise: magnitude in `[0, high.max]`
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityTiers {
    pub low: LowTier,
    pub mid: PriceTier,
    pub high: PriceTier,
}

impl Default for VolatilityTiers {
    fn default() -> Self {
        Self {
            low: LowTier {
                price_threshold: Decimal::new(1, 2),
                min: 0.02,
                max: 0.10,
            },
            mid: PriceTier {
                price_threshold: Decimal::ONE,
                max: 0.05,
            },
            high: PriceTier {
                price_threshold: Decimal::ONE_HUNDRED,
                max: 0.01,
            },
        }
    }
}
