//! Tiered random-walk price model.
//!
//! Each tick a token moves up or down by a fraction of its current price. The
//! fraction is drawn from a band chosen by the current price, so penny tokens
//! swing hard and expensive ones drift.

use rand::Rng;
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};

use crate::model::volatility::VolatilityTiers;

/// Draws the fractional size of the next move for a token priced `current`.
///
/// - below the low threshold: uniform in `[low.min, low.max]`
/// - below the mid threshold: uniform in `[0, mid.max]`
/// - below the high threshold: uniform in `[0, m]`, with `m` interpolated from
///   `mid.max` at the mid threshold to `high.max` at the high threshold
/// - otherwise: uniform in `[0, high.max]`
pub fn change_magnitude<R: Rng + ?Sized>(
    current: Decimal,
    tiers: &VolatilityTiers,
    rng: &mut R,
) -> f64 {
    if current < tiers.low.price_threshold {
        return rng.random_range(tiers.low.min..=tiers.low.max);
    }
    if current < tiers.mid.price_threshold {
        return rng.random_range(0.0..=tiers.mid.max);
    }
    if current < tiers.high.price_threshold {
        let max = transition_max(current, tiers);
        return rng.random_range(0.0..=max);
    }

    rng.random_range(0.0..=tiers.high.max)
}

/// Upper magnitude bound inside the transition band.
fn transition_max(current: Decimal, tiers: &VolatilityTiers) -> f64 {
    let band = tiers.high.price_threshold - tiers.mid.price_threshold;
    let scale = ((current - tiers.mid.price_threshold) / band)
        .to_f64()
        .unwrap_or(1.0)
        .clamp(0.0, 1.0);

    tiers.mid.max + (tiers.high.max - tiers.mid.max) * scale
}

/// Computes the next simulated price.
///
/// Moves up with probability `upward_bias`, otherwise down, by
/// `current * change_magnitude(..)`. The result is never negative.
///
/// # Arguments
/// - `current` - Price before this tick
/// - `tiers` - Volatility bands
/// - `upward_bias` - Probability of an upward move, in `[0, 1]`
/// - `rng` - Random source; seeded in tests
pub fn next_price<R: Rng + ?Sized>(
    current: Decimal,
    tiers: &VolatilityTiers,
    upward_bias: f64,
    rng: &mut R,
) -> Decimal {
    let upward = rng.random_bool(upward_bias);
    let magnitude = change_magnitude(current, tiers, rng);

    let Some(magnitude) = Decimal::from_f64(magnitude) else {
        return current.max(Decimal::ZERO);
    };
    let delta = current.checked_mul(magnitude).unwrap_or(Decimal::ZERO);

    let next = if upward {
        current.checked_add(delta).unwrap_or(current)
    } else {
        current - delta
    };

    next.max(Decimal::ZERO)
}
