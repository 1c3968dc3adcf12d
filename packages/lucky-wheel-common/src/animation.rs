use cosmwasm_std::{Decimal, Timestamp};

/// Wheel rotation, in degrees, at `now` for a spin that started at
/// `started_at` and lasts `duration_seconds`.
///
/// Ease-out cubic: `m * (1 - (1 - t)^3)` where `t` is the elapsed share of
/// the spin. Starts at exactly 0 and settles on exactly `spin_magnitude`,
/// the same value the winner was selected from.
pub fn rotation_at(
    spin_magnitude: Decimal,
    started_at: Timestamp,
    duration_seconds: u64,
    now: Timestamp,
) -> Decimal {
    if now <= started_at {
        return Decimal::zero();
    }
    let elapsed = now.nanos() - started_at.nanos();
    let duration = duration_seconds.saturating_mul(1_000_000_000);
    if elapsed >= duration {
        return spin_magnitude;
    }

    let progress = Decimal::from_ratio(elapsed, duration);
    let left = Decimal::one() - progress;
    let eased = Decimal::one() - left.pow(3);
    spin_magnitude * eased
}
