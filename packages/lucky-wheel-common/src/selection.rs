use cosmwasm_std::Decimal;
use sha2::{Digest, Sha256};

pub const FULL_ROTATION_DEGREES: u128 = 360;

/// Every spin turns the wheel at least this many whole rotations...
pub const MIN_EXTRA_ROTATIONS: u128 = 10;
/// ...plus up to this many more, before the sub-rotation offset.
pub const EXTRA_ROTATION_SPREAD: u128 = 5;

/// `Decimal` carries 18 fractional digits.
const DECIMAL_ONE: u128 = 1_000_000_000_000_000_000;
const FULL_ROTATION_ATOMICS: u128 = FULL_ROTATION_DEGREES * DECIMAL_ONE;

/// Angle the wheel comes to rest at, in `[0, 360)`.
pub fn rest_angle(spin_magnitude: Decimal) -> Decimal {
    Decimal::raw(spin_magnitude.atomics().u128() % FULL_ROTATION_ATOMICS)
}

/// Angle under the fixed pointer once the wheel stops.
///
/// The wheel turns clockwise under a pointer at 0°, so the segment that ends
/// up under it is the one at `360 - rest` on the wheel.
pub fn lookup_angle(spin_magnitude: Decimal) -> Decimal {
    let rest = rest_angle(spin_magnitude).atomics().u128();
    Decimal::raw((FULL_ROTATION_ATOMICS - rest) % FULL_ROTATION_ATOMICS)
}

/// Winning slot for a wheel of `entry_count` equal segments laid out in
/// ledger order.
///
/// Segment `i` covers `[i * 360 / n, (i + 1) * 360 / n)`. The look-up runs on
/// the exact fixed-point value so equal inputs always give the same slot.
/// Returns `None` for an empty wheel.
pub fn select_winner_index(entry_count: u32, spin_magnitude: Decimal) -> Option<u32> {
    if entry_count == 0 {
        return None;
    }
    let lookup = lookup_angle(spin_magnitude).atomics().u128();
    let index = lookup * u128::from(entry_count) / FULL_ROTATION_ATOMICS;
    // lookup < 360 keeps index < n; clamp the boundary anyway
    Some(index.min(u128::from(entry_count - 1)) as u32)
}

/// Total rotation of one spin, in degrees, derived from a 32-byte seed.
///
/// `(10 + 5u + v) * 360` with `u` read from the first eight seed bytes and `v`
/// from the next eight, each mapped uniformly onto `[0, 1)`. The sub-rotation
/// part is uniform on `[0, 360)`, so no segment is favoured.
pub fn spin_magnitude_from_seed(seed: &[u8; 32]) -> Decimal {
    let extra = unit_fraction(&seed[0..8]);
    let offset = unit_fraction(&seed[8..16]);

    let rotations =
        MIN_EXTRA_ROTATIONS * DECIMAL_ONE + EXTRA_ROTATION_SPREAD * extra + offset;
    Decimal::raw(rotations * FULL_ROTATION_DEGREES)
}

/// Seed for one spin, bound to everything that identifies the draw.
///
/// `sha256("lucky-wheel/spin" || engine || cycle || height || time_nanos || tx_index || entry_count)`
/// with integers big-endian and a missing transaction index hashed as `u32::MAX`.
pub fn spin_seed(
    engine: &str,
    cycle: u64,
    block_height: u64,
    block_time_nanos: u64,
    tx_index: Option<u32>,
    entry_count: u32,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"lucky-wheel/spin");
    hasher.update(engine.as_bytes());
    hasher.update(cycle.to_be_bytes());
    hasher.update(block_height.to_be_bytes());
    hasher.update(block_time_nanos.to_be_bytes());
    hasher.update(tx_index.unwrap_or(u32::MAX).to_be_bytes());
    hasher.update(entry_count.to_be_bytes());
    hasher.finalize().into()
}

/// Maps eight big-endian bytes onto `[0, 1)` as `Decimal` atomics.
fn unit_fraction(bytes: &[u8]) -> u128 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    (u128::from(u64::from_be_bytes(word)) * DECIMAL_ONE) >> 64
}
