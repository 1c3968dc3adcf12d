use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use lucky_wheel_common::types::{DrawTime, Entry, SpinPhase};

pub const CONFIG: Item<EngineConfig> = Item::new("config");
pub const SCHEDULE: Item<DrawSchedule> = Item::new("schedule");
pub const SPIN: Item<SpinState> = Item::new("spin");

/// Resolved draws, keyed by cycle
pub const DRAWS: Map<u64, DrawRecord> = Map::new("draws");

#[cw_serde]
pub struct EngineConfig {
    pub admin: Addr,
    /// Keeper allowed to send the periodic tick
    pub operator: Addr,
    pub entry_ledger: Addr,
    pub draw_time: DrawTime,
    /// How long the wheel turns before the winner is announced
    pub spin_duration_seconds: u64,
    /// Prize announced with the winner. Paying it out is not this contract's job.
    pub prize_amount: Uint128,
    pub prize_denom: String,
}

#[cw_serde]
pub struct DrawSchedule {
    pub cycle: u64,
    /// Only ever moves forward, in whole weeks once passed
    pub target_instant: Timestamp,
    /// Set once the countdown reached zero; cleared on dismissal
    pub armed: bool,
}

#[cw_serde]
pub struct SpinState {
    pub phase: SpinPhase,
    /// Present while Spinning or Resolved
    pub session: Option<SpinSession>,
    pub resolved_at: Option<Timestamp>,
}

impl SpinState {
    pub fn idle() -> Self {
        SpinState {
            phase: SpinPhase::Idle,
            session: None,
            resolved_at: None,
        }
    }
}

/// Everything fixed at the moment the wheel starts turning.
#[cw_serde]
pub struct SpinSession {
    /// Total rotation in degrees. Both the winner and the resting angle come from this value.
    pub spin_magnitude: Decimal,
    /// sha256 seed the magnitude was derived from, hex-encoded
    pub spin_seed: String,
    /// Ledger length when the spin started
    pub entry_count: u32,
    pub winner_index: u32,
    pub winner: Entry,
    pub started_at: Timestamp,
    pub duration_seconds: u64,
    pub resolves_at: Timestamp,
}

#[cw_serde]
pub struct DrawRecord {
    pub cycle: u64,
    pub target_instant: Timestamp,
    pub winner: Entry,
    pub winner_index: u32,
    pub entry_count: u32,
    pub spin_magnitude: Decimal,
    pub spin_seed: String,
    pub prize_amount: Uint128,
    pub prize_denom: String,
    pub started_at: Timestamp,
    pub resolved_at: Timestamp,
}
