use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal, Timestamp, Uint128};
use lucky_wheel_common::types::{CycleInfo, Entry, Remaining, SpinPhase, Weekday};

use crate::state::{DrawRecord, DrawSchedule, EngineConfig};

#[cw_serde]
pub struct InstantiateMsg {
    pub operator: String,
    pub entry_ledger: String,
    /// Defaults to Saturday
    pub draw_weekday: Option<Weekday>,
    /// Defaults to 20
    pub draw_hour: Option<u8>,
    /// Defaults to 0
    pub draw_minute: Option<u8>,
    /// Defaults to 0 (UTC)
    pub utc_offset_seconds: Option<i32>,
    /// Defaults to 7
    pub spin_duration_seconds: Option<u64>,
    pub prize_amount: Uint128,
    pub prize_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Periodic clock tick, sent by the operator once per second.
    /// Counts down, triggers the draw at zero and settles a finished spin.
    Tick {},
    /// Close a resolved draw and start the next cycle. Operator or admin.
    Dismiss {},
    /// Update configuration. Admin only.
    UpdateConfig {
        operator: Option<String>,
        entry_ledger: Option<String>,
        draw_weekday: Option<Weekday>,
        draw_hour: Option<u8>,
        draw_minute: Option<u8>,
        utc_offset_seconds: Option<i32>,
        spin_duration_seconds: Option<u64>,
        prize_amount: Option<Uint128>,
        prize_denom: Option<String>,
    },
}

/// Internal parameter struct for update_config to avoid too many arguments.
pub struct UpdateConfigParams {
    pub operator: Option<String>,
    pub entry_ledger: Option<String>,
    pub draw_weekday: Option<Weekday>,
    pub draw_hour: Option<u8>,
    pub draw_minute: Option<u8>,
    pub utc_offset_seconds: Option<i32>,
    pub spin_duration_seconds: Option<u64>,
    pub prize_amount: Option<Uint128>,
    pub prize_denom: Option<String>,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Queries this contract sends to the entry ledger.
#[cw_serde]
pub enum LedgerQueryMsg {
    EntryCount { cycle: u64 },
    Entry { cycle: u64, index: u32 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(EngineConfig)]
    Config {},
    #[returns(DrawSchedule)]
    Schedule {},
    #[returns(CountdownResponse)]
    Countdown {},
    #[returns(SpinResponse)]
    Spin {},
    #[returns(CycleInfo)]
    Cycle {},
    #[returns(Option<DrawRecord>)]
    Draw { cycle: u64 },
    #[returns(DrawHistoryResponse)]
    DrawHistory {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct CountdownResponse {
    pub cycle: u64,
    pub target_instant: Timestamp,
    /// Display triple; hours wrap at 24
    pub remaining: Remaining,
    pub seconds_to_target: u64,
    pub armed: bool,
}

#[cw_serde]
pub struct SpinResponse {
    pub cycle: u64,
    pub phase: SpinPhase,
    pub spin_magnitude: Option<Decimal>,
    pub rest_angle: Option<Decimal>,
    /// Wheel angle at the queried block time
    pub rotation: Decimal,
    pub entry_count: u32,
    pub started_at: Option<Timestamp>,
    pub resolves_at: Option<Timestamp>,
    /// Only set once the spin is resolved
    pub winner: Option<Entry>,
    pub winner_index: Option<u32>,
    pub prize_amount: Uint128,
    pub prize_denom: String,
}

#[cw_serde]
pub struct DrawHistoryResponse {
    pub draws: Vec<DrawRecord>,
}
