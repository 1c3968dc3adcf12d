use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("no resolved draw to dismiss (phase: {phase})")]
    NothingToDismiss { phase: String },

    #[error("draw schedule cannot change while a draw is armed or in progress")]
    ScheduleLocked,

    #[error("entry ledger cannot change while a draw is in progress (phase: {phase})")]
    LedgerLocked { phase: String },

    #[error("invalid draw time {hour}:{minute} (hour must be < 24, minute < 60)")]
    InvalidDrawTime { hour: u8, minute: u8 },

    #[error("invalid utc offset {seconds}s (must be within ±{max}s)")]
    InvalidUtcOffset { seconds: i32, max: i32 },

    #[error("invalid spin duration {seconds}s (must be between {min} and {max})")]
    InvalidSpinDuration { seconds: u64, min: u64, max: u64 },

    #[error("prize denom must not be empty")]
    EmptyPrizeDenom,

    #[error("entry ledger has no entry {index} for cycle {cycle}")]
    EntryMissing { cycle: u64, index: u32 },
}
