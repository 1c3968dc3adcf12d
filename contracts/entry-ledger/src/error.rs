use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("draw engine address is not configured")]
    EngineNotSet,

    #[error("{participant_id} already holds {max} entries in cycle {cycle}")]
    EntryLimitReached {
        participant_id: String,
        cycle: u64,
        max: u32,
    },

    #[error("invalid entry: {reason}")]
    InvalidEntry { reason: String },

    #[error("max entries per participant must be at least 1")]
    InvalidEntryLimit,
}
