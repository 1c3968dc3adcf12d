use cosmwasm_schema::{cw_serde, QueryResponses};
use lucky_wheel_common::types::Entry;

use crate::state::LedgerConfig;

#[cw_serde]
pub struct InstantiateMsg {
    pub operator: String,
    /// Can be set later with UpdateConfig once the engine is deployed
    pub draw_engine: Option<String>,
    /// Defaults to 2
    pub max_entries_per_participant: Option<u32>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Record one purchased entry in the open cycle. Operator only.
    RecordEntry {
        participant_id: String,
        display_name: String,
    },
    /// Update configuration. Admin only.
    UpdateConfig {
        operator: Option<String>,
        draw_engine: Option<String>,
        max_entries_per_participant: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}

/// Query sent to the draw engine.
#[cw_serde]
pub enum EngineQueryMsg {
    Cycle {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(LedgerConfig)]
    Config {},
    /// Cycle that new entries are currently filed under
    #[returns(u64)]
    OpenCycle {},
    #[returns(u32)]
    EntryCount { cycle: u64 },
    #[returns(Option<Entry>)]
    Entry { cycle: u64, index: u32 },
    #[returns(EntriesResponse)]
    Entries {
        cycle: u64,
        start_after: Option<u32>,
        limit: Option<u32>,
    },
    #[returns(u32)]
    ParticipantEntries { cycle: u64, participant_id: String },
}

#[cw_serde]
pub struct EntriesResponse {
    pub cycle: u64,
    pub entries: Vec<IndexedEntry>,
}

#[cw_serde]
pub struct IndexedEntry {
    pub index: u32,
    pub entry: Entry,
}
