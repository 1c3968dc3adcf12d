use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};
use lucky_wheel_common::types::Entry;

pub const CONFIG: Item<LedgerConfig> = Item::new("config");

/// (cycle, index) -> entry. Append-only: an index is written once and never changed.
pub const ENTRIES: Map<(u64, u32), Entry> = Map::new("entries");
pub const ENTRY_COUNTS: Map<u64, u32> = Map::new("entry_counts");
/// (cycle, participant_id) -> number of entries bought in that cycle
pub const PARTICIPANT_ENTRIES: Map<(u64, &str), u32> = Map::new("participant_entries");

#[cw_serde]
pub struct LedgerConfig {
    pub admin: Addr,
    /// Account service that records purchases after debiting the buyer
    pub operator: Addr,
    /// Draw engine consulted for the open cycle. Unset until wired up.
    pub draw_engine: Option<Addr>,
    pub max_entries_per_participant: u32,
}
