use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::execute;
use crate::msg::{EntriesResponse, IndexedEntry};
use crate::state::{CONFIG, ENTRIES, ENTRY_COUNTS, PARTICIPANT_ENTRIES};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_open_cycle(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let cycle = execute::open_cycle(&deps.querier, &config)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&cycle)
}

pub fn query_entry_count(deps: Deps, cycle: u64) -> StdResult<Binary> {
    let count = ENTRY_COUNTS.may_load(deps.storage, cycle)?.unwrap_or(0);
    to_json_binary(&count)
}

pub fn query_entry(deps: Deps, cycle: u64, index: u32) -> StdResult<Binary> {
    let entry = ENTRIES.may_load(deps.storage, (cycle, index))?;
    to_json_binary(&entry)
}

pub fn query_entries(
    deps: Deps,
    cycle: u64,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(50).min(200) as usize;
    let start = start_after.map(Bound::exclusive);

    let entries = ENTRIES
        .prefix(cycle)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|r| r.map(|(index, entry)| IndexedEntry { index, entry }))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&EntriesResponse { cycle, entries })
}

pub fn query_participant_entries(
    deps: Deps,
    cycle: u64,
    participant_id: String,
) -> StdResult<Binary> {
    let held = PARTICIPANT_ENTRIES
        .may_load(deps.storage, (cycle, participant_id.as_str()))?
        .unwrap_or(0);
    to_json_binary(&held)
}
