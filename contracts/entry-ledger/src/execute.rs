use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, QuerierWrapper, Response};
use lucky_wheel_common::types::{CycleInfo, Entry};

use crate::error::ContractError;
use crate::msg::EngineQueryMsg;
use crate::state::{LedgerConfig, CONFIG, ENTRIES, ENTRY_COUNTS, PARTICIPANT_ENTRIES};

/// Two entries per participant per week
pub const DEFAULT_MAX_ENTRIES_PER_PARTICIPANT: u32 = 2;
pub const MAX_DISPLAY_NAME_LEN: usize = 64;
pub const MAX_PARTICIPANT_ID_LEN: usize = 128;

pub fn validate_entry_limit(max: u32) -> Result<(), ContractError> {
    if max == 0 {
        return Err(ContractError::InvalidEntryLimit);
    }
    Ok(())
}

fn validate_entry(participant_id: &str, display_name: &str) -> Result<(), ContractError> {
    if participant_id.trim().is_empty() || participant_id.len() > MAX_PARTICIPANT_ID_LEN {
        return Err(ContractError::InvalidEntry {
            reason: format!(
                "participant_id must be 1-{} bytes",
                MAX_PARTICIPANT_ID_LEN
            ),
        });
    }
    if display_name.trim().is_empty() || display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(ContractError::InvalidEntry {
            reason: format!(
                "display_name must be 1-{} characters",
                MAX_DISPLAY_NAME_LEN
            ),
        });
    }
    Ok(())
}

/// Cycle new entries are filed under, as reported by the draw engine.
pub fn open_cycle(querier: &QuerierWrapper, config: &LedgerConfig) -> Result<u64, ContractError> {
    let engine = config
        .draw_engine
        .as_ref()
        .ok_or(ContractError::EngineNotSet)?;
    let info: CycleInfo = querier.query_wasm_smart(engine, &EngineQueryMsg::Cycle {})?;
    Ok(info.open_cycle())
}

/// Append one entry to the open cycle. Operator only.
///
/// While the engine's wheel is turning or showing a result, the entry goes
/// to the next cycle, so it can neither change the running draw nor be lost
/// when that draw is dismissed.
pub fn record_entry(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    participant_id: String,
    display_name: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.operator {
        return Err(ContractError::Unauthorized {
            reason: "only operator can record entries".to_string(),
        });
    }
    validate_entry(&participant_id, &display_name)?;

    let cycle = open_cycle(&deps.querier, &config)?;

    let held = PARTICIPANT_ENTRIES
        .may_load(deps.storage, (cycle, participant_id.as_str()))?
        .unwrap_or(0);
    if held >= config.max_entries_per_participant {
        return Err(ContractError::EntryLimitReached {
            participant_id,
            cycle,
            max: config.max_entries_per_participant,
        });
    }

    let index = ENTRY_COUNTS.may_load(deps.storage, cycle)?.unwrap_or(0);
    let entry = Entry {
        participant_id: participant_id.clone(),
        display_name: display_name.clone(),
        created_at: env.block.time,
    };
    ENTRIES.save(deps.storage, (cycle, index), &entry)?;
    ENTRY_COUNTS.save(deps.storage, cycle, &(index + 1))?;
    PARTICIPANT_ENTRIES.save(deps.storage, (cycle, participant_id.as_str()), &(held + 1))?;

    Ok(Response::new()
        .add_attribute("action", "record_entry")
        .add_attribute("cycle", cycle.to_string())
        .add_attribute("index", index.to_string())
        .add_event(
            Event::new("wheel_entry_recorded")
                .add_attribute("cycle", cycle.to_string())
                .add_attribute("index", index.to_string())
                .add_attribute("participant_id", participant_id)
                .add_attribute("display_name", display_name)
                .add_attribute("participant_entries", (held + 1).to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        ))
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    operator: Option<String>,
    draw_engine: Option<String>,
    max_entries_per_participant: Option<u32>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(op) = operator {
        config.operator = deps.api.addr_validate(&op)?;
    }
    if let Some(engine) = draw_engine {
        config.draw_engine = Some(deps.api.addr_validate(&engine)?);
    }
    if let Some(max) = max_entries_per_participant {
        validate_entry_limit(max)?;
        config.max_entries_per_participant = max;
    }

    CONFIG.save(deps.storage, &config)?;

    let draw_engine = config
        .draw_engine
        .as_ref()
        .map(|e| e.to_string())
        .unwrap_or_default();

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_event(
            Event::new("wheel_ledger_config_updated")
                .add_attribute("operator", config.operator.to_string())
                .add_attribute("draw_engine", draw_engine)
                .add_attribute(
                    "max_entries_per_participant",
                    config.max_entries_per_participant.to_string(),
                ),
        ))
}
