use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query;
use crate::state::{LedgerConfig, CONFIG};

const CONTRACT_NAME: &str = "crates.io:lucky-wheel-entry-ledger";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let max_entries_per_participant = msg
        .max_entries_per_participant
        .unwrap_or(execute::DEFAULT_MAX_ENTRIES_PER_PARTICIPANT);
    execute::validate_entry_limit(max_entries_per_participant)?;

    let draw_engine = msg
        .draw_engine
        .map(|e| deps.api.addr_validate(&e))
        .transpose()?;

    let config = LedgerConfig {
        admin: info.sender.clone(),
        operator: deps.api.addr_validate(&msg.operator)?,
        draw_engine,
        max_entries_per_participant,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "entry-ledger")
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RecordEntry {
            participant_id,
            display_name,
        } => execute::record_entry(deps, env, info, participant_id, display_name),
        ExecuteMsg::UpdateConfig {
            operator,
            draw_engine,
            max_entries_per_participant,
        } => execute::update_config(
            deps,
            env,
            info,
            operator,
            draw_engine,
            max_entries_per_participant,
        ),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::OpenCycle {} => query::query_open_cycle(deps),
        QueryMsg::EntryCount { cycle } => query::query_entry_count(deps, cycle),
        QueryMsg::Entry { cycle, index } => query::query_entry(deps, cycle, index),
        QueryMsg::Entries {
            cycle,
            start_after,
            limit,
        } => query::query_entries(deps, cycle, start_after, limit),
        QueryMsg::ParticipantEntries {
            cycle,
            participant_id,
        } => query::query_participant_entries(deps, cycle, participant_id),
    }
}

#[entry_point]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
