use cosmwasm_std::{entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};
use lucky_wheel_common::countdown::next_draw_instant;
use lucky_wheel_common::types::{DrawTime, Weekday};

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, UpdateConfigParams};
use crate::query;
use crate::state::{DrawSchedule, EngineConfig, SpinState, CONFIG, SCHEDULE, SPIN};

const CONTRACT_NAME: &str = "crates.io:lucky-wheel-draw-engine";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let defaults = DrawTime::default();
    let draw_time = DrawTime {
        weekday: msg.draw_weekday.unwrap_or(Weekday::Saturday),
        hour: msg.draw_hour.unwrap_or(defaults.hour),
        minute: msg.draw_minute.unwrap_or(defaults.minute),
        utc_offset_seconds: msg.utc_offset_seconds.unwrap_or(defaults.utc_offset_seconds),
    };
    execute::validate_draw_time(&draw_time)?;

    let spin_duration_seconds = msg
        .spin_duration_seconds
        .unwrap_or(execute::DEFAULT_SPIN_DURATION_SECONDS);
    execute::validate_spin_duration(spin_duration_seconds)?;
    execute::validate_prize_denom(&msg.prize_denom)?;

    let config = EngineConfig {
        admin: info.sender.clone(),
        operator: deps.api.addr_validate(&msg.operator)?,
        entry_ledger: deps.api.addr_validate(&msg.entry_ledger)?,
        draw_time,
        spin_duration_seconds,
        prize_amount: msg.prize_amount,
        prize_denom: msg.prize_denom,
    };

    let schedule = DrawSchedule {
        cycle: 0,
        target_instant: next_draw_instant(env.block.time, &config.draw_time),
        armed: false,
    };

    CONFIG.save(deps.storage, &config)?;
    SCHEDULE.save(deps.storage, &schedule)?;
    SPIN.save(deps.storage, &SpinState::idle())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "draw-engine")
        .add_attribute("admin", info.sender.to_string())
        .add_attribute(
            "target_instant",
            schedule.target_instant.seconds().to_string(),
        ))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Tick {} => execute::tick(deps, env, info),
        ExecuteMsg::Dismiss {} => execute::dismiss(deps, env, info),
        ExecuteMsg::UpdateConfig {
            operator,
            entry_ledger,
            draw_weekday,
            draw_hour,
            draw_minute,
            utc_offset_seconds,
            spin_duration_seconds,
            prize_amount,
            prize_denom,
        } => execute::update_config(
            deps,
            env,
            info,
            UpdateConfigParams {
                operator,
                entry_ledger,
                draw_weekday,
                draw_hour,
                draw_minute,
                utc_offset_seconds,
                spin_duration_seconds,
                prize_amount,
                prize_denom,
            },
        ),
    }
}

#[entry_point]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::Schedule {} => query::query_schedule(deps),
        QueryMsg::Countdown {} => query::query_countdown(deps, env),
        QueryMsg::Spin {} => query::query_spin(deps, env),
        QueryMsg::Cycle {} => query::query_cycle(deps),
        QueryMsg::Draw { cycle } => query::query_draw(deps, cycle),
        QueryMsg::DrawHistory { start_after, limit } => {
            query::query_draw_history(deps, start_after, limit)
        }
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
