use cosmwasm_std::{to_json_binary, Binary, Decimal, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;
use lucky_wheel_common::animation::rotation_at;
use lucky_wheel_common::countdown::seconds_until;
use lucky_wheel_common::selection::rest_angle;
use lucky_wheel_common::types::{CycleInfo, Remaining, SpinPhase};

use crate::msg::{CountdownResponse, DrawHistoryResponse, SpinResponse};
use crate::state::{CONFIG, DRAWS, SCHEDULE, SPIN};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_schedule(deps: Deps) -> StdResult<Binary> {
    let schedule = SCHEDULE.load(deps.storage)?;
    to_json_binary(&schedule)
}

pub fn query_countdown(deps: Deps, env: Env) -> StdResult<Binary> {
    let schedule = SCHEDULE.load(deps.storage)?;
    let seconds_to_target = seconds_until(env.block.time, schedule.target_instant);

    to_json_binary(&CountdownResponse {
        cycle: schedule.cycle,
        target_instant: schedule.target_instant,
        remaining: Remaining::from_seconds(seconds_to_target),
        seconds_to_target,
        armed: schedule.armed,
    })
}

/// Current wheel state as the UI should draw it at this block time.
/// The winner stays hidden until the spin is resolved.
pub fn query_spin(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let schedule = SCHEDULE.load(deps.storage)?;
    let spin = SPIN.load(deps.storage)?;
    let resolved = spin.phase == SpinPhase::Resolved;

    let response = match spin.session {
        Some(session) => SpinResponse {
            cycle: schedule.cycle,
            phase: spin.phase,
            spin_magnitude: Some(session.spin_magnitude),
            rest_angle: Some(rest_angle(session.spin_magnitude)),
            rotation: rotation_at(
                session.spin_magnitude,
                session.started_at,
                session.duration_seconds,
                env.block.time,
            ),
            entry_count: session.entry_count,
            started_at: Some(session.started_at),
            resolves_at: Some(session.resolves_at),
            winner: resolved.then_some(session.winner),
            winner_index: resolved.then_some(session.winner_index),
            prize_amount: config.prize_amount,
            prize_denom: config.prize_denom,
        },
        None => SpinResponse {
            cycle: schedule.cycle,
            phase: spin.phase,
            spin_magnitude: None,
            rest_angle: None,
            rotation: Decimal::zero(),
            entry_count: 0,
            started_at: None,
            resolves_at: None,
            winner: None,
            winner_index: None,
            prize_amount: config.prize_amount,
            prize_denom: config.prize_denom,
        },
    };

    to_json_binary(&response)
}

pub fn query_cycle(deps: Deps) -> StdResult<Binary> {
    let schedule = SCHEDULE.load(deps.storage)?;
    let spin = SPIN.load(deps.storage)?;
    to_json_binary(&CycleInfo {
        cycle: schedule.cycle,
        phase: spin.phase,
    })
}

pub fn query_draw(deps: Deps, cycle: u64) -> StdResult<Binary> {
    let draw = DRAWS.may_load(deps.storage, cycle)?;
    to_json_binary(&draw)
}

pub fn query_draw_history(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let draws = DRAWS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|r| r.map(|(_, draw)| draw))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&DrawHistoryResponse { draws })
}
