use cosmwasm_std::{
    DepsMut, Env, Event, MessageInfo, QuerierWrapper, Response, Storage, Timestamp,
};
use lucky_wheel_common::countdown::{advance_past, next_draw_instant, seconds_until};
use lucky_wheel_common::selection::{
    rest_angle, select_winner_index, spin_magnitude_from_seed, spin_seed,
};
use lucky_wheel_common::types::{DrawTime, Entry, Remaining, SpinPhase};

use crate::error::ContractError;
use crate::msg::{LedgerQueryMsg, UpdateConfigParams};
use crate::state::{
    DrawRecord, DrawSchedule, EngineConfig, SpinSession, SpinState, CONFIG, DRAWS, SCHEDULE, SPIN,
};

pub const DEFAULT_SPIN_DURATION_SECONDS: u64 = 7;
pub const MIN_SPIN_DURATION_SECONDS: u64 = 1;
pub const MAX_SPIN_DURATION_SECONDS: u64 = 60;
/// UTC-14 .. UTC+14
pub const MAX_UTC_OFFSET_SECONDS: i32 = 14 * 3600;

pub fn validate_draw_time(draw_time: &DrawTime) -> Result<(), ContractError> {
    if draw_time.hour >= 24 || draw_time.minute >= 60 {
        return Err(ContractError::InvalidDrawTime {
            hour: draw_time.hour,
            minute: draw_time.minute,
        });
    }
    if draw_time.utc_offset_seconds.abs() > MAX_UTC_OFFSET_SECONDS {
        return Err(ContractError::InvalidUtcOffset {
            seconds: draw_time.utc_offset_seconds,
            max: MAX_UTC_OFFSET_SECONDS,
        });
    }
    Ok(())
}

pub fn validate_spin_duration(seconds: u64) -> Result<(), ContractError> {
    if !(MIN_SPIN_DURATION_SECONDS..=MAX_SPIN_DURATION_SECONDS).contains(&seconds) {
        return Err(ContractError::InvalidSpinDuration {
            seconds,
            min: MIN_SPIN_DURATION_SECONDS,
            max: MAX_SPIN_DURATION_SECONDS,
        });
    }
    Ok(())
}

pub fn validate_prize_denom(denom: &str) -> Result<(), ContractError> {
    if denom.trim().is_empty() {
        return Err(ContractError::EmptyPrizeDenom);
    }
    Ok(())
}

/// Periodic clock tick. Operator only.
///
/// In order:
/// 1. settle a spin whose duration has elapsed (Spinning -> Resolved)
/// 2. report the countdown
/// 3. once the countdown is at zero, arm the schedule and, if the wheel is
///    idle and the ledger has entries, start the spin
///
/// The target instant is stored rather than recomputed, so the countdown
/// stays at zero for every tick until dismissal. The trigger is guarded by
/// the spin phase, which makes it fire once per draw no matter how many
/// ticks land on zero. An empty ledger leaves the wheel idle and the next
/// tick tries again.
pub fn tick(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.operator {
        return Err(ContractError::Unauthorized {
            reason: "only operator can tick the draw clock".to_string(),
        });
    }

    let now = env.block.time;
    let mut schedule = SCHEDULE.load(deps.storage)?;
    let mut spin = SPIN.load(deps.storage)?;

    let mut response = Response::new()
        .add_attribute("action", "tick")
        .add_attribute("cycle", schedule.cycle.to_string());

    if spin.phase == SpinPhase::Spinning {
        if let Some(event) = settle_spin(deps.storage, &config, &schedule, &mut spin, now)? {
            response = response
                .add_attribute("resolved", "true")
                .add_event(event);
        }
    }

    let entry_count = query_entry_count(&deps.querier, &config, schedule.cycle)?;
    let seconds_to_target = seconds_until(now, schedule.target_instant);
    let remaining = Remaining::from_seconds(seconds_to_target);

    response = response.add_event(
        Event::new("wheel_countdown_tick")
            .add_attribute("cycle", schedule.cycle.to_string())
            .add_attribute("hours", remaining.hours.to_string())
            .add_attribute("minutes", remaining.minutes.to_string())
            .add_attribute("seconds", remaining.seconds.to_string())
            .add_attribute("seconds_to_target", seconds_to_target.to_string())
            .add_attribute("target_instant", schedule.target_instant.seconds().to_string())
            .add_attribute("entry_count", entry_count.to_string())
            .add_attribute("phase", spin.phase.as_str()),
    );

    if seconds_to_target == 0 {
        if !schedule.armed {
            schedule.armed = true;
            response = response.add_event(
                Event::new("wheel_draw_armed")
                    .add_attribute("cycle", schedule.cycle.to_string())
                    .add_attribute("target_instant", schedule.target_instant.seconds().to_string())
                    .add_attribute("timestamp", now.seconds().to_string()),
            );
        }

        // Spinning or Resolved: this draw already fired
        if spin.phase == SpinPhase::Idle {
            match start_spin(&deps.querier, &env, &config, &schedule, entry_count)? {
                Some(session) => {
                    response = response
                        .add_attribute("trigger", "spin_started")
                        .add_event(spin_started_event(&schedule, &session));
                    spin = SpinState {
                        phase: SpinPhase::Spinning,
                        session: Some(session),
                        resolved_at: None,
                    };
                }
                None => {
                    response = response.add_attribute("trigger", "deferred").add_event(
                        Event::new("wheel_trigger_deferred")
                            .add_attribute("cycle", schedule.cycle.to_string())
                            .add_attribute("reason", "empty_ledger")
                            .add_attribute("timestamp", now.seconds().to_string()),
                    );
                }
            }
        }
    }

    SCHEDULE.save(deps.storage, &schedule)?;
    SPIN.save(deps.storage, &spin)?;

    Ok(response)
}

/// Start a spin for the current cycle, or `None` when there is nothing to draw from.
///
/// The magnitude is drawn once here and never again for this session. The
/// winner is picked from the ledger as it stands now; entries recorded after
/// this point are outside `entry_count` and cannot move the result.
fn start_spin(
    querier: &QuerierWrapper,
    env: &Env,
    config: &EngineConfig,
    schedule: &DrawSchedule,
    entry_count: u32,
) -> Result<Option<SpinSession>, ContractError> {
    let seed = spin_seed(
        env.contract.address.as_str(),
        schedule.cycle,
        env.block.height,
        env.block.time.nanos(),
        env.transaction.as_ref().map(|tx| tx.index),
        entry_count,
    );
    let spin_magnitude = spin_magnitude_from_seed(&seed);

    // Empty wheel: nothing to draw yet
    let Some(winner_index) = select_winner_index(entry_count, spin_magnitude) else {
        return Ok(None);
    };

    let winner: Option<Entry> = querier.query_wasm_smart(
        &config.entry_ledger,
        &LedgerQueryMsg::Entry {
            cycle: schedule.cycle,
            index: winner_index,
        },
    )?;
    let winner = winner.ok_or(ContractError::EntryMissing {
        cycle: schedule.cycle,
        index: winner_index,
    })?;

    let started_at = env.block.time;
    Ok(Some(SpinSession {
        spin_magnitude,
        spin_seed: hex::encode(seed),
        entry_count,
        winner_index,
        winner,
        started_at,
        duration_seconds: config.spin_duration_seconds,
        resolves_at: started_at.plus_seconds(config.spin_duration_seconds),
    }))
}

/// Move a spin whose time is up to Resolved and record the draw.
/// Returns the announcement event, or `None` while the wheel is still turning.
fn settle_spin(
    storage: &mut dyn Storage,
    config: &EngineConfig,
    schedule: &DrawSchedule,
    spin: &mut SpinState,
    now: Timestamp,
) -> Result<Option<Event>, ContractError> {
    let Some(session) = spin.session.as_ref() else {
        return Ok(None);
    };
    if now < session.resolves_at {
        return Ok(None);
    }

    let record = DrawRecord {
        cycle: schedule.cycle,
        target_instant: schedule.target_instant,
        winner: session.winner.clone(),
        winner_index: session.winner_index,
        entry_count: session.entry_count,
        spin_magnitude: session.spin_magnitude,
        spin_seed: session.spin_seed.clone(),
        prize_amount: config.prize_amount,
        prize_denom: config.prize_denom.clone(),
        started_at: session.started_at,
        resolved_at: now,
    };
    DRAWS.save(storage, schedule.cycle, &record)?;

    spin.phase = SpinPhase::Resolved;
    spin.resolved_at = Some(now);

    Ok(Some(
        Event::new("wheel_draw_resolved")
            .add_attribute("cycle", record.cycle.to_string())
            .add_attribute("winner", record.winner.display_name.clone())
            .add_attribute("participant_id", record.winner.participant_id.clone())
            .add_attribute("winner_index", record.winner_index.to_string())
            .add_attribute("entry_count", record.entry_count.to_string())
            .add_attribute("prize_amount", record.prize_amount.to_string())
            .add_attribute("prize_denom", record.prize_denom.clone())
            .add_attribute("spin_magnitude", record.spin_magnitude.to_string())
            .add_attribute("spin_seed", record.spin_seed.clone())
            .add_attribute("timestamp", now.seconds().to_string()),
    ))
}

fn spin_started_event(schedule: &DrawSchedule, session: &SpinSession) -> Event {
    Event::new("wheel_spin_started")
        .add_attribute("cycle", schedule.cycle.to_string())
        .add_attribute("entry_count", session.entry_count.to_string())
        .add_attribute("spin_magnitude", session.spin_magnitude.to_string())
        .add_attribute("rest_angle", rest_angle(session.spin_magnitude).to_string())
        .add_attribute("spin_seed", session.spin_seed.clone())
        .add_attribute("started_at", session.started_at.seconds().to_string())
        .add_attribute("resolves_at", session.resolves_at.seconds().to_string())
}

fn query_entry_count(
    querier: &QuerierWrapper,
    config: &EngineConfig,
    cycle: u64,
) -> Result<u32, ContractError> {
    let count: u32 =
        querier.query_wasm_smart(&config.entry_ledger, &LedgerQueryMsg::EntryCount { cycle })?;
    Ok(count)
}

/// Dismiss a resolved draw. Operator or admin.
///
/// Returns the wheel to Idle, disarms the schedule, opens the next cycle and
/// moves the target to the following week's slot.
pub fn dismiss(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.operator && info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only operator or admin can dismiss a draw".to_string(),
        });
    }

    let spin = SPIN.load(deps.storage)?;
    if spin.phase != SpinPhase::Resolved {
        return Err(ContractError::NothingToDismiss {
            phase: spin.phase.as_str().to_string(),
        });
    }

    let mut schedule = SCHEDULE.load(deps.storage)?;
    let closed_cycle = schedule.cycle;
    schedule.cycle += 1;
    schedule.armed = false;
    schedule.target_instant = advance_past(schedule.target_instant, env.block.time);

    SCHEDULE.save(deps.storage, &schedule)?;
    SPIN.save(deps.storage, &SpinState::idle())?;

    Ok(Response::new()
        .add_attribute("action", "dismiss")
        .add_attribute("cycle", closed_cycle.to_string())
        .add_event(
            Event::new("wheel_dismissed")
                .add_attribute("closed_cycle", closed_cycle.to_string())
                .add_attribute("next_cycle", schedule.cycle.to_string())
                .add_attribute("next_target", schedule.target_instant.seconds().to_string())
                .add_attribute("dismissed_by", info.sender.to_string()),
        ))
}

/// Update configuration. Admin only.
///
/// Schedule fields can only change while the wheel is idle and the
/// countdown is not armed. The new target is the first occurrence of the new
/// slot at or after the current one, so the target never moves backwards.
/// The entry ledger can only be swapped while no spin is running or waiting
/// to be dismissed.
pub fn update_config(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: UpdateConfigParams,
) -> Result<Response, ContractError> {
    let UpdateConfigParams {
        operator,
        entry_ledger,
        draw_weekday,
        draw_hour,
        draw_minute,
        utc_offset_seconds,
        spin_duration_seconds,
        prize_amount,
        prize_denom,
    } = params;

    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(op) = operator {
        config.operator = deps.api.addr_validate(&op)?;
    }
    if let Some(ledger) = entry_ledger {
        let spin = SPIN.load(deps.storage)?;
        if spin.phase != SpinPhase::Idle {
            return Err(ContractError::LedgerLocked {
                phase: spin.phase.as_str().to_string(),
            });
        }
        config.entry_ledger = deps.api.addr_validate(&ledger)?;
    }
    if let Some(seconds) = spin_duration_seconds {
        validate_spin_duration(seconds)?;
        config.spin_duration_seconds = seconds;
    }
    if let Some(amount) = prize_amount {
        config.prize_amount = amount;
    }
    if let Some(denom) = prize_denom {
        validate_prize_denom(&denom)?;
        config.prize_denom = denom;
    }

    let reschedule = draw_weekday.is_some()
        || draw_hour.is_some()
        || draw_minute.is_some()
        || utc_offset_seconds.is_some();

    let mut response = Response::new().add_attribute("action", "update_config");

    if reschedule {
        let spin = SPIN.load(deps.storage)?;
        let mut schedule = SCHEDULE.load(deps.storage)?;
        if spin.phase != SpinPhase::Idle || schedule.armed {
            return Err(ContractError::ScheduleLocked);
        }

        let draw_time = DrawTime {
            weekday: draw_weekday.unwrap_or(config.draw_time.weekday),
            hour: draw_hour.unwrap_or(config.draw_time.hour),
            minute: draw_minute.unwrap_or(config.draw_time.minute),
            utc_offset_seconds: utc_offset_seconds.unwrap_or(config.draw_time.utc_offset_seconds),
        };
        validate_draw_time(&draw_time)?;

        let from = schedule.target_instant.max(env.block.time);
        schedule.target_instant = next_draw_instant(from, &draw_time);
        SCHEDULE.save(deps.storage, &schedule)?;
        config.draw_time = draw_time;

        response = response.add_attribute(
            "target_instant",
            schedule.target_instant.seconds().to_string(),
        );
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(response.add_event(
        Event::new("wheel_config_updated")
            .add_attribute("operator", config.operator.to_string())
            .add_attribute("entry_ledger", config.entry_ledger.to_string())
            .add_attribute("draw_weekday", config.draw_time.weekday.as_str())
            .add_attribute("draw_hour", config.draw_time.hour.to_string())
            .add_attribute("draw_minute", config.draw_time.minute.to_string())
            .add_attribute(
                "utc_offset_seconds",
                config.draw_time.utc_offset_seconds.to_string(),
            )
            .add_attribute(
                "spin_duration_seconds",
                config.spin_duration_seconds.to_string(),
            )
            .add_attribute("prize_amount", config.prize_amount.to_string())
            .add_attribute("prize_denom", config.prize_denom.clone()),
    ))
}
