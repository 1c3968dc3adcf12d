//! Integration tests for the Lucky Wheel draw.
//!
//! The draw engine and the entry ledger each run against their own
//! `cosmwasm_std::testing` mocks. Cross-contract queries are answered by
//! handlers installed with `MockQuerier::update_wasm`, rebuilt from the other
//! contract's state before every call (see [`Wheel::sync`]).
//!
//! Run:
//! ```bash
//! cargo test -p lucky-wheel-integration-tests
//! ```

use std::collections::BTreeMap;

use cosmwasm_std::testing::{
    message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage,
};
use cosmwasm_std::{
    from_json, to_json_binary, ContractResult, Env, OwnedDeps, Response, SystemError,
    SystemResult, Timestamp, Uint128, WasmQuery,
};
use lucky_wheel_common::countdown::WEEK_SECONDS;
use lucky_wheel_common::selection::{rest_angle, select_winner_index};
use lucky_wheel_common::types::{CycleInfo, Entry, SpinPhase};

use lucky_wheel_draw_engine::msg as engine_msg;
use lucky_wheel_entry_ledger::msg as ledger_msg;

// ─── Constants ───

/// 2024-06-01T00:00:00Z, a Saturday
const SATURDAY_MIDNIGHT: u64 = 1_717_200_000;
/// Default draw slot: Saturday 20:00 UTC
const SATURDAY_DRAW: u64 = SATURDAY_MIDNIGHT + 20 * 3600;

type TestDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

// ─── Helpers ───

fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env.block.height = seconds;
    env
}

fn has_event(res: &Response, ty: &str) -> bool {
    res.events.iter().any(|e| e.ty == ty)
}

fn event_attr(res: &Response, ty: &str, key: &str) -> Option<String> {
    res.events
        .iter()
        .find(|e| e.ty == ty)
        .and_then(|e| e.attributes.iter().find(|a| a.key == key))
        .map(|a| a.value.clone())
}

/// Both contracts, each with its own storage and querier.
struct Wheel {
    engine: TestDeps,
    ledger: TestDeps,
}

impl Wheel {
    fn new() -> Self {
        let mut engine = mock_dependencies();
        let mut ledger = mock_dependencies();

        let admin = engine.api.addr_make("admin");
        let operator = engine.api.addr_make("operator");
        let engine_addr = engine.api.addr_make("draw_engine").to_string();
        let ledger_addr = engine.api.addr_make("entry_ledger").to_string();

        lucky_wheel_entry_ledger::contract::instantiate(
            ledger.as_mut(),
            env_at(SATURDAY_MIDNIGHT),
            message_info(&admin, &[]),
            ledger_msg::InstantiateMsg {
                operator: operator.to_string(),
                draw_engine: Some(engine_addr),
                max_entries_per_participant: None,
            },
        )
        .unwrap();

        lucky_wheel_draw_engine::contract::instantiate(
            engine.as_mut(),
            env_at(SATURDAY_MIDNIGHT + 10 * 3600),
            message_info(&admin, &[]),
            engine_msg::InstantiateMsg {
                operator: operator.to_string(),
                entry_ledger: ledger_addr,
                draw_weekday: None,
                draw_hour: None,
                draw_minute: None,
                utc_offset_seconds: None,
                spin_duration_seconds: None,
                prize_amount: Uint128::new(100_000),
                prize_denom: "kz".to_string(),
            },
        )
        .unwrap();

        let mut wheel = Wheel { engine, ledger };
        wheel.sync();
        wheel
    }

    /// Point each querier at a snapshot of the other contract's state.
    fn sync(&mut self) {
        let info = self.engine_cycle();
        self.ledger.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { .. } => {
                SystemResult::Ok(ContractResult::Ok(to_json_binary(&info).unwrap()))
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "non-smart wasm query".to_string(),
            }),
        });

        let mut books: BTreeMap<u64, Vec<Entry>> = BTreeMap::new();
        let info = self.engine_cycle();
        for cycle in info.cycle..=info.cycle + 1 {
            books.insert(cycle, self.ledger_entries(cycle));
        }
        self.engine.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { msg, .. } => {
                let book = |cycle: u64| books.get(&cycle).cloned().unwrap_or_default();
                let response = match from_json::<engine_msg::LedgerQueryMsg>(msg).unwrap() {
                    engine_msg::LedgerQueryMsg::EntryCount { cycle } => {
                        to_json_binary(&(book(cycle).len() as u32))
                    }
                    engine_msg::LedgerQueryMsg::Entry { cycle, index } => {
                        to_json_binary(&book(cycle).get(index as usize).cloned())
                    }
                };
                SystemResult::Ok(ContractResult::Ok(response.unwrap()))
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "non-smart wasm query".to_string(),
            }),
        });
    }

    fn engine_cycle(&self) -> CycleInfo {
        from_json(
            lucky_wheel_draw_engine::contract::query(
                self.engine.as_ref(),
                mock_env(),
                engine_msg::QueryMsg::Cycle {},
            )
            .unwrap(),
        )
        .unwrap()
    }

    fn ledger_entries(&self, cycle: u64) -> Vec<Entry> {
        let page: ledger_msg::EntriesResponse = from_json(
            lucky_wheel_entry_ledger::contract::query(
                self.ledger.as_ref(),
                mock_env(),
                ledger_msg::QueryMsg::Entries {
                    cycle,
                    start_after: None,
                    limit: Some(200),
                },
            )
            .unwrap(),
        )
        .unwrap();
        page.entries.into_iter().map(|e| e.entry).collect()
    }

    fn buy(&mut self, seconds: u64, participant_id: &str, display_name: &str) -> Response {
        self.sync();
        let operator = self.ledger.api.addr_make("operator");
        let res = lucky_wheel_entry_ledger::contract::execute(
            self.ledger.as_mut(),
            env_at(seconds),
            message_info(&operator, &[]),
            ledger_msg::ExecuteMsg::RecordEntry {
                participant_id: participant_id.to_string(),
                display_name: display_name.to_string(),
            },
        )
        .unwrap();
        self.sync();
        res
    }

    fn tick(&mut self, seconds: u64) -> Response {
        self.sync();
        let operator = self.engine.api.addr_make("operator");
        let res = lucky_wheel_draw_engine::contract::execute(
            self.engine.as_mut(),
            env_at(seconds),
            message_info(&operator, &[]),
            engine_msg::ExecuteMsg::Tick {},
        )
        .unwrap();
        self.sync();
        res
    }

    fn dismiss(&mut self, seconds: u64) -> Response {
        let operator = self.engine.api.addr_make("operator");
        let res = lucky_wheel_draw_engine::contract::execute(
            self.engine.as_mut(),
            env_at(seconds),
            message_info(&operator, &[]),
            engine_msg::ExecuteMsg::Dismiss {},
        )
        .unwrap();
        self.sync();
        res
    }

    fn spin(&self, seconds: u64) -> engine_msg::SpinResponse {
        from_json(
            lucky_wheel_draw_engine::contract::query(
                self.engine.as_ref(),
                env_at(seconds),
                engine_msg::QueryMsg::Spin {},
            )
            .unwrap(),
        )
        .unwrap()
    }

    fn draw_history(&self) -> Vec<lucky_wheel_draw_engine::state::DrawRecord> {
        let res: engine_msg::DrawHistoryResponse = from_json(
            lucky_wheel_draw_engine::contract::query(
                self.engine.as_ref(),
                mock_env(),
                engine_msg::QueryMsg::DrawHistory {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap(),
        )
        .unwrap();
        res.draws
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_weekly_draw_end_to_end() {
    let mut wheel = Wheel::new();

    // 1. Entries bought during the week land in cycle 0
    for (i, (id, name)) in [("user-ana", "Ana"), ("user-bruno", "Bruno"), ("user-carla", "Carla")]
        .iter()
        .enumerate()
    {
        let res = wheel.buy(SATURDAY_MIDNIGHT + 11 * 3600 + i as u64, id, name);
        assert_eq!(event_attr(&res, "wheel_entry_recorded", "cycle").unwrap(), "0");
    }

    // 2. Countdown sees the live entry count
    let res = wheel.tick(SATURDAY_DRAW - 10);
    assert_eq!(
        event_attr(&res, "wheel_countdown_tick", "seconds_to_target").unwrap(),
        "10"
    );
    assert_eq!(
        event_attr(&res, "wheel_countdown_tick", "entry_count").unwrap(),
        "3"
    );

    // 3. Zero: the draw starts over a snapshot of 3 entries
    let res = wheel.tick(SATURDAY_DRAW);
    assert!(has_event(&res, "wheel_draw_armed"));
    assert!(has_event(&res, "wheel_spin_started"));
    let spinning = wheel.spin(SATURDAY_DRAW + 2);
    assert_eq!(spinning.phase, SpinPhase::Spinning);
    assert_eq!(spinning.entry_count, 3);
    assert!(spinning.winner.is_none());

    // 4. A purchase during the spin goes to next week
    let res = wheel.buy(SATURDAY_DRAW + 3, "user-dino", "Dino");
    assert_eq!(event_attr(&res, "wheel_entry_recorded", "cycle").unwrap(), "1");
    assert_eq!(wheel.ledger_entries(0).len(), 3);

    // 5. Resolve after the spin duration; winner comes from the cycle 0 ledger
    let res = wheel.tick(SATURDAY_DRAW + 7);
    assert!(has_event(&res, "wheel_draw_resolved"));

    let resolved = wheel.spin(SATURDAY_DRAW + 8);
    assert_eq!(resolved.phase, SpinPhase::Resolved);
    let magnitude = resolved.spin_magnitude.unwrap();
    let index = select_winner_index(3, magnitude).unwrap();
    assert_eq!(resolved.winner_index, Some(index));
    assert_eq!(
        resolved.winner.as_ref(),
        wheel.ledger_entries(0).get(index as usize)
    );
    assert_eq!(resolved.rest_angle, Some(rest_angle(magnitude)));
    assert_eq!(resolved.prize_amount, Uint128::new(100_000));

    // 6. Still resolved: new purchases keep going to cycle 1
    let res = wheel.buy(SATURDAY_DRAW + 20, "user-eva", "Eva");
    assert_eq!(event_attr(&res, "wheel_entry_recorded", "cycle").unwrap(), "1");

    // 7. Dismiss opens cycle 1 with both late entries already in it
    let res = wheel.dismiss(SATURDAY_DRAW + 30);
    assert!(has_event(&res, "wheel_dismissed"));
    assert_eq!(
        wheel.engine_cycle(),
        CycleInfo {
            cycle: 1,
            phase: SpinPhase::Idle
        }
    );
    let open: u64 = from_json(
        lucky_wheel_entry_ledger::contract::query(
            wheel.ledger.as_ref(),
            mock_env(),
            ledger_msg::QueryMsg::OpenCycle {},
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(open, 1);

    // 8. Next week's draw runs over exactly those two entries
    let res = wheel.tick(SATURDAY_DRAW + WEEK_SECONDS - 1);
    assert!(!has_event(&res, "wheel_spin_started"));
    let res = wheel.tick(SATURDAY_DRAW + WEEK_SECONDS);
    assert!(has_event(&res, "wheel_spin_started"));
    wheel.tick(SATURDAY_DRAW + WEEK_SECONDS + 7);

    let history = wheel.draw_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].cycle, 0);
    assert_eq!(history[1].cycle, 1);
    assert_eq!(history[0].entry_count, 3);
    assert_eq!(history[1].entry_count, 2);
    assert!(wheel.ledger_entries(1).contains(&history[1].winner));
    assert_eq!(
        history[1].target_instant,
        Timestamp::from_seconds(SATURDAY_DRAW + WEEK_SECONDS)
    );
}

#[test]
fn test_empty_week_waits_for_first_entry() {
    let mut wheel = Wheel::new();

    let res = wheel.tick(SATURDAY_DRAW);
    assert!(has_event(&res, "wheel_draw_armed"));
    assert!(has_event(&res, "wheel_trigger_deferred"));
    assert_eq!(wheel.spin(SATURDAY_DRAW).phase, SpinPhase::Idle);

    // Engine is still Idle, so the entry belongs to the armed draw
    let res = wheel.buy(SATURDAY_DRAW + 60, "user-ana", "Ana");
    assert_eq!(event_attr(&res, "wheel_entry_recorded", "cycle").unwrap(), "0");

    let res = wheel.tick(SATURDAY_DRAW + 61);
    assert!(has_event(&res, "wheel_spin_started"));
    wheel.tick(SATURDAY_DRAW + 68);

    let resolved = wheel.spin(SATURDAY_DRAW + 68);
    assert_eq!(resolved.phase, SpinPhase::Resolved);
    assert_eq!(resolved.winner_index, Some(0));
    assert_eq!(resolved.winner.unwrap().display_name, "Ana");
}

#[test]
fn test_entry_limit_resets_each_week() {
    let mut wheel = Wheel::new();

    wheel.buy(SATURDAY_MIDNIGHT + 3600, "user-ana", "Ana");
    wheel.buy(SATURDAY_MIDNIGHT + 3601, "user-ana", "Ana");

    wheel.sync();
    let operator = wheel.ledger.api.addr_make("operator");
    let err = lucky_wheel_entry_ledger::contract::execute(
        wheel.ledger.as_mut(),
        env_at(SATURDAY_MIDNIGHT + 3602),
        message_info(&operator, &[]),
        ledger_msg::ExecuteMsg::RecordEntry {
            participant_id: "user-ana".to_string(),
            display_name: "Ana".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        lucky_wheel_entry_ledger::ContractError::EntryLimitReached { max: 2, .. }
    ));

    // Once the draw is running, the allowance for next week is fresh
    wheel.tick(SATURDAY_DRAW);
    let res = wheel.buy(SATURDAY_DRAW + 1, "user-ana", "Ana");
    assert_eq!(event_attr(&res, "wheel_entry_recorded", "cycle").unwrap(), "1");
    assert_eq!(
        event_attr(&res, "wheel_entry_recorded", "participant_entries").unwrap(),
        "1"
    );
}
