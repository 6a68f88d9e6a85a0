mod common;

use std::fs;

use budget_split::{
    core::{LedgerManager, ManualClock},
    ledger::{EntryKind, LedgerState},
    storage::{JsonStorage, MemoryStorage, StorageBackend},
};
use common::{date, TestEnv, JAN_1_MILLIS};
use serde_json::Value;

#[test]
fn every_mutation_survives_a_restart() {
    let env = TestEnv::new();
    let income_id = {
        let mut manager = env.open();
        let receipt = manager
            .record_income(1_000_000, "Gaji", date(2024, 1, 1))
            .unwrap();
        env.clock.advance(10);
        manager
            .record_expense(120_000, "Makan", date(2024, 1, 2), |_| false)
            .unwrap();
        receipt.entry.id
    };

    let reopened = env.open();
    assert_eq!(reopened.state().spending_balance, 180_000);
    assert_eq!(reopened.state().savings_balance, 700_000);
    assert_eq!(reopened.state().income[0].id, income_id);
    assert_eq!(reopened.state().expense[0].category, "Makan");
    assert!(reopened.load_warnings().is_empty());
}

#[test]
fn stored_record_uses_camel_case_keys() {
    let env = TestEnv::new();
    let mut manager = env.open();
    manager.record_income(10_000, "", date(2024, 1, 5)).unwrap();

    let raw = fs::read_to_string(&env.slot).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["spendingBalance"], 3_000u64);
    assert_eq!(value["savingsBalance"], 7_000u64);
    let entry = &value["income"][0];
    assert_eq!(entry["source"], "Penghasilan");
    assert_eq!(entry["date"], "2024-01-05");
    assert_eq!(entry["createdAt"], JAN_1_MILLIS);
    assert_eq!(entry["id"], format!("inc_{JAN_1_MILLIS}"));
    assert!(value["expense"].as_array().unwrap().is_empty());
}

#[test]
fn missing_collection_loads_as_empty() {
    let env = TestEnv::new();
    fs::write(
        &env.slot,
        r#"{"spendingBalance":300,"savingsBalance":700,"income":[]}"#,
    )
    .unwrap();

    let manager = env.open();
    assert_eq!(manager.state().spending_balance, 300);
    assert_eq!(manager.state().savings_balance, 700);
    assert!(manager.state().expense.is_empty());
}

#[test]
fn legacy_balance_keys_are_understood() {
    let env = TestEnv::new();
    fs::write(
        &env.slot,
        r#"{
            "saldoPengeluaran": 45000,
            "saldoTabungan": 105000,
            "income": [{"id":"inc_1","amount":150000,"source":"Gaji","date":"2023-12-01","createdAt":1}],
            "expense": []
        }"#,
    )
    .unwrap();

    let mut manager = env.open();
    assert_eq!(manager.state().spending_balance, 45_000);
    assert_eq!(manager.state().savings_balance, 105_000);

    // The next write normalises the keys.
    manager.record_income(10, "x", date(2024, 1, 1)).unwrap();
    let raw = fs::read_to_string(&env.slot).unwrap();
    assert!(raw.contains("spendingBalance"));
    assert!(!raw.contains("saldoPengeluaran"));
}

#[test]
fn corrupt_slot_starts_empty_and_is_overwritten() {
    let env = TestEnv::new();
    fs::write(&env.slot, "{ this is not json").unwrap();

    let mut manager = env.open();
    assert_eq!(manager.state(), &LedgerState::default());
    assert_eq!(manager.load_warnings().len(), 1);

    manager.record_income(1_000, "Gaji", date(2024, 1, 1)).unwrap();
    let reopened = env.open();
    assert_eq!(reopened.state().total_income(), 1_000);
    assert!(reopened.load_warnings().is_empty());
}

#[test]
fn malformed_entries_are_dropped_with_warnings() {
    let env = TestEnv::new();
    fs::write(
        &env.slot,
        r#"{
            "spendingBalance": -50,
            "savingsBalance": 700,
            "income": [
                {"id":"inc_1","amount":1000,"source":"Gaji","date":"2024-01-01","createdAt":1},
                {"amount":"lots"}
            ],
            "expense": "nope"
        }"#,
    )
    .unwrap();

    let manager = env.open();
    assert_eq!(manager.state().spending_balance, 0);
    assert_eq!(manager.state().savings_balance, 700);
    assert_eq!(manager.state().income.len(), 1);
    assert!(manager.state().expense.is_empty());
    assert!(manager.load_warnings().len() >= 3);
}

#[test]
fn timestamps_stay_monotonic_across_restarts() {
    let env = TestEnv::new();
    {
        let mut manager = env.open();
        manager.record_income(100, "a", date(2024, 1, 1)).unwrap();
    }
    // Clock goes backwards between runs.
    env.clock.set(JAN_1_MILLIS - 60_000);

    let mut manager = env.open();
    let receipt = manager.record_income(100, "b", date(2024, 1, 1)).unwrap();
    assert_eq!(receipt.entry.created_at, JAN_1_MILLIS + 1);
    assert_eq!(manager.list_all().as_slice()[0].id, receipt.entry.id);
}

#[test]
fn unwritable_slot_keeps_working_in_memory() {
    let storage = MemoryStorage::read_only();
    let mut manager = LedgerManager::open_with_clock(
        Box::new(storage),
        Box::new(ManualClock::new(JAN_1_MILLIS)),
    );

    let receipt = manager
        .record_income(1_000_000, "Gaji", date(2024, 1, 1))
        .expect("write failures are not surfaced");
    assert!(manager.last_persist_error().is_some());
    assert_eq!(manager.state().savings_balance, 700_000);

    manager.delete_transaction(&receipt.entry.id, EntryKind::Income);
    assert_eq!(manager.state().savings_balance, 0);
}

#[test]
fn export_matches_what_storage_holds() {
    let env = TestEnv::new();
    let mut manager = env.open();
    manager.record_income(2_500, "Gaji", date(2024, 1, 1)).unwrap();

    let exported = manager.export_json().unwrap();
    let stored = fs::read_to_string(&env.slot).unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&exported).unwrap(),
        serde_json::from_str::<Value>(&stored).unwrap()
    );

    let report = JsonStorage::at_path(&env.slot).load().unwrap();
    assert_eq!(&report.state, manager.state());
}
