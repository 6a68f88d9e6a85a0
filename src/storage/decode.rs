use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    errors::LedgerError,
    ledger::{ExpenseEntry, IncomeEntry, LedgerState},
};

use super::{LoadReport, Result};

const SPENDING_KEYS: [&str; 2] = ["spendingBalance", "saldoPengeluaran"];
const SAVINGS_KEYS: [&str; 2] = ["savingsBalance", "saldoTabungan"];

/// Decodes a stored record field by field.
///
/// Each top-level field falls back to its default on its own, so a record with
/// one bad field still yields the valid ones. Only input that is not a JSON
/// object at all is rejected.
pub fn decode_state(raw: &str) -> Result<LoadReport> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| LedgerError::StorageCorrupt(format!("invalid JSON: {err}")))?;
    let Value::Object(object) = value else {
        return Err(LedgerError::StorageCorrupt(
            "stored record is not a JSON object".into(),
        ));
    };

    let mut warnings = Vec::new();
    let state = LedgerState {
        spending_balance: read_balance(&object, &SPENDING_KEYS, &mut warnings),
        savings_balance: read_balance(&object, &SAVINGS_KEYS, &mut warnings),
        income: read_entries::<IncomeEntry>(&object, "income", &mut warnings),
        expense: read_entries::<ExpenseEntry>(&object, "expense", &mut warnings),
    };

    Ok(LoadReport {
        state,
        warnings,
        found: true,
    })
}

fn read_balance(object: &Map<String, Value>, keys: &[&str], warnings: &mut Vec<String>) -> u64 {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| object.get(*key).map(|value| (*key, value)))
    else {
        return 0;
    };

    if let Some(balance) = value.as_u64() {
        return balance;
    }
    match value.as_f64() {
        Some(number) if number.is_finite() && number >= 0.0 => {
            warnings.push(format!("`{key}` was fractional ({number}); rounded"));
            (number + 0.5).floor() as u64
        }
        Some(number) => {
            warnings.push(format!("`{key}` was negative ({number}); reset to 0"));
            0
        }
        None => {
            warnings.push(format!("`{key}` is not a number; reset to 0"));
            0
        }
    }
}

fn read_entries<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    let Some(value) = object.get(key) else {
        return Vec::new();
    };
    let Value::Array(items) = value else {
        warnings.push(format!("`{key}` is not a list; starting empty"));
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(entry) => entries.push(entry),
            Err(err) => warnings.push(format!("skipped {key}[{idx}]: {err}")),
        }
    }
    entries
}
