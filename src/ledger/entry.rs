use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Label used when an income is recorded without a source.
pub const DEFAULT_INCOME_SOURCE: &str = "Penghasilan";
/// Label used when an expense is recorded without a category.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "Pengeluaran";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Tag prefixed to generated entry ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            EntryKind::Income => "inc",
            EntryKind::Expense => "exp",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            EntryKind::Income => DEFAULT_INCOME_SOURCE,
            EntryKind::Expense => DEFAULT_EXPENSE_CATEGORY,
        }
    }

    /// `+` for money coming in, `-` for money going out.
    pub fn sign(self) -> char {
        match self {
            EntryKind::Income => '+',
            EntryKind::Expense => '-',
        }
    }

    pub fn make_id(self, created_at: i64) -> String {
        format!("{}_{}", self.id_prefix(), created_at)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Income => f.write_str("income"),
            EntryKind::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "inc" => Ok(EntryKind::Income),
            "expense" | "exp" => Ok(EntryKind::Expense),
            other => Err(format!("unknown transaction kind `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    pub id: String,
    pub amount: u64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub created_at: i64,
}

impl IncomeEntry {
    pub fn new(amount: u64, source: &str, date: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: EntryKind::Income.make_id(created_at),
            amount,
            source: label_or_default(source, DEFAULT_INCOME_SOURCE),
            date: date.into(),
            created_at,
        }
    }

    pub fn label(&self) -> &str {
        display_label(&self.source, DEFAULT_INCOME_SOURCE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseEntry {
    pub id: String,
    pub amount: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub created_at: i64,
}

impl ExpenseEntry {
    pub fn new(amount: u64, category: &str, date: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: EntryKind::Expense.make_id(created_at),
            amount,
            category: label_or_default(category, DEFAULT_EXPENSE_CATEGORY),
            date: date.into(),
            created_at,
        }
    }

    pub fn label(&self) -> &str {
        display_label(&self.category, DEFAULT_EXPENSE_CATEGORY)
    }
}

fn label_or_default(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn display_label<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
