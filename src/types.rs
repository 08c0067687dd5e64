//! Core types and data structures for the installment ledger

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Direction of money movement for a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money received into the account (e.g., loan principal)
    CashIn,
    /// Money paid out of the account (e.g., an installment settlement)
    CashOut,
}

/// Account grouping used for display and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountCategory {
    Checking,
    Savings,
    Credit,
    Cash,
}

/// How often installment settlements fall due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Parse a frequency from its lowercase name
    pub fn parse(value: &str) -> PlannerResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(PlannerError::InvalidFrequency(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::parse(s)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured installment metadata carried on a CASH_IN entry
///
/// Persisting the terms as explicit fields keeps the per-period amount
/// recoverable without pattern-matching the entry description. The annotated
/// description is still written for display and remains a legacy fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentTerms {
    /// Number of settlement periods the lump sum is split into
    pub period_count: u32,
    /// Amount due each period (total / period_count, exact decimal)
    pub per_period_amount: BigDecimal,
    /// Settlement cadence
    pub frequency: Frequency,
}

/// Immutable ledger entry
///
/// `amount` is a non-negative magnitude; the economic sign derives entirely
/// from `kind`. Edits are modeled as delete-and-recreate, never in-place
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for the entry
    pub id: String,
    /// Owning user
    pub owner_id: String,
    /// Non-negative magnitude of the movement
    pub amount: BigDecimal,
    /// Free-text description
    pub description: String,
    /// Free-text category label
    pub category: String,
    /// Stable identifier of the account this entry belongs to
    pub account_id: String,
    /// Economic date of the transaction, independent of creation time
    pub date: NaiveDate,
    /// Direction of the movement
    pub kind: EntryKind,
    /// Installment terms, present on CASH_IN entries created by the planner
    pub installment: Option<InstallmentTerms>,
    /// Creation timestamp, used only for ordering
    pub created_at: NaiveDateTime,
}

impl LedgerEntry {
    /// Promote a draft to a persistable entry with a fresh id and timestamp
    pub fn from_draft(draft: EntryDraft, owner_id: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
            account_id: draft.account_id,
            date: draft.date,
            kind: draft.kind,
            installment: draft.installment,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Amount with its economic sign applied: cash-out positive, cash-in
    /// negative, so a positive account balance means outstanding principal
    pub fn signed_amount(&self) -> BigDecimal {
        match self.kind {
            EntryKind::CashOut => self.amount.clone(),
            EntryKind::CashIn => -self.amount.clone(),
        }
    }
}

/// In-memory, not-yet-persisted ledger entry produced by planning operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub amount: BigDecimal,
    pub description: String,
    pub category: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub installment: Option<InstallmentTerms>,
}

impl EntryDraft {
    /// Create a draft with no installment metadata
    pub fn new(
        account_id: String,
        amount: BigDecimal,
        kind: EntryKind,
        date: NaiveDate,
        description: String,
        category: String,
    ) -> Self {
        Self {
            amount,
            description,
            category,
            account_id,
            date,
            kind,
            installment: None,
        }
    }
}

/// Account record
///
/// Entries reference accounts by `id`; `name` is denormalized display data
/// and may be changed by a rename without touching entry history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Stable unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Account grouping
    pub category: AccountCategory,
    /// Whether the account settles a lump-sum cash-in through scheduled
    /// installment payments
    pub is_installment: bool,
    /// When the account was created
    pub created_at: NaiveDateTime,
    /// When the account was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a new account with a generated id
    pub fn new(name: String, category: AccountCategory, is_installment: bool) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            category,
            is_installment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One candidate due date in a generated installment schedule
///
/// `due_date` is the machine-comparable key (date-only precision); `label`
/// is a human-readable rendering and never participates in comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub due_date: NaiveDate,
    pub label: String,
}

/// Derived view of an installment account, computed on demand and discarded
/// after each use, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    /// Account the plan was derived for
    pub account_id: String,
    /// Cadence the schedule was generated with
    pub frequency: Frequency,
    /// Current derived balance (cash-out minus cash-in)
    pub balance: BigDecimal,
    /// Principal of the latest cash-in entry, if any
    pub total_amount: Option<BigDecimal>,
    /// Per-period amount recovered from the latest cash-in entry, if any
    pub per_period_amount: Option<BigDecimal>,
    /// Schedule slots not yet covered by an existing settlement
    pub open_slots: Vec<ScheduleSlot>,
}

/// Per-account cash totals alongside the derived balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: String,
    pub total_in: BigDecimal,
    pub total_out: BigDecimal,
    pub balance: BigDecimal,
}

/// Errors that can occur in planning and persistence operations
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid period count: {0}")]
    InvalidPeriodCount(String),
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
    #[error("No schedule slots selected")]
    EmptySelection,
    #[error("Slot {0} is already settled for this account")]
    DuplicateSettlement(NaiveDate),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Entry not found: {0}")]
    EntryNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
