//! Traits for storage abstraction and extensibility

use async_trait::async_trait;

use crate::types::*;
use crate::utils::validation::validate_non_negative_amount;

/// Persistent append-only store of ledger entries
///
/// The core never talks to the network itself; it consumes and produces
/// in-memory values and leaves persistence to an implementation of this
/// trait (remote document store, SQL database, in-memory, etc.).
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// List all entries for an account, ordered by creation time descending.
    /// Ordering must be stable across calls within one planning session.
    async fn list(&self, account_id: &str) -> PlannerResult<Vec<LedgerEntry>>;

    /// Append a single entry
    async fn append(&mut self, entry: &LedgerEntry) -> PlannerResult<()>;

    /// Append a batch of entries with all-or-nothing semantics: either every
    /// entry is persisted or none is
    async fn append_batch(&mut self, entries: &[LedgerEntry]) -> PlannerResult<()>;

    /// Remove an entry by id
    async fn remove(&mut self, entry_id: &str) -> PlannerResult<()>;
}

/// Registry of accounts keyed by stable identifier
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    /// Get an account by id
    async fn get(&self, account_id: &str) -> PlannerResult<Option<Account>>;

    /// Look an account up by its display name
    async fn find_by_name(&self, name: &str) -> PlannerResult<Option<Account>>;

    /// Create or update an account
    async fn save(&mut self, account: &Account) -> PlannerResult<()>;

    /// List all accounts
    async fn list_accounts(&self) -> PlannerResult<Vec<Account>>;

    /// Delete an account by id
    async fn delete(&mut self, account_id: &str) -> PlannerResult<()>;
}

/// Trait for implementing custom entry validation rules
pub trait EntryValidator: Send + Sync {
    /// Validate a draft before it is promoted and persisted
    fn validate_draft(&self, draft: &EntryDraft) -> PlannerResult<()>;
}

/// Trait for implementing custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate an account before saving
    fn validate_account(&self, account: &Account) -> PlannerResult<()>;
}

/// Default entry validator with basic rules
pub struct DefaultEntryValidator;

impl EntryValidator for DefaultEntryValidator {
    fn validate_draft(&self, draft: &EntryDraft) -> PlannerResult<()> {
        validate_non_negative_amount(&draft.amount)?;

        if draft.account_id.trim().is_empty() {
            return Err(PlannerError::Validation(
                "Entry must reference an account".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default account validator with basic rules
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_account(&self, account: &Account) -> PlannerResult<()> {
        if account.name.trim().is_empty() {
            return Err(PlannerError::Validation(
                "Account name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
