//! Storage-backed planner that coordinates accounts, entries, and schedules

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use tracing::debug;

use crate::planner::{drafts, ScheduleGenerator};
use crate::traits::*;
use crate::types::*;

/// Orchestrates installment planning against an entry store and an account
/// registry
///
/// All computation happens over in-memory values pulled from the
/// collaborators; the planner holds no derived state of its own, so every
/// balance and plan reflects the store at the time of the call.
pub struct InstallmentPlanner<S: EntryStore, R: AccountRegistry> {
    owner_id: String,
    store: S,
    registry: R,
    entry_validator: Box<dyn EntryValidator>,
    account_validator: Box<dyn AccountValidator>,
}

impl<S: EntryStore, R: AccountRegistry> InstallmentPlanner<S, R> {
    /// Create a planner for one owning user
    pub fn new(owner_id: impl Into<String>, store: S, registry: R) -> Self {
        Self {
            owner_id: owner_id.into(),
            store,
            registry,
            entry_validator: Box::new(DefaultEntryValidator),
            account_validator: Box::new(DefaultAccountValidator),
        }
    }

    /// Create a planner with custom validators
    pub fn with_validators(
        owner_id: impl Into<String>,
        store: S,
        registry: R,
        entry_validator: Box<dyn EntryValidator>,
        account_validator: Box<dyn AccountValidator>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            store,
            registry,
            entry_validator,
            account_validator,
        }
    }

    // Account operations

    /// Create a new account, rejecting duplicate display names
    pub async fn create_account(
        &mut self,
        name: String,
        category: AccountCategory,
        is_installment: bool,
    ) -> PlannerResult<Account> {
        let account = Account::new(name, category, is_installment);
        self.account_validator.validate_account(&account)?;

        if self.registry.find_by_name(&account.name).await?.is_some() {
            return Err(PlannerError::Validation(format!(
                "Account named '{}' already exists",
                account.name
            )));
        }

        self.registry.save(&account).await?;
        debug!(account_id = %account.id, name = %account.name, "created account");
        Ok(account)
    }

    /// Get an account by id
    pub async fn get_account(&self, account_id: &str) -> PlannerResult<Option<Account>> {
        self.registry.get(account_id).await
    }

    /// Get an account by id, returning an error if not found
    pub async fn get_account_required(&self, account_id: &str) -> PlannerResult<Account> {
        self.registry
            .get(account_id)
            .await?
            .ok_or_else(|| PlannerError::AccountNotFound(account_id.to_string()))
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> PlannerResult<Vec<Account>> {
        self.registry.list_accounts().await
    }

    /// Change an account's display name
    ///
    /// Entries reference the account by id, so history is untouched.
    pub async fn rename_account(
        &mut self,
        account_id: &str,
        new_name: String,
    ) -> PlannerResult<Account> {
        let mut account = self.get_account_required(account_id).await?;
        account.name = new_name;
        account.updated_at = chrono::Utc::now().naive_utc();
        self.account_validator.validate_account(&account)?;
        self.registry.save(&account).await?;
        debug!(account_id = %account.id, name = %account.name, "renamed account");
        Ok(account)
    }

    /// Delete an account, refused while entries reference it
    pub async fn delete_account(&mut self, account_id: &str) -> PlannerResult<()> {
        self.get_account_required(account_id).await?;

        if !self.store.list(account_id).await?.is_empty() {
            return Err(PlannerError::Validation(
                "Cannot delete account with existing entries".to_string(),
            ));
        }

        self.registry.delete(account_id).await
    }

    // Entry operations

    /// Record a manual entry from a draft
    pub async fn record_entry(&mut self, draft: EntryDraft) -> PlannerResult<LedgerEntry> {
        self.entry_validator.validate_draft(&draft)?;
        self.get_account_required(&draft.account_id).await?;

        let entry = LedgerEntry::from_draft(draft, &self.owner_id);
        self.store.append(&entry).await?;
        debug!(entry_id = %entry.id, account_id = %entry.account_id, "recorded entry");
        Ok(entry)
    }

    /// Remove an entry by id
    pub async fn remove_entry(&mut self, entry_id: &str) -> PlannerResult<()> {
        self.store.remove(entry_id).await
    }

    /// All entries for an account, newest first
    pub async fn entries(&self, account_id: &str) -> PlannerResult<Vec<LedgerEntry>> {
        self.store.list(account_id).await
    }

    /// Derived balance of an account, recomputed from its entry set
    pub async fn balance(&self, account_id: &str) -> PlannerResult<BigDecimal> {
        let entries = self.store.list(account_id).await?;
        Ok(drafts::compute_balance(&entries, account_id))
    }

    /// Cash-in and cash-out totals alongside the balance
    pub async fn account_summary(&self, account_id: &str) -> PlannerResult<AccountSummary> {
        let entries = self.store.list(account_id).await?;
        Ok(drafts::account_summary(&entries, account_id))
    }

    // Planning operations

    /// Derive the current installment plan for an account
    ///
    /// Requires the account to be flagged as an installment account. The
    /// schedule anchors one period after the latest cash-in entry (or at
    /// `today` without one) and only slots with no recorded settlement are
    /// offered.
    pub async fn installment_plan(
        &self,
        account_id: &str,
        frequency: Frequency,
        today: NaiveDate,
    ) -> PlannerResult<InstallmentPlan> {
        let account = self.get_account_required(account_id).await?;
        if !account.is_installment {
            return Err(PlannerError::Validation(format!(
                "Account '{}' is not an installment account",
                account.name
            )));
        }

        let entries = self.store.list(account_id).await?;
        let generator = ScheduleGenerator::new(frequency);
        let anchor = generator.anchor_for(&entries, account_id, today);
        let schedule = generator.generate(anchor);

        let total_amount =
            drafts::latest_cash_in(&entries, account_id).map(|e| e.amount.clone());

        Ok(InstallmentPlan {
            account_id: account_id.to_string(),
            frequency,
            balance: drafts::compute_balance(&entries, account_id),
            total_amount,
            per_period_amount: drafts::infer_per_period_amount(&entries, account_id),
            open_slots: drafts::open_slots(schedule, &entries, account_id),
        })
    }

    /// Record a lump-sum cash-in to be settled over `period_count` periods
    pub async fn record_cash_in(
        &mut self,
        account_id: &str,
        total_amount: BigDecimal,
        period_count: u32,
        frequency: Frequency,
        date: NaiveDate,
        description: &str,
        category: &str,
    ) -> PlannerResult<LedgerEntry> {
        self.get_account_required(account_id).await?;

        let draft = drafts::plan_cash_in(
            account_id,
            total_amount,
            period_count,
            frequency,
            date,
            description,
            category,
        )?;
        self.entry_validator.validate_draft(&draft)?;

        let entry = LedgerEntry::from_draft(draft, &self.owner_id);
        self.store.append(&entry).await?;
        debug!(
            entry_id = %entry.id,
            account_id,
            period_count,
            "recorded installment cash-in"
        );
        Ok(entry)
    }

    /// Settle the selected schedule slots
    ///
    /// When no per-period amount is supplied it is recovered from the latest
    /// cash-in entry. The resulting entries are persisted through
    /// [`EntryStore::append_batch`], so either every settlement lands or
    /// none does.
    pub async fn record_cash_out(
        &mut self,
        account_id: &str,
        selected_dates: &[NaiveDate],
        per_period_amount: Option<BigDecimal>,
        description: &str,
        category: &str,
    ) -> PlannerResult<Vec<LedgerEntry>> {
        self.get_account_required(account_id).await?;
        let existing = self.store.list(account_id).await?;

        let per_period = match per_period_amount {
            Some(amount) => amount,
            None => drafts::infer_per_period_amount(&existing, account_id).ok_or_else(|| {
                PlannerError::InvalidAmount(
                    "per-period amount is required when it cannot be inferred from the latest \
                     cash-in entry"
                        .to_string(),
                )
            })?,
        };

        let drafts = drafts::plan_cash_out(
            account_id,
            &existing,
            selected_dates,
            &per_period,
            description,
            category,
        )?;
        for draft in &drafts {
            self.entry_validator.validate_draft(draft)?;
        }

        let entries: Vec<LedgerEntry> = drafts
            .into_iter()
            .map(|draft| LedgerEntry::from_draft(draft, &self.owner_id))
            .collect();

        self.store.append_batch(&entries).await?;
        debug!(
            account_id,
            count = entries.len(),
            "recorded installment settlements"
        );
        Ok(entries)
    }
}
