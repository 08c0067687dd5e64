//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory entry store and account registry
///
/// Clones share the underlying maps, so one instance can serve as both
/// collaborators of a planner.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, LedgerEntry>>>,
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
        self.accounts.write().unwrap().clear();
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list(&self, account_id: &str) -> PlannerResult<Vec<LedgerEntry>> {
        let entries = self.entries.read().unwrap();
        let mut filtered: Vec<LedgerEntry> = entries
            .values()
            .filter(|entry| entry.account_id == account_id)
            .cloned()
            .collect();
        // Newest first, id as a stable tie-break for entries created within
        // the same timestamp tick.
        filtered.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(filtered)
    }

    async fn append(&mut self, entry: &LedgerEntry) -> PlannerResult<()> {
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(&entry.id) {
            return Err(PlannerError::Storage(format!(
                "entry '{}' already exists",
                entry.id
            )));
        }
        entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn append_batch(&mut self, batch: &[LedgerEntry]) -> PlannerResult<()> {
        let mut entries = self.entries.write().unwrap();
        // Validate the whole batch before touching the map so a rejection
        // leaves no partial state behind.
        for entry in batch {
            if entries.contains_key(&entry.id) {
                return Err(PlannerError::Storage(format!(
                    "entry '{}' already exists",
                    entry.id
                )));
            }
        }
        for entry in batch {
            entries.insert(entry.id.clone(), entry.clone());
        }
        Ok(())
    }

    async fn remove(&mut self, entry_id: &str) -> PlannerResult<()> {
        if self.entries.write().unwrap().remove(entry_id).is_some() {
            Ok(())
        } else {
            Err(PlannerError::EntryNotFound(entry_id.to_string()))
        }
    }
}

#[async_trait]
impl AccountRegistry for MemoryStore {
    async fn get(&self, account_id: &str) -> PlannerResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(account_id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> PlannerResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .values()
            .find(|account| account.name == name)
            .cloned())
    }

    async fn save(&mut self, account: &Account) -> PlannerResult<()> {
        self.accounts
            .write()
            .unwrap()
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn list_accounts(&self) -> PlannerResult<Vec<Account>> {
        let accounts = self.accounts.read().unwrap();
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn delete(&mut self, account_id: &str) -> PlannerResult<()> {
        if self.accounts.write().unwrap().remove(account_id).is_some() {
            Ok(())
        } else {
            Err(PlannerError::AccountNotFound(account_id.to_string()))
        }
    }
}
