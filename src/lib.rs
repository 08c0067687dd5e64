//! # Installment Core
//!
//! A personal-finance library for installment ("EMI") accounts: forward
//! schedule generation, lump-sum splitting, settlement planning, and derived
//! account balances.
//!
//! ## Features
//!
//! - **Schedule generation**: daily, weekly, or monthly due-date sequences
//!   anchored to an account's latest cash-in entry
//! - **Installment planning**: split a lump-sum cash-in into per-period
//!   settlements and materialize ledger-entry drafts for selected slots
//! - **Derived balances**: cash-out minus cash-in, recomputed from the entry
//!   set on every call
//! - **Duplicate-settlement guard**: already settled due dates are excluded
//!   from plans and rejected on settlement
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   entry store and account registry
//!
//! ## Quick Start
//!
//! ```rust
//! use installment_core::utils::MemoryStore;
//! use installment_core::{AccountCategory, Frequency, InstallmentPlanner};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # async fn demo() -> installment_core::PlannerResult<()> {
//! let store = MemoryStore::new();
//! let mut planner = InstallmentPlanner::new("user1", store.clone(), store);
//!
//! let account = planner
//!     .create_account("Car Loan".to_string(), AccountCategory::Credit, true)
//!     .await?;
//! planner
//!     .record_cash_in(
//!         &account.id,
//!         BigDecimal::from(1200),
//!         12,
//!         Frequency::Monthly,
//!         NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
//!         "Car loan",
//!         "Loans",
//!     )
//!     .await?;
//!
//! let plan = planner
//!     .installment_plan(&account.id, Frequency::Monthly, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
//!     .await?;
//! assert_eq!(plan.open_slots.len(), 12);
//! # Ok(())
//! # }
//! ```

pub mod planner;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use planner::*;
pub use traits::*;
pub use types::*;
