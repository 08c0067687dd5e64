//! Pure derivation of ledger-entry drafts and account balances
//!
//! Every operation here takes its inputs explicitly and returns new values;
//! nothing is cached and nothing touches storage. The derived balance is
//! always recomputed from the full entry set, which trades an O(n) scan per
//! call for freedom from staleness at the expected per-account entry counts.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};

use crate::types::*;

const FALLBACK_CATEGORY: &str = "General";
const SETTLEMENT_MARKER: &str = "(EMI Payment)";

/// Derived balance of an account: total cash-out minus total cash-in
///
/// A positive balance means the account has paid out more than it received,
/// i.e. outstanding principal for an installment account. Returns zero for
/// an empty entry set.
pub fn compute_balance(entries: &[LedgerEntry], account_id: &str) -> BigDecimal {
    entries
        .iter()
        .filter(|e| e.account_id == account_id)
        .map(|e| e.signed_amount())
        .sum()
}

/// Cash-in and cash-out totals for an account alongside its balance
pub fn account_summary(entries: &[LedgerEntry], account_id: &str) -> AccountSummary {
    let mut total_in = BigDecimal::from(0);
    let mut total_out = BigDecimal::from(0);
    for entry in entries.iter().filter(|e| e.account_id == account_id) {
        match entry.kind {
            EntryKind::CashIn => total_in += &entry.amount,
            EntryKind::CashOut => total_out += &entry.amount,
        }
    }
    let balance = &total_out - &total_in;
    AccountSummary {
        account_id: account_id.to_string(),
        total_in,
        total_out,
        balance,
    }
}

/// The account's latest cash-in entry: maximum economic `date`, tie-broken
/// by maximum `created_at`
///
/// Selection is computed locally from the entry data and never relies on the
/// ordering of the slice.
pub fn latest_cash_in<'a>(
    entries: &'a [LedgerEntry],
    account_id: &str,
) -> Option<&'a LedgerEntry> {
    entries
        .iter()
        .filter(|e| e.account_id == account_id && e.kind == EntryKind::CashIn)
        .max_by_key(|e| (e.date, e.created_at))
}

/// Plan a lump-sum cash-in split into `period_count` settlements
///
/// The draft carries structured [`InstallmentTerms`] and a description
/// annotated with the count and per-period amount, e.g.
/// `"Loan (EMI 12 x 100.00)"`.
pub fn plan_cash_in(
    account_id: &str,
    total_amount: BigDecimal,
    period_count: u32,
    frequency: Frequency,
    date: NaiveDate,
    description: &str,
    category: &str,
) -> PlannerResult<EntryDraft> {
    if total_amount <= BigDecimal::from(0) {
        return Err(PlannerError::InvalidAmount(format!(
            "total amount must be positive, got {}",
            total_amount
        )));
    }
    if period_count == 0 {
        return Err(PlannerError::InvalidPeriodCount(
            "period count must be a positive integer".to_string(),
        ));
    }

    let per_period_amount = &total_amount / BigDecimal::from(period_count);
    let description = format!(
        "{} (EMI {} x {})",
        description,
        period_count,
        per_period_amount.with_scale(2)
    );

    Ok(EntryDraft {
        amount: total_amount,
        description,
        category: category_or_fallback(category),
        account_id: account_id.to_string(),
        date,
        kind: EntryKind::CashIn,
        installment: Some(InstallmentTerms {
            period_count,
            per_period_amount,
            frequency,
        }),
    })
}

/// Plan settlements for a set of selected schedule slots
///
/// Produces one cash-out draft per selected date, in ascending date order,
/// each carrying `per_period_amount` and a description suffixed with the
/// settlement marker. The selection is deduplicated; a date that already has
/// a settlement recorded for the account is rejected with
/// [`PlannerError::DuplicateSettlement`] before any draft is produced.
pub fn plan_cash_out(
    account_id: &str,
    entries: &[LedgerEntry],
    selected_dates: &[NaiveDate],
    per_period_amount: &BigDecimal,
    description: &str,
    category: &str,
) -> PlannerResult<Vec<EntryDraft>> {
    if *per_period_amount <= BigDecimal::from(0) {
        return Err(PlannerError::InvalidAmount(format!(
            "per-period amount must be positive, got {}",
            per_period_amount
        )));
    }

    let selected: BTreeSet<NaiveDate> = selected_dates.iter().copied().collect();
    if selected.is_empty() {
        return Err(PlannerError::EmptySelection);
    }

    let settled = settled_dates(entries, account_id);
    for date in &selected {
        if settled.contains(date) {
            return Err(PlannerError::DuplicateSettlement(*date));
        }
    }

    let drafts = selected
        .into_iter()
        .map(|date| EntryDraft {
            amount: per_period_amount.clone(),
            description: format!("{} {}", description, SETTLEMENT_MARKER),
            category: category_or_fallback(category),
            account_id: account_id.to_string(),
            date,
            kind: EntryKind::CashOut,
            installment: None,
        })
        .collect();

    Ok(drafts)
}

/// Recover the per-period amount from the account's latest cash-in entry
///
/// Structured installment terms take precedence; for entries recorded before
/// terms were persisted explicitly, an `"EMI <n>"` token is parsed out of the
/// description and the entry amount divided by `n`. Returns `None` when
/// neither source is available, in which case the caller must prompt for a
/// manual value.
pub fn infer_per_period_amount(
    entries: &[LedgerEntry],
    account_id: &str,
) -> Option<BigDecimal> {
    let cash_in = latest_cash_in(entries, account_id)?;

    if let Some(terms) = &cash_in.installment {
        return Some(terms.per_period_amount.clone());
    }

    let count = parse_period_count(&cash_in.description)?;
    if count == 0 {
        return None;
    }
    Some(&cash_in.amount / BigDecimal::from(count))
}

/// Filter a generated schedule down to the slots not yet settled
///
/// Set difference between the schedule's due dates and the dates of existing
/// cash-out entries for the account, preserving schedule order.
pub fn open_slots(
    schedule: Vec<ScheduleSlot>,
    entries: &[LedgerEntry],
    account_id: &str,
) -> Vec<ScheduleSlot> {
    let settled = settled_dates(entries, account_id);
    schedule
        .into_iter()
        .filter(|slot| !settled.contains(&slot.due_date))
        .collect()
}

/// Dates already covered by a cash-out entry for the account
fn settled_dates(entries: &[LedgerEntry], account_id: &str) -> HashSet<NaiveDate> {
    entries
        .iter()
        .filter(|e| e.account_id == account_id && e.kind == EntryKind::CashOut)
        .map(|e| e.date)
        .collect()
}

fn category_or_fallback(category: &str) -> String {
    if category.trim().is_empty() {
        FALLBACK_CATEGORY.to_string()
    } else {
        category.to_string()
    }
}

/// Parse a case-insensitive `"EMI <n>"` token out of a description
fn parse_period_count(description: &str) -> Option<u32> {
    let lower = description.to_lowercase();
    let mut rest = lower.as_str();

    while let Some(pos) = rest.find("emi") {
        let after = rest[pos + 3..].trim_start();
        let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() {
            if let Ok(count) = digits.parse() {
                return Some(count);
            }
        }
        rest = &rest[pos + 3..];
    }

    None
}
