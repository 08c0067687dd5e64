//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(amount: &BigDecimal) -> PlannerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(PlannerError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that an amount is not negative
pub fn validate_non_negative_amount(amount: &BigDecimal) -> PlannerResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(PlannerError::InvalidAmount(format!(
            "amount must be non-negative, got {}",
            amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that an account name is usable as a display key
pub fn validate_account_name(name: &str) -> PlannerResult<()> {
    if name.trim().is_empty() {
        return Err(PlannerError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(PlannerError::Validation(
            "Account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate an entry description
pub fn validate_description(description: &str) -> PlannerResult<()> {
    if description.len() > 500 {
        return Err(PlannerError::Validation(
            "Description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced entry validator with detailed checks
pub struct EnhancedEntryValidator;

impl EntryValidator for EnhancedEntryValidator {
    fn validate_draft(&self, draft: &EntryDraft) -> PlannerResult<()> {
        DefaultEntryValidator.validate_draft(draft)?;
        validate_description(&draft.description)?;

        if let Some(terms) = &draft.installment {
            if terms.period_count == 0 {
                return Err(PlannerError::InvalidPeriodCount(
                    "installment terms must cover at least one period".to_string(),
                ));
            }
            validate_positive_amount(&terms.per_period_amount)?;
        }

        Ok(())
    }
}

/// Enhanced account validator with detailed checks
pub struct EnhancedAccountValidator;

impl AccountValidator for EnhancedAccountValidator {
    fn validate_account(&self, account: &Account) -> PlannerResult<()> {
        validate_account_name(&account.name)?;

        if account.id.trim().is_empty() {
            return Err(PlannerError::Validation(
                "Account ID cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn amount_checks() {
        assert!(validate_positive_amount(&BigDecimal::from(1)).is_ok());
        assert!(validate_positive_amount(&BigDecimal::from(0)).is_err());
        assert!(validate_non_negative_amount(&BigDecimal::from(0)).is_ok());
        assert!(validate_non_negative_amount(&BigDecimal::from(-1)).is_err());
    }

    #[test]
    fn account_name_checks() {
        assert!(validate_account_name("Car Loan").is_ok());
        assert!(validate_account_name("   ").is_err());
        assert!(validate_account_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn enhanced_validator_rejects_zero_period_terms() {
        let mut draft = EntryDraft::new(
            "loan".to_string(),
            BigDecimal::from(100),
            EntryKind::CashIn,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            "Loan".to_string(),
            "General".to_string(),
        );
        draft.installment = Some(InstallmentTerms {
            period_count: 0,
            per_period_amount: BigDecimal::from(100),
            frequency: Frequency::Monthly,
        });

        let err = EnhancedEntryValidator.validate_draft(&draft).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidPeriodCount(_)));
    }
}
