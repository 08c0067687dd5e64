//! Installment planning walkthrough

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use installment_core::utils::MemoryStore;
use installment_core::{AccountCategory, Frequency, InstallmentPlanner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("💳 Installment Core - Planning Example\n");

    // Create a planner backed by in-memory storage
    let store = MemoryStore::new();
    let mut planner = InstallmentPlanner::new("demo-user", store.clone(), store);

    // 1. Create an installment account
    println!("🏦 Creating installment account...");
    let account = planner
        .create_account("Car Loan".to_string(), AccountCategory::Credit, true)
        .await?;
    println!("  ✓ Created account: {} ({})", account.name, account.id);
    println!();

    // 2. Record the loan principal, split into 12 monthly settlements
    println!("💰 Recording loan disbursement...");
    let cash_in = planner
        .record_cash_in(
            &account.id,
            BigDecimal::from(1200),
            12,
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            "Car loan",
            "Loans",
        )
        .await?;
    println!("  ✓ Recorded: {}", cash_in.description);
    println!("  Balance: {}", planner.balance(&account.id).await?);
    println!();

    // 3. Derive the forward schedule
    let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let plan = planner
        .installment_plan(&account.id, Frequency::Monthly, today)
        .await?;

    println!("🗓  Open schedule slots:");
    for slot in &plan.open_slots {
        println!("    {} ({})", slot.label, slot.due_date);
    }
    println!(
        "  Per-period amount: {}",
        plan.per_period_amount
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );
    println!();

    // 4. Settle the first three periods in one batch
    println!("✅ Settling the first three periods...");
    let selected: Vec<NaiveDate> = plan
        .open_slots
        .iter()
        .take(3)
        .map(|slot| slot.due_date)
        .collect();

    let settled = planner
        .record_cash_out(&account.id, &selected, None, "Car loan", "Loans")
        .await?;
    for entry in &settled {
        println!("  ✓ {} on {}: {}", entry.description, entry.date, entry.amount);
    }
    println!();

    // 5. Inspect the updated plan and balance
    let plan = planner
        .installment_plan(&account.id, Frequency::Monthly, today)
        .await?;
    let summary = planner.account_summary(&account.id).await?;

    println!("📈 After settlement:");
    println!("  Open slots remaining: {}", plan.open_slots.len());
    println!("  Cash in:  {}", summary.total_in);
    println!("  Cash out: {}", summary.total_out);
    println!("  Balance:  {}", summary.balance);

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
