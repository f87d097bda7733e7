use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use financial_reporting::{
    init_tracing, AppConfig, Database, FinancialService, LogTransport, DEDUCTION, INCOME,
};

fn main() -> Result<()> {
    // Optional first argument: path to a JSON config file
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("financial_reporting.json"));

    let config = AppConfig::load(&config_path)?;
    init_tracing(&config.log_filter);

    println!("💰 Financial Reporting v{}", financial_reporting::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let db = Database::open(&config.database_path)
        .with_context(|| format!("Failed to open database {:?}", config.database_path))?;
    println!("✓ Database ready at {}", config.database_path.display());

    let transport = match &config.sender {
        Some(sender) => LogTransport::with_sender(sender.clone()),
        None => LogTransport::new(),
    };
    let service =
        FinancialService::with_database(db.clone(), Arc::new(transport), &config.statement_subject);

    // 1. Calculations
    println!("\n🧮 Calculations");
    println!("Interest: ${:.2}", service.calculate_interest(1000.0, 0.05, 2));
    println!("Tax: ${:.2}", service.calculate_tax(75000.0, 10000.0));

    // 2. Demo data
    println!("\n💾 Recording demo transactions...");
    let user_id = service.create_user("Demo User", "demo@example.com")?;
    service.save_transaction(user_id, 5200.0, INCOME)?;
    service.save_transaction(user_id, 800.0, DEDUCTION)?;
    service.save_transaction(user_id, -64.5, "groceries")?;
    println!("✓ Database contains {} transactions", db.transaction_count()?);
    println!("✓ Balance for user {}: ${:.2}", user_id, service.get_user_balance(user_id));

    // 3. Reports
    let today = Utc::now().date_naive();
    println!("\n📊 Monthly report {}-{:02}", today.year(), today.month());
    for row in service.generate_monthly_report(user_id, today.month(), today.year()) {
        println!("  {:<12} {:>3} × ${:>10.2}", row.transaction_type, row.count, row.total);
    }

    let tax = service.generate_tax_report(user_id, today.year());
    println!("\n{}", tax.summary());

    // 4. Statement
    println!("\n📧 Sending monthly statement...");
    service.send_monthly_statement(user_id)?;
    println!("✓ Statement dispatched");

    Ok(())
}
