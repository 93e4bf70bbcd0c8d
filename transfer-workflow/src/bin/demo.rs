//! Transfer workflow demo against the in-memory backend

use std::sync::Arc;

use banking_api::{MockBankingApi, ResolvedAccount};
use banking_types::{Account, AccountId, AccountStatus, AccountType, Currency};
use rust_decimal::Decimal;
use transfer_workflow::{TransferClass, TransferWorkflow, WorkflowConfig};

fn account(id: &str, title: &str, number: &str, balance: i64) -> Account {
    Account {
        id: AccountId::new(id),
        title: title.to_string(),
        number: number.to_string(),
        account_type: AccountType::Savings,
        status: AccountStatus::Active,
        currency: Currency::PKR,
        balance: Decimal::from(balance),
        available_balance: Decimal::from(balance),
        minimum_balance: Decimal::from(1_000),
        daily_limit: Decimal::from(500_000),
        monthly_limit: Decimal::from(5_000_000),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting transfer workflow demo");

    let api = Arc::new(MockBankingApi::new());
    api.add_account(account("a1", "Main Savings", "0101000111222", 50_000))
        .await;
    api.add_account(account("a2", "Rainy Day", "0101000333444", 5_000))
        .await;
    api.register_third_party(
        "0202555666777",
        ResolvedAccount {
            account_title: "Ali Raza".to_string(),
            account_type: Some(AccountType::Current),
            branch_code: Some("KHI-014".to_string()),
        },
    )
    .await;

    let mut workflow = TransferWorkflow::new(api.clone(), WorkflowConfig::default());
    workflow.load_accounts().await?;

    // Own-account transfer
    workflow.select_source_account(&AccountId::new("a1"))?;
    workflow.select_destination_account(&AccountId::new("a2"))?;
    workflow.set_amount(Some(Decimal::from(5_000)));
    workflow.set_description("monthly savings");
    workflow.proceed_to_confirm()?;

    if let Some(summary) = workflow.confirmation_summary() {
        println!(
            "Confirm: {} -> {} | amount {} fee {} total {}",
            summary.source_title, summary.destination, summary.amount, summary.fee, summary.total
        );
    }

    workflow.confirm().await;
    let receipt = workflow.view_receipt().await?;
    println!(
        "Receipt {}: {} -> {} ({})",
        receipt.transaction_id, receipt.from_account, receipt.to_account, receipt.status
    );

    // Third-party transfer with a debounced lookup
    workflow.new_transfer();
    workflow.set_transfer_class(TransferClass::Other);

    if let Some(ticket) = workflow.destination_number_input("0202555666777") {
        ticket.wait(&workflow.config().lookup).await;
        if workflow.lookup_is_current(&ticket) {
            let outcome =
                transfer_workflow::lookup::execute_lookup(api.as_ref(), &ticket).await;
            workflow.apply_lookup_result(outcome);
        }
    }

    workflow.set_amount(Some(Decimal::from(2_000)));
    workflow.set_description("eid gift");
    workflow.proceed_to_confirm()?;
    workflow.confirm().await;

    let receipt = workflow.view_receipt().await?;
    println!(
        "Receipt {}: {} -> {} ({})",
        receipt.transaction_id, receipt.from_account, receipt.to_account, receipt.status
    );

    Ok(())
}
