use std::path::PathBuf;

use clap::Parser;
use paylater_backend_mock::DemoScenario;
use paylater_client::{
    CustomerDashboard, FileStorage, LedgerScreen, LoginScreen, MerchantDashboard, MockTransport,
    SessionStore, SignupForm, SignupOutcome, SignupScreen,
};
use paylater_types::Role;
use tracing::info;

/// Scripted walkthrough of the pay-later client against the in-memory
/// backend: signup, login, payments, repayment, and a commission update.
#[derive(Parser)]
struct Args {
    /// Directory for the durable session files.
    #[arg(long)]
    storage_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let storage_dir = args
        .storage_dir
        .unwrap_or_else(|| std::env::temp_dir().join("paylater-demo"));

    let scenario = DemoScenario::new();
    let transport = MockTransport::new(scenario.backend.clone());

    info!("Signing up merchant Samosa House");
    let signup = SignupScreen::new(transport.clone());
    let outcome = signup
        .submit(&SignupForm {
            name: "Samosa House".to_string(),
            email: "owner@samosahouse.example".to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
            phone: 9_000_000_003,
            limit: 0,
            role: Role::Merchant,
        })
        .await?;
    if let SignupOutcome::Merchant(merchant) = &outcome {
        info!(
            "Merchant #{} created with {}% commission",
            merchant.id, merchant.commission
        );
    }

    info!("Logging in as {}", scenario.customer_email);
    let mut store = SessionStore::load(FileStorage::new(&storage_dir)?);
    let login = LoginScreen::new(transport.clone());
    login
        .submit(
            &mut store,
            Role::Customer,
            &scenario.customer_email,
            &scenario.customer_password,
        )
        .await?;
    let user = store
        .user()
        .ok_or("session missing user after login")?
        .clone();
    let token = store
        .token()
        .ok_or("session missing token after login")?
        .to_string();
    info!("Session persisted under {}", storage_dir.display());

    let mut dashboard = CustomerDashboard::new(transport.clone(), user.id, token.clone());
    dashboard.load().await;
    if let Some(data) = dashboard.state.loaded() {
        info!(
            "{} has a credit limit of {} and sees {} merchants",
            data.profile.name,
            data.profile.limit,
            data.merchants.len()
        );
    }

    info!("Paying 200 to Chai Point");
    let payment = dashboard.pay(scenario.chai_point_id, 200).await?;
    info!("Transaction #{} recorded", payment.id);

    if let Err(err) = dashboard.pay(scenario.book_nook_id, 5_000).await {
        info!("Oversized payment rejected: {err}");
    }

    let mut ledger = LedgerScreen::new(transport.clone(), user.clone(), token.clone());
    ledger.load().await;
    info!(
        "{} sees {} transaction(s) in the ledger",
        user.name,
        ledger.visible_transactions().len()
    );

    info!("Repaying transaction #{}", payment.id);
    let repaid = ledger.repay(payment.id).await?;
    info!("Transaction #{} repaid: {}", repaid.id, repaid.is_repaid);

    let mut merchants = MerchantDashboard::new(transport, token);
    merchants.load().await;
    let updated = merchants
        .update_commission(scenario.book_nook_id, 12)
        .await?;
    info!("{} commission now {}%", updated.name, updated.commission);

    store.logout();
    info!("Logged out; session cleared");

    Ok(())
}
