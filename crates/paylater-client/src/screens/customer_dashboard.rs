//! Customer dashboard: credit profile plus the merchant directory, with the
//! pay action.

use futures::join;
use paylater_types::{CustomerProfile, Merchant, Transaction, TransactionCreate, ValidationError};

use crate::error::ClientError;
use crate::screens::ScreenState;
use crate::transport::BackendTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDashboardData {
    pub profile: CustomerProfile,
    pub merchants: Vec<Merchant>,
}

pub struct CustomerDashboard<T: BackendTransport> {
    transport: T,
    customer_id: i64,
    token: String,
    pub state: ScreenState<CustomerDashboardData>,
}

impl<T: BackendTransport> CustomerDashboard<T> {
    pub fn new(transport: T, customer_id: i64, token: String) -> Self {
        Self {
            transport,
            customer_id,
            token,
            state: ScreenState::Idle,
        }
    }

    /// Fetch the profile and merchant directory concurrently. Either failure
    /// lands the whole screen in the error state.
    pub async fn load(&mut self) {
        self.state = ScreenState::Loading;
        let token = Some(self.token.as_str());
        let (profile, merchants) = join!(
            self.transport.customer_profile(token),
            self.transport.list_merchants(token),
        );
        self.state = match (profile, merchants) {
            (Ok(profile), Ok(merchants)) => ScreenState::Loaded(CustomerDashboardData {
                profile,
                merchants,
            }),
            (Err(err), _) | (_, Err(err)) => ScreenState::Error(err.to_string()),
        };
    }

    /// Pay a merchant. On success the dashboard reloads so the displayed
    /// credit limit reflects the deduction.
    pub async fn pay(&mut self, merchant_id: i64, amount: i64) -> Result<Transaction, ClientError> {
        if amount < 1 {
            return Err(ValidationError::AmountTooSmall.into());
        }
        let req = TransactionCreate {
            customer_id: self.customer_id,
            merchant_id,
            amount,
        };
        let transaction = self
            .transport
            .create_transaction(&req, Some(&self.token))
            .await?;
        self.load().await;
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use paylater_backend_mock::DemoScenario;

    use super::CustomerDashboard;
    use crate::transport::{BackendTransport, MockTransport};

    async fn loaded_dashboard() -> (CustomerDashboard<MockTransport>, DemoScenario) {
        let scenario = DemoScenario::new();
        let transport = MockTransport::new(scenario.backend.clone());
        let token = transport
            .customer_login(&scenario.customer_email, &scenario.customer_password)
            .await
            .unwrap();
        let mut dashboard =
            CustomerDashboard::new(transport, scenario.customer_id, token.access_token);
        dashboard.load().await;
        (dashboard, scenario)
    }

    #[tokio::test]
    async fn load_shows_profile_and_merchants() {
        let (dashboard, scenario) = loaded_dashboard().await;
        let data = dashboard.state.loaded().unwrap();
        assert_eq!(data.profile.id, scenario.customer_id);
        assert_eq!(data.profile.limit, 1000);
        assert_eq!(data.merchants.len(), 2);
    }

    #[tokio::test]
    async fn pay_deducts_limit_and_reloads() {
        let (mut dashboard, scenario) = loaded_dashboard().await;
        let transaction = dashboard.pay(scenario.chai_point_id, 200).await.unwrap();
        assert_eq!(transaction.amount, 200);
        assert!(!transaction.is_repaid);

        let data = dashboard.state.loaded().unwrap();
        assert_eq!(data.profile.limit, 800);
    }

    #[tokio::test]
    async fn pay_over_limit_keeps_current_data() {
        let (mut dashboard, scenario) = loaded_dashboard().await;
        let err = dashboard.pay(scenario.chai_point_id, 5_000).await.unwrap_err();
        assert_eq!(err.to_string(), "Insufficient credit limit");

        // The rejected payment changed nothing, so the snapshot stands.
        let data = dashboard.state.loaded().unwrap();
        assert_eq!(data.profile.limit, 1000);
    }

    #[tokio::test]
    async fn zero_amount_is_rejected_before_dispatch() {
        let (mut dashboard, scenario) = loaded_dashboard().await;
        let err = dashboard.pay(scenario.chai_point_id, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "Transaction amount must be at least 1");
    }

    #[tokio::test]
    async fn unknown_merchant_surfaces_backend_message() {
        let (mut dashboard, _) = loaded_dashboard().await;
        let err = dashboard.pay(999, 50).await.unwrap_err();
        assert_eq!(err.to_string(), "Merchant not found");
    }

    #[tokio::test]
    async fn bad_token_lands_in_error_state() {
        let scenario = DemoScenario::new();
        let transport = MockTransport::new(scenario.backend);
        let mut dashboard = CustomerDashboard::new(transport, 1, "stale-token".to_string());
        dashboard.load().await;
        assert_eq!(
            dashboard.state.error(),
            Some("Could not validate credentials")
        );
    }
}
