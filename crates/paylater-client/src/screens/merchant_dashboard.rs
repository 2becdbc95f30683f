//! Merchant dashboard: merchant directory with earnings, plus commission
//! updates.

use paylater_types::{CommissionUpdate, Merchant};

use crate::error::ClientError;
use crate::screens::ScreenState;
use crate::transport::BackendTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantDashboardData {
    pub merchants: Vec<Merchant>,
}

pub struct MerchantDashboard<T: BackendTransport> {
    transport: T,
    token: String,
    pub state: ScreenState<MerchantDashboardData>,
}

impl<T: BackendTransport> MerchantDashboard<T> {
    pub fn new(transport: T, token: String) -> Self {
        Self {
            transport,
            token,
            state: ScreenState::Idle,
        }
    }

    pub async fn load(&mut self) {
        self.state = ScreenState::Loading;
        self.state = match self.transport.list_merchants(Some(&self.token)).await {
            Ok(merchants) => ScreenState::Loaded(MerchantDashboardData { merchants }),
            Err(err) => ScreenState::Error(err.to_string()),
        };
    }

    /// Change a merchant's commission percentage, then reload so every row
    /// shows the server's latest figures.
    pub async fn update_commission(
        &mut self,
        merchant_id: i64,
        commission: i64,
    ) -> Result<Merchant, ClientError> {
        let update = CommissionUpdate { commission };
        let merchant = self
            .transport
            .update_commission(merchant_id, update, Some(&self.token))
            .await?;
        self.load().await;
        Ok(merchant)
    }
}
