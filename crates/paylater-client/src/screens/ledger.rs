//! Transaction ledger with role-scoped visibility and the repay action.

use paylater_types::{Role, SessionUser, Transaction, TransactionRepay};

use crate::error::ClientError;
use crate::screens::ScreenState;
use crate::transport::BackendTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerData {
    pub transactions: Vec<Transaction>,
}

pub struct LedgerScreen<T: BackendTransport> {
    transport: T,
    user: SessionUser,
    token: String,
    pub state: ScreenState<LedgerData>,
}

impl<T: BackendTransport> LedgerScreen<T> {
    pub fn new(transport: T, user: SessionUser, token: String) -> Self {
        Self {
            transport,
            user,
            token,
            state: ScreenState::Idle,
        }
    }

    pub async fn load(&mut self) {
        self.state = ScreenState::Loading;
        self.state = match self.transport.list_transactions(Some(&self.token)).await {
            Ok(transactions) => ScreenState::Loaded(LedgerData { transactions }),
            Err(err) => ScreenState::Error(err.to_string()),
        };
    }

    /// Rows the signed-in user may see: customers see only their own
    /// transactions, merchants see the full ledger. Empty until loaded.
    pub fn visible_transactions(&self) -> Vec<&Transaction> {
        let Some(data) = self.state.loaded() else {
            return Vec::new();
        };
        data.transactions
            .iter()
            .filter(|transaction| match self.user.role {
                Role::Customer => transaction.customer_id == self.user.id,
                Role::Merchant => true,
            })
            .collect()
    }

    /// Repay an outstanding transaction, then reload the ledger so the row
    /// flips to repaid.
    pub async fn repay(&mut self, transaction_id: i64) -> Result<Transaction, ClientError> {
        let req = TransactionRepay { transaction_id };
        let transaction = self
            .transport
            .repay_transaction(&req, Some(&self.token))
            .await?;
        self.load().await;
        Ok(transaction)
    }
}
