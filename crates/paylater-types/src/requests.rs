//! Request and response payloads for the backend endpoints.

use serde::{Deserialize, Serialize};

/// `POST /customer/signup` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: i64,
    pub limit: i64,
}

/// `POST /merchant/` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCreate {
    pub name: String,
    pub phone: i64,
    #[serde(rename = "commision")]
    pub commission: i64,
    pub total_earning: i64,
}

/// `PATCH /merchant/{id}/commision` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionUpdate {
    #[serde(rename = "commision")]
    pub commission: i64,
}

/// `POST /transaction/pay` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub customer_id: i64,
    pub merchant_id: i64,
    pub amount: i64,
}

/// `POST /transaction/repay` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRepay {
    pub transaction_id: i64,
}

/// `POST /customer/login` response (password-grant style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::{CommissionUpdate, MerchantCreate};

    #[test]
    fn commission_update_wire_shape() {
        let body = serde_json::to_string(&CommissionUpdate { commission: 12 }).unwrap();
        assert_eq!(body, r#"{"commision":12}"#);
    }

    #[test]
    fn merchant_create_wire_shape() {
        let body = serde_json::to_value(MerchantCreate {
            name: "Acme".to_string(),
            phone: 9876543210,
            commission: 5,
            total_earning: 0,
        })
        .unwrap();
        assert_eq!(body["commision"], 5);
        assert_eq!(body["total_earning"], 0);
    }
}
