//! MockBackend: in-memory customers, merchants, and transactions with the
//! backend's business rules and rejection shapes.

use std::collections::HashMap;

use chrono::Utc;
use paylater_types::{
    CommissionUpdate, Customer, CustomerProfile, Merchant, MerchantCreate, SignupRequest,
    TokenResponse, Transaction, TransactionCreate, TransactionRepay,
};

/// Non-2xx outcome, carrying the HTTP status and the `detail` message the
/// real backend would put in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status: u16,
    pub detail: String,
}

impl Rejection {
    /// Response body in the backend's error shape.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "detail": self.detail })
    }
}

fn reject(status: u16, detail: impl Into<String>) -> Rejection {
    Rejection {
        status,
        detail: detail.into(),
    }
}

#[derive(Debug, Clone)]
struct CustomerRecord {
    id: i64,
    name: String,
    phone: i64,
    limit: i64,
    email: String,
    password: String,
}

impl CustomerRecord {
    fn as_customer(&self) -> Customer {
        Customer {
            id: self.id,
            name: self.name.clone(),
            phone: self.phone,
            limit: self.limit,
        }
    }

    fn as_profile(&self) -> CustomerProfile {
        CustomerProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    customers: HashMap<i64, CustomerRecord>,
    merchants: HashMap<i64, Merchant>,
    transactions: Vec<Transaction>,
    tokens: HashMap<String, i64>,
    next_customer_id: i64,
    next_merchant_id: i64,
    next_transaction_id: i64,
    next_token_seq: u64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `POST /customer/signup`
    pub fn customer_signup(&mut self, req: SignupRequest) -> Result<Customer, Rejection> {
        if self
            .customers
            .values()
            .any(|customer| customer.email == req.email)
        {
            return Err(reject(400, "Email already registered"));
        }
        self.next_customer_id += 1;
        let record = CustomerRecord {
            id: self.next_customer_id,
            name: req.name,
            phone: req.phone,
            limit: req.limit,
            email: req.email,
            password: req.password,
        };
        let customer = record.as_customer();
        self.customers.insert(record.id, record);
        Ok(customer)
    }

    /// `POST /customer/login` (form-encoded username/password).
    pub fn customer_login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, Rejection> {
        let customer = self
            .customers
            .values()
            .find(|customer| customer.email == username)
            .ok_or_else(|| reject(401, "Invalid credentials"))?;
        if customer.password != password {
            return Err(reject(401, "Invalid credentials"));
        }
        self.next_token_seq += 1;
        let token = format!("token-{}-{}", customer.id, self.next_token_seq);
        self.tokens.insert(token.clone(), customer.id);
        Ok(TokenResponse {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }

    /// `GET /customer/protected`
    pub fn customer_profile(&self, token: Option<&str>) -> Result<CustomerProfile, Rejection> {
        let token = token.ok_or_else(|| reject(401, "Could not validate credentials"))?;
        let customer_id = self
            .tokens
            .get(token)
            .ok_or_else(|| reject(401, "Could not validate credentials"))?;
        let customer = self
            .customers
            .get(customer_id)
            .ok_or_else(|| reject(401, "Customer not found"))?;
        Ok(customer.as_profile())
    }

    /// `GET /customer/`
    pub fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self
            .customers
            .values()
            .map(CustomerRecord::as_customer)
            .collect();
        customers.sort_by_key(|customer| customer.id);
        customers
    }

    /// `POST /merchant/`
    pub fn create_merchant(&mut self, req: MerchantCreate) -> Result<Merchant, Rejection> {
        // `merchant.name` is a unique column upstream.
        if self
            .merchants
            .values()
            .any(|merchant| merchant.name == req.name)
        {
            return Err(reject(400, "Merchant already exists"));
        }
        self.next_merchant_id += 1;
        let merchant = Merchant {
            id: self.next_merchant_id,
            name: req.name,
            phone: req.phone,
            commission: req.commission,
            total_earning: req.total_earning,
        };
        self.merchants.insert(merchant.id, merchant.clone());
        Ok(merchant)
    }

    /// `GET /merchant/`
    pub fn list_merchants(&self) -> Vec<Merchant> {
        let mut merchants: Vec<Merchant> = self.merchants.values().cloned().collect();
        merchants.sort_by_key(|merchant| merchant.id);
        merchants
    }

    /// `PATCH /merchant/{id}/commision`
    pub fn update_commission(
        &mut self,
        merchant_id: i64,
        update: CommissionUpdate,
    ) -> Result<Merchant, Rejection> {
        let merchant = self
            .merchants
            .get_mut(&merchant_id)
            .ok_or_else(|| reject(404, "Merchant not found"))?;
        merchant.commission = update.commission;
        Ok(merchant.clone())
    }

    /// `POST /transaction/pay`
    pub fn create_transaction(&mut self, req: TransactionCreate) -> Result<Transaction, Rejection> {
        let merchant_commission = self
            .merchants
            .get(&req.merchant_id)
            .map(|merchant| merchant.commission)
            .ok_or_else(|| reject(404, "Merchant not found"))?;
        let customer = self
            .customers
            .get_mut(&req.customer_id)
            .ok_or_else(|| reject(404, "Customer not found"))?;
        if req.amount > customer.limit {
            return Err(reject(400, "Insufficient credit limit"));
        }

        customer.limit -= req.amount;
        let fee = req.amount * merchant_commission / 100;
        if let Some(merchant) = self.merchants.get_mut(&req.merchant_id) {
            merchant.total_earning += req.amount - fee;
        }

        self.next_transaction_id += 1;
        let txn = Transaction {
            id: self.next_transaction_id,
            customer_id: req.customer_id,
            merchant_id: req.merchant_id,
            amount: req.amount,
            timestamp: Utc::now(),
            is_repaid: false,
        };
        self.transactions.push(txn.clone());
        Ok(txn)
    }

    /// `POST /transaction/repay`
    pub fn repay_transaction(&mut self, req: TransactionRepay) -> Result<Transaction, Rejection> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == req.transaction_id)
            .ok_or_else(|| reject(404, "Transaction not found"))?;
        if txn.is_repaid {
            return Err(reject(400, "Transaction already repaid"));
        }
        txn.is_repaid = true;
        let txn = txn.clone();

        if let Some(customer) = self.customers.get_mut(&txn.customer_id) {
            customer.limit += txn.amount;
        }
        if let Some(merchant) = self.merchants.get_mut(&txn.merchant_id) {
            let fee = txn.amount * merchant.commission / 100;
            merchant.total_earning -= txn.amount - fee;
        }
        Ok(txn)
    }

    /// `GET /transaction/`
    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }
}
