//! Signup screen: local form validation, then either a customer signup or a
//! merchant creation. Validation failures never reach the network.

use paylater_types::{
    Customer, Merchant, MerchantCreate, Role, SignupRequest, ValidationError,
};

use crate::error::ClientError;
use crate::transport::BackendTransport;

/// Commission assigned to merchants created through signup.
pub const DEFAULT_MERCHANT_COMMISSION: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: i64,
    pub limit: i64,
    pub role: Role,
}

impl SignupForm {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < 6 {
            return Err(ValidationError::PasswordTooShort);
        }
        if self.role == Role::Customer && self.limit < 100 {
            return Err(ValidationError::CreditLimitTooLow);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Customer(Customer),
    /// Merchant accounts have no credentials; the original flow directs the
    /// user to support for access.
    Merchant(Merchant),
}

pub struct SignupScreen<T: BackendTransport> {
    transport: T,
}

impl<T: BackendTransport> SignupScreen<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn submit(&self, form: &SignupForm) -> Result<SignupOutcome, ClientError> {
        form.validate()?;
        match form.role {
            Role::Customer => {
                let req = SignupRequest {
                    name: form.name.clone(),
                    email: form.email.clone(),
                    password: form.password.clone(),
                    phone: form.phone,
                    limit: form.limit,
                };
                Ok(SignupOutcome::Customer(
                    self.transport.customer_signup(&req).await?,
                ))
            }
            Role::Merchant => {
                let req = MerchantCreate {
                    name: form.name.clone(),
                    phone: form.phone,
                    commission: DEFAULT_MERCHANT_COMMISSION,
                    total_earning: 0,
                };
                Ok(SignupOutcome::Merchant(
                    self.transport.create_merchant(&req, None).await?,
                ))
            }
        }
    }
}
