//! Login screen: password-grant login followed by a profile fetch, only
//! then committed to the session store.

use paylater_types::{Role, SessionUser, ValidationError};

use crate::error::ClientError;
use crate::session::{SessionStorage, SessionStore};
use crate::transport::BackendTransport;

pub struct LoginScreen<T: BackendTransport> {
    transport: T,
}

impl<T: BackendTransport> LoginScreen<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Authenticate and commit the session. The store is only mutated after
    /// both the login and the profile fetch succeed, so a failed login
    /// leaves the session unauthenticated with nothing persisted.
    pub async fn submit<S: SessionStorage>(
        &self,
        store: &mut SessionStore<S>,
        role: Role,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        // The backend only implements customer authentication.
        if role == Role::Merchant {
            return Err(ClientError::MerchantLoginUnsupported);
        }
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingRequiredFields.into());
        }

        let token = self.transport.customer_login(email, password).await?;
        let profile = self
            .transport
            .customer_profile(Some(&token.access_token))
            .await?;

        let user = SessionUser {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            role: Role::Customer,
        };
        store.login(user, token.access_token)?;
        Ok(())
    }
}
