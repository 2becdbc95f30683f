use paylater_types::{MerchantCreate, SignupRequest};

use crate::mock_backend::MockBackend;

/// Seeded backend used by the demo and integration tests: one customer with
/// a 1000 credit limit and two merchants with different commissions.
#[derive(Debug, Clone)]
pub struct DemoScenario {
    pub backend: MockBackend,
    pub customer_id: i64,
    pub customer_email: String,
    pub customer_password: String,
    pub chai_point_id: i64,
    pub book_nook_id: i64,
}

impl DemoScenario {
    pub fn new() -> Self {
        let mut backend = MockBackend::new();
        let customer = backend
            .customer_signup(SignupRequest {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                password: "secret123".to_string(),
                phone: 9_876_543_210,
                limit: 1_000,
            })
            .expect("seed customer");
        let chai_point = backend
            .create_merchant(MerchantCreate {
                name: "Chai Point".to_string(),
                phone: 9_000_000_001,
                commission: 5,
                total_earning: 0,
            })
            .expect("seed merchant");
        let book_nook = backend
            .create_merchant(MerchantCreate {
                name: "Book Nook".to_string(),
                phone: 9_000_000_002,
                commission: 10,
                total_earning: 0,
            })
            .expect("seed merchant");
        Self {
            backend,
            customer_id: customer.id,
            customer_email: "asha@example.com".to_string(),
            customer_password: "secret123".to_string(),
            chai_point_id: chai_point.id,
            book_nook_id: book_nook.id,
        }
    }
}

impl Default for DemoScenario {
    fn default() -> Self {
        Self::new()
    }
}
