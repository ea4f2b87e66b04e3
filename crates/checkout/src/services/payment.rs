//! Payment gateway trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::CustomerId;
use domain::Money;
use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;

/// Card details submitted on the payment step.
///
/// Passed straight through to the gateway; nothing in this crate stores
/// or logs them.
#[derive(Clone, Serialize, Deserialize)]
pub struct CardDetails {
    /// Primary account number.
    pub card_number: String,

    /// Expiry in `MM/YY` form.
    pub expiry: String,

    /// Card verification value.
    pub cvv: String,

    /// Name as printed on the card.
    pub holder_name: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .field("holder_name", &self.holder_name)
            .finish()
    }
}

/// Result of a successful card charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// The payment ID assigned by the gateway.
    pub payment_id: String,
}

/// Trait for card payment operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges a customer's card for the final cart price.
    async fn charge(
        &self,
        customer_id: CustomerId,
        amount: Money,
        card: &CardDetails,
    ) -> Result<PaymentReceipt, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    charges: Vec<(CustomerId, Money)>,
    next_id: u32,
    fail_on_charge: bool,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to decline the next charge call.
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.state.write().unwrap().fail_on_charge = fail;
    }

    /// Returns the number of successful charges.
    pub fn charge_count(&self) -> usize {
        self.state.read().unwrap().charges.len()
    }

    /// Returns the total amount charged across all calls.
    pub fn total_charged(&self) -> Money {
        self.state
            .read()
            .unwrap()
            .charges
            .iter()
            .map(|(_, amount)| *amount)
            .sum()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn charge(
        &self,
        customer_id: CustomerId,
        amount: Money,
        _card: &CardDetails,
    ) -> Result<PaymentReceipt, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_charge {
            return Err(CheckoutError::PaymentGateway(
                "payment declined".to_string(),
            ));
        }

        state.next_id += 1;
        let payment_id = format!("PAY-{:04}", state.next_id);
        state.charges.push((customer_id, amount));

        Ok(PaymentReceipt { payment_id })
    }
}
