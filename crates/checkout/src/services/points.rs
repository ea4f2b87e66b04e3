//! Points ledger trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::CustomerId;
use domain::Points;

use crate::error::CheckoutError;

/// Trait for the platform points ledger.
#[async_trait]
pub trait PointsLedger: Send + Sync {
    /// Returns the customer's current balance.
    async fn balance(&self, customer_id: CustomerId) -> Result<Points, CheckoutError>;

    /// Deducts points for a points purchase.
    ///
    /// Returns the remaining balance. Fails with
    /// [`CheckoutError::InsufficientPoints`] when the balance does not
    /// cover the amount.
    async fn deduct(
        &self,
        customer_id: CustomerId,
        amount: Points,
    ) -> Result<Points, CheckoutError>;

    /// Credits earned points after a completed purchase.
    ///
    /// Returns the new balance.
    async fn award(
        &self,
        customer_id: CustomerId,
        amount: Points,
    ) -> Result<Points, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryLedgerState {
    balances: HashMap<CustomerId, Points>,
    fail_on_deduct: bool,
    fail_on_award: bool,
}

/// In-memory points ledger for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPointsLedger {
    state: Arc<RwLock<InMemoryLedgerState>>,
}

impl InMemoryPointsLedger {
    /// Creates a new in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a customer's balance directly.
    pub fn set_balance(&self, customer_id: CustomerId, balance: Points) {
        self.state
            .write()
            .unwrap()
            .balances
            .insert(customer_id, balance);
    }

    /// Configures the ledger to fail the next deduct call.
    pub fn set_fail_on_deduct(&self, fail: bool) {
        self.state.write().unwrap().fail_on_deduct = fail;
    }

    /// Configures the ledger to fail the next award call.
    pub fn set_fail_on_award(&self, fail: bool) {
        self.state.write().unwrap().fail_on_award = fail;
    }
}

#[async_trait]
impl PointsLedger for InMemoryPointsLedger {
    async fn balance(&self, customer_id: CustomerId) -> Result<Points, CheckoutError> {
        let state = self.state.read().unwrap();
        Ok(state
            .balances
            .get(&customer_id)
            .copied()
            .unwrap_or_else(Points::zero))
    }

    async fn deduct(
        &self,
        customer_id: CustomerId,
        amount: Points,
    ) -> Result<Points, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_deduct {
            return Err(CheckoutError::PointsLedger("ledger unavailable".to_string()));
        }

        let balance = state
            .balances
            .get(&customer_id)
            .copied()
            .unwrap_or_else(Points::zero);

        if balance < amount {
            return Err(CheckoutError::InsufficientPoints {
                required: amount,
                available: balance,
            });
        }

        let remaining = balance - amount;
        state.balances.insert(customer_id, remaining);
        Ok(remaining)
    }

    async fn award(
        &self,
        customer_id: CustomerId,
        amount: Points,
    ) -> Result<Points, CheckoutError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_award {
            return Err(CheckoutError::PointsLedger("ledger unavailable".to_string()));
        }

        let balance = state
            .balances
            .get(&customer_id)
            .copied()
            .unwrap_or_else(Points::zero);
        let updated = balance + amount;
        state.balances.insert(customer_id, updated);
        Ok(updated)
    }
}
