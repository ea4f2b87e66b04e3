//! Code catalog trait and in-memory implementation.
//!
//! Voucher and referral codes are resolved by the backend; the cart only
//! ever stores codes the catalog accepted. Referral rewards in particular
//! are an opaque server-side schedule, so resolution returns the granted
//! bonus rather than anything the client could compute.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Points, ReferralCode, VoucherCode};

use crate::error::CheckoutError;

/// A referral code the catalog accepted, with its resolved reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralReward {
    /// The accepted code.
    pub code: ReferralCode,

    /// Bonus points granted on purchases while this referral is active.
    pub bonus: Points,
}

/// Trait for voucher/referral code resolution.
#[async_trait]
pub trait CodeCatalog: Send + Sync {
    /// Resolves a normalized voucher code to its discount definition.
    async fn resolve_voucher(&self, code: &str) -> Result<VoucherCode, CheckoutError>;

    /// Resolves a normalized referral code to its reward.
    async fn resolve_referral(&self, code: &str) -> Result<ReferralReward, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    vouchers: HashMap<String, VoucherCode>,
    referrals: HashMap<String, Points>,
    fail_on_resolve: bool,
}

/// In-memory code catalog for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCodeCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCodeCatalog {
    /// Creates a new in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a voucher code.
    pub fn register_voucher(&self, voucher: VoucherCode) {
        self.state
            .write()
            .unwrap()
            .vouchers
            .insert(voucher.code.clone(), voucher);
    }

    /// Registers a referral code with its reward.
    pub fn register_referral(&self, code: impl Into<String>, bonus: Points) {
        self.state
            .write()
            .unwrap()
            .referrals
            .insert(code.into(), bonus);
    }

    /// Configures the catalog to fail resolution with a service error.
    pub fn set_fail_on_resolve(&self, fail: bool) {
        self.state.write().unwrap().fail_on_resolve = fail;
    }
}

#[async_trait]
impl CodeCatalog for InMemoryCodeCatalog {
    async fn resolve_voucher(&self, code: &str) -> Result<VoucherCode, CheckoutError> {
        let state = self.state.read().unwrap();

        if state.fail_on_resolve {
            return Err(CheckoutError::CodeCatalog("catalog unavailable".to_string()));
        }

        state
            .vouchers
            .get(code)
            .cloned()
            .ok_or_else(|| CheckoutError::CodeRejected {
                code: code.to_string(),
                reason: "unknown voucher code".to_string(),
            })
    }

    async fn resolve_referral(&self, code: &str) -> Result<ReferralReward, CheckoutError> {
        let state = self.state.read().unwrap();

        if state.fail_on_resolve {
            return Err(CheckoutError::CodeCatalog("catalog unavailable".to_string()));
        }

        state
            .referrals
            .get(code)
            .map(|bonus| ReferralReward {
                code: ReferralCode::new(code),
                bonus: *bonus,
            })
            .ok_or_else(|| CheckoutError::CodeRejected {
                code: code.to_string(),
                reason: "unknown referral code".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::VoucherKind;

    #[tokio::test]
    async fn test_resolve_registered_voucher() {
        let catalog = InMemoryCodeCatalog::new();
        catalog.register_voucher(VoucherCode::new("SAVE20", VoucherKind::Percentage, 20));

        let voucher = catalog.resolve_voucher("SAVE20").await.unwrap();
        assert_eq!(voucher.kind, VoucherKind::Percentage);
        assert_eq!(voucher.value, 20);
    }

    #[tokio::test]
    async fn test_unknown_voucher_rejected() {
        let catalog = InMemoryCodeCatalog::new();
        let result = catalog.resolve_voucher("NOPE").await;
        assert!(matches!(result, Err(CheckoutError::CodeRejected { .. })));
    }

    #[tokio::test]
    async fn test_resolve_referral_returns_reward() {
        let catalog = InMemoryCodeCatalog::new();
        catalog.register_referral("REF-ABC", Points::new(75));

        let reward = catalog.resolve_referral("REF-ABC").await.unwrap();
        assert_eq!(reward.code.as_str(), "REF-ABC");
        assert_eq!(reward.bonus, Points::new(75));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_service_error() {
        let catalog = InMemoryCodeCatalog::new();
        catalog.register_voucher(VoucherCode::new("SAVE20", VoucherKind::Percentage, 20));
        catalog.set_fail_on_resolve(true);

        let result = catalog.resolve_voucher("SAVE20").await;
        assert!(matches!(result, Err(CheckoutError::CodeCatalog(_))));
    }
}
