//! Checkout error types.

use domain::{CheckoutStep, CodeInputError, Points};
use thiserror::Error;

/// Errors that can occur while driving the checkout flow.
///
/// None of these are fatal to the flow: the embedding UI renders them and
/// the customer stays on the current step (or the dead-end step for
/// insufficient points).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Operation requires a signed-in customer.
    #[error("cannot {action}: not signed in")]
    NotAuthenticated { action: &'static str },

    /// Operation is not allowed from the current step.
    #[error("invalid step: cannot {action} from {current} step")]
    InvalidStep {
        current: CheckoutStep,
        action: &'static str,
    },

    /// A previous checkout request is still in flight.
    #[error("another request is still in flight")]
    OperationInFlight,

    /// Checkout attempted with no items in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Points balance does not cover the cart's points price.
    #[error("insufficient points: need {required}, have {available}")]
    InsufficientPoints { required: Points, available: Points },

    /// Raw code input failed shape validation.
    #[error(transparent)]
    CodeInput(#[from] CodeInputError),

    /// The catalog rejected a well-formed code.
    #[error("code '{code}' rejected: {reason}")]
    CodeRejected { code: String, reason: String },

    /// Payment gateway error.
    #[error("payment gateway error: {0}")]
    PaymentGateway(String),

    /// Points ledger error.
    #[error("points ledger error: {0}")]
    PointsLedger(String),

    /// Code catalog error.
    #[error("code catalog error: {0}")]
    CodeCatalog(String),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
