//! Checkout step state machine.

use serde::{Deserialize, Serialize};

/// The stage of the purchase flow.
///
/// Step transitions:
/// ```text
/// Cart ──► Payment ──────► Success
///   │         │
///   │◄────────┘ (go back)
///   │
///   ├──► PointsPayment (insufficient balance dead-end)
///   │◄────────┘ (go back)
///   │
///   └──► Success (points balance covered the cart)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Reviewing the cart; items and codes can still change.
    #[default]
    Cart,

    /// Entering card details for a currency purchase.
    Payment,

    /// Points purchase blocked on insufficient balance; only exit is back.
    PointsPayment,

    /// Purchase completed (terminal state; cart is empty).
    Success,
}

impl CheckoutStep {
    /// Returns true if cart contents can be modified in this step.
    pub fn can_modify_cart(&self) -> bool {
        matches!(self, CheckoutStep::Cart)
    }

    /// Returns true if a payment flow can start from this step.
    pub fn can_begin_payment(&self) -> bool {
        matches!(self, CheckoutStep::Cart)
    }

    /// Returns true if card details can be submitted in this step.
    pub fn can_submit_payment(&self) -> bool {
        matches!(self, CheckoutStep::Payment)
    }

    /// Returns true if the explicit back edge to the cart exists here.
    pub fn can_go_back(&self) -> bool {
        matches!(self, CheckoutStep::Payment | CheckoutStep::PointsPayment)
    }

    /// Returns true if this is a terminal step (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStep::Success)
    }

    /// Returns the step name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "cart",
            CheckoutStep::Payment => "payment",
            CheckoutStep::PointsPayment => "points_payment",
            CheckoutStep::Success => "success",
        }
    }
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
