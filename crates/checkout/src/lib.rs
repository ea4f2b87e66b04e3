//! Checkout flow for the coursecart purchase pipeline.
//!
//! This crate sequences the purchase steps (cart review, card payment,
//! points payment, success) on top of the domain cart, gating each
//! transition on authentication and balance checks and driving the
//! external collaborators:
//! 1. Code catalog (voucher/referral resolution)
//! 2. Payment gateway (card charges)
//! 3. Points ledger (balance, deduction, earn awards)
//!
//! Every suspending operation is serialized through a reentrancy flag so
//! a double submit cannot fire two network calls.

pub mod error;
pub mod flow;
pub mod services;

pub use error::CheckoutError;
pub use flow::{CheckoutFlow, PointsReceipt};
pub use services::{
    CardDetails, CodeCatalog, InMemoryCodeCatalog, InMemoryPaymentGateway, InMemoryPointsLedger,
    PaymentGateway, PaymentReceipt, PointsLedger, ReferralReward,
};
