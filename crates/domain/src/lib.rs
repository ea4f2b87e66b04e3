//! Domain layer for the coursecart purchase flow.
//!
//! This crate provides the core cart types:
//! - Cart store owning line items and applied codes
//! - Pure pricing calculator (discount, final price, points to earn)
//! - Voucher/referral code types with typed input validation
//! - Checkout step state machine

pub mod cart;

pub use cart::{
    Cart, CartItem, CheckoutStep, CodeInputError, CourseId, Money, Points, PricingQuote,
    ReferralCode, VoucherCode, VoucherKind, normalize_code_input, quote,
};
