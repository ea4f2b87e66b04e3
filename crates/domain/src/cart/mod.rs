//! Cart store and related types.

mod codes;
mod pricing;
mod step;
mod store;
mod value_objects;

pub use codes::{
    CodeInputError, MAX_CODE_LEN, ReferralCode, VoucherCode, VoucherKind, normalize_code_input,
};
pub use pricing::{POINTS_PER_UNIT_SPENT, PricingQuote, quote};
pub use step::CheckoutStep;
pub use store::Cart;
pub use value_objects::{CartItem, CourseId, Money, Points};
