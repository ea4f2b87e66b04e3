//! Pure pricing calculator for the cart.
//!
//! A quote is recomputed from scratch on every cart mutation; nothing here
//! is cached, so there is no invalidation to get wrong.

use serde::{Deserialize, Serialize};

use super::codes::{VoucherCode, VoucherKind};
use super::value_objects::{CartItem, Money, Points};

/// Base earn rate: points granted per whole currency unit of the final price.
pub const POINTS_PER_UNIT_SPENT: i64 = 1;

/// Derived pricing for the current cart contents and applied codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingQuote {
    /// Sum of item prices before any discount.
    pub subtotal: Money,

    /// Currency discount granted by the voucher (zero without one).
    pub discount: Money,

    /// `max(0, subtotal - discount)`.
    pub final_price: Money,

    /// Points the customer earns on a currency purchase.
    pub points_to_earn: Points,
}

impl PricingQuote {
    /// An all-zero quote, as produced for an empty cart.
    pub fn empty() -> Self {
        Self {
            subtotal: Money::zero(),
            discount: Money::zero(),
            final_price: Money::zero(),
            points_to_earn: Points::zero(),
        }
    }
}

/// Computes the quote for the given items and codes.
///
/// `referral_bonus` is the reward resolved by the backend when a referral
/// code was applied; the schedule is not known client-side, so the amount
/// arrives here as an opaque input (zero when no referral is active).
///
/// Voucher behavior by kind:
/// - `Percentage`: discounts the subtotal by `value` percent.
/// - `Fixed`: discounts by `value` cents; the final price is clamped at zero.
/// - `Points`: no currency discount; `value` is added to the points earned.
pub fn quote(
    items: &[CartItem],
    voucher: Option<&VoucherCode>,
    referral_bonus: Points,
) -> PricingQuote {
    let subtotal: Money = items.iter().map(|item| item.price).sum();

    let discount = match voucher {
        Some(v) => match v.kind {
            VoucherKind::Percentage => Money::from_cents(subtotal.cents() * v.value / 100),
            VoucherKind::Fixed => Money::from_cents(v.value),
            VoucherKind::Points => Money::zero(),
        },
        None => Money::zero(),
    };

    let final_price = subtotal.saturating_sub(discount);

    let mut points_to_earn = Points::new(final_price.dollars() * POINTS_PER_UNIT_SPENT);
    if let Some(v) = voucher {
        if v.kind == VoucherKind::Points {
            points_to_earn += Points::new(v.value);
        }
    }
    points_to_earn += referral_bonus;

    PricingQuote {
        subtotal,
        discount,
        final_price,
        points_to_earn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64) -> CartItem {
        CartItem::new(
            id,
            "Course",
            "Teacher",
            "Subject",
            Money::from_cents(cents),
            Points::new(100),
            "https://cdn.example.com/cover.png",
        )
    }

    #[test]
    fn test_empty_cart_quotes_zero() {
        let q = quote(&[], None, Points::zero());
        assert_eq!(q, PricingQuote::empty());
    }

    #[test]
    fn test_subtotal_sums_item_prices() {
        let items = vec![item("CRS-1", 10_000), item("CRS-2", 25_000)];
        let q = quote(&items, None, Points::zero());
        assert_eq!(q.subtotal.cents(), 35_000);
        assert_eq!(q.discount, Money::zero());
        assert_eq!(q.final_price.cents(), 35_000);
    }

    #[test]
    fn test_percentage_voucher() {
        // 20% off a 500.00 cart: discount 100.00, final 400.00.
        let items = vec![item("CRS-1", 50_000)];
        let voucher = VoucherCode::new("SAVE20", VoucherKind::Percentage, 20);
        let q = quote(&items, Some(&voucher), Points::zero());

        assert_eq!(q.discount.cents(), 10_000);
        assert_eq!(q.final_price.cents(), 40_000);
    }

    #[test]
    fn test_fixed_voucher() {
        let items = vec![item("CRS-1", 50_000)];
        let voucher = VoucherCode::new("MINUS50", VoucherKind::Fixed, 5_000);
        let q = quote(&items, Some(&voucher), Points::zero());

        assert_eq!(q.discount.cents(), 5_000);
        assert_eq!(q.final_price.cents(), 45_000);
    }

    #[test]
    fn test_fixed_voucher_clamps_final_price_at_zero() {
        // Fixed 1000.00 against a 500.00 cart must not go negative.
        let items = vec![item("CRS-1", 50_000)];
        let voucher = VoucherCode::new("BIGFIX", VoucherKind::Fixed, 100_000);
        let q = quote(&items, Some(&voucher), Points::zero());

        assert_eq!(q.discount.cents(), 100_000);
        assert_eq!(q.final_price, Money::zero());
    }

    #[test]
    fn test_final_price_never_negative_for_percentage_over_100() {
        let items = vec![item("CRS-1", 50_000)];
        let voucher = VoucherCode::new("ALLOFF", VoucherKind::Percentage, 150);
        let q = quote(&items, Some(&voucher), Points::zero());

        assert_eq!(q.final_price, Money::zero());
    }

    #[test]
    fn test_points_voucher_adds_bonus_not_discount() {
        let items = vec![item("CRS-1", 50_000)];
        let voucher = VoucherCode::new("EXTRA250", VoucherKind::Points, 250);
        let q = quote(&items, Some(&voucher), Points::zero());

        assert_eq!(q.discount, Money::zero());
        assert_eq!(q.final_price.cents(), 50_000);
        // Base earn (500 units) plus the voucher bonus.
        assert_eq!(q.points_to_earn.value(), 500 + 250);
    }

    #[test]
    fn test_referral_bonus_added_to_points() {
        let items = vec![item("CRS-1", 50_000)];
        let q = quote(&items, None, Points::new(75));

        assert_eq!(q.points_to_earn.value(), 500 + 75);
    }

    #[test]
    fn test_base_earn_follows_discounted_price() {
        let items = vec![item("CRS-1", 50_000)];
        let voucher = VoucherCode::new("SAVE20", VoucherKind::Percentage, 20);
        let q = quote(&items, Some(&voucher), Points::zero());

        // Earn on 400.00, not on the subtotal.
        assert_eq!(q.points_to_earn.value(), 400);
    }
}
