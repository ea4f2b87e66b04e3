//! Cart store implementation.

use serde::{Deserialize, Serialize};

use super::codes::{ReferralCode, VoucherCode};
use super::pricing::{self, PricingQuote};
use super::value_objects::{CartItem, CourseId, Money, Points};

/// The canonical cart: line items plus at most one voucher and one
/// referral code.
///
/// Totals are recomputed as sums over the current items after every
/// mutation; they are never adjusted independently and cannot go stale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in insertion order, unique by course ID.
    items: Vec<CartItem>,

    /// Applied voucher, if any.
    voucher: Option<VoucherCode>,

    /// Applied referral code, if any.
    referral: Option<ReferralCode>,

    /// Sum of item currency prices.
    total_price: Money,

    /// Sum of item points prices.
    total_points_price: Points,
}

// Query methods
impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the line for a course, if present.
    pub fn get_item(&self, course_id: &CourseId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.course_id == course_id)
    }

    /// Returns true if the cart holds a line for the course.
    pub fn contains(&self, course_id: &CourseId) -> bool {
        self.get_item(course_id).is_some()
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the sum of item currency prices.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Returns the sum of item points prices.
    pub fn total_points_price(&self) -> Points {
        self.total_points_price
    }

    /// Returns the applied voucher, if any.
    pub fn voucher(&self) -> Option<&VoucherCode> {
        self.voucher.as_ref()
    }

    /// Returns the applied referral code, if any.
    pub fn referral(&self) -> Option<&ReferralCode> {
        self.referral.as_ref()
    }

    /// Computes the quote for the current contents.
    ///
    /// `referral_bonus` is the backend-resolved reward for the applied
    /// referral code (zero when none is active).
    pub fn pricing(&self, referral_bonus: Points) -> PricingQuote {
        pricing::quote(&self.items, self.voucher.as_ref(), referral_bonus)
    }
}

// Mutation methods
impl Cart {
    /// Adds a line to the cart.
    ///
    /// Idempotent on course ID: adding a course that is already in the cart
    /// leaves the cart unchanged and returns false.
    pub fn add_item(&mut self, item: CartItem) -> bool {
        if self.contains(&item.course_id) {
            tracing::debug!(course_id = %item.course_id, "duplicate add ignored");
            return false;
        }

        self.items.push(item);
        self.recompute_totals();
        true
    }

    /// Removes the line for a course.
    ///
    /// A no-op returning false when the course is not in the cart.
    pub fn remove_item(&mut self, course_id: &CourseId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.course_id != course_id);

        if self.items.len() == before {
            return false;
        }

        self.recompute_totals();
        true
    }

    /// Empties the cart, dropping both codes.
    pub fn clear(&mut self) {
        self.items.clear();
        self.voucher = None;
        self.referral = None;
        self.recompute_totals();
    }

    /// Stores a resolved voucher, replacing any previous one.
    pub fn set_voucher(&mut self, voucher: VoucherCode) {
        self.voucher = Some(voucher);
    }

    /// Removes the applied voucher, returning it.
    pub fn clear_voucher(&mut self) -> Option<VoucherCode> {
        self.voucher.take()
    }

    /// Stores a referral code, replacing any previous one.
    pub fn set_referral(&mut self, referral: ReferralCode) {
        self.referral = Some(referral);
    }

    /// Removes the applied referral code, returning it.
    pub fn clear_referral(&mut self) -> Option<ReferralCode> {
        self.referral.take()
    }

    fn recompute_totals(&mut self) {
        self.total_price = self.items.iter().map(|item| item.price).sum();
        self.total_points_price = self.items.iter().map(|item| item.points_price).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::super::codes::VoucherKind;
    use super::*;

    fn item(id: &str, cents: i64, points: i64) -> CartItem {
        CartItem::new(
            id,
            "Course",
            "Teacher",
            "Subject",
            Money::from_cents(cents),
            Points::new(points),
            "https://cdn.example.com/cover.png",
        )
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
        assert_eq!(cart.total_points_price(), Points::zero());
        assert!(cart.voucher().is_none());
        assert!(cart.referral().is_none());
    }

    #[test]
    fn test_add_item_recomputes_totals() {
        let mut cart = Cart::new();
        assert!(cart.add_item(item("CRS-1", 10_000, 100)));
        assert!(cart.add_item(item("CRS-2", 25_000, 250)));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_price().cents(), 35_000);
        assert_eq!(cart.total_points_price().value(), 350);
    }

    #[test]
    fn test_add_same_course_twice_is_idempotent() {
        let mut cart = Cart::new();
        assert!(cart.add_item(item("CRS-1", 10_000, 100)));
        assert!(!cart.add_item(item("CRS-1", 10_000, 100)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price().cents(), 10_000);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(item("CRS-1", 10_000, 100));
        cart.add_item(item("CRS-2", 25_000, 250));

        assert!(cart.remove_item(&CourseId::new("CRS-1")));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price().cents(), 25_000);
        assert_eq!(cart.total_points_price().value(), 250);
    }

    #[test]
    fn test_remove_missing_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("CRS-1", 10_000, 100));

        assert!(!cart.remove_item(&CourseId::new("CRS-404")));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price().cents(), 10_000);
    }

    #[test]
    fn test_clear_drops_items_and_codes() {
        let mut cart = Cart::new();
        cart.add_item(item("CRS-1", 10_000, 100));
        cart.set_voucher(VoucherCode::new("SAVE20", VoucherKind::Percentage, 20));
        cart.set_referral(ReferralCode::new("REF-1"));

        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.voucher().is_none());
        assert!(cart.referral().is_none());
        assert_eq!(cart.total_price(), Money::zero());
        assert_eq!(cart.total_points_price(), Points::zero());
    }

    #[test]
    fn test_totals_match_item_sums_after_every_mutation() {
        let mut cart = Cart::new();
        let check = |cart: &Cart| {
            let price: Money = cart.items().iter().map(|i| i.price).sum();
            let points: Points = cart.items().iter().map(|i| i.points_price).sum();
            assert_eq!(cart.total_price(), price);
            assert_eq!(cart.total_points_price(), points);
        };

        cart.add_item(item("CRS-1", 10_000, 100));
        check(&cart);
        cart.add_item(item("CRS-2", 25_000, 250));
        check(&cart);
        cart.remove_item(&CourseId::new("CRS-1"));
        check(&cart);
        cart.clear();
        check(&cart);
    }

    #[test]
    fn test_voucher_replaces_previous() {
        let mut cart = Cart::new();
        cart.set_voucher(VoucherCode::new("SAVE10", VoucherKind::Percentage, 10));
        cart.set_voucher(VoucherCode::new("SAVE20", VoucherKind::Percentage, 20));

        assert_eq!(cart.voucher().unwrap().code, "SAVE20");
    }

    #[test]
    fn test_clear_voucher_returns_it() {
        let mut cart = Cart::new();
        cart.set_voucher(VoucherCode::new("SAVE10", VoucherKind::Percentage, 10));

        let removed = cart.clear_voucher().unwrap();
        assert_eq!(removed.code, "SAVE10");
        assert!(cart.voucher().is_none());
        assert!(cart.clear_voucher().is_none());
    }

    #[test]
    fn test_pricing_uses_stored_voucher() {
        let mut cart = Cart::new();
        cart.add_item(item("CRS-1", 50_000, 500));
        cart.set_voucher(VoucherCode::new("SAVE20", VoucherKind::Percentage, 20));

        let q = cart.pricing(Points::zero());
        assert_eq!(q.discount.cents(), 10_000);
        assert_eq!(q.final_price.cents(), 40_000);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut cart = Cart::new();
        cart.add_item(item("CRS-1", 10_000, 100));
        cart.set_referral(ReferralCode::new("REF-1"));

        let json = serde_json::to_string(&cart).unwrap();
        let deserialized: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.total_price().cents(), 10_000);
        assert_eq!(deserialized.referral().unwrap().as_str(), "REF-1");
    }
}
