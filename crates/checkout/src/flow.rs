//! Checkout flow coordinator.

use common::CustomerId;
use domain::{
    Cart, CartItem, CheckoutStep, CourseId, Points, PricingQuote, ReferralCode, VoucherCode,
    normalize_code_input,
};

use crate::error::CheckoutError;
use crate::services::codes::CodeCatalog;
use crate::services::payment::{CardDetails, PaymentGateway, PaymentReceipt};
use crate::services::points::PointsLedger;

/// Outcome of a completed points purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsReceipt {
    /// Points deducted for the purchase.
    pub spent: Points,

    /// Balance remaining after the deduction.
    pub remaining: Points,
}

/// Drives one customer session through the purchase flow.
///
/// Owns the cart and the current [`CheckoutStep`], gates every transition
/// on authentication and balance checks, and calls the external
/// collaborators. All errors are values; the flow never advances past a
/// failed guard.
pub struct CheckoutFlow<P, L, C>
where
    P: PaymentGateway,
    L: PointsLedger,
    C: CodeCatalog,
{
    cart: Cart,
    step: CheckoutStep,
    customer: Option<CustomerId>,
    referral_bonus: Points,
    in_flight: bool,
    payment: P,
    ledger: L,
    catalog: C,
}

impl<P, L, C> CheckoutFlow<P, L, C>
where
    P: PaymentGateway,
    L: PointsLedger,
    C: CodeCatalog,
{
    /// Creates a flow for an anonymous session with an empty cart.
    pub fn new(payment: P, ledger: L, catalog: C) -> Self {
        Self {
            cart: Cart::new(),
            step: CheckoutStep::Cart,
            customer: None,
            referral_bonus: Points::zero(),
            in_flight: false,
            payment,
            ledger,
            catalog,
        }
    }

    /// Marks the session as authenticated.
    pub fn sign_in(&mut self, customer_id: CustomerId) {
        self.customer = Some(customer_id);
    }

    /// Drops the authenticated customer.
    pub fn sign_out(&mut self) {
        self.customer = None;
    }

    /// Returns true if a customer is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.customer.is_some()
    }

    /// Returns the current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Returns the cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns true while a network call is in flight.
    ///
    /// The embedding UI disables its submit controls on this flag.
    pub fn is_processing(&self) -> bool {
        self.in_flight
    }

    /// Returns the bonus resolved for the applied referral code.
    pub fn referral_bonus(&self) -> Points {
        self.referral_bonus
    }

    /// Computes the quote for the current cart and codes.
    pub fn pricing(&self) -> PricingQuote {
        self.cart.pricing(self.referral_bonus)
    }
}

// Cart mutations, gated on the step machine.
impl<P, L, C> CheckoutFlow<P, L, C>
where
    P: PaymentGateway,
    L: PointsLedger,
    C: CodeCatalog,
{
    /// Adds a course to the cart; idempotent on course ID.
    pub fn add_item(&mut self, item: CartItem) -> Result<bool, CheckoutError> {
        self.require_cart_step("add item")?;
        Ok(self.cart.add_item(item))
    }

    /// Removes a course from the cart; a no-op when absent.
    pub fn remove_item(&mut self, course_id: &CourseId) -> Result<bool, CheckoutError> {
        self.require_cart_step("remove item")?;
        Ok(self.cart.remove_item(course_id))
    }

    /// Empties the cart after an explicit confirmation in the UI.
    pub fn empty_cart(&mut self) -> Result<(), CheckoutError> {
        self.require_cart_step("empty cart")?;
        self.cart.clear();
        self.referral_bonus = Points::zero();
        Ok(())
    }

    /// Removes the applied voucher, restoring the un-discounted quote.
    pub fn remove_voucher(&mut self) -> Result<Option<VoucherCode>, CheckoutError> {
        self.require_cart_step("remove voucher")?;
        Ok(self.cart.clear_voucher())
    }

    /// Removes the applied referral code and its resolved bonus.
    pub fn remove_referral(&mut self) -> Result<Option<ReferralCode>, CheckoutError> {
        self.require_cart_step("remove referral")?;
        self.referral_bonus = Points::zero();
        Ok(self.cart.clear_referral())
    }

    /// Validates and applies a voucher code.
    ///
    /// Failure is non-fatal: the cart and any previously applied voucher
    /// are left untouched.
    pub async fn apply_voucher(&mut self, raw: &str) -> Result<(), CheckoutError> {
        self.require_cart_step("apply voucher")?;
        let code = normalize_code_input(raw)?;

        self.begin_request()?;
        let result = self.catalog.resolve_voucher(&code).await;
        self.in_flight = false;

        let voucher = result?;
        tracing::debug!(code = %voucher.code, kind = %voucher.kind, "voucher applied");
        self.cart.set_voucher(voucher);
        Ok(())
    }

    /// Validates and applies a referral code, resolving its reward.
    ///
    /// Failure is non-fatal, as for vouchers.
    pub async fn apply_referral(&mut self, raw: &str) -> Result<Points, CheckoutError> {
        self.require_cart_step("apply referral")?;
        let code = normalize_code_input(raw)?;

        self.begin_request()?;
        let result = self.catalog.resolve_referral(&code).await;
        self.in_flight = false;

        let reward = result?;
        tracing::debug!(code = %reward.code, bonus = %reward.bonus, "referral applied");
        self.cart.set_referral(reward.code);
        self.referral_bonus = reward.bonus;
        Ok(reward.bonus)
    }
}

// Step transitions.
impl<P, L, C> CheckoutFlow<P, L, C>
where
    P: PaymentGateway,
    L: PointsLedger,
    C: CodeCatalog,
{
    /// `cart -> payment`: moves to the card payment step.
    ///
    /// Fails closed when the customer is not signed in or the cart is
    /// empty; the step stays at `cart`.
    pub fn begin_card_payment(&mut self) -> Result<(), CheckoutError> {
        if !self.step.can_begin_payment() {
            return Err(CheckoutError::InvalidStep {
                current: self.step,
                action: "begin payment",
            });
        }
        self.require_customer("begin payment")?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// The explicit back edge: `payment -> cart` or `points_payment -> cart`.
    pub fn go_back(&mut self) -> Result<(), CheckoutError> {
        if !self.step.can_go_back() {
            return Err(CheckoutError::InvalidStep {
                current: self.step,
                action: "go back",
            });
        }

        self.step = CheckoutStep::Cart;
        Ok(())
    }

    /// `payment -> success`: submits card details to the gateway.
    ///
    /// On success the cart is cleared, earned points are credited, and the
    /// flow enters the terminal `success` step. On failure the step stays
    /// at `payment` with the error surfaced inline.
    #[tracing::instrument(skip(self, card), fields(step = %self.step))]
    pub async fn submit_card_payment(
        &mut self,
        card: &CardDetails,
    ) -> Result<PaymentReceipt, CheckoutError> {
        if !self.step.can_submit_payment() {
            return Err(CheckoutError::InvalidStep {
                current: self.step,
                action: "submit payment",
            });
        }
        let customer_id = self.require_customer("submit payment")?;
        let quote = self.pricing();

        // Counted only once the guards have passed; rejected attempts must
        // not skew started against completed/failed.
        metrics::counter!("checkout_started_total").increment(1);
        let started = std::time::Instant::now();

        self.begin_request()?;
        let result = self
            .payment
            .charge(customer_id, quote.final_price, card)
            .await;
        self.in_flight = false;

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(e) => {
                metrics::counter!("checkout_failed").increment(1);
                tracing::warn!(%customer_id, error = %e, "card payment failed");
                return Err(e);
            }
        };

        // The purchase is complete once the charge succeeds; a failed earn
        // credit must not undo it.
        if !quote.points_to_earn.is_zero() {
            if let Err(e) = self.ledger.award(customer_id, quote.points_to_earn).await {
                tracing::warn!(%customer_id, error = %e, "points award failed after charge");
            }
        }

        self.enter_success();

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);
        metrics::counter!("checkout_completed").increment(1);
        tracing::info!(%customer_id, payment_id = %receipt.payment_id, duration, "card checkout completed");

        Ok(receipt)
    }

    /// Points purchase from the `cart` step.
    ///
    /// When the ledger balance covers the cart's points price, the points
    /// are deducted and the flow goes straight to `success`. Otherwise the
    /// flow enters the `points_payment` dead-end and reports the shortfall;
    /// the only exit from there is [`Self::go_back`].
    #[tracing::instrument(skip(self), fields(step = %self.step))]
    pub async fn pay_with_points(&mut self) -> Result<PointsReceipt, CheckoutError> {
        if !self.step.can_begin_payment() {
            return Err(CheckoutError::InvalidStep {
                current: self.step,
                action: "pay with points",
            });
        }
        let customer_id = self.require_customer("pay with points")?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        metrics::counter!("checkout_started_total").increment(1);
        let started = std::time::Instant::now();

        let required = self.cart.total_points_price();

        self.begin_request()?;
        let result = self.ledger.balance(customer_id).await;
        self.in_flight = false;
        let available = result?;

        if available < required {
            self.step = CheckoutStep::PointsPayment;
            metrics::counter!("checkout_failed").increment(1);
            tracing::info!(%customer_id, %required, %available, "points balance short, entering dead-end step");
            return Err(CheckoutError::InsufficientPoints {
                required,
                available,
            });
        }

        self.begin_request()?;
        let result = self.ledger.deduct(customer_id, required).await;
        self.in_flight = false;

        let remaining = match result {
            Ok(remaining) => remaining,
            Err(e) => {
                metrics::counter!("checkout_failed").increment(1);
                tracing::warn!(%customer_id, error = %e, "points deduction failed");
                return Err(e);
            }
        };

        self.enter_success();

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);
        metrics::counter!("checkout_completed").increment(1);
        tracing::info!(%customer_id, spent = %required, duration, "points checkout completed");

        Ok(PointsReceipt {
            spent: required,
            remaining,
        })
    }

    /// Clears the cart and enters the terminal step.
    ///
    /// Ordering matters: the cart must already be empty when `success`
    /// becomes observable.
    fn enter_success(&mut self) {
        self.cart.clear();
        self.referral_bonus = Points::zero();
        self.step = CheckoutStep::Success;
    }

    fn require_cart_step(&self, action: &'static str) -> Result<(), CheckoutError> {
        if !self.step.can_modify_cart() {
            return Err(CheckoutError::InvalidStep {
                current: self.step,
                action,
            });
        }
        Ok(())
    }

    fn require_customer(&self, action: &'static str) -> Result<CustomerId, CheckoutError> {
        self.customer
            .ok_or(CheckoutError::NotAuthenticated { action })
    }

    fn begin_request(&mut self) -> Result<(), CheckoutError> {
        if self.in_flight {
            return Err(CheckoutError::OperationInFlight);
        }
        self.in_flight = true;
        Ok(())
    }
}
