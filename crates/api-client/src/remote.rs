//! Remote implementations of the checkout collaborator traits.
//!
//! Each adapter wraps the shared [`BackendClient`] and maps backend
//! rejections into the corresponding [`CheckoutError`] variants so the
//! checkout flow is oblivious to whether its collaborators are in-memory
//! or remote.

use async_trait::async_trait;
use checkout::{
    CardDetails, CheckoutError, CodeCatalog, PaymentGateway, PaymentReceipt, PointsLedger,
    ReferralReward,
};
use common::CustomerId;
use domain::{Money, Points, ReferralCode, VoucherCode, VoucherKind};
use serde::{Deserialize, Serialize};

use crate::client::BackendClient;
use crate::error::ApiError;

// -- Wire types matching the backend schemas ---------------------------------

#[derive(Debug, Serialize)]
struct ValidateCodeRequest<'a> {
    code: &'a str,
}

/// Voucher definition as returned by `POST /vouchers/validate`.
#[derive(Debug, Deserialize)]
struct VoucherBody {
    code: String,
    #[serde(rename = "type")]
    kind: VoucherKind,
    value: i64,
}

/// Referral resolution as returned by `POST /referrals/validate`.
#[derive(Debug, Deserialize)]
struct ReferralBody {
    code: String,
    #[serde(rename = "bonusPoints")]
    bonus_points: i64,
}

#[derive(Debug, Deserialize)]
struct BalanceBody {
    balance: i64,
}

#[derive(Debug, Serialize)]
struct PointsMutationRequest {
    #[serde(rename = "customerId")]
    customer_id: CustomerId,
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct PointsMutationBody {
    balance: i64,
}

#[derive(Debug, Serialize)]
struct ChargeRequest<'a> {
    #[serde(rename = "customerId")]
    customer_id: CustomerId,
    #[serde(rename = "amountCents")]
    amount_cents: i64,
    card: &'a CardDetails,
}

#[derive(Debug, Deserialize)]
struct ChargeBody {
    #[serde(rename = "paymentId")]
    payment_id: String,
}

// -- Error mapping -----------------------------------------------------------

/// True for statuses that mean "the backend understood and said no to this
/// specific code", as opposed to transport or server trouble.
fn is_rejection(status: u16) -> bool {
    matches!(status, 400 | 404 | 409 | 422)
}

fn code_error(code: &str, err: ApiError) -> CheckoutError {
    match &err {
        ApiError::Backend {
            status, message, ..
        } if is_rejection(*status) => CheckoutError::CodeRejected {
            code: code.to_string(),
            reason: message.clone(),
        },
        _ => CheckoutError::CodeCatalog(err.to_string()),
    }
}

fn payment_error(err: ApiError) -> CheckoutError {
    match &err {
        ApiError::Backend { message, status, .. } if is_rejection(*status) || *status == 402 => {
            CheckoutError::PaymentGateway(message.clone())
        }
        _ => CheckoutError::PaymentGateway(err.to_string()),
    }
}

fn ledger_error(err: ApiError) -> CheckoutError {
    match &err {
        ApiError::Backend { message, status, .. } if is_rejection(*status) => {
            CheckoutError::PointsLedger(message.clone())
        }
        _ => CheckoutError::PointsLedger(err.to_string()),
    }
}

// -- Adapters ----------------------------------------------------------------

/// [`CodeCatalog`] backed by the backend's validation endpoints.
#[derive(Debug, Clone)]
pub struct RemoteCodeCatalog {
    client: BackendClient,
}

impl RemoteCodeCatalog {
    /// Creates a catalog over the shared client.
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CodeCatalog for RemoteCodeCatalog {
    async fn resolve_voucher(&self, code: &str) -> Result<VoucherCode, CheckoutError> {
        let body: VoucherBody = self
            .client
            .post_json(
                "POST /vouchers/validate",
                "vouchers/validate",
                &ValidateCodeRequest { code },
            )
            .await
            .map_err(|e| code_error(code, e))?;

        Ok(VoucherCode::new(body.code, body.kind, body.value))
    }

    async fn resolve_referral(&self, code: &str) -> Result<ReferralReward, CheckoutError> {
        let body: ReferralBody = self
            .client
            .post_json(
                "POST /referrals/validate",
                "referrals/validate",
                &ValidateCodeRequest { code },
            )
            .await
            .map_err(|e| code_error(code, e))?;

        Ok(ReferralReward {
            code: ReferralCode::new(body.code),
            bonus: Points::new(body.bonus_points),
        })
    }
}

/// [`PointsLedger`] backed by the backend's points endpoints.
#[derive(Debug, Clone)]
pub struct RemotePointsLedger {
    client: BackendClient,
}

impl RemotePointsLedger {
    /// Creates a ledger over the shared client.
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PointsLedger for RemotePointsLedger {
    async fn balance(&self, customer_id: CustomerId) -> Result<Points, CheckoutError> {
        let body: BalanceBody = self
            .client
            .get_json(
                "GET /points/balance",
                &format!("points/balance?customerId={customer_id}"),
            )
            .await
            .map_err(ledger_error)?;

        Ok(Points::new(body.balance))
    }

    async fn deduct(
        &self,
        customer_id: CustomerId,
        amount: Points,
    ) -> Result<Points, CheckoutError> {
        let body: PointsMutationBody = self
            .client
            .post_json(
                "POST /points/deduct",
                "points/deduct",
                &PointsMutationRequest {
                    customer_id,
                    amount: amount.value(),
                },
            )
            .await
            .map_err(ledger_error)?;

        Ok(Points::new(body.balance))
    }

    async fn award(
        &self,
        customer_id: CustomerId,
        amount: Points,
    ) -> Result<Points, CheckoutError> {
        let body: PointsMutationBody = self
            .client
            .post_json(
                "POST /points/award",
                "points/award",
                &PointsMutationRequest {
                    customer_id,
                    amount: amount.value(),
                },
            )
            .await
            .map_err(ledger_error)?;

        Ok(Points::new(body.balance))
    }
}

/// [`PaymentGateway`] backed by the backend's charge endpoint.
#[derive(Debug, Clone)]
pub struct RemotePaymentGateway {
    client: BackendClient,
}

impl RemotePaymentGateway {
    /// Creates a gateway over the shared client.
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentGateway for RemotePaymentGateway {
    async fn charge(
        &self,
        customer_id: CustomerId,
        amount: Money,
        card: &CardDetails,
    ) -> Result<PaymentReceipt, CheckoutError> {
        let body: ChargeBody = self
            .client
            .post_json(
                "POST /payments/charge",
                "payments/charge",
                &ChargeRequest {
                    customer_id,
                    amount_cents: amount.cents(),
                    card,
                },
            )
            .await
            .map_err(payment_error)?;

        Ok(PaymentReceipt {
            payment_id: body.payment_id,
        })
    }
}
