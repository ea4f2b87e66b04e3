//! External collaborator traits and in-memory implementations.

pub mod codes;
pub mod payment;
pub mod points;

pub use codes::{CodeCatalog, InMemoryCodeCatalog, ReferralReward};
pub use payment::{CardDetails, InMemoryPaymentGateway, PaymentGateway, PaymentReceipt};
pub use points::{InMemoryPointsLedger, PointsLedger};
