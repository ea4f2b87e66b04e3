//! REST client for the coursecart backend.
//!
//! The backend speaks JSON over HTTPS with bearer-token auth; error
//! responses carry a `{ "message": ..., "errors": [...] }` body. This crate
//! wraps that surface in a typed [`BackendClient`] and provides remote
//! implementations of the checkout collaborator traits
//! ([`checkout::CodeCatalog`], [`checkout::PointsLedger`],
//! [`checkout::PaymentGateway`]) on top of it.

pub mod client;
pub mod config;
pub mod error;
pub mod remote;

pub use client::BackendClient;
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use remote::{RemoteCodeCatalog, RemotePaymentGateway, RemotePointsLedger};
