//! Banking backend API boundary
//!
//! The `BankingApi` trait abstracts the four remote contracts the transfer
//! workflow consumes (`GET /accounts`, `GET /accounts/lookup/{number}`,
//! `POST /transactions`, `GET /transactions/{id}/receipt`). `HttpBankingApi`
//! is the production implementation; `MockBankingApi` is a deterministic
//! in-memory backend for tests and demos.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod mock;
pub mod types;

pub use client::{BankingApi, HttpBankingApi};
pub use error::{ApiError, Result};
pub use mock::MockBankingApi;
pub use types::*;
