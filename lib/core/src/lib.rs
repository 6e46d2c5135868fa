//! Core domain types and utilities for the PLMS web client.
//!
//! This crate provides the foundational identifier types and error handling
//! shared by the assistant, payment and web crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ChatSessionId, LoanId, MessageId, ParseIdError, RepaymentId};
