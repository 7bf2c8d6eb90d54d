//! Core types for the playledger purchase bridge.
//!
//! This crate provides the foundational types shared by the store, oracle,
//! service, and client crates:
//!
//! - **Results**: [`OperationResult`], the uniform wire contract returned by
//!   every public operation
//! - **Receipts**: [`Receipt`] parsing and [`PurchaseKind`] classification
//! - **Records**: [`UserRecord`] and [`PurchaseRecord`] document shapes
//!
//! # Wire contract
//!
//! Every operation answers with `{success, message, payload?}` — the shape the
//! game client already consumes. Field names are preserved exactly; `payload`
//! is omitted when absent.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod receipt;
pub mod record;
pub mod result;

pub use receipt::{extract_receipt_json, PurchaseKind, Receipt, ReceiptError};
pub use record::{PurchaseRecord, UserRecord};
pub use result::OperationResult;
