// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod export;
pub mod password;
pub mod receipts;

pub use receipts::ReceiptStore;
