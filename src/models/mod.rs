// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod deposit;
pub mod expense;
pub mod ledger;
pub mod trip;
pub mod user;

pub use deposit::{Deposit, DepositWithNames};
pub use expense::{Expense, ExpenseStatus, ExpenseWithNames};
pub use ledger::{StatementEntry, StatementKind, Totals, UserBalance};
pub use trip::{Trip, TripWithOwner, TripWithTotal};
pub use user::{Role, User};
