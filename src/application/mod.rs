//! Application layer containing the script pipeline and the mock ledgers.
//!
//! This module defines the `SandboxRunner`, the primary entry point for
//! running scripts. It turns script text into a plan with the `Interpreter`
//! and mirrors every effect into the `ChainStore` and `PaymentStore`, both of
//! which persist through a `Ledger` over an injected key-value backing.

pub mod chain;
pub mod interpreter;
pub mod ledger;
pub mod library;
pub mod payments;
pub mod runner;
