//! Domain layer: the effect model, ledger records and the ports the
//! application layer depends on.

pub mod chain;
pub mod effect;
pub mod handlers;
pub mod payment;
pub mod ports;
