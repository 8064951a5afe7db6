//! Read-only client for the EigenLayer core contracts.
//!
//! [`ElChainReader`] aggregates the `DelegationManager`, `StrategyManager`, `AVSDirectory`,
//! `Slasher` and `RewardsCoordinator` behind one set of typed accessors (see [`ElReader`]).

pub mod bindings;
pub mod context;
pub mod contracts;
pub mod error;
pub mod reader;
pub mod types;

pub use bindings::ContractBindings;
pub use context::CallContext;
pub use contracts::{ContractBackend, EthBackend};
pub use reader::{ElChainReader, ElReader};
pub use types::Operator;

#[cfg(test)]
mod test_utils;
