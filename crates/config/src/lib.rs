//! Contract address configuration for the EigenLayer core-contracts chain reader.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Errors that can occur while validating the contract configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Every contract address in the configuration is the zero address.
    #[error("No EigenLayer contract address configured")]
    NothingConfigured,
}

pub type Result<T> = core::result::Result<T, Error>;

/// The deployment addresses of the EigenLayer core contracts the chain reader binds to.
///
/// The zero address means "not deployed / not wired". The reader keeps the matching
/// collaborator absent and every call that needs it fails with a missing-contract error.
///
/// The remaining core contracts (`Slasher`, `StrategyManager`) are discovered through the
/// `DelegationManager`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::Args)]
#[serde(default)]
pub struct ElContractsConfig {
    /// The address of the delegation manager contract
    #[arg(
        long,
        value_name = "ADDR",
        env = "DELEGATION_MANAGER_ADDRESS",
        default_value_t = Address::ZERO
    )]
    pub delegation_manager_address: Address,
    /// The address of the AVS directory contract
    #[arg(
        long,
        value_name = "ADDR",
        env = "AVS_DIRECTORY_ADDRESS",
        default_value_t = Address::ZERO
    )]
    pub avs_directory_address: Address,
    /// The address of the rewards coordinator contract
    #[arg(
        long,
        value_name = "ADDR",
        env = "REWARDS_COORDINATOR_ADDRESS",
        default_value_t = Address::ZERO
    )]
    pub rewards_coordinator_address: Address,
}

impl ElContractsConfig {
    /// The addresses of the core contracts in the local devnet state.
    #[must_use]
    pub fn local_testnet() -> Self {
        Self {
            delegation_manager_address: address!("a85233c63b9ee964add6f2cffe00fd84eb32338f"),
            avs_directory_address: address!("7a2088a1bfc9d81c55368ae168c2c02570cb814f"),
            rewards_coordinator_address: address!("c3e53f4d16ae77db1c982e75a937b9f60fe63690"),
        }
    }

    /// Ensure at least one contract is wired.
    ///
    /// # Errors
    ///
    /// * [`Error::NothingConfigured`] if every address is zero
    pub fn validate(&self) -> Result<()> {
        if self.delegation_manager_address.is_zero()
            && self.avs_directory_address.is_zero()
            && self.rewards_coordinator_address.is_zero()
        {
            return Err(Error::NothingConfigured);
        }
        Ok(())
    }
}
