use std::sync::Arc;

use alloy_network::Ethereum;
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_transport::Transport;
use chainio_config::ElContractsConfig;
use chainio_contracts::{
    IAVSDirectory, IDelegationManager, IRewardsCoordinator, ISlasher, IStrategyManager,
};
use chainio_logging::{info, warn, Logger};
use tracing::Instrument;

use crate::contracts::{
    AvsDirectoryCalls, DelegationManagerCalls, RewardsCoordinatorCalls, SlasherCalls,
    StrategyManagerCalls,
};
use crate::error::Result;

/// The core-contract handles a chain reader is assembled from.
///
/// Each handle is independently optional. An absent handle is permanent for the reader built from
/// these bindings: calls that need it fail with
/// [`Error::MissingContract`](crate::error::Error::MissingContract).
#[derive(Clone, Default)]
pub struct ContractBindings {
    pub delegation_manager: Option<Arc<dyn DelegationManagerCalls>>,
    pub strategy_manager: Option<Arc<dyn StrategyManagerCalls>>,
    pub avs_directory: Option<Arc<dyn AvsDirectoryCalls>>,
    pub slasher: Option<Arc<dyn SlasherCalls>>,
    pub rewards_coordinator: Option<Arc<dyn RewardsCoordinatorCalls>>,
}

impl core::fmt::Debug for ContractBindings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContractBindings")
            .field("delegation_manager", &self.delegation_manager.is_some())
            .field("strategy_manager", &self.strategy_manager.is_some())
            .field("avs_directory", &self.avs_directory.is_some())
            .field("slasher", &self.slasher.is_some())
            .field("rewards_coordinator", &self.rewards_coordinator.is_some())
            .finish()
    }
}

impl ContractBindings {
    #[must_use]
    pub fn with_delegation_manager(mut self, contract: Arc<dyn DelegationManagerCalls>) -> Self {
        self.delegation_manager = Some(contract);
        self
    }

    #[must_use]
    pub fn with_strategy_manager(mut self, contract: Arc<dyn StrategyManagerCalls>) -> Self {
        self.strategy_manager = Some(contract);
        self
    }

    #[must_use]
    pub fn with_avs_directory(mut self, contract: Arc<dyn AvsDirectoryCalls>) -> Self {
        self.avs_directory = Some(contract);
        self
    }

    #[must_use]
    pub fn with_slasher(mut self, contract: Arc<dyn SlasherCalls>) -> Self {
        self.slasher = Some(contract);
        self
    }

    #[must_use]
    pub fn with_rewards_coordinator(mut self, contract: Arc<dyn RewardsCoordinatorCalls>) -> Self {
        self.rewards_coordinator = Some(contract);
        self
    }

    /// Bind the contracts named in `config`.
    ///
    /// A zero address leaves the matching handle absent. The `Slasher` and `StrategyManager` are
    /// discovered through the `DelegationManager`, so they are absent whenever it is.
    ///
    /// # Errors
    ///
    /// * Reading the `Slasher` or `StrategyManager` address from the `DelegationManager` failed.
    ///   Nothing is returned in that case, not even the handles that could be bound.
    pub async fn from_config<T, P>(
        config: &ElContractsConfig,
        provider: P,
        logger: &Logger,
    ) -> Result<Self>
    where
        T: Transport + Clone,
        P: Provider<T, Ethereum> + Clone + 'static,
    {
        Self::resolve(config, provider)
            .instrument(logger.span().clone())
            .await
    }

    async fn resolve<T, P>(config: &ElContractsConfig, provider: P) -> Result<Self>
    where
        T: Transport + Clone,
        P: Provider<T, Ethereum> + Clone + 'static,
    {
        let mut bindings = Self::default();

        if let Err(err) = config.validate() {
            warn!(%err, "The reader will have no contracts bound");
        }

        if config.delegation_manager_address.is_zero() {
            warn!("DelegationManager address not provided, the calls to the contract will not work");
        } else {
            let delegation_manager =
                IDelegationManager::new(config.delegation_manager_address, provider.clone());

            let slasher_addr = delegation_manager.slasher().call().await.map(|a| a._0)?;
            info!(%slasher_addr, "Resolved Slasher address");
            let strategy_manager_addr = delegation_manager
                .strategyManager()
                .call()
                .await
                .map(|a| a._0)?;
            info!(%strategy_manager_addr, "Resolved StrategyManager address");

            bindings.slasher = Some(Arc::new(ISlasher::new(slasher_addr, provider.clone())));
            bindings.strategy_manager = Some(Arc::new(IStrategyManager::new(
                strategy_manager_addr,
                provider.clone(),
            )));
            bindings.delegation_manager = Some(Arc::new(delegation_manager));
        }

        if config.avs_directory_address.is_zero() {
            warn!("AVSDirectory address not provided, the calls to the contract will not work");
        } else {
            bindings.avs_directory = Some(Arc::new(IAVSDirectory::new(
                config.avs_directory_address,
                provider.clone(),
            )));
        }

        if config.rewards_coordinator_address.is_zero() {
            warn!("RewardsCoordinator address not provided, the calls to the contract will not work");
        } else {
            bindings.rewards_coordinator = Some(Arc::new(IRewardsCoordinator::new(
                config.rewards_coordinator_address,
                provider,
            )));
        }

        Ok(bindings)
    }

    /// Bind only the `DelegationManager` and `AVSDirectory`, leaving the other contracts absent.
    ///
    /// A zero address leaves the matching handle absent.
    #[must_use]
    pub fn legacy<T, P>(
        delegation_manager_addr: Address,
        avs_directory_addr: Address,
        provider: P,
    ) -> Self
    where
        T: Transport + Clone,
        P: Provider<T, Ethereum> + Clone + 'static,
    {
        let mut bindings = Self::default();
        if !delegation_manager_addr.is_zero() {
            bindings.delegation_manager = Some(Arc::new(IDelegationManager::new(
                delegation_manager_addr,
                provider.clone(),
            )));
        }
        if !avs_directory_addr.is_zero() {
            bindings.avs_directory = Some(Arc::new(IAVSDirectory::new(
                avs_directory_addr,
                provider,
            )));
        }
        bindings
    }
}
