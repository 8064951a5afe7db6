use core::future::Future;
use std::sync::Arc;

use alloy_network::Ethereum;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_transport::Transport;
use async_trait::async_trait;
use chainio_config::ElContractsConfig;
use chainio_logging::{debug, trace, Logger};
use tracing::Instrument;

use crate::bindings::ContractBindings;
use crate::context::CallContext;
use crate::contracts::{
    AvsDirectoryCalls, ContractBackend, DelegationManagerCalls, Erc20Calls, EthBackend,
    RewardsCoordinatorCalls, SlasherCalls, StrategyCalls, StrategyManagerCalls,
};
use crate::error::{Error, Result};
use crate::types::{DistributionRoot, Operator, RewardsMerkleClaim};

/// The component tag attached to the reader's logger.
pub const COMPONENT: &str = "elcontracts/reader";

const DELEGATION_MANAGER: &str = "DelegationManager";
const STRATEGY_MANAGER: &str = "StrategyManager";
const AVS_DIRECTORY: &str = "AVSDirectory";
const SLASHER: &str = "Slasher";
const REWARDS_COORDINATOR: &str = "RewardsCoordinator";

#[async_trait]
pub trait ElReader: Send + Sync {
    type Strategy: StrategyCalls;
    type Token: Erc20Calls;

    async fn is_operator_registered(&self, ctx: &CallContext, operator: &Operator) -> Result<bool>;

    async fn get_operator_details(&self, ctx: &CallContext, operator: &Operator)
        -> Result<Operator>;

    async fn get_strategy_and_underlying_token(
        &self,
        ctx: &CallContext,
        strategy_addr: Address,
    ) -> Result<(Self::Strategy, Address)>;

    async fn get_strategy_and_underlying_erc20_token(
        &self,
        ctx: &CallContext,
        strategy_addr: Address,
    ) -> Result<(Self::Strategy, Self::Token, Address)>;

    async fn service_manager_can_slash_operator_until_block(
        &self,
        ctx: &CallContext,
        operator_addr: Address,
        service_manager_addr: Address,
    ) -> Result<u32>;

    async fn operator_is_frozen(&self, ctx: &CallContext, operator_addr: Address) -> Result<bool>;

    async fn get_operator_shares_in_strategy(
        &self,
        ctx: &CallContext,
        operator_addr: Address,
        strategy_addr: Address,
    ) -> Result<U256>;

    async fn get_staker_strategy_shares(
        &self,
        ctx: &CallContext,
        staker_addr: Address,
        strategy_addr: Address,
    ) -> Result<U256>;

    async fn calculate_delegation_approval_digest_hash(
        &self,
        ctx: &CallContext,
        staker: Address,
        operator: Address,
        delegation_approver: Address,
        approver_salt: B256,
        expiry: U256,
    ) -> Result<B256>;

    async fn calculate_operator_avs_registration_digest_hash(
        &self,
        ctx: &CallContext,
        operator: Address,
        avs: Address,
        salt: B256,
        expiry: U256,
    ) -> Result<B256>;

    async fn get_distribution_roots_length(&self, ctx: &CallContext) -> Result<U256>;

    async fn curr_rewards_calculation_end_timestamp(&self, ctx: &CallContext) -> Result<u32>;

    async fn get_current_claimable_distribution_root(
        &self,
        ctx: &CallContext,
    ) -> Result<DistributionRoot>;

    async fn get_root_index_from_hash(&self, ctx: &CallContext, root_hash: B256) -> Result<u32>;

    async fn get_cumulative_claimed(
        &self,
        ctx: &CallContext,
        earner: Address,
        token: Address,
    ) -> Result<U256>;

    async fn check_claim(&self, ctx: &CallContext, claim: RewardsMerkleClaim) -> Result<bool>;

    async fn get_operator_avs_split(
        &self,
        ctx: &CallContext,
        operator: Address,
        avs: Address,
    ) -> Result<u16>;
}

/// Read-only access to the EigenLayer core contracts.
///
/// The reader holds no mutable state. Every accessor is a point-in-time query bound to the
/// [`CallContext`] it is given, and the reader can be shared freely between tasks.
pub struct ElChainReader<B> {
    logger: Logger,
    slasher: Option<Arc<dyn SlasherCalls>>,
    delegation_manager: Option<Arc<dyn DelegationManagerCalls>>,
    strategy_manager: Option<Arc<dyn StrategyManagerCalls>>,
    avs_directory: Option<Arc<dyn AvsDirectoryCalls>>,
    rewards_coordinator: Option<Arc<dyn RewardsCoordinatorCalls>>,
    backend: B,
}

impl<B: ContractBackend> ElChainReader<B> {
    #[must_use]
    pub fn new(bindings: ContractBindings, backend: B, logger: &Logger) -> Self {
        let ContractBindings {
            delegation_manager,
            strategy_manager,
            avs_directory,
            slasher,
            rewards_coordinator,
        } = bindings;

        Self {
            logger: logger.with_component(COMPONENT),
            slasher,
            delegation_manager,
            strategy_manager,
            avs_directory,
            rewards_coordinator,
            backend,
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run one remote call under `ctx`, instrumented with the reader's logger.
    async fn call<F, R>(&self, ctx: &CallContext, method: &'static str, call: F) -> Result<R>
    where
        F: Future<Output = Result<R>>,
    {
        async move {
            trace!(method, "Calling contract");
            ctx.scope(call)
                .await
                .inspect_err(|err| debug!(method, %err, "Contract call failed"))
        }
        .instrument(self.logger.span().clone())
        .await
    }
}

impl<T, P> ElChainReader<EthBackend<T, P>>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone + 'static,
{
    /// Bind the contracts in `config` and assemble a reader over them.
    ///
    /// # Errors
    ///
    /// See [`ContractBindings::from_config()`]
    pub async fn from_config(
        config: &ElContractsConfig,
        provider: P,
        logger: &Logger,
    ) -> Result<Self> {
        let bindings = ContractBindings::from_config(config, provider.clone(), logger).await?;
        Ok(Self::new(bindings, EthBackend::new(provider), logger))
    }

    /// Assemble a reader over only the `DelegationManager` and `AVSDirectory`.
    ///
    /// Prefer [`Self::from_config()`]. Slashing, rewards and strategy-manager queries fail with
    /// [`Error::MissingContract`] on a reader built this way.
    #[must_use]
    pub fn build(
        delegation_manager_addr: Address,
        avs_directory_addr: Address,
        provider: P,
        logger: &Logger,
    ) -> Self {
        let bindings =
            ContractBindings::legacy(delegation_manager_addr, avs_directory_addr, provider.clone());
        Self::new(bindings, EthBackend::new(provider), logger)
    }
}

fn require<'a, C: ?Sized>(contract: Option<&'a C>, name: &'static str) -> Result<&'a C> {
    contract.ok_or(Error::MissingContract(name))
}

#[async_trait]
impl<B: ContractBackend> ElReader for ElChainReader<B> {
    type Strategy = B::Strategy;
    type Token = B::Token;

    async fn is_operator_registered(&self, ctx: &CallContext, operator: &Operator) -> Result<bool> {
        let delegation_manager = require(self.delegation_manager.as_deref(), DELEGATION_MANAGER)?;
        let operator_addr = operator.account();
        self.call(ctx, "isOperator", delegation_manager.is_operator(operator_addr))
            .await
    }

    async fn get_operator_details(
        &self,
        ctx: &CallContext,
        operator: &Operator,
    ) -> Result<Operator> {
        let delegation_manager = require(self.delegation_manager.as_deref(), DELEGATION_MANAGER)?;
        let operator_addr = operator.account();
        let details = self
            .call(
                ctx,
                "operatorDetails",
                delegation_manager.operator_details(operator_addr),
            )
            .await?;
        Ok(Operator {
            address: operator.address.clone(),
            delegation_approver_address: details.delegationApprover.to_string(),
            staker_opt_out_window_blocks: details.stakerOptOutWindowBlocks,
        })
    }

    async fn get_strategy_and_underlying_token(
        &self,
        ctx: &CallContext,
        strategy_addr: Address,
    ) -> Result<(Self::Strategy, Address)> {
        let contract_strategy = self
            .backend
            .strategy(strategy_addr)
            .map_err(Error::fetch_strategy)?;
        let underlying_token_addr = self
            .call(ctx, "underlyingToken", contract_strategy.underlying_token())
            .await
            .map_err(Error::fetch_token)?;
        Ok((contract_strategy, underlying_token_addr))
    }

    async fn get_strategy_and_underlying_erc20_token(
        &self,
        ctx: &CallContext,
        strategy_addr: Address,
    ) -> Result<(Self::Strategy, Self::Token, Address)> {
        let contract_strategy = self
            .backend
            .strategy(strategy_addr)
            .map_err(Error::fetch_strategy)?;
        let underlying_token_addr = self
            .call(ctx, "underlyingToken", contract_strategy.underlying_token())
            .await
            .map_err(Error::fetch_token)?;
        let contract_underlying_token = self
            .backend
            .erc20(underlying_token_addr)
            .map_err(Error::fetch_token)?;
        Ok((
            contract_strategy,
            contract_underlying_token,
            underlying_token_addr,
        ))
    }

    async fn service_manager_can_slash_operator_until_block(
        &self,
        ctx: &CallContext,
        operator_addr: Address,
        service_manager_addr: Address,
    ) -> Result<u32> {
        let slasher = require(self.slasher.as_deref(), SLASHER)?;
        self.call(
            ctx,
            "contractCanSlashOperatorUntilBlock",
            slasher.contract_can_slash_operator_until_block(operator_addr, service_manager_addr),
        )
        .await
    }

    async fn operator_is_frozen(&self, ctx: &CallContext, operator_addr: Address) -> Result<bool> {
        let slasher = require(self.slasher.as_deref(), SLASHER)?;
        self.call(ctx, "isFrozen", slasher.is_frozen(operator_addr))
            .await
    }

    async fn get_operator_shares_in_strategy(
        &self,
        ctx: &CallContext,
        operator_addr: Address,
        strategy_addr: Address,
    ) -> Result<U256> {
        let delegation_manager = require(self.delegation_manager.as_deref(), DELEGATION_MANAGER)?;
        self.call(
            ctx,
            "operatorShares",
            delegation_manager.operator_shares(operator_addr, strategy_addr),
        )
        .await
    }

    async fn get_staker_strategy_shares(
        &self,
        ctx: &CallContext,
        staker_addr: Address,
        strategy_addr: Address,
    ) -> Result<U256> {
        let strategy_manager = require(self.strategy_manager.as_deref(), STRATEGY_MANAGER)?;
        self.call(
            ctx,
            "stakerStrategyShares",
            strategy_manager.staker_strategy_shares(staker_addr, strategy_addr),
        )
        .await
    }

    async fn calculate_delegation_approval_digest_hash(
        &self,
        ctx: &CallContext,
        staker: Address,
        operator: Address,
        delegation_approver: Address,
        approver_salt: B256,
        expiry: U256,
    ) -> Result<B256> {
        let delegation_manager = require(self.delegation_manager.as_deref(), DELEGATION_MANAGER)?;
        self.call(
            ctx,
            "calculateDelegationApprovalDigestHash",
            delegation_manager.calculate_delegation_approval_digest_hash(
                staker,
                operator,
                delegation_approver,
                approver_salt,
                expiry,
            ),
        )
        .await
    }

    async fn calculate_operator_avs_registration_digest_hash(
        &self,
        ctx: &CallContext,
        operator: Address,
        avs: Address,
        salt: B256,
        expiry: U256,
    ) -> Result<B256> {
        let avs_directory = require(self.avs_directory.as_deref(), AVS_DIRECTORY)?;
        self.call(
            ctx,
            "calculateOperatorAVSRegistrationDigestHash",
            avs_directory.calculate_operator_avs_registration_digest_hash(
                operator, avs, salt, expiry,
            ),
        )
        .await
    }

    async fn get_distribution_roots_length(&self, ctx: &CallContext) -> Result<U256> {
        let rewards_coordinator =
            require(self.rewards_coordinator.as_deref(), REWARDS_COORDINATOR)?;
        self.call(
            ctx,
            "getDistributionRootsLength",
            rewards_coordinator.distribution_roots_length(),
        )
        .await
    }

    async fn curr_rewards_calculation_end_timestamp(&self, ctx: &CallContext) -> Result<u32> {
        let rewards_coordinator =
            require(self.rewards_coordinator.as_deref(), REWARDS_COORDINATOR)?;
        self.call(
            ctx,
            "currRewardsCalculationEndTimestamp",
            rewards_coordinator.curr_rewards_calculation_end_timestamp(),
        )
        .await
    }

    async fn get_current_claimable_distribution_root(
        &self,
        ctx: &CallContext,
    ) -> Result<DistributionRoot> {
        let rewards_coordinator =
            require(self.rewards_coordinator.as_deref(), REWARDS_COORDINATOR)?;
        self.call(
            ctx,
            "getCurrentClaimableDistributionRoot",
            rewards_coordinator.current_claimable_distribution_root(),
        )
        .await
    }

    async fn get_root_index_from_hash(&self, ctx: &CallContext, root_hash: B256) -> Result<u32> {
        let rewards_coordinator =
            require(self.rewards_coordinator.as_deref(), REWARDS_COORDINATOR)?;
        self.call(
            ctx,
            "getRootIndexFromHash",
            rewards_coordinator.root_index_from_hash(root_hash),
        )
        .await
    }

    async fn get_cumulative_claimed(
        &self,
        ctx: &CallContext,
        earner: Address,
        token: Address,
    ) -> Result<U256> {
        let rewards_coordinator =
            require(self.rewards_coordinator.as_deref(), REWARDS_COORDINATOR)?;
        self.call(
            ctx,
            "cumulativeClaimed",
            rewards_coordinator.cumulative_claimed(earner, token),
        )
        .await
    }

    async fn check_claim(&self, ctx: &CallContext, claim: RewardsMerkleClaim) -> Result<bool> {
        let rewards_coordinator =
            require(self.rewards_coordinator.as_deref(), REWARDS_COORDINATOR)?;
        self.call(ctx, "checkClaim", rewards_coordinator.check_claim(claim))
            .await
    }

    async fn get_operator_avs_split(
        &self,
        ctx: &CallContext,
        operator: Address,
        avs: Address,
    ) -> Result<u16> {
        let rewards_coordinator =
            require(self.rewards_coordinator.as_deref(), REWARDS_COORDINATOR)?;
        self.call(
            ctx,
            "getOperatorAVSSplit",
            rewards_coordinator.operator_avs_split(operator, avs),
        )
        .await
    }
}
