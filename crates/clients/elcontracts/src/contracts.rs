//! The contract capabilities the chain reader is composed of.
//!
//! Each trait covers the read calls the reader needs from one contract. They are implemented for
//! the `sol!` generated instances in [`chainio_contracts`], and can be implemented by anything else
//! able to answer the same calls.

use core::marker::PhantomData;

use alloy_network::Ethereum;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_transport::Transport;
use async_trait::async_trait;
use chainio_contracts::{
    IAVSDirectory, IDelegationManager, IRewardsCoordinator, ISlasher, IStrategy,
    IStrategyManager, IERC20,
};

use crate::error::Result;
use crate::types::{DistributionRoot, OperatorDetails, RewardsMerkleClaim};

#[async_trait]
pub trait DelegationManagerCalls: Send + Sync {
    async fn is_operator(&self, operator: Address) -> Result<bool>;

    async fn operator_details(&self, operator: Address) -> Result<OperatorDetails>;

    async fn operator_shares(&self, operator: Address, strategy: Address) -> Result<U256>;

    async fn calculate_delegation_approval_digest_hash(
        &self,
        staker: Address,
        operator: Address,
        delegation_approver: Address,
        approver_salt: B256,
        expiry: U256,
    ) -> Result<B256>;
}

#[async_trait]
pub trait StrategyManagerCalls: Send + Sync {
    async fn staker_strategy_shares(&self, staker: Address, strategy: Address) -> Result<U256>;
}

#[async_trait]
pub trait AvsDirectoryCalls: Send + Sync {
    async fn calculate_operator_avs_registration_digest_hash(
        &self,
        operator: Address,
        avs: Address,
        salt: B256,
        expiry: U256,
    ) -> Result<B256>;
}

#[async_trait]
pub trait SlasherCalls: Send + Sync {
    async fn contract_can_slash_operator_until_block(
        &self,
        operator: Address,
        service_contract: Address,
    ) -> Result<u32>;

    async fn is_frozen(&self, operator: Address) -> Result<bool>;
}

#[async_trait]
pub trait RewardsCoordinatorCalls: Send + Sync {
    async fn distribution_roots_length(&self) -> Result<U256>;

    async fn curr_rewards_calculation_end_timestamp(&self) -> Result<u32>;

    async fn current_claimable_distribution_root(&self) -> Result<DistributionRoot>;

    async fn root_index_from_hash(&self, root_hash: B256) -> Result<u32>;

    async fn cumulative_claimed(&self, earner: Address, token: Address) -> Result<U256>;

    async fn check_claim(&self, claim: RewardsMerkleClaim) -> Result<bool>;

    async fn operator_avs_split(&self, operator: Address, avs: Address) -> Result<u16>;
}

/// A strategy handle, bound to one strategy address.
#[async_trait]
pub trait StrategyCalls: Send + Sync {
    fn address(&self) -> Address;

    async fn underlying_token(&self) -> Result<Address>;
}

/// An ERC20 token handle, bound to one token address.
#[async_trait]
pub trait Erc20Calls: Send + Sync {
    fn address(&self) -> Address;

    async fn total_supply(&self) -> Result<U256>;

    async fn balance_of(&self, account: Address) -> Result<U256>;
}

/// Builds short-lived handles for contracts that are addressed per call.
pub trait ContractBackend: Send + Sync {
    type Strategy: StrategyCalls;
    type Token: Erc20Calls;

    /// Bind a strategy handle to `address`.
    ///
    /// # Errors
    ///
    /// The handle could not be constructed
    fn strategy(&self, address: Address) -> Result<Self::Strategy>;

    /// Bind an ERC20 handle to `address`.
    ///
    /// # Errors
    ///
    /// The handle could not be constructed
    fn erc20(&self, address: Address) -> Result<Self::Token>;
}

/// A [`ContractBackend`] issuing calls through an alloy [`Provider`].
pub struct EthBackend<T, P> {
    provider: P,
    _transport: PhantomData<fn() -> T>,
}

impl<T, P> EthBackend<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _transport: PhantomData,
        }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<T, P: Clone> Clone for EthBackend<T, P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            _transport: PhantomData,
        }
    }
}

impl<T, P> ContractBackend for EthBackend<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone + 'static,
{
    type Strategy = IStrategy::IStrategyInstance<T, P>;
    type Token = IERC20::IERC20Instance<T, P>;

    fn strategy(&self, address: Address) -> Result<Self::Strategy> {
        Ok(IStrategy::new(address, self.provider.clone()))
    }

    fn erc20(&self, address: Address) -> Result<Self::Token> {
        Ok(IERC20::new(address, self.provider.clone()))
    }
}

#[async_trait]
impl<T, P> DelegationManagerCalls for IDelegationManager::IDelegationManagerInstance<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    async fn is_operator(&self, operator: Address) -> Result<bool> {
        let is_operator = self
            .isOperator(operator)
            .call()
            .await
            .map(|is_operator| is_operator._0)?;
        Ok(is_operator)
    }

    async fn operator_details(&self, operator: Address) -> Result<OperatorDetails> {
        let details = self
            .operatorDetails(operator)
            .call()
            .await
            .map(|details| details._0)?;
        Ok(details)
    }

    async fn operator_shares(&self, operator: Address, strategy: Address) -> Result<U256> {
        let shares = self
            .operatorShares(operator, strategy)
            .call()
            .await
            .map(|shares| shares._0)?;
        Ok(shares)
    }

    async fn calculate_delegation_approval_digest_hash(
        &self,
        staker: Address,
        operator: Address,
        delegation_approver: Address,
        approver_salt: B256,
        expiry: U256,
    ) -> Result<B256> {
        let digest = self
            .calculateDelegationApprovalDigestHash(
                staker,
                operator,
                delegation_approver,
                approver_salt,
                expiry,
            )
            .call()
            .await
            .map(|digest| digest._0)?;
        Ok(digest)
    }
}

#[async_trait]
impl<T, P> StrategyManagerCalls for IStrategyManager::IStrategyManagerInstance<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    async fn staker_strategy_shares(&self, staker: Address, strategy: Address) -> Result<U256> {
        let shares = self
            .stakerStrategyShares(staker, strategy)
            .call()
            .await
            .map(|shares| shares._0)?;
        Ok(shares)
    }
}

#[async_trait]
impl<T, P> AvsDirectoryCalls for IAVSDirectory::IAVSDirectoryInstance<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    async fn calculate_operator_avs_registration_digest_hash(
        &self,
        operator: Address,
        avs: Address,
        salt: B256,
        expiry: U256,
    ) -> Result<B256> {
        let digest = self
            .calculateOperatorAVSRegistrationDigestHash(operator, avs, salt, expiry)
            .call()
            .await
            .map(|digest| digest._0)?;
        Ok(digest)
    }
}

#[async_trait]
impl<T, P> SlasherCalls for ISlasher::ISlasherInstance<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    async fn contract_can_slash_operator_until_block(
        &self,
        operator: Address,
        service_contract: Address,
    ) -> Result<u32> {
        let until_block = self
            .contractCanSlashOperatorUntilBlock(operator, service_contract)
            .call()
            .await
            .map(|block| block._0)?;
        Ok(until_block)
    }

    async fn is_frozen(&self, operator: Address) -> Result<bool> {
        let is_frozen = self
            .isFrozen(operator)
            .call()
            .await
            .map(|frozen| frozen._0)?;
        Ok(is_frozen)
    }
}

#[async_trait]
impl<T, P> RewardsCoordinatorCalls for IRewardsCoordinator::IRewardsCoordinatorInstance<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    async fn distribution_roots_length(&self) -> Result<U256> {
        let length = self
            .getDistributionRootsLength()
            .call()
            .await
            .map(|length| length._0)?;
        Ok(length)
    }

    async fn curr_rewards_calculation_end_timestamp(&self) -> Result<u32> {
        let timestamp = self
            .currRewardsCalculationEndTimestamp()
            .call()
            .await
            .map(|timestamp| timestamp._0)?;
        Ok(timestamp)
    }

    async fn current_claimable_distribution_root(&self) -> Result<DistributionRoot> {
        let root = self
            .getCurrentClaimableDistributionRoot()
            .call()
            .await
            .map(|root| root._0)?;
        Ok(root)
    }

    async fn root_index_from_hash(&self, root_hash: B256) -> Result<u32> {
        let index = self
            .getRootIndexFromHash(root_hash)
            .call()
            .await
            .map(|index| index._0)?;
        Ok(index)
    }

    async fn cumulative_claimed(&self, earner: Address, token: Address) -> Result<U256> {
        let claimed = self
            .cumulativeClaimed(earner, token)
            .call()
            .await
            .map(|claimed| claimed._0)?;
        Ok(claimed)
    }

    async fn check_claim(&self, claim: RewardsMerkleClaim) -> Result<bool> {
        let valid = self
            .checkClaim(claim)
            .call()
            .await
            .map(|valid| valid._0)?;
        Ok(valid)
    }

    async fn operator_avs_split(&self, operator: Address, avs: Address) -> Result<u16> {
        let split = self
            .getOperatorAVSSplit(operator, avs)
            .call()
            .await
            .map(|split| split._0)?;
        Ok(split)
    }
}

#[async_trait]
impl<T, P> StrategyCalls for IStrategy::IStrategyInstance<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    fn address(&self) -> Address {
        *IStrategy::IStrategyInstance::address(self)
    }

    async fn underlying_token(&self) -> Result<Address> {
        let token = self
            .underlyingToken()
            .call()
            .await
            .map(|token| token._0)?;
        Ok(token)
    }
}

#[async_trait]
impl<T, P> Erc20Calls for IERC20::IERC20Instance<T, P>
where
    T: Transport + Clone,
    P: Provider<T, Ethereum> + Clone,
{
    fn address(&self) -> Address {
        *IERC20::IERC20Instance::address(self)
    }

    async fn total_supply(&self) -> Result<U256> {
        let supply = self
            .totalSupply()
            .call()
            .await
            .map(|supply| supply._0)?;
        Ok(supply)
    }

    async fn balance_of(&self, account: Address) -> Result<U256> {
        let balance = self
            .balanceOf(account)
            .call()
            .await
            .map(|balance| balance._0)?;
        Ok(balance)
    }
}
