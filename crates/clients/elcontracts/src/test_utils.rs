//! Call-counting stand-ins for the core contracts.

use core::time::Duration;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy_primitives::{address, Address, B256, U256};
use async_trait::async_trait;

use crate::bindings::ContractBindings;
use crate::contracts::{
    AvsDirectoryCalls, ContractBackend, DelegationManagerCalls, Erc20Calls,
    RewardsCoordinatorCalls, SlasherCalls, StrategyCalls, StrategyManagerCalls,
};
use crate::error::{Error, Result};
use crate::types::{DistributionRoot, OperatorDetails, RewardsMerkleClaim};

pub const OPERATOR: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const APPROVER: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");
pub const STRATEGY: Address = address!("7a2088a1bfc9d81c55368ae168c2c02570cb814f");
pub const TOKEN: Address = address!("3c44cdddb6a900fa2b585dd299e03d12fa4293bc");
pub const AVS: Address = address!("90f79bf6eb2c4f870365e785982e1f101e93b906");

pub const OPT_OUT_WINDOW_BLOCKS: u32 = 100;
pub const CALCULATION_END_TIMESTAMP: u32 = 1_717_200_000;

pub fn stub_error(function: &str) -> Error {
    Error::AlloyContractError(alloy_contract::Error::UnknownFunction(function.to_string()))
}

/// Answers every core-contract read with fixed values, counting the calls it serves.
#[derive(Debug, Default)]
pub struct StubContracts {
    pub calls: AtomicUsize,
    pub registered: bool,
    pub frozen: bool,
    pub claim_valid: bool,
    pub failing: bool,
    pub delay: Option<Duration>,
}

impl StubContracts {
    pub fn new() -> Self {
        Self {
            registered: true,
            claim_valid: true,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn serve<T>(&self, function: &str, value: T) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(stub_error(function));
        }
        Ok(value)
    }

    pub fn distribution_root() -> DistributionRoot {
        DistributionRoot {
            root: B256::repeat_byte(0x11),
            rewardsCalculationEndTimestamp: CALCULATION_END_TIMESTAMP,
            activatedAt: CALCULATION_END_TIMESTAMP + 7200,
            disabled: false,
        }
    }
}

/// Bindings with every collaborator served by its own fresh stub.
pub fn wired_bindings() -> (ContractBindings, Vec<Arc<StubContracts>>) {
    let stubs: Vec<_> = (0..5).map(|_| Arc::new(StubContracts::new())).collect();
    let bindings = ContractBindings::default()
        .with_delegation_manager(stubs[0].clone())
        .with_strategy_manager(stubs[1].clone())
        .with_avs_directory(stubs[2].clone())
        .with_slasher(stubs[3].clone())
        .with_rewards_coordinator(stubs[4].clone());
    (bindings, stubs)
}

#[async_trait]
impl DelegationManagerCalls for StubContracts {
    async fn is_operator(&self, _operator: Address) -> Result<bool> {
        self.serve("isOperator", self.registered).await
    }

    async fn operator_details(&self, _operator: Address) -> Result<OperatorDetails> {
        let details = OperatorDetails {
            earningsReceiver: Address::ZERO,
            delegationApprover: APPROVER,
            stakerOptOutWindowBlocks: OPT_OUT_WINDOW_BLOCKS,
        };
        self.serve("operatorDetails", details).await
    }

    async fn operator_shares(&self, _operator: Address, _strategy: Address) -> Result<U256> {
        self.serve("operatorShares", U256::from(1_000_000u64)).await
    }

    async fn calculate_delegation_approval_digest_hash(
        &self,
        _staker: Address,
        _operator: Address,
        _delegation_approver: Address,
        approver_salt: B256,
        _expiry: U256,
    ) -> Result<B256> {
        // Echo the salt back so callers can see their arguments reached the contract
        self.serve("calculateDelegationApprovalDigestHash", approver_salt)
            .await
    }
}

#[async_trait]
impl StrategyManagerCalls for StubContracts {
    async fn staker_strategy_shares(&self, _staker: Address, _strategy: Address) -> Result<U256> {
        self.serve("stakerStrategyShares", U256::from(500u64)).await
    }
}

#[async_trait]
impl AvsDirectoryCalls for StubContracts {
    async fn calculate_operator_avs_registration_digest_hash(
        &self,
        _operator: Address,
        _avs: Address,
        salt: B256,
        _expiry: U256,
    ) -> Result<B256> {
        self.serve("calculateOperatorAVSRegistrationDigestHash", salt)
            .await
    }
}

#[async_trait]
impl SlasherCalls for StubContracts {
    async fn contract_can_slash_operator_until_block(
        &self,
        _operator: Address,
        _service_contract: Address,
    ) -> Result<u32> {
        self.serve("contractCanSlashOperatorUntilBlock", u32::MAX)
            .await
    }

    async fn is_frozen(&self, _operator: Address) -> Result<bool> {
        self.serve("isFrozen", self.frozen).await
    }
}

#[async_trait]
impl RewardsCoordinatorCalls for StubContracts {
    async fn distribution_roots_length(&self) -> Result<U256> {
        self.serve("getDistributionRootsLength", U256::from(3u64))
            .await
    }

    async fn curr_rewards_calculation_end_timestamp(&self) -> Result<u32> {
        self.serve(
            "currRewardsCalculationEndTimestamp",
            CALCULATION_END_TIMESTAMP,
        )
        .await
    }

    async fn current_claimable_distribution_root(&self) -> Result<DistributionRoot> {
        self.serve(
            "getCurrentClaimableDistributionRoot",
            Self::distribution_root(),
        )
        .await
    }

    async fn root_index_from_hash(&self, _root_hash: B256) -> Result<u32> {
        self.serve("getRootIndexFromHash", 2).await
    }

    async fn cumulative_claimed(&self, _earner: Address, _token: Address) -> Result<U256> {
        self.serve("cumulativeClaimed", U256::from(42u64)).await
    }

    async fn check_claim(&self, _claim: RewardsMerkleClaim) -> Result<bool> {
        self.serve("checkClaim", self.claim_valid).await
    }

    async fn operator_avs_split(&self, _operator: Address, _avs: Address) -> Result<u16> {
        self.serve("getOperatorAVSSplit", 1000).await
    }
}

/// Which step of strategy/token resolution a [`StubBackend`] should fail.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    #[default]
    Nothing,
    StrategyHandle,
    UnderlyingToken,
    TokenHandle,
}

#[derive(Debug, Default, Clone)]
pub struct StubBackend {
    pub fail_at: FailAt,
    pub calls: Arc<AtomicUsize>,
}

impl StubBackend {
    pub fn failing_at(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct StubStrategy {
    address: Address,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

#[derive(Debug)]
pub struct StubToken {
    address: Address,
}

impl ContractBackend for StubBackend {
    type Strategy = StubStrategy;
    type Token = StubToken;

    fn strategy(&self, address: Address) -> Result<Self::Strategy> {
        if self.fail_at == FailAt::StrategyHandle {
            return Err(stub_error("IStrategy"));
        }
        Ok(StubStrategy {
            address,
            fail: self.fail_at == FailAt::UnderlyingToken,
            calls: self.calls.clone(),
        })
    }

    fn erc20(&self, address: Address) -> Result<Self::Token> {
        if self.fail_at == FailAt::TokenHandle {
            return Err(stub_error("IERC20"));
        }
        Ok(StubToken { address })
    }
}

#[async_trait]
impl StrategyCalls for StubStrategy {
    fn address(&self) -> Address {
        self.address
    }

    async fn underlying_token(&self) -> Result<Address> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(stub_error("underlyingToken"));
        }
        Ok(TOKEN)
    }
}

#[async_trait]
impl Erc20Calls for StubToken {
    fn address(&self) -> Address {
        self.address
    }

    async fn total_supply(&self) -> Result<U256> {
        Ok(U256::from(21_000_000u64))
    }

    async fn balance_of(&self, _account: Address) -> Result<U256> {
        Ok(U256::ZERO)
    }
}

/// A log sink collecting formatted events in memory.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
