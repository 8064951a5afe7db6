//! Minimal read interfaces of the EigenLayer core contracts.
//!
//! `IERC20` arguments are declared as `address`, since the macro cannot resolve interface types
//! used as parameter types. The ABI encoding is identical.

use alloy_sol_types::sol;

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IDelegationManager {
        struct OperatorDetails {
            address earningsReceiver;
            address delegationApprover;
            uint32 stakerOptOutWindowBlocks;
        }

        function isOperator(address operator) external view returns (bool);

        function operatorDetails(address operator) external view returns (OperatorDetails memory);

        function operatorShares(address operator, address strategy) external view returns (uint256);

        function calculateDelegationApprovalDigestHash(
            address staker,
            address operator,
            address _delegationApprover,
            bytes32 approverSalt,
            uint256 expiry
        ) external view returns (bytes32);

        function slasher() external view returns (address);

        function strategyManager() external view returns (address);
    }
);

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IStrategyManager {
        function stakerStrategyShares(address staker, address strategy) external view returns (uint256);
    }
);

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IAVSDirectory {
        function calculateOperatorAVSRegistrationDigestHash(
            address operator,
            address avs,
            bytes32 salt,
            uint256 expiry
        ) external view returns (bytes32);
    }
);

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface ISlasher {
        function isFrozen(address staker) external view returns (bool);

        function contractCanSlashOperatorUntilBlock(
            address operator,
            address serviceContract
        ) external view returns (uint32);
    }
);

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IRewardsCoordinator {
        struct DistributionRoot {
            bytes32 root;
            uint32 rewardsCalculationEndTimestamp;
            uint32 activatedAt;
            bool disabled;
        }

        struct EarnerTreeMerkleLeaf {
            address earner;
            bytes32 earnerTokenRoot;
        }

        struct TokenTreeMerkleLeaf {
            address token;
            uint256 cumulativeEarnings;
        }

        struct RewardsMerkleClaim {
            uint32 rootIndex;
            uint32 earnerIndex;
            bytes earnerTreeProof;
            EarnerTreeMerkleLeaf earnerLeaf;
            uint32[] tokenIndices;
            bytes[] tokenTreeProofs;
            TokenTreeMerkleLeaf[] tokenLeaves;
        }

        function getDistributionRootsLength() external view returns (uint256);

        function currRewardsCalculationEndTimestamp() external view returns (uint32);

        function getCurrentClaimableDistributionRoot() external view returns (DistributionRoot memory);

        function getRootIndexFromHash(bytes32 rootHash) external view returns (uint32);

        function cumulativeClaimed(address earner, address token) external view returns (uint256);

        function checkClaim(RewardsMerkleClaim calldata claim) external view returns (bool);

        function getOperatorAVSSplit(address operator, address avs) external view returns (uint16);
    }
);

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IStrategy {
        function underlyingToken() external view returns (address);

        function totalShares() external view returns (uint256);
    }
);

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20 {
        function totalSupply() external view returns (uint256);

        function balanceOf(address account) external view returns (uint256);

        function allowance(address owner, address spender) external view returns (uint256);
    }
);
