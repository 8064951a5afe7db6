use alloy_primitives::{hex, Address};
use serde::{Deserialize, Serialize};

pub use chainio_contracts::IDelegationManager::OperatorDetails;
pub use chainio_contracts::IRewardsCoordinator::{
    DistributionRoot, EarnerTreeMerkleLeaf, RewardsMerkleClaim, TokenTreeMerkleLeaf,
};

/// An operator of the delegation protocol, as seen by the chain reader.
///
/// `address` is kept exactly as the caller supplied it. `delegation_approver_address` is the
/// checksummed hex encoding of the on-chain approver, the zero address when stakers may delegate
/// without approval.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub address: String,
    pub delegation_approver_address: String,
    pub staker_opt_out_window_blocks: u32,
}

impl Operator {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Decode [`Operator::address`].
    ///
    /// Decoding never fails. See [`decode_address`].
    #[must_use]
    pub fn account(&self) -> Address {
        decode_address(&self.address)
    }

    /// Whether stakers need the approver's signature to delegate to this operator.
    #[must_use]
    pub fn requires_delegation_approval(&self) -> bool {
        !decode_address(&self.delegation_approver_address).is_zero()
    }
}

/// Decode a hex account identifier leniently.
///
/// An optional `0x` prefix is stripped and an odd digit count is padded with a leading zero.
/// Inputs shorter than 20 bytes are right-aligned, longer ones keep their last 20 bytes. Anything
/// that is not hex decodes to the zero address.
#[must_use]
pub fn decode_address(input: &str) -> Address {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };
    match decoded {
        Ok(bytes) => Address::left_padding_from(&bytes[bytes.len().saturating_sub(20)..]),
        Err(_) => Address::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_account_parses_hex() {
        let operator = Operator::new("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        assert_eq!(
            operator.account(),
            address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
        );
        assert_eq!(
            decode_address("F39FD6E51AAD88F6F4CE6AB8827279CFFFB92266"),
            operator.account()
        );
    }

    #[test]
    fn test_non_hex_decodes_to_zero() {
        assert_eq!(Operator::new("0xOP").account(), Address::ZERO);
        assert_eq!(decode_address(""), Address::ZERO);
        assert_eq!(decode_address("0x"), Address::ZERO);
    }

    #[test]
    fn test_short_and_long_inputs_are_right_aligned() {
        assert_eq!(
            decode_address("0x123"),
            address!("0000000000000000000000000000000000000123")
        );
        assert_eq!(
            decode_address("0xaaaaf39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
        );
    }

    #[test]
    fn test_requires_delegation_approval() {
        let mut operator = Operator::new("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        operator.delegation_approver_address = Address::ZERO.to_string();
        assert!(!operator.requires_delegation_approval());

        operator.delegation_approver_address =
            address!("70997970c51812dc3a010c7d01b50e0d17dc79c8").to_string();
        assert!(operator.requires_delegation_approval());
    }
}
