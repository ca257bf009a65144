//! Byte-level encoding of an ERC-20 `transfer(address,uint256)` call.
//!
//! The transfer call data is assembled by hand rather than through an ABI
//! library: this is the single place in the application where funds move, and
//! the layout is kept auditable at the byte level. The encoding is the standard
//! Solidity ABI layout: a 4-byte function selector followed by two 32-byte
//! arguments, each left-padded with zeroes.

use alloy_primitives::{Address, Bytes, U256};

use crate::error::ProtocolError;

/// The 4-byte function selector of `transfer(address,uint256)`.
///
/// `0xa9059cbb` = first four bytes of `keccak256("transfer(address,uint256)")`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Parses a token amount from a base-10 decimal string.
///
/// Token amounts are expressed in the token's smallest unit and routinely
/// exceed the 53-bit safe-integer range, so the value goes straight into a
/// 256-bit integer without passing through any floating-point representation.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidAmount`] if the string is not a base-10
/// integer or does not fit in 256 bits.
pub fn parse_amount(amount: &str) -> Result<U256, ProtocolError> {
    U256::from_str_radix(amount.trim(), 10).map_err(|err| ProtocolError::InvalidAmount {
        amount: amount.to_owned(),
        reason: err.to_string(),
    })
}

/// Encodes an ERC-20 `transfer(recipient, amount)` invocation.
///
/// Layout: selector (4 bytes) ++ recipient left-padded to 32 bytes ++ amount
/// as a 32-byte big-endian integer. The resulting bytes are the payload of a
/// zero-value transaction sent to the token contract; the recipient is
/// embedded in the call data per ERC-20 semantics.
#[must_use]
pub fn encode_transfer(recipient: Address, amount: U256) -> Bytes {
    let mut data = Vec::with_capacity(4 + 32 + 32);
    data.extend_from_slice(&TRANSFER_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(recipient.as_slice());
    data.extend_from_slice(&amount.to_be_bytes::<32>());
    Bytes::from(data)
}
