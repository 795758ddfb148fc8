//! Domain-scoped digest construction and signer recovery.
//!
//! Pure functions, independent of any execution environment. The signing
//! domain is anchored to the account being swept rather than to the engine
//! itself, so a signed intent can never be replayed against another
//! account even when the engine instance is shared.

use alloy_primitives::{b256, Address, PrimitiveSignature, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};
use std::borrow::Cow;
use sweep_types::{SettleError, SettleResult, SweepIntent};

/// Half the secp256k1 curve order. Signatures whose `s` scalar exceeds
/// this are malleable and rejected outright.
const SECP256K1N_HALF: B256 =
	b256!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0");

/// Builds the signing domain for one account context.
pub fn signing_domain(
	name: &str,
	version: &str,
	chain_id: u64,
	account: Address,
) -> Eip712Domain {
	Eip712Domain::new(
		Some(Cow::Owned(name.to_string())),
		Some(Cow::Owned(version.to_string())),
		Some(U256::from(chain_id)),
		Some(account),
		None,
	)
}

/// Digest the user signs: `keccak256(0x1901 || domainHash || structHash)`
/// over the intent's typed fields in fixed order.
pub fn sweep_digest(domain: &Eip712Domain, intent: &SweepIntent) -> B256 {
	intent.authorization().eip712_signing_hash(domain)
}

/// Parses a raw signature in either accepted format:
///
/// - 65 bytes: `r || s || v` with `v` in {27, 28}
/// - 64 bytes (ERC-2098 compact): `r || yParityAndS`
///
/// High-`s` scalars and out-of-range recovery identifiers are rejected.
pub fn parse_signature(bytes: &[u8]) -> SettleResult<PrimitiveSignature> {
	let (r, s, y_parity) = match bytes.len() {
		65 => {
			let r = U256::from_be_slice(&bytes[0..32]);
			let s = U256::from_be_slice(&bytes[32..64]);
			let y_parity = match bytes[64] {
				27 => false,
				28 => true,
				_ => return Err(SettleError::InvalidSignature),
			};
			(r, s, y_parity)
		}
		64 => {
			let r = U256::from_be_slice(&bytes[0..32]);
			let mut s_bytes = [0u8; 32];
			s_bytes.copy_from_slice(&bytes[32..64]);
			let y_parity = s_bytes[0] & 0x80 != 0;
			s_bytes[0] &= 0x7f;
			(r, U256::from_be_bytes(s_bytes), y_parity)
		}
		_ => return Err(SettleError::InvalidSignature),
	};

	if s > U256::from_be_bytes(SECP256K1N_HALF.0) {
		return Err(SettleError::InvalidSignature);
	}

	Ok(PrimitiveSignature::new(r, s, y_parity))
}

/// Recovers the signer of `digest`. Any recovery failure maps to
/// `InvalidSignature`; the caller compares the result against the claimed
/// account owner.
pub fn recover_signer(digest: B256, signature: &PrimitiveSignature) -> SettleResult<Address> {
	signature
		.recover_address_from_prehash(&digest)
		.map_err(|_| SettleError::InvalidSignature)
}
