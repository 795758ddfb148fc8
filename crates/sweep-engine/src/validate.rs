//! Structural and bounds validation of a sweep intent.
//!
//! Pure checks with no side effects, ordered cheapest first so adversarial
//! input is rejected before the engine spends effort on cryptography.

use alloy_primitives::{Address, U256};
use sweep_config::IntentBounds;
use sweep_types::{
	empty_route_commitment, route_commitment, SettleError, SettleResult, SweepIntent, SweepMode,
};

use crate::ledger::Ledger;

/// Longest a deadline may lie ahead of now. Keeps quotes from outliving
/// the cost-price conditions they were made under.
pub const DEADLINE_WINDOW_SECS: u64 = 60;

/// Validates an intent against the account context, its current nonce,
/// the configured bounds, and the supplied routing payload.
pub fn validate_intent(
	intent: &SweepIntent,
	account: Address,
	now: u64,
	current_nonce: u64,
	bounds: &IntentBounds,
	ledger: &dyn Ledger,
	routing_payload: &[u8],
) -> SettleResult<()> {
	// Timing window first; a deadline exactly at `now` is still valid.
	if intent.deadline < now {
		return Err(SettleError::DeadlineExpired);
	}
	if intent.deadline > now + DEADLINE_WINDOW_SECS {
		return Err(SettleError::DeadlineTooFar);
	}

	// Identity binding before any cryptography: an intent for another
	// account can never verify, so report it the same way.
	if intent.user != account {
		return Err(SettleError::InvalidSignature);
	}

	if intent.nonce != current_nonce {
		return Err(SettleError::NonceMismatch);
	}

	check_bounds(intent, bounds)?;
	check_shape(intent, ledger, routing_payload)
}

fn check_bounds(intent: &SweepIntent, bounds: &IntentBounds) -> SettleResult<()> {
	if intent.overhead_units < U256::from(bounds.min_overhead) {
		return Err(SettleError::OverheadTooLow);
	}
	if intent.overhead_units > U256::from(bounds.max_overhead) {
		return Err(SettleError::OverheadTooHigh);
	}
	if intent.protocol_fee_units > U256::from(bounds.max_protocol_fee_units) {
		return Err(SettleError::ProtocolFeeTooHigh);
	}
	if intent.extra_fee > U256::from(bounds.max_extra_fee) {
		return Err(SettleError::ExtraFeeTooHigh);
	}
	if intent.reimb_price_cap.is_zero() {
		return Err(SettleError::GasPriceCapZero);
	}
	if intent.reimb_price_cap > U256::from(bounds.max_reimb_price_cap) {
		return Err(SettleError::GasPriceCapTooHigh);
	}
	Ok(())
}

fn check_shape(
	intent: &SweepIntent,
	ledger: &dyn Ledger,
	routing_payload: &[u8],
) -> SettleResult<()> {
	match intent.mode {
		SweepMode::Transfer => {
			if intent.call_target.is_some() {
				return Err(SettleError::InvalidMode);
			}
			if intent.route_commitment != empty_route_commitment()
				|| route_commitment(routing_payload) != intent.route_commitment
			{
				return Err(SettleError::RouteHashMismatch);
			}
			if intent.destination == Address::ZERO {
				return Err(SettleError::InvalidDestination);
			}
		}
		SweepMode::RoutedCall => {
			let Some(target) = intent.call_target else {
				return Err(SettleError::InvalidMode);
			};
			if !ledger.is_executable(target) {
				return Err(SettleError::TargetNotContract);
			}
			if route_commitment(routing_payload) != intent.route_commitment {
				return Err(SettleError::RouteHashMismatch);
			}
			if intent.destination == Address::ZERO || intent.destination_chain_id == 0 {
				return Err(SettleError::InvalidDestination);
			}
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ledger::InMemoryLedger;

	const NOW: u64 = 1_700_000_000;

	fn bounds() -> IntentBounds {
		IntentBounds {
			min_overhead: 1_000,
			max_overhead: 200_000,
			max_protocol_fee_units: 50_000,
			max_extra_fee: 1_000_000,
			max_reimb_price_cap: 500,
		}
	}

	fn transfer_intent(user: Address) -> SweepIntent {
		SweepIntent {
			mode: SweepMode::Transfer,
			user,
			destination: Address::from([2u8; 20]),
			destination_chain_id: 8453,
			call_target: None,
			route_commitment: empty_route_commitment(),
			min_receive: U256::ZERO,
			max_fee_reserve: U256::from(100_000),
			overhead_units: U256::from(50_000),
			protocol_fee_units: U256::ZERO,
			extra_fee: U256::ZERO,
			reimb_price_cap: U256::from(10),
			deadline: NOW + 30,
			nonce: 0,
		}
	}

	fn check(intent: &SweepIntent, ledger: &InMemoryLedger, payload: &[u8]) -> SettleResult<()> {
		validate_intent(intent, intent.user, NOW, 0, &bounds(), ledger, payload)
	}

	#[test]
	fn deadline_boundaries() {
		let ledger = InMemoryLedger::new();
		let user = Address::from([1u8; 20]);
		let mut intent = transfer_intent(user);

		intent.deadline = NOW;
		assert!(check(&intent, &ledger, &[]).is_ok());

		intent.deadline = NOW + DEADLINE_WINDOW_SECS;
		assert!(check(&intent, &ledger, &[]).is_ok());

		intent.deadline = NOW + DEADLINE_WINDOW_SECS + 1;
		assert_eq!(
			check(&intent, &ledger, &[]).unwrap_err(),
			SettleError::DeadlineTooFar
		);

		intent.deadline = NOW - 1;
		assert_eq!(
			check(&intent, &ledger, &[]).unwrap_err(),
			SettleError::DeadlineExpired
		);
	}

	#[test]
	fn wrong_account_context_reports_invalid_signature() {
		let ledger = InMemoryLedger::new();
		let intent = transfer_intent(Address::from([1u8; 20]));
		let err = validate_intent(
			&intent,
			Address::from([9u8; 20]),
			NOW,
			0,
			&bounds(),
			&ledger,
			&[],
		)
		.unwrap_err();
		assert_eq!(err, SettleError::InvalidSignature);
	}

	#[test]
	fn stale_nonce_is_rejected() {
		let ledger = InMemoryLedger::new();
		let intent = transfer_intent(Address::from([1u8; 20]));
		let err =
			validate_intent(&intent, intent.user, NOW, 3, &bounds(), &ledger, &[]).unwrap_err();
		assert_eq!(err, SettleError::NonceMismatch);
	}

	#[test]
	fn every_bound_violation_maps_to_its_error() {
		let ledger = InMemoryLedger::new();
		let user = Address::from([1u8; 20]);

		let mut intent = transfer_intent(user);
		intent.overhead_units = U256::from(999);
		assert_eq!(check(&intent, &ledger, &[]).unwrap_err(), SettleError::OverheadTooLow);

		let mut intent = transfer_intent(user);
		intent.overhead_units = U256::from(200_001);
		assert_eq!(check(&intent, &ledger, &[]).unwrap_err(), SettleError::OverheadTooHigh);

		let mut intent = transfer_intent(user);
		intent.protocol_fee_units = U256::from(50_001);
		assert_eq!(
			check(&intent, &ledger, &[]).unwrap_err(),
			SettleError::ProtocolFeeTooHigh
		);

		let mut intent = transfer_intent(user);
		intent.extra_fee = U256::from(1_000_001);
		assert_eq!(check(&intent, &ledger, &[]).unwrap_err(), SettleError::ExtraFeeTooHigh);

		let mut intent = transfer_intent(user);
		intent.reimb_price_cap = U256::ZERO;
		assert_eq!(check(&intent, &ledger, &[]).unwrap_err(), SettleError::GasPriceCapZero);

		let mut intent = transfer_intent(user);
		intent.reimb_price_cap = U256::from(501);
		assert_eq!(
			check(&intent, &ledger, &[]).unwrap_err(),
			SettleError::GasPriceCapTooHigh
		);
	}

	#[test]
	fn transfer_shape_violations() {
		let ledger = InMemoryLedger::new();
		let user = Address::from([1u8; 20]);

		let mut intent = transfer_intent(user);
		intent.call_target = Some(Address::from([3u8; 20]));
		assert_eq!(check(&intent, &ledger, &[]).unwrap_err(), SettleError::InvalidMode);

		let mut intent = transfer_intent(user);
		intent.route_commitment = route_commitment(b"not empty");
		assert_eq!(
			check(&intent, &ledger, &[]).unwrap_err(),
			SettleError::RouteHashMismatch
		);

		// Supplying a payload in Transfer mode breaks the commitment too.
		let intent = transfer_intent(user);
		assert_eq!(
			check(&intent, &ledger, b"stray").unwrap_err(),
			SettleError::RouteHashMismatch
		);

		let mut intent = transfer_intent(user);
		intent.destination = Address::ZERO;
		assert_eq!(
			check(&intent, &ledger, &[]).unwrap_err(),
			SettleError::InvalidDestination
		);
	}

	#[test]
	fn routed_call_shape_violations() {
		let ledger = InMemoryLedger::new();
		let user = Address::from([1u8; 20]);
		let bridge = Address::from([4u8; 20]);
		let payload = b"bridge-payload".to_vec();

		let mut intent = transfer_intent(user);
		intent.mode = SweepMode::RoutedCall;
		intent.call_target = Some(bridge);
		intent.route_commitment = route_commitment(&payload);

		// Target without code is not an executable endpoint.
		assert_eq!(
			check(&intent, &ledger, &payload).unwrap_err(),
			SettleError::TargetNotContract
		);

		ledger.mark_executable(bridge);
		assert!(check(&intent, &ledger, &payload).is_ok());

		let mut missing_target = intent.clone();
		missing_target.call_target = None;
		assert_eq!(
			check(&missing_target, &ledger, &payload).unwrap_err(),
			SettleError::InvalidMode
		);

		assert_eq!(
			check(&intent, &ledger, b"different payload").unwrap_err(),
			SettleError::RouteHashMismatch
		);

		let mut no_chain = intent.clone();
		no_chain.destination_chain_id = 0;
		assert_eq!(
			check(&no_chain, &ledger, &payload).unwrap_err(),
			SettleError::InvalidDestination
		);
	}
}
