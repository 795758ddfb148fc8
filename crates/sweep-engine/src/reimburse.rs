//! Deterministic sponsor reimbursement and the overestimate guard.
//!
//! Reimbursement is a pure function of the measured attempt cost, the
//! margins the user authorized, and the observed unit price clamped by the
//! user's cap:
//!
//! ```text
//! total = measured + overhead + protocol_fee
//! price = min(observed, cap)
//! reimbursement = total * price + extra_fee
//! ```
//!
//! The overestimate guard then bounds how much of the reserve a sponsor
//! can claim through a padded `max_fee_reserve`: the reserve may not
//! exceed 150% of the computed reimbursement.

use alloy_primitives::U256;
use sweep_types::{SettleError, SettleResult, SweepIntent};

/// Outcome of the reimbursement computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reimbursement {
	/// Measured cost plus authorized margins, in cost units.
	pub total_cost_units: U256,
	/// Unit price actually applied.
	pub unit_price: U256,
	/// Amount owed to the sponsor.
	pub amount: U256,
}

/// Computes sponsor compensation and checks it against the fee reserve.
pub fn compute(
	measured_cost_units: U256,
	intent: &SweepIntent,
	observed_unit_price: U256,
	fee_reserve: U256,
) -> SettleResult<Reimbursement> {
	let total_cost_units = measured_cost_units
		.checked_add(intent.overhead_units)
		.and_then(|t| t.checked_add(intent.protocol_fee_units))
		.ok_or(SettleError::FeeExceedsCap)?;

	let unit_price = observed_unit_price.min(intent.reimb_price_cap);

	let amount = total_cost_units
		.checked_mul(unit_price)
		.and_then(|a| a.checked_add(intent.extra_fee))
		.ok_or(SettleError::FeeExceedsCap)?;

	if amount > fee_reserve {
		return Err(SettleError::FeeExceedsCap);
	}

	Ok(Reimbursement {
		total_cost_units,
		unit_price,
		amount,
	})
}

/// Rejects reserves padded beyond 150% of the true reimbursement, and any
/// attempt whose reimbursement collapsed to zero.
pub fn check_overestimate(fee_reserve: U256, reimbursement: U256) -> SettleResult<()> {
	if reimbursement.is_zero() {
		return Err(SettleError::OverestimateTooHigh);
	}

	let lhs = fee_reserve
		.checked_mul(U256::from(100))
		.ok_or(SettleError::OverestimateTooHigh)?;
	// If the scaled reimbursement overflows, the reserve cannot exceed it.
	let Some(rhs) = reimbursement.checked_mul(U256::from(150)) else {
		return Ok(());
	};
	if lhs > rhs {
		return Err(SettleError::OverestimateTooHigh);
	}
	Ok(())
}
