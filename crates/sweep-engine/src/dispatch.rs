//! Mode dispatch: the two terminal execution branches of a sweep.
//!
//! Both arms produce the same `(amount_routed, fee_reserve)` shape, so the
//! reimbursement and guard stages downstream are mode-agnostic.

use alloy_primitives::U256;
use sweep_routing::RoutingService;
use sweep_types::{SettleError, SettleResult, SweepIntent, SweepMode};
use tracing::{debug, warn};

use crate::ledger::StagedAttempt;
use crate::meter::CostMeter;

/// Result of the value-moving branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepOutcome {
	/// Amount sent to the destination or carried by the routed call.
	pub amount_routed: U256,
	/// Amount withheld for sponsor compensation.
	pub fee_reserve: U256,
}

/// Executes the intent's declared branch against the staged ledger.
pub async fn dispatch(
	intent: &SweepIntent,
	stage: &mut StagedAttempt<'_>,
	routing: &RoutingService,
	routing_payload: &[u8],
	meter: &mut CostMeter<'_>,
) -> SettleResult<SweepOutcome> {
	let balance = stage.balance_of(intent.user);
	let fee_reserve = balance.min(intent.max_fee_reserve);
	let amount_routed = balance - fee_reserve;
	if amount_routed.is_zero() {
		return Err(SettleError::InsufficientBalance);
	}

	match intent.mode {
		SweepMode::Transfer => {
			if amount_routed < intent.min_receive {
				return Err(SettleError::BelowMinReceive);
			}
			meter.charge_transfer();
			stage.transfer(intent.user, intent.destination, amount_routed)?;
			debug!(
				user = %intent.user,
				destination = %intent.destination,
				%amount_routed,
				"staged direct transfer"
			);
		}
		SweepMode::RoutedCall => {
			// Shape validation guarantees the target is present; a missing
			// one here means the pipeline was driven out of order.
			let Some(target) = intent.call_target else {
				return Err(SettleError::InvalidMode);
			};
			meter.charge_routed_call(routing_payload.len());
			stage.transfer(intent.user, target, amount_routed)?;
			routing
				.execute(target, routing_payload, amount_routed)
				.await
				.map_err(|e| {
					warn!(user = %intent.user, %target, "routed call rejected");
					SettleError::CallFailed(e.into_failure_data())
				})?;
			debug!(
				user = %intent.user,
				%target,
				%amount_routed,
				"staged routed call"
			);
		}
	}

	Ok(SweepOutcome {
		amount_routed,
		fee_reserve,
	})
}
