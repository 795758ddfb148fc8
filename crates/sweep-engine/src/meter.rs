//! Deterministic cost metering.
//!
//! The original host environment measured execution cost natively; here
//! the engine charges fixed unit costs per pipeline stage against the
//! configured schedule. The snapshot feeding the reimbursement formula is
//! taken after the routing effect, so the reimbursement and guard stages
//! do not meter themselves.

use alloy_primitives::U256;
use sweep_config::CostSchedule;

/// Accumulates cost units over one settlement attempt.
pub struct CostMeter<'a> {
	schedule: &'a CostSchedule,
	units: u64,
}

impl<'a> CostMeter<'a> {
	pub fn new(schedule: &'a CostSchedule) -> Self {
		Self { schedule, units: 0 }
	}

	/// Flat charge for starting the attempt, covering validation.
	pub fn charge_base(&mut self) {
		self.units = self.units.saturating_add(self.schedule.base_attempt);
	}

	/// Charge for digest construction and signature recovery.
	pub fn charge_signature(&mut self) {
		self.units = self.units.saturating_add(self.schedule.signature);
	}

	/// Charge for the direct transfer arm.
	pub fn charge_transfer(&mut self) {
		self.units = self.units.saturating_add(self.schedule.transfer);
	}

	/// Charge for the routed-call arm, proportional to payload size.
	pub fn charge_routed_call(&mut self, payload_len: usize) {
		let payload_cost = self
			.schedule
			.payload_byte
			.saturating_mul(payload_len as u64);
		self.units = self
			.units
			.saturating_add(self.schedule.routed_call)
			.saturating_add(payload_cost);
	}

	/// Measured cost units so far.
	pub fn snapshot(&self) -> U256 {
		U256::from(self.units)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn charges_follow_the_schedule_deterministically() {
		let schedule = CostSchedule::default();
		let mut a = CostMeter::new(&schedule);
		let mut b = CostMeter::new(&schedule);
		for meter in [&mut a, &mut b] {
			meter.charge_base();
			meter.charge_signature();
			meter.charge_routed_call(100);
		}
		assert_eq!(a.snapshot(), b.snapshot());
		assert_eq!(
			a.snapshot(),
			U256::from(21_000u64 + 3_000 + 2_600 + 16 * 100)
		);
	}

	#[test]
	fn transfer_arm_costs_less_than_a_payload_heavy_routed_call() {
		let schedule = CostSchedule::default();
		let mut transfer = CostMeter::new(&schedule);
		transfer.charge_base();
		transfer.charge_transfer();

		let mut routed = CostMeter::new(&schedule);
		routed.charge_base();
		routed.charge_routed_call(4096);

		assert!(transfer.snapshot() < routed.snapshot());
	}
}
