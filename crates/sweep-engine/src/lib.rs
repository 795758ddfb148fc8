//! Sponsored full-balance sweep settlement engine.
//!
//! A user signs one offline authorization covering their entire native
//! balance; an allowlisted sponsor submits it here. The engine validates,
//! verifies, executes the declared branch, reimburses the sponsor from the
//! swept funds, and proves the account landed on exactly zero before any
//! value movement becomes visible.

pub mod accounts;
pub mod digest;
pub mod dispatch;
pub mod ledger;
pub mod meter;
pub mod reimburse;
pub mod validate;

use std::sync::Arc;

use alloy_primitives::Address;
use sweep_config::{IntentBounds, SweepConfig};
use sweep_routing::RoutingService;
use sweep_types::{ExecutionParams, SettleError, SettleResult, SettlementRecord, SweepIntent};
use tracing::{info, instrument, warn};

pub use sweep_types::route_commitment as commitment_of;

use accounts::AccountStore;
use ledger::{Ledger, LedgerError, StagedAttempt};
use meter::CostMeter;

impl From<LedgerError> for SettleError {
	fn from(_: LedgerError) -> Self {
		SettleError::InsufficientBalance
	}
}

/// Time source, injectable so deadline behavior is testable.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

fn system_clock() -> Clock {
	Arc::new(|| {
		std::time::SystemTime::now()
			.duration_since(std::time::UNIX_EPOCH)
			.map(|d| d.as_secs())
			.unwrap_or(0)
	})
}

/// The settlement engine. One instance per deployment; all mutable state
/// lives behind interior locks so `settle` takes `&self`.
pub struct SettlementEngine {
	domain_name: String,
	domain_version: String,
	chain_id: u64,
	sponsors: Vec<Address>,
	bounds: IntentBounds,
	costs: sweep_config::CostSchedule,
	accounts: AccountStore,
	ledger: Arc<dyn Ledger>,
	routing: Arc<RoutingService>,
	clock: Clock,
}

impl SettlementEngine {
	/// Builds an engine from resolved configuration, a ledger backend, and
	/// a routing service.
	pub fn new(config: &SweepConfig, ledger: Arc<dyn Ledger>, routing: Arc<RoutingService>) -> Self {
		Self {
			domain_name: config.engine.domain_name.clone(),
			domain_version: config.engine.domain_version.clone(),
			chain_id: config.engine.chain_id,
			sponsors: config.sponsors.clone(),
			bounds: config.bounds.clone(),
			costs: config.costs.clone(),
			accounts: AccountStore::new(),
			ledger,
			routing,
			clock: system_clock(),
		}
	}

	/// Replaces the time source. Intended for tests that pin `now`.
	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.clock = clock;
		self
	}

	/// Whether the given identity may submit settlements.
	pub fn is_sponsor(&self, who: Address) -> bool {
		self.sponsors.contains(&who)
	}

	/// Next expected nonce for an account.
	pub fn nonce_of(&self, account: Address) -> u64 {
		self.accounts.nonce_of(account)
	}

	/// Configured intent bounds.
	pub fn bounds(&self) -> &IntentBounds {
		&self.bounds
	}

	/// Settles one sweep attempt end to end.
	///
	/// On success the account's balance is exactly zero, the sponsor holds
	/// the full fee reserve, and the returned record describes the split.
	/// On failure nothing moves; the nonce is still consumed when the
	/// failure happened after signature verification.
	#[instrument(skip_all, fields(sponsor = %sponsor, account = %account, nonce = intent.nonce))]
	pub async fn settle(
		&self,
		sponsor: Address,
		account: Address,
		intent: &SweepIntent,
		signature: &[u8],
		routing_payload: &[u8],
		params: &ExecutionParams,
	) -> SettleResult<SettlementRecord> {
		if !self.is_sponsor(sponsor) {
			return Err(SettleError::NotSponsor);
		}

		// Held for the whole attempt; dropping it on any exit path frees
		// the account for the next submission.
		let _lock = self.accounts.begin(account)?;

		let mut meter = CostMeter::new(&self.costs);
		meter.charge_base();

		let now = (self.clock)();
		let current_nonce = self.accounts.nonce_of(account);
		validate::validate_intent(
			intent,
			account,
			now,
			current_nonce,
			&self.bounds,
			self.ledger.as_ref(),
			routing_payload,
		)?;

		meter.charge_signature();
		let domain = digest::signing_domain(
			&self.domain_name,
			&self.domain_version,
			self.chain_id,
			account,
		);
		let digest = digest::sweep_digest(&domain, intent);
		let sig = digest::parse_signature(signature)?;
		let signer = digest::recover_signer(digest, &sig)?;
		if signer != account {
			warn!(%signer, "recovered signer does not match account");
			return Err(SettleError::InvalidSignature);
		}

		// The authorization is proven genuine; burn the nonce now so this
		// exact intent can never be replayed, even if the attempt fails
		// past this point.
		self.accounts.consume_nonce(account);

		let mut stage = StagedAttempt::new(self.ledger.as_ref());
		let outcome =
			dispatch::dispatch(intent, &mut stage, &self.routing, routing_payload, &mut meter)
				.await?;

		let measured = meter.snapshot();
		let reimbursement =
			reimburse::compute(measured, intent, params.unit_price, outcome.fee_reserve)?;
		reimburse::check_overestimate(outcome.fee_reserve, reimbursement.amount)?;

		// The sponsor takes the entire reserve: the reimbursement plus
		// whatever margin went unused. This is what drains the account.
		stage.transfer(account, sponsor, outcome.fee_reserve)?;

		let remainder = stage.balance_of(account);
		if !remainder.is_zero() {
			warn!(%remainder, "sweep left a nonzero remainder");
			return Err(SettleError::NonZeroRemainder);
		}

		stage.commit()?;

		let record = SettlementRecord {
			mode: intent.mode,
			user: intent.user,
			destination: intent.destination,
			destination_chain_id: intent.destination_chain_id,
			amount_routed: outcome.amount_routed,
			fee_reserve: outcome.fee_reserve,
			reimbursement: reimbursement.amount,
			unused_reserve: outcome.fee_reserve - reimbursement.amount,
			effective_unit_price: reimbursement.unit_price,
			measured_cost_units: measured,
			overhead_units: intent.overhead_units,
			protocol_fee_units: intent.protocol_fee_units,
			extra_fee: intent.extra_fee,
			reimb_price_cap: intent.reimb_price_cap,
			nonce: intent.nonce,
		};

		info!(
			mode = ?record.mode,
			amount_routed = %record.amount_routed,
			reimbursement = %record.reimbursement,
			unused_reserve = %record.unused_reserve,
			"settlement committed"
		);

		Ok(record)
	}
}
