//! Per-account settlement state: nonce counter and single-flight lock.
//!
//! Each account context owns exactly one record, mutated only by the
//! engine. The nonce advances once per attempt that survives signature
//! verification; the lock guarantees at most one in-flight settlement per
//! account, whichever sponsor is driving it.

use alloy_primitives::Address;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use sweep_types::{SettleError, SettleResult};

#[derive(Debug, Default, Clone)]
struct AccountState {
	nonce: u64,
	in_use: bool,
}

type SharedStates = Arc<Mutex<HashMap<Address, AccountState>>>;

/// Engine-owned store of per-account settlement state.
#[derive(Default, Clone)]
pub struct AccountStore {
	states: SharedStates,
}

impl AccountStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current nonce counter of an account.
	pub fn nonce_of(&self, account: Address) -> u64 {
		self.states
			.lock()
			.unwrap()
			.get(&account)
			.map(|s| s.nonce)
			.unwrap_or(0)
	}

	/// Claims the single-flight lock for an account. The returned guard
	/// releases the lock on every exit path, including failures.
	pub fn begin(&self, account: Address) -> SettleResult<AttemptLock> {
		let mut states = self.states.lock().unwrap();
		let state = states.entry(account).or_default();
		if state.in_use {
			return Err(SettleError::Reentrancy);
		}
		state.in_use = true;
		Ok(AttemptLock {
			states: self.states.clone(),
			account,
		})
	}

	/// Advances the nonce counter by exactly one. Called once per attempt,
	/// after signature verification and before any value motion.
	pub fn consume_nonce(&self, account: Address) {
		let mut states = self.states.lock().unwrap();
		states.entry(account).or_default().nonce += 1;
	}
}

/// RAII guard over an account's in-flight flag.
#[derive(Debug)]
pub struct AttemptLock {
	states: SharedStates,
	account: Address,
}

impl Drop for AttemptLock {
	fn drop(&mut self) {
		if let Ok(mut states) = self.states.lock() {
			if let Some(state) = states.get_mut(&self.account) {
				state.in_use = false;
			}
		}
	}
}
