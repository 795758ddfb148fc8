//! Native-asset ledger and the staged attempt buffer.
//!
//! The engine never moves real balances while an attempt is in flight.
//! Every transfer is recorded on a [`StagedAttempt`]; only once every
//! check has passed, including the final zero-balance assertion, is the
//! whole movement list committed to the underlying [`Ledger`] in one call.
//! Dropping the stage discards it, which is how failed attempts unwind.

use alloy_primitives::{Address, U256};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use thiserror::Error;

/// Errors from ledger balance accounting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
	#[error("insufficient funds in {account}: need {needed}, have {available}")]
	InsufficientFunds {
		account: Address,
		needed: U256,
		available: U256,
	},
}

/// A single balance movement inside an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
	pub from: Address,
	pub to: Address,
	pub amount: U256,
}

/// Balance and code-account view the engine settles against.
pub trait Ledger: Send + Sync {
	/// Committed balance of an account.
	fn balance_of(&self, account: Address) -> U256;

	/// Whether the account is an executable endpoint rather than a plain
	/// balance holder.
	fn is_executable(&self, account: Address) -> bool;

	/// Applies a list of movements atomically: either every movement
	/// commits or none do.
	fn apply(&self, movements: &[Movement]) -> Result<(), LedgerError>;
}

/// In-memory ledger backing tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryLedger {
	balances: RwLock<HashMap<Address, U256>>,
	executable: RwLock<HashSet<Address>>,
}

impl InMemoryLedger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Credits an account, used to seed balances.
	pub fn fund(&self, account: Address, amount: U256) {
		let mut balances = self.balances.write().unwrap();
		let entry = balances.entry(account).or_insert(U256::ZERO);
		*entry += amount;
	}

	/// Marks an account as an executable endpoint.
	pub fn mark_executable(&self, account: Address) {
		self.executable.write().unwrap().insert(account);
	}
}

impl Ledger for InMemoryLedger {
	fn balance_of(&self, account: Address) -> U256 {
		self.balances
			.read()
			.unwrap()
			.get(&account)
			.copied()
			.unwrap_or(U256::ZERO)
	}

	fn is_executable(&self, account: Address) -> bool {
		self.executable.read().unwrap().contains(&account)
	}

	fn apply(&self, movements: &[Movement]) -> Result<(), LedgerError> {
		let mut balances = self.balances.write().unwrap();

		// Replay against a working copy so a mid-list underflow leaves
		// the committed state untouched.
		let mut working = balances.clone();
		for movement in movements {
			let available = working.get(&movement.from).copied().unwrap_or(U256::ZERO);
			if available < movement.amount {
				return Err(LedgerError::InsufficientFunds {
					account: movement.from,
					needed: movement.amount,
					available,
				});
			}
			*working.entry(movement.from).or_insert(U256::ZERO) = available - movement.amount;
			*working.entry(movement.to).or_insert(U256::ZERO) += movement.amount;
		}

		*balances = working;
		Ok(())
	}
}

/// Write-ahead buffer of one settlement attempt's movements.
pub struct StagedAttempt<'a> {
	ledger: &'a dyn Ledger,
	movements: Vec<Movement>,
}

impl<'a> StagedAttempt<'a> {
	pub fn new(ledger: &'a dyn Ledger) -> Self {
		Self {
			ledger,
			movements: Vec::new(),
		}
	}

	/// Balance of an account as it would stand if the staged movements
	/// had been applied.
	pub fn balance_of(&self, account: Address) -> U256 {
		let mut balance = self.ledger.balance_of(account);
		for movement in &self.movements {
			if movement.to == account {
				balance += movement.amount;
			}
			if movement.from == account {
				// Covered at stage time, so this never underflows.
				balance -= movement.amount;
			}
		}
		balance
	}

	/// Stages a transfer, checking it against the staged view.
	pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
		let available = self.balance_of(from);
		if available < amount {
			return Err(LedgerError::InsufficientFunds {
				account: from,
				needed: amount,
				available,
			});
		}
		self.movements.push(Movement { from, to, amount });
		Ok(())
	}

	/// Commits every staged movement to the underlying ledger.
	pub fn commit(self) -> Result<(), LedgerError> {
		self.ledger.apply(&self.movements)
	}
}
