//! Error taxonomy of the settlement engine.
//!
//! Every error is synchronous, terminal to the current attempt, and causes
//! a full unwind of staged value movements. The engine never retries;
//! retry policy belongs to the requester, who signs a fresh intent.

use thiserror::Error;

pub type SettleResult<T> = std::result::Result<T, SettleError>;

/// Terminal failure of a settlement attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettleError {
	// Authorization
	/// Caller is not in the configured sponsor allowlist.
	#[error("caller is not an allowlisted sponsor")]
	NotSponsor,
	/// Signature recovery failed, the recovered signer does not match the
	/// intent's user, or the intent is bound to a different account.
	#[error("invalid signature")]
	InvalidSignature,

	// Replay / timing
	/// Intent nonce does not equal the account's current counter.
	#[error("nonce mismatch")]
	NonceMismatch,
	/// Deadline lies in the past.
	#[error("deadline expired")]
	DeadlineExpired,
	/// Deadline lies further ahead than the allowed window.
	#[error("deadline too far in the future")]
	DeadlineTooFar,

	// Concurrency
	/// A settlement for this account is already in flight.
	#[error("reentrant settlement attempt")]
	Reentrancy,

	// Bounds
	#[error("overhead units below configured minimum")]
	OverheadTooLow,
	#[error("overhead units above configured maximum")]
	OverheadTooHigh,
	#[error("protocol fee units above configured maximum")]
	ProtocolFeeTooHigh,
	#[error("extra fee above configured maximum")]
	ExtraFeeTooHigh,
	#[error("reimbursement price cap is zero")]
	GasPriceCapZero,
	#[error("reimbursement price cap above configured maximum")]
	GasPriceCapTooHigh,

	// Shape
	/// Mode-specific shape violated (e.g. call target supplied in
	/// Transfer mode).
	#[error("intent shape does not match declared mode")]
	InvalidMode,
	/// Route commitment does not match the supplied routing payload.
	#[error("route commitment does not match payload")]
	RouteHashMismatch,
	/// RoutedCall target is not an executable endpoint.
	#[error("call target is not an executable endpoint")]
	TargetNotContract,
	/// Destination (or destination chain) missing where required.
	#[error("invalid destination")]
	InvalidDestination,

	// Economic
	/// Nothing left to route after reserving the fee.
	#[error("insufficient balance to sweep")]
	InsufficientBalance,
	/// Routed amount falls below the authorized floor.
	#[error("amount to route below minimum receive")]
	BelowMinReceive,
	/// Computed reimbursement exceeds the fee reserve.
	#[error("reimbursement exceeds fee reserve")]
	FeeExceedsCap,
	/// Fee reserve exceeds 150% of the computed reimbursement, or the
	/// reimbursement is zero.
	#[error("fee reserve overestimates reimbursement beyond allowed bound")]
	OverestimateTooHigh,
	/// Account balance is not exactly zero after settlement.
	#[error("non-zero balance remainder after settlement")]
	NonZeroRemainder,

	// Execution
	/// The routing endpoint rejected the call; carries its failure
	/// payload for diagnostics.
	#[error("routed call failed ({} bytes of failure data)", .0.len())]
	CallFailed(Vec<u8>),
}
