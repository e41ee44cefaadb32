use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

/// ## Description
/// This enum describes Vesting contract errors!
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Vested asset hasn't been configured")]
    AssetNotConfigured {},

    #[error("Vested asset is already configured")]
    AssetAlreadySet {},

    #[error("Allocation amount must be above zero")]
    InvalidAmount {},

    #[error("Duration index is out of range of the allowed durations")]
    InvalidDurationIndex {},

    #[error("Duration doesn't match the beneficiary's existing schedules")]
    DurationMismatch {},

    #[error("Schedule index is out of range")]
    IndexOutOfRange {},

    #[error("Schedule is fully claimed and inactive")]
    InactiveSchedule {},

    #[error("Nothing to claim")]
    NothingToClaim {},

    #[error("Batch arrays must be the same length")]
    ArrayLengthMismatch {},

    #[error("Sent funds don't cover the vested allocation")]
    TransferFailed {},

    #[error("Claimed amount exceeds vested amount, accounting invariant violated")]
    AccountingInvariantViolation {},

    #[error("Custom Error val: {val}")]
    CustomError { val: String },
}

impl From<OverflowError> for ContractError {
    fn from(o: OverflowError) -> Self {
        StdError::from(o).into()
    }
}
