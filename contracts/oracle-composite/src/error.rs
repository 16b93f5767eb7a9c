use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Route needs at least one hop")]
    NoHops {},

    #[error("Got {tokens} interim tokens for {oracles} oracles")]
    HopLengthMismatch { tokens: usize, oracles: usize },

    #[error("Oracle of hop {hop} values in {actual}, expected {expected}")]
    HopIndexMismatch {
        hop: usize,
        expected: String,
        actual: String,
    },

    #[error("Initialization nested {depth} oracles deep")]
    InitDepthExceeded { depth: u8 },
}
