use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;
use utils::decimals::ConversionError;
use utils::twap::TwapError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("{0}")]
    Twap(#[from] TwapError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Short period {short} must be non-zero and shorter than long period {long}")]
    InvalidPeriods { short: u64, long: u64 },

    #[error("Initialization nested {depth} oracles deep")]
    InitDepthExceeded { depth: u8 },

    #[error("Oracle was not initialized for {token}")]
    NotInitialized { token: String },
}
