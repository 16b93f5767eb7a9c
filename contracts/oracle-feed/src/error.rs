use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;
use utils::decimals::ConversionError;
use utils::feed::FeedError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Initialization nested {depth} oracles deep")]
    InitDepthExceeded { depth: u8 },
}
