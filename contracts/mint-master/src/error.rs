use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;
use utils::decimals::ConversionError;
use utils::ratio::RatioError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Ratio(#[from] RatioError),

    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Ratio parameters must satisfy min <= current <= max and step < max - min unless step is zero")]
    InvalidRatioParams {},

    #[error("No ratio parameters set for {instance}")]
    NotInitialized { instance: String },
}
