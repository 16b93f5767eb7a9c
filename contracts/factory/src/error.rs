use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;
use utils::module::ModuleType;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Module {module} is already admitted")]
    ModuleAlreadyAdmitted { module: String },

    #[error("Module {module} is not admitted")]
    ModuleNotFound { module: String },

    #[error("Module {module} was declared as {declared} but reports {reported}")]
    ModuleTypeMismatch {
        module: String,
        declared: ModuleType,
        reported: ModuleType,
    },

    #[error("Module {module} is not an admitted oracle")]
    NotAnOracle { module: String },

    #[error("Foreign token {token} is not registered")]
    ForeignTokenNotFound { token: String },

    #[error("Oracle values in {index_token}, which is not a registered collateral token")]
    IndexTokenNotCollateral { index_token: String },

    #[error("Oracle {oracle} is not assigned to {token}")]
    OracleNotAssigned { token: String, oracle: String },

    #[error("Index {index} out of range, there are {count} entries")]
    IndexOutOfRange { index: u32, count: u32 },
}
