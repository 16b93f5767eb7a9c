use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal256, Uint256};

use utils::module::ModuleTypeResponse;
use utils::oracle::{IndexTokenResponse, ValuationResponse};
use utils::twap::TokenPair;

use crate::state::{Config, Windows};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// cw20 token prices are expressed in
    pub index_token: String,
    pub short_period: u64,
    pub long_period: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Sets the pair trading `token` against the index token. Only callable by the owner.
    RegisterPair { token: String, pair: String },
    /// Takes the first sample of the registered pair for both windows.
    Initialize { token: String, depth: Option<u8> },
    /// Recomputes each window whose period has elapsed.
    Update { token: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(ModuleTypeResponse)]
    ModuleType {},
    #[returns(IndexTokenResponse)]
    IndexToken {},
    /// Valued at the lower of both window prices.
    #[returns(ValuationResponse)]
    Read { token: String, amount: Uint256 },
    /// Valued at the higher of both window prices.
    #[returns(ValuationResponse)]
    AmountRequired { token: String, amount: Uint256 },
    #[returns(TokenPair)]
    Pair { token: String },
    #[returns(Windows)]
    Windows { token: String },
    #[returns(WindowPricesResponse)]
    WindowPrices { token: String },
}

/// Whole index units per whole token in each window.
#[cw_serde]
pub struct WindowPricesResponse {
    pub short: Decimal256,
    pub long: Decimal256,
}
