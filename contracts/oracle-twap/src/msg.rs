use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint256;

use utils::module::ModuleTypeResponse;
use utils::oracle::{IndexTokenResponse, ValuationResponse};
use utils::twap::{PairInfo, TokenPair};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// cw20 token prices are expressed in
    pub index_token: String,
    /// Averaging window in seconds
    pub period: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Sets the pair trading `token` against the index token. Only callable by the owner.
    /// Does not affect a token that was already initialized.
    RegisterPair { token: String, pair: String },
    /// Takes the first sample of the registered pair.
    Initialize { token: String, depth: Option<u8> },
    /// Recomputes the average once a full period has elapsed.
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
    #[returns(ValuationResponse)]
    Read { token: String, amount: Uint256 },
    #[returns(ValuationResponse)]
    AmountRequired { token: String, amount: Uint256 },
    #[returns(TokenPair)]
    Pair { token: String },
    #[returns(PairInfo)]
    PairInfo { token: String },
}
