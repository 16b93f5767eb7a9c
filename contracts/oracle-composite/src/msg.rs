use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint256;

use utils::module::ModuleTypeResponse;
use utils::oracle::{IndexTokenResponse, ValuationResponse};

use crate::state::{Config, Hop};

#[cw_serde]
pub struct InstantiateMsg {
    /// Token each hop ends in, from the base token towards the index token
    pub interim_tokens: Vec<String>,
    /// `oracles[i]` must value in `interim_tokens[i]`
    pub oracles: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Initializes every hop for the token it values.
    Initialize { token: String, depth: Option<u8> },
    /// Forwarded to every hop.
    Update { token: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(Vec<Hop>)]
    Hops {},
    #[returns(ModuleTypeResponse)]
    ModuleType {},
    #[returns(IndexTokenResponse)]
    IndexToken {},
    #[returns(ValuationResponse)]
    Read { token: String, amount: Uint256 },
    #[returns(ValuationResponse)]
    AmountRequired { token: String, amount: Uint256 },
}
