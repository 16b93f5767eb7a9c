use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint256;

use utils::module::ModuleTypeResponse;
use utils::oracle::{IndexTokenResponse, ValuationResponse};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    /// cw20 token every valued token is pegged to
    pub index_token: String,
}

/// Pegged valuation needs no sampling, `Update` is accepted and ignored.
pub type ExecuteMsg = utils::oracle::OracleExecuteMsg;

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
}
