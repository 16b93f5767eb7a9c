use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal256, Uint256};

use utils::feed::FeedRecord;
use utils::module::ModuleTypeResponse;
use utils::oracle::{IndexTokenResponse, ValuationResponse};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub index_token: String,
    /// Must value tokens in `index_token`
    pub twap_oracle: String,
    pub max_feed_age: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Only callable by the owner.
    RegisterOracle { token: String, feed: String },
    /// Only callable by the owner.
    UpdateOracle { token: String, feed: String },
    /// Only callable by the owner.
    UnregisterOracle { token: String },
    /// Only callable by the owner.
    UpdateConfig { max_feed_age: Option<u64> },
    /// Checks the feed and initializes the nested TWAP oracle.
    Initialize { token: String, depth: Option<u8> },
    /// Forwarded to the nested TWAP oracle.
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
    /// The smaller of the feed and TWAP valuations.
    #[returns(ValuationResponse)]
    Read { token: String, amount: Uint256 },
    /// The smaller of the token amounts implied by the feed and the TWAP.
    #[returns(ValuationResponse)]
    AmountRequired { token: String, amount: Uint256 },
    #[returns(FeedRecord)]
    Feed { token: String },
    /// Latest whole-unit USD price reported by the feed of `token`.
    #[returns(Decimal256)]
    Price { token: String },
}
