use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal256, Uint256};

use utils::feed::FeedRecord;
use utils::module::ModuleTypeResponse;
use utils::oracle::{IndexTokenResponse, ValuationResponse};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// USD pegged cw20 token
    pub index_token: String,
    pub max_feed_age: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Values `token` with `feed`, which must quote in USD. A wrapped asset is registered with
    /// its underlying asset's feed. Only callable by the owner.
    RegisterOracle { token: String, feed: String },
    /// Replaces the feed of an already registered token. Only callable by the owner.
    UpdateOracle { token: String, feed: String },
    /// Only callable by the owner.
    UnregisterOracle { token: String },
    /// Only callable by the owner.
    UpdateConfig { max_feed_age: Option<u64> },
    /// Checks that `token` has a live feed.
    Initialize { token: String, depth: Option<u8> },
    /// Feeds update themselves, this is a no-op.
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
    #[returns(FeedRecord)]
    Feed { token: String },
    /// Latest whole-unit USD price of `token`.
    #[returns(Decimal256)]
    Price { token: String },
}
