//! Interface of a constant-product pair exposing cumulative prices.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, QuerierWrapper, StdResult, Uint256};

/// Fixed point scale of spot and cumulative prices (36 fractional digits).
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000;

#[cw_serde]
#[derive(QueryResponses)]
pub enum PairQueryMsg {
    #[returns(PairResponse)]
    Pair {},
    /// Cumulative prices as they would be at the current block, plus current reserves.
    #[returns(CumulativePricesResponse)]
    CumulativePrices {},
}

#[cw_serde]
pub struct PairResponse {
    pub token0: Addr,
    pub token1: Addr,
}

/// Each cumulative price is the sum over time of the spot price, scaled by [`PRICE_SCALE`],
/// multiplied by the number of seconds it was in effect. `price0` is raw `token1` units per raw
/// `token0` unit. Accumulators are allowed to wrap around.
#[cw_serde]
pub struct CumulativePricesResponse {
    pub reserve0: Uint256,
    pub reserve1: Uint256,
    pub price0_cumulative: Uint256,
    pub price1_cumulative: Uint256,
    pub block_timestamp: u64,
}

pub fn query_pair(querier: &QuerierWrapper, pair: &Addr) -> StdResult<PairResponse> {
    querier.query_wasm_smart(pair, &PairQueryMsg::Pair {})
}

pub fn query_cumulative_prices(
    querier: &QuerierWrapper,
    pair: &Addr,
) -> StdResult<CumulativePricesResponse> {
    querier.query_wasm_smart(pair, &PairQueryMsg::CumulativePrices {})
}
