use cosmwasm_std::{Addr, QuerierWrapper, StdResult};
use cw20::{Cw20QueryMsg, TokenInfoResponse};

/// Queries the precision of a cw20 token.
pub fn query_decimals(querier: &QuerierWrapper, token: &Addr) -> StdResult<u8> {
    let info: TokenInfoResponse = querier.query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})?;
    Ok(info.decimals)
}
