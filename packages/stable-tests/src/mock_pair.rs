//! Constant-product pair double. It never trades, tests move its reserves directly and the
//! cumulative prices advance with the block time the same way a real pair's would.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint256,
};
use cw_storage_plus::Item;

use utils::pair::{CumulativePricesResponse, PairQueryMsg, PairResponse, PRICE_SCALE};

#[cw_serde]
pub struct InstantiateMsg {
    pub token0: String,
    pub token1: String,
    pub reserve0: Uint256,
    pub reserve1: Uint256,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Settles the accumulators up to the current block, then replaces the reserves.
    SetReserves { reserve0: Uint256, reserve1: Uint256 },
    /// Overwrites the accumulators at the current block, e.g. to bring them close to wrapping.
    SetCumulatives {
        price0_cumulative: Uint256,
        price1_cumulative: Uint256,
    },
}

#[cw_serde]
struct PairState {
    token0: Addr,
    token1: Addr,
    reserve0: Uint256,
    reserve1: Uint256,
    price0_cumulative: Uint256,
    price1_cumulative: Uint256,
    last_timestamp: u64,
}

const STATE: Item<PairState> = Item::new("pair_state");

impl PairState {
    fn accumulate(&mut self, now: u64) -> StdResult<()> {
        let elapsed = now.saturating_sub(self.last_timestamp);
        if elapsed > 0 && !self.reserve0.is_zero() && !self.reserve1.is_zero() {
            let elapsed = Uint256::from(elapsed);
            let price0 = spot_price(self.reserve1, self.reserve0)?;
            let price1 = spot_price(self.reserve0, self.reserve1)?;
            self.price0_cumulative = self
                .price0_cumulative
                .wrapping_add(price0.wrapping_mul(elapsed));
            self.price1_cumulative = self
                .price1_cumulative
                .wrapping_add(price1.wrapping_mul(elapsed));
        }
        self.last_timestamp = now;
        Ok(())
    }
}

fn spot_price(numerator: Uint256, denominator: Uint256) -> StdResult<Uint256> {
    Ok(numerator
        .checked_mul(Uint256::from(PRICE_SCALE))?
        .checked_div(denominator)?)
}

pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    STATE.save(
        deps.storage,
        &PairState {
            token0: deps.api.addr_validate(&msg.token0)?,
            token1: deps.api.addr_validate(&msg.token1)?,
            reserve0: msg.reserve0,
            reserve1: msg.reserve1,
            price0_cumulative: Uint256::zero(),
            price1_cumulative: Uint256::zero(),
            last_timestamp: env.block.time.seconds(),
        },
    )?;

    Ok(Response::new())
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    let mut state = STATE.load(deps.storage)?;
    state.accumulate(env.block.time.seconds())?;
    match msg {
        ExecuteMsg::SetReserves { reserve0, reserve1 } => {
            state.reserve0 = reserve0;
            state.reserve1 = reserve1;
        }
        ExecuteMsg::SetCumulatives {
            price0_cumulative,
            price1_cumulative,
        } => {
            state.price0_cumulative = price0_cumulative;
            state.price1_cumulative = price1_cumulative;
        }
    }
    STATE.save(deps.storage, &state)?;

    Ok(Response::new())
}

pub fn query(deps: Deps, env: Env, msg: PairQueryMsg) -> StdResult<Binary> {
    let mut state = STATE.load(deps.storage)?;
    match msg {
        PairQueryMsg::Pair {} => to_json_binary(&PairResponse {
            token0: state.token0,
            token1: state.token1,
        }),
        PairQueryMsg::CumulativePrices {} => {
            // counterfactual, nothing is written
            state.accumulate(env.block.time.seconds())?;
            to_json_binary(&CumulativePricesResponse {
                reserve0: state.reserve0,
                reserve1: state.reserve1,
                price0_cumulative: state.price0_cumulative,
                price1_cumulative: state.price1_cumulative,
                block_timestamp: state.last_timestamp,
            })
        }
    }
}
