use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, Int256, MessageInfo, Response, StdResult,
};
use cw_storage_plus::Item;

use utils::feed::{FeedDescriptionResponse, FeedQueryMsg, RoundDataResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub base: String,
    pub quote: String,
    pub decimals: u8,
    pub answer: Int256,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Publishes a new round at the current block.
    SetAnswer { answer: Int256 },
}

const DESCRIPTION: Item<FeedDescriptionResponse> = Item::new("description");
const LATEST_ROUND: Item<RoundDataResponse> = Item::new("latest_round");

pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    DESCRIPTION.save(
        deps.storage,
        &FeedDescriptionResponse {
            base: msg.base,
            quote: msg.quote,
            decimals: msg.decimals,
        },
    )?;
    LATEST_ROUND.save(
        deps.storage,
        &RoundDataResponse {
            round_id: 1,
            answer: msg.answer,
            updated_at: env.block.time.seconds(),
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
    match msg {
        ExecuteMsg::SetAnswer { answer } => {
            LATEST_ROUND.update(deps.storage, |round| -> StdResult<_> {
                Ok(RoundDataResponse {
                    round_id: round.round_id + 1,
                    answer,
                    updated_at: env.block.time.seconds(),
                })
            })?;
        }
    }

    Ok(Response::new())
}

pub fn query(deps: Deps, _env: Env, msg: FeedQueryMsg) -> StdResult<Binary> {
    match msg {
        FeedQueryMsg::Description {} => to_json_binary(&DESCRIPTION.load(deps.storage)?),
        FeedQueryMsg::LatestRoundData {} => to_json_binary(&LATEST_ROUND.load(deps.storage)?),
    }
}
