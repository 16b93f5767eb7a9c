//! Oracle double with prices set directly by tests.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Decimal256, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Uint256,
};
use cw_storage_plus::{Item, Map};

use utils::decimals::{from_index_units, to_index_units};
use utils::module::{ModuleType, ModuleTypeResponse};
use utils::oracle::{IndexTokenResponse, ValuationResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub index_token: String,
    pub index_decimals: u8,
}

#[cw_serde]
pub enum ExecuteMsg {
    SetPrice {
        token: String,
        decimals: u8,
        price: Decimal256,
        volatility: Decimal256,
    },
    Initialize {
        token: String,
        depth: Option<u8>,
    },
    Update {
        token: String,
    },
}

#[cw_serde]
pub enum QueryMsg {
    ModuleType {},
    IndexToken {},
    Read { token: String, amount: Uint256 },
    AmountRequired { token: String, amount: Uint256 },
    /// Depth of the last `Initialize` received for `token`, if any.
    InitializedAt { token: String },
}

#[cw_serde]
struct PriceRecord {
    decimals: u8,
    price: Decimal256,
    volatility: Decimal256,
}

const INDEX: Item<IndexTokenResponse> = Item::new("index");
const PRICES: Map<&Addr, PriceRecord> = Map::new("prices");
const INITIALIZED: Map<&Addr, u8> = Map::new("initialized");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    INDEX.save(
        deps.storage,
        &IndexTokenResponse {
            index_token: deps.api.addr_validate(&msg.index_token)?,
            decimals: msg.index_decimals,
        },
    )?;
    Ok(Response::new())
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ExecuteMsg::SetPrice {
            token,
            decimals,
            price,
            volatility,
        } => {
            let token = deps.api.addr_validate(&token)?;
            PRICES.save(
                deps.storage,
                &token,
                &PriceRecord {
                    decimals,
                    price,
                    volatility,
                },
            )?;
        }
        ExecuteMsg::Initialize { token, depth } => {
            let token = deps.api.addr_validate(&token)?;
            INITIALIZED.save(deps.storage, &token, &depth.unwrap_or_default())?;
        }
        ExecuteMsg::Update { .. } => {}
    }
    Ok(Response::new())
}

fn price_of(deps: Deps, token: &str) -> StdResult<PriceRecord> {
    PRICES
        .may_load(deps.storage, &Addr::unchecked(token))?
        .ok_or_else(|| StdError::generic_err(format!("No price for {}", token)))
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::ModuleType {} => to_json_binary(&ModuleTypeResponse {
            module_type: ModuleType::Oracle,
        }),
        QueryMsg::IndexToken {} => to_json_binary(&INDEX.load(deps.storage)?),
        QueryMsg::Read { token, amount } => {
            let index = INDEX.load(deps.storage)?;
            let record = price_of(deps, &token)?;
            let amount = to_index_units(amount, record.price, record.decimals, index.decimals)
                .map_err(|err| StdError::generic_err(err.to_string()))?;
            to_json_binary(&ValuationResponse {
                amount,
                volatility: record.volatility,
            })
        }
        QueryMsg::AmountRequired { token, amount } => {
            let index = INDEX.load(deps.storage)?;
            let record = price_of(deps, &token)?;
            let amount = from_index_units(amount, record.price, record.decimals, index.decimals)
                .map_err(|err| StdError::generic_err(err.to_string()))?;
            to_json_binary(&ValuationResponse {
                amount,
                volatility: record.volatility,
            })
        }
        QueryMsg::InitializedAt { token } => {
            to_json_binary(&INITIALIZED.may_load(deps.storage, &Addr::unchecked(token))?)
        }
    }
}
