#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Addr, Binary, Decimal256, Deps, DepsMut, Env,
    MessageInfo, Response, Uint256,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use utils::feed::{self, latest_price, load_feed};
use utils::oracle::MAX_INIT_DEPTH;
use utils::token::query_decimals;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{Config, CONFIG};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:oracle-feed";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let index_token = deps.api.addr_validate(&msg.index_token)?;
    let cfg = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        index_decimals: query_decimals(&deps.querier, &index_token)?,
        index_token,
        max_feed_age: msg.max_feed_age,
    };
    CONFIG.save(deps.storage, &cfg)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    use ExecuteMsg::*;
    match msg {
        RegisterOracle { token, feed } => restricted::register_oracle(deps, info, token, feed),
        UpdateOracle { token, feed } => restricted::update_oracle(deps, info, token, feed),
        UnregisterOracle { token } => restricted::unregister_oracle(deps, info, token),
        UpdateConfig { max_feed_age } => restricted::update_config(deps, info, max_feed_age),
        Initialize { token, depth } => execute::initialize(deps, env, token, depth),
        Update { token } => Ok(Response::new()
            .add_attribute("action", "update")
            .add_attribute("token", token)),
    }
}

mod restricted {
    use super::*;

    fn ensure_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        ensure_eq!(sender, &cfg.owner, ContractError::Unauthorized {});
        Ok(())
    }

    pub fn register_oracle(
        deps: DepsMut,
        info: MessageInfo,
        token: String,
        feed: String,
    ) -> Result<Response, ContractError> {
        ensure_owner(deps.as_ref(), &info.sender)?;
        Ok(feed::register_oracle(deps, token, feed)?)
    }

    pub fn update_oracle(
        deps: DepsMut,
        info: MessageInfo,
        token: String,
        feed: String,
    ) -> Result<Response, ContractError> {
        ensure_owner(deps.as_ref(), &info.sender)?;
        Ok(feed::update_oracle(deps, token, feed)?)
    }

    pub fn unregister_oracle(
        deps: DepsMut,
        info: MessageInfo,
        token: String,
    ) -> Result<Response, ContractError> {
        ensure_owner(deps.as_ref(), &info.sender)?;
        Ok(feed::unregister_oracle(deps, token)?)
    }

    pub fn update_config(
        deps: DepsMut,
        info: MessageInfo,
        max_feed_age: Option<u64>,
    ) -> Result<Response, ContractError> {
        ensure_owner(deps.as_ref(), &info.sender)?;

        CONFIG.update(deps.storage, |mut cfg| -> Result<_, ContractError> {
            cfg.max_feed_age = max_feed_age;
            Ok(cfg)
        })?;

        Ok(Response::new()
            .add_attribute("action", "update_config")
            .add_attribute(
                "max_feed_age",
                max_feed_age.map_or_else(|| "none".to_owned(), |age| age.to_string()),
            ))
    }
}

mod execute {
    use super::*;

    pub fn initialize(
        deps: DepsMut,
        env: Env,
        token: String,
        depth: Option<u8>,
    ) -> Result<Response, ContractError> {
        let depth = depth.unwrap_or_default();
        ensure!(
            depth <= MAX_INIT_DEPTH,
            ContractError::InitDepthExceeded { depth }
        );

        let token = deps.api.addr_validate(&token)?;
        let price = query::price(deps.as_ref(), &env, &token)?;

        Ok(Response::new()
            .add_attribute("action", "initialize")
            .add_attribute("token", token)
            .add_attribute("price", price.to_string()))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        QueryMsg::ModuleType {} => to_json_binary(&query::module_type())?,
        QueryMsg::IndexToken {} => to_json_binary(&query::index_token(deps)?)?,
        QueryMsg::Read { token, amount } => {
            to_json_binary(&query::read(deps, env, token, amount)?)?
        }
        QueryMsg::AmountRequired { token, amount } => {
            to_json_binary(&query::amount_required(deps, env, token, amount)?)?
        }
        QueryMsg::Feed { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&load_feed(deps.storage, &token)?)?
        }
        QueryMsg::Price { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&query::price(deps, &env, &token)?)?
        }
    };

    Ok(res)
}

mod query {
    use super::*;

    use utils::decimals::{from_index_units, to_index_units};
    use utils::module::{ModuleType, ModuleTypeResponse};
    use utils::oracle::{IndexTokenResponse, ValuationResponse};

    pub fn module_type() -> ModuleTypeResponse {
        ModuleTypeResponse {
            module_type: ModuleType::Oracle,
        }
    }

    pub fn index_token(deps: Deps) -> Result<IndexTokenResponse, ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        Ok(IndexTokenResponse {
            index_token: cfg.index_token,
            decimals: cfg.index_decimals,
        })
    }

    /// Feed price of `token` along with the token's precision.
    fn quote(deps: Deps, env: &Env, token: &Addr) -> Result<(Decimal256, u8), ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        let record = load_feed(deps.storage, token)?;
        let price = latest_price(
            &deps.querier,
            &record,
            env.block.time.seconds(),
            cfg.max_feed_age,
        )?;
        Ok((price, record.token_decimals))
    }

    pub fn price(deps: Deps, env: &Env, token: &Addr) -> Result<Decimal256, ContractError> {
        Ok(quote(deps, env, token)?.0)
    }

    pub fn read(
        deps: Deps,
        env: Env,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let (price, token_decimals) = quote(deps, &env, &token)?;
        let index_decimals = CONFIG.load(deps.storage)?.index_decimals;

        Ok(ValuationResponse {
            amount: to_index_units(amount, price, token_decimals, index_decimals)?,
            volatility: Decimal256::zero(),
        })
    }

    pub fn amount_required(
        deps: Deps,
        env: Env,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let (price, token_decimals) = quote(deps, &env, &token)?;
        let index_decimals = CONFIG.load(deps.storage)?.index_decimals;

        Ok(ValuationResponse {
            amount: from_index_units(amount, price, token_decimals, index_decimals)?,
            volatility: Decimal256::zero(),
        })
    }
}
