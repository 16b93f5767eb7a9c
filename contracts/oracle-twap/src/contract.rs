#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    Uint256,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use utils::oracle::MAX_INIT_DEPTH;
use utils::pair::query_cumulative_prices;
use utils::token::query_decimals;
use utils::twap::{self, PairInfo, TokenPair};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{Config, CONFIG, PAIR_INFOS};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:oracle-twap";
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
        period: msg.period,
    };
    CONFIG.save(deps.storage, &cfg)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("period", cfg.period.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    use ExecuteMsg::*;
    match msg {
        RegisterPair { token, pair } => execute::register_pair(deps, info, token, pair),
        Initialize { token, depth } => execute::initialize(deps, token, depth),
        Update { token } => execute::update(deps, token),
    }
}

mod execute {
    use super::*;

    pub fn register_pair(
        deps: DepsMut,
        info: MessageInfo,
        token: String,
        pair: String,
    ) -> Result<Response, ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        ensure_eq!(info.sender, cfg.owner, ContractError::Unauthorized {});

        Ok(twap::register_pair(deps, &cfg.index_token, token, pair)?)
    }

    pub fn initialize(
        deps: DepsMut,
        token: String,
        depth: Option<u8>,
    ) -> Result<Response, ContractError> {
        let depth = depth.unwrap_or_default();
        ensure!(
            depth <= MAX_INIT_DEPTH,
            ContractError::InitDepthExceeded { depth }
        );

        let token = deps.api.addr_validate(&token)?;
        let response = Response::new()
            .add_attribute("action", "initialize")
            .add_attribute("token", &token);
        if let Some(info) = PAIR_INFOS.may_load(deps.storage, &token)? {
            // already sampling, the pair still has to be tradable
            twap::query_sample(&deps.querier, &info.pair)?;
            return Ok(response);
        }

        let registered = twap::load_registered_pair(deps.storage, &token)?;
        let period = CONFIG.load(deps.storage)?.period;
        let info = PairInfo::initialize(&deps.querier, registered.pair, period)?;
        PAIR_INFOS.save(deps.storage, &token, &info)?;

        Ok(response.add_attribute("timestamp", info.last_timestamp.to_string()))
    }

    /// Never fails for a token that was not initialized yet.
    pub fn update(deps: DepsMut, token: String) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let response = Response::new()
            .add_attribute("action", "update")
            .add_attribute("token", &token);

        let mut info = match PAIR_INFOS.may_load(deps.storage, &token)? {
            Some(info) => info,
            None => return Ok(response.add_attribute("updated", "false")),
        };

        let sample = query_cumulative_prices(&deps.querier, &info.pair)?;
        let updated = info.update(&sample);
        if updated {
            PAIR_INFOS.save(deps.storage, &token, &info)?;
        }

        Ok(response.add_attribute("updated", updated.to_string()))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        QueryMsg::ModuleType {} => to_json_binary(&query::module_type())?,
        QueryMsg::IndexToken {} => to_json_binary(&query::index_token(deps)?)?,
        QueryMsg::Read { token, amount } => to_json_binary(&query::read(deps, token, amount)?)?,
        QueryMsg::AmountRequired { token, amount } => {
            to_json_binary(&query::amount_required(deps, token, amount)?)?
        }
        QueryMsg::Pair { token } => to_json_binary(&query::pair(deps, token)?)?,
        QueryMsg::PairInfo { token } => to_json_binary(&query::pair_info(deps, token)?)?,
    };

    Ok(res)
}

mod query {
    use super::*;

    use cosmwasm_std::Decimal256;
    use utils::module::{ModuleType, ModuleTypeResponse};
    use utils::oracle::{IndexTokenResponse, ValuationResponse};
    use utils::twap::{amount_at, value_at};

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

    pub fn pair(deps: Deps, token: String) -> Result<TokenPair, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        Ok(twap::load_registered_pair(deps.storage, &token)?)
    }

    pub fn pair_info(deps: Deps, token: String) -> Result<PairInfo, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        load_pair_info(deps, &token)
    }

    fn load_pair_info(deps: Deps, token: &Addr) -> Result<PairInfo, ContractError> {
        PAIR_INFOS
            .may_load(deps.storage, token)?
            .ok_or_else(|| ContractError::NotInitialized {
                token: token.to_string(),
            })
    }

    /// Averaged raw index units per raw unit of `token`, scaled.
    fn average_price(deps: Deps, token: &Addr) -> Result<Uint256, ContractError> {
        Ok(load_pair_info(deps, token)?.average_price(token)?)
    }

    pub fn read(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let price = average_price(deps, &token)?;

        Ok(ValuationResponse {
            amount: value_at(amount, price)?,
            volatility: Decimal256::zero(),
        })
    }

    pub fn amount_required(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let price = average_price(deps, &token)?;

        Ok(ValuationResponse {
            amount: amount_at(amount, price)?,
            volatility: Decimal256::zero(),
        })
    }
}
