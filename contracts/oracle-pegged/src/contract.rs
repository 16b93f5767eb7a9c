#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, to_json_binary, Addr, Binary, Decimal256, Deps, DepsMut, Env, MessageInfo, Response,
    Uint256,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use utils::oracle::{OracleExecuteMsg, MAX_INIT_DEPTH};
use utils::token::query_decimals;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{Config, CONFIG, TOKEN_DECIMALS};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:oracle-pegged";
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
    let index_decimals = query_decimals(&deps.querier, &index_token)?;
    CONFIG.save(
        deps.storage,
        &Config {
            index_token: index_token.clone(),
            index_decimals,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("index_token", index_token))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    match msg {
        OracleExecuteMsg::Initialize { token, depth } => execute::initialize(deps, token, depth),
        OracleExecuteMsg::Update { token } => Ok(Response::new()
            .add_attribute("action", "update")
            .add_attribute("token", token)),
    }
}

mod execute {
    use super::*;

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
        if TOKEN_DECIMALS.has(deps.storage, &token) {
            return Ok(response);
        }

        let decimals = query_decimals(&deps.querier, &token)?;
        TOKEN_DECIMALS.save(deps.storage, &token, &decimals)?;

        Ok(response.add_attribute("decimals", decimals.to_string()))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    use QueryMsg::*;

    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        ModuleType {} => to_json_binary(&query::module_type())?,
        IndexToken {} => to_json_binary(&query::index_token(deps)?)?,
        Read { token, amount } => to_json_binary(&query::read(deps, token, amount)?)?,
        AmountRequired { token, amount } => {
            to_json_binary(&query::amount_required(deps, token, amount)?)?
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

    /// Decimals cached on initialization, otherwise asked from the token itself.
    fn token_decimals(deps: Deps, token: &Addr) -> Result<u8, ContractError> {
        match TOKEN_DECIMALS.may_load(deps.storage, token)? {
            Some(decimals) => Ok(decimals),
            None => Ok(query_decimals(&deps.querier, token)?),
        }
    }

    pub fn read(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        let token = deps.api.addr_validate(&token)?;
        let decimals = token_decimals(deps, &token)?;

        Ok(ValuationResponse {
            amount: to_index_units(amount, Decimal256::one(), decimals, cfg.index_decimals)?,
            volatility: Decimal256::zero(),
        })
    }

    pub fn amount_required(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let cfg = CONFIG.load(deps.storage)?;
        let token = deps.api.addr_validate(&token)?;
        let decimals = token_decimals(deps, &token)?;

        Ok(ValuationResponse {
            amount: from_index_units(amount, Decimal256::one(), decimals, cfg.index_decimals)?,
            volatility: Decimal256::zero(),
        })
    }
}
