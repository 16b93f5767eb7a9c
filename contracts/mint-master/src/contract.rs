#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Addr, Binary, Decimal, Deps, DepsMut, Env, MessageInfo,
    Response, Uint256,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use utils::ratio::Ratio;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MintingRatioResponse, QueryMsg};
use crate::state::{RatioParams, PARAMS};

use std::cmp::Ordering;

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:mint-master";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender))
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
        SetParams {
            instance,
            min_ratio,
            max_ratio,
            step_size,
            current_ratio,
            oracle,
        } => {
            let instance = ensure_instance(deps.as_ref(), &info, &instance)?;
            let params = RatioParams {
                min_ratio: Ratio::new(min_ratio)?,
                max_ratio: Ratio::new(max_ratio)?,
                step_size: Ratio::new(step_size)?,
                current_ratio: Ratio::new(current_ratio)?,
                oracle: deps.api.addr_validate(&oracle)?,
                initialized: true,
            };
            execute::save_params(deps, instance, params, "set_params")
        }
        SetMinRatio { instance, ratio } => {
            let ratio = Ratio::new(ratio)?;
            execute::modify(deps, &info, &instance, "set_min_ratio", |params| {
                params.min_ratio = ratio;
            })
        }
        SetMaxRatio { instance, ratio } => {
            let ratio = Ratio::new(ratio)?;
            execute::modify(deps, &info, &instance, "set_max_ratio", |params| {
                params.max_ratio = ratio;
            })
        }
        SetStepSize {
            instance,
            step_size,
        } => {
            let step_size = Ratio::new(step_size)?;
            execute::modify(deps, &info, &instance, "set_step_size", |params| {
                params.step_size = step_size;
            })
        }
        SetRatio { instance, ratio } => {
            let ratio = Ratio::new(ratio)?;
            execute::modify(deps, &info, &instance, "set_ratio", |params| {
                params.current_ratio = ratio;
            })
        }
        ChangeOracle { instance, oracle } => {
            let oracle = deps.api.addr_validate(&oracle)?;
            execute::modify(deps, &info, &instance, "change_oracle", |params| {
                params.oracle = oracle;
            })
        }
        UpdateMintingRatio { instance, token } => {
            execute::update_minting_ratio(deps, &info, &instance, token)
        }
    }
}

/// Only an instance may touch its own parameters.
fn ensure_instance(deps: Deps, info: &MessageInfo, instance: &str) -> Result<Addr, ContractError> {
    let instance = deps.api.addr_validate(instance)?;
    ensure_eq!(info.sender, instance, ContractError::Unauthorized {});
    Ok(instance)
}

fn load_params(deps: Deps, instance: &Addr) -> Result<RatioParams, ContractError> {
    PARAMS
        .may_load(deps.storage, instance)?
        .filter(|params| params.initialized)
        .ok_or_else(|| ContractError::NotInitialized {
            instance: instance.to_string(),
        })
}

mod execute {
    use super::*;

    use utils::decimals::pow10;
    use utils::oracle::OracleContract;
    use utils::token::query_decimals;

    pub fn save_params(
        deps: DepsMut,
        instance: Addr,
        params: RatioParams,
        action: &str,
    ) -> Result<Response, ContractError> {
        ensure!(params.is_valid(), ContractError::InvalidRatioParams {});
        PARAMS.save(deps.storage, &instance, &params)?;

        Ok(Response::new()
            .add_attribute("action", action)
            .add_attribute("instance", instance)
            .add_attribute("min_ratio", params.min_ratio.to_string())
            .add_attribute("max_ratio", params.max_ratio.to_string())
            .add_attribute("step_size", params.step_size.to_string())
            .add_attribute("current_ratio", params.current_ratio.to_string())
            .add_attribute("oracle", params.oracle))
    }

    /// Applies `change` to existing parameters and revalidates them.
    pub fn modify(
        deps: DepsMut,
        info: &MessageInfo,
        instance: &str,
        action: &str,
        change: impl FnOnce(&mut RatioParams),
    ) -> Result<Response, ContractError> {
        let instance = ensure_instance(deps.as_ref(), info, instance)?;
        let mut params = load_params(deps.as_ref(), &instance)?;
        change(&mut params);
        save_params(deps, instance, params, action)
    }

    pub fn update_minting_ratio(
        deps: DepsMut,
        info: &MessageInfo,
        instance: &str,
        token: String,
    ) -> Result<Response, ContractError> {
        let instance = ensure_instance(deps.as_ref(), info, instance)?;
        let mut params = load_params(deps.as_ref(), &instance)?;
        let token = deps.api.addr_validate(&token)?;

        let oracle = OracleContract(params.oracle.clone());
        let index = oracle.index_token(&deps.querier)?;
        let one_token = pow10(query_decimals(&deps.querier, &token)?)?;
        let one_index = pow10(index.decimals)?;
        let valuation = oracle.read(&deps.querier, &token, one_token)?;

        let previous = params.current_ratio;
        let (peg, next) = match valuation.amount.cmp(&one_index) {
            _ if params.step_size.is_zero() => ("locked", previous),
            Ordering::Equal => ("at_peg", previous),
            // more collateral backs every newly minted token
            Ordering::Less => (
                "below_peg",
                previous
                    .saturating_add(params.step_size)
                    .clamp_to(params.min_ratio, params.max_ratio),
            ),
            Ordering::Greater => (
                "above_peg",
                previous
                    .saturating_sub(params.step_size)
                    .clamp_to(params.min_ratio, params.max_ratio),
            ),
        };

        params.current_ratio = next;
        if next != previous {
            PARAMS.save(deps.storage, &instance, &params)?;
        }

        Ok(Response::new()
            .add_attribute("action", "update_minting_ratio")
            .add_attribute("instance", instance)
            .add_attribute("token", token)
            .add_attribute("peg", peg)
            .add_attribute("valuation", valuation.amount.to_string())
            .add_attribute("previous_ratio", previous.to_string())
            .add_attribute("current_ratio", next.to_string()))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Params { instance } => {
            let instance = deps.api.addr_validate(&instance)?;
            to_json_binary(&load_params(deps, &instance)?)?
        }
        QueryMsg::GetMintingRatio { instance, token } => {
            to_json_binary(&query::minting_ratio(deps, instance, token)?)?
        }
        QueryMsg::ModuleType {} => to_json_binary(&query::module_type())?,
    };

    Ok(res)
}

mod query {
    use super::*;

    use utils::module::{ModuleType, ModuleTypeResponse};

    pub fn module_type() -> ModuleTypeResponse {
        ModuleTypeResponse {
            module_type: ModuleType::MintMaster,
        }
    }

    /// The ratio does not depend on `token`, and orders are not capped.
    pub fn minting_ratio(
        deps: Deps,
        instance: String,
        token: String,
    ) -> Result<MintingRatioResponse, ContractError> {
        let instance = deps.api.addr_validate(&instance)?;
        deps.api.addr_validate(&token)?;
        let params = load_params(deps, &instance)?;

        Ok(MintingRatioResponse {
            ratio: Decimal::from(params.current_ratio),
            max_order_size: Uint256::MAX,
        })
    }
}
