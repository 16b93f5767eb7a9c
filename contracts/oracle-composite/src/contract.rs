#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, to_json_binary, Addr, Binary, Decimal256, Deps, DepsMut, Env, MessageInfo, Response,
    Uint256,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use utils::oracle::{OracleContract, MAX_INIT_DEPTH};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{Config, Hop, CONFIG, HOPS};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:oracle-composite";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    ensure!(
        msg.interim_tokens.len() == msg.oracles.len(),
        ContractError::HopLengthMismatch {
            tokens: msg.interim_tokens.len(),
            oracles: msg.oracles.len(),
        }
    );
    ensure!(!msg.oracles.is_empty(), ContractError::NoHops {});

    let mut hops = Vec::with_capacity(msg.oracles.len());
    let mut index_decimals = 0;
    for (hop, (interim_token, oracle)) in msg.interim_tokens.iter().zip(&msg.oracles).enumerate() {
        let interim_token = deps.api.addr_validate(interim_token)?;
        let oracle = OracleContract(deps.api.addr_validate(oracle)?);

        let index = oracle.index_token(&deps.querier)?;
        ensure!(
            index.index_token == interim_token,
            ContractError::HopIndexMismatch {
                hop,
                expected: interim_token.to_string(),
                actual: index.index_token.to_string(),
            }
        );
        index_decimals = index.decimals;

        hops.push(Hop {
            interim_token,
            oracle: oracle.0,
        });
    }

    let index_token = hops
        .last()
        .map(|hop| hop.interim_token.clone())
        .ok_or(ContractError::NoHops {})?;
    CONFIG.save(
        deps.storage,
        &Config {
            index_token: index_token.clone(),
            index_decimals,
        },
    )?;
    HOPS.save(deps.storage, &hops)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("index_token", index_token)
        .add_attribute("hops", hops.len().to_string()))
}

/// Token each hop takes as input when valuing `token`.
fn hop_inputs<'a>(token: &'a Addr, hops: &'a [Hop]) -> impl Iterator<Item = &'a Addr> {
    std::iter::once(token).chain(hops.iter().map(|hop| &hop.interim_token))
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
        ExecuteMsg::Initialize { token, depth } => execute::initialize(deps, token, depth),
        ExecuteMsg::Update { token } => execute::update(deps, token),
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
        let hops = HOPS.load(deps.storage)?;
        let messages = hops
            .iter()
            .zip(hop_inputs(&token, &hops))
            .map(|(hop, input)| OracleContract(hop.oracle.clone()).initialize_msg(input, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Response::new()
            .add_attribute("action", "initialize")
            .add_attribute("token", token)
            .add_messages(messages))
    }

    pub fn update(deps: DepsMut, token: String) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let hops = HOPS.load(deps.storage)?;
        let messages = hops
            .iter()
            .zip(hop_inputs(&token, &hops))
            .map(|(hop, input)| OracleContract(hop.oracle.clone()).update_msg(input))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Response::new()
            .add_attribute("action", "update")
            .add_attribute("token", token)
            .add_messages(messages))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        QueryMsg::Hops {} => to_json_binary(&HOPS.load(deps.storage)?)?,
        QueryMsg::ModuleType {} => to_json_binary(&query::module_type())?,
        QueryMsg::IndexToken {} => to_json_binary(&query::index_token(deps)?)?,
        QueryMsg::Read { token, amount } => to_json_binary(&query::read(deps, token, amount)?)?,
        QueryMsg::AmountRequired { token, amount } => {
            to_json_binary(&query::amount_required(deps, token, amount)?)?
        }
    };

    Ok(res)
}

mod query {
    use super::*;

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

    /// Values `amount` of `token` hop by hop, from the base token towards the index token.
    pub fn read(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let hops = HOPS.load(deps.storage)?;

        let mut valuation = ValuationResponse {
            amount,
            volatility: Decimal256::zero(),
        };
        for (hop, input) in hops.iter().zip(hop_inputs(&token, &hops)) {
            let next = OracleContract(hop.oracle.clone()).read(
                &deps.querier,
                input,
                valuation.amount,
            )?;
            valuation = ValuationResponse {
                amount: next.amount,
                volatility: valuation.volatility.max(next.volatility),
            };
        }

        Ok(valuation)
    }

    /// Walks the route backwards, from the index token amount to the base token amount.
    pub fn amount_required(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let hops = HOPS.load(deps.storage)?;
        let inputs: Vec<&Addr> = hop_inputs(&token, &hops).take(hops.len()).collect();

        let mut valuation = ValuationResponse {
            amount,
            volatility: Decimal256::zero(),
        };
        for (hop, input) in hops.iter().zip(inputs).rev() {
            let next = OracleContract(hop.oracle.clone()).amount_required(
                &deps.querier,
                input,
                valuation.amount,
            )?;
            valuation = ValuationResponse {
                amount: next.amount,
                volatility: valuation.volatility.max(next.volatility),
            };
        }

        Ok(valuation)
    }
}
