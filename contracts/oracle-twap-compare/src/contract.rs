#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    Uint256,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use utils::oracle::MAX_INIT_DEPTH;
use utils::pair::{query_cumulative_prices, query_pair};
use utils::token::query_decimals;
use utils::twap::{self, PairInfo, TokenPair};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{Config, Windows, CONFIG, WINDOWS};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:oracle-twap-compare";
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
        msg.short_period > 0 && msg.short_period < msg.long_period,
        ContractError::InvalidPeriods {
            short: msg.short_period,
            long: msg.long_period
        }
    );

    let index_token = deps.api.addr_validate(&msg.index_token)?;
    let cfg = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        index_decimals: query_decimals(&deps.querier, &index_token)?,
        index_token,
        short_period: msg.short_period,
        long_period: msg.long_period,
    };
    CONFIG.save(deps.storage, &cfg)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("short_period", cfg.short_period.to_string())
        .add_attribute("long_period", cfg.long_period.to_string()))
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
        if let Some(windows) = WINDOWS.may_load(deps.storage, &token)? {
            // already sampling, the pair still has to be tradable
            twap::query_sample(&deps.querier, &windows.short.pair)?;
            return Ok(response);
        }

        let registered = twap::load_registered_pair(deps.storage, &token)?;
        let cfg = CONFIG.load(deps.storage)?;

        // one sample seeds both windows
        let tokens = query_pair(&deps.querier, &registered.pair)?;
        let sample = query_cumulative_prices(&deps.querier, &registered.pair)?;
        let windows = Windows {
            short: PairInfo::from_sample(
                registered.pair.clone(),
                tokens.clone(),
                &sample,
                cfg.short_period,
            )?,
            long: PairInfo::from_sample(registered.pair, tokens, &sample, cfg.long_period)?,
        };
        WINDOWS.save(deps.storage, &token, &windows)?;

        Ok(response.add_attribute("timestamp", sample.block_timestamp.to_string()))
    }

    /// Never fails for a token that was not initialized yet.
    pub fn update(deps: DepsMut, token: String) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let response = Response::new()
            .add_attribute("action", "update")
            .add_attribute("token", &token);

        let mut windows = match WINDOWS.may_load(deps.storage, &token)? {
            Some(windows) => windows,
            None => return Ok(response),
        };

        let sample = query_cumulative_prices(&deps.querier, &windows.short.pair)?;
        let short_updated = windows.short.update(&sample);
        let long_updated = windows.long.update(&sample);
        if short_updated || long_updated {
            WINDOWS.save(deps.storage, &token, &windows)?;
        }

        Ok(response
            .add_attribute("short_updated", short_updated.to_string())
            .add_attribute("long_updated", long_updated.to_string()))
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
        QueryMsg::Windows { token } => to_json_binary(&query::windows(deps, token)?)?,
        QueryMsg::WindowPrices { token } => {
            to_json_binary(&query::window_prices(deps, token)?)?
        }
    };

    Ok(res)
}

mod query {
    use super::*;

    use cosmwasm_std::Decimal256;
    use utils::decimals::relative_spread;
    use utils::module::{ModuleType, ModuleTypeResponse};
    use utils::oracle::{IndexTokenResponse, ValuationResponse};
    use utils::twap::{amount_at, value_at, whole_unit_price};

    use crate::msg::WindowPricesResponse;

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

    pub fn windows(deps: Deps, token: String) -> Result<Windows, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        load_windows(deps, &token)
    }

    fn load_windows(deps: Deps, token: &Addr) -> Result<Windows, ContractError> {
        WINDOWS
            .may_load(deps.storage, token)?
            .ok_or_else(|| ContractError::NotInitialized {
                token: token.to_string(),
            })
    }

    /// Scaled raw-unit averages of both windows.
    struct Prices {
        short: Uint256,
        long: Uint256,
    }

    impl Prices {
        fn volatility(&self) -> Decimal256 {
            relative_spread(Decimal256::new(self.short), Decimal256::new(self.long))
        }
    }

    fn load_prices(deps: Deps, token: &Addr) -> Result<Prices, ContractError> {
        let windows = load_windows(deps, token)?;
        Ok(Prices {
            short: windows.short.average_price(token)?,
            long: windows.long.average_price(token)?,
        })
    }

    pub fn window_prices(deps: Deps, token: String) -> Result<WindowPricesResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let cfg = CONFIG.load(deps.storage)?;
        let token_decimals = twap::load_registered_pair(deps.storage, &token)?.decimals;
        let prices = load_prices(deps, &token)?;
        Ok(WindowPricesResponse {
            short: whole_unit_price(prices.short, token_decimals, cfg.index_decimals)?,
            long: whole_unit_price(prices.long, token_decimals, cfg.index_decimals)?,
        })
    }

    pub fn read(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let prices = load_prices(deps, &token)?;

        // minting is valued at the lower price
        let price = prices.short.min(prices.long);
        Ok(ValuationResponse {
            amount: value_at(amount, price)?,
            volatility: prices.volatility(),
        })
    }

    pub fn amount_required(
        deps: Deps,
        token: String,
        amount: Uint256,
    ) -> Result<ValuationResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let prices = load_prices(deps, &token)?;

        // redemptions pay out at the higher price
        let price = prices.short.max(prices.long);
        Ok(ValuationResponse {
            amount: amount_at(amount, price)?,
            volatility: prices.volatility(),
        })
    }
}
