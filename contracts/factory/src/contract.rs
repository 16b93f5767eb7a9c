#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    ensure, ensure_eq, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use cw_utils::nonpayable;

use utils::module::{query_module_type, ModuleType};
use utils::oracle::OracleContract;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{
    Config, ForeignTokenRecord, ModuleRecord, CONFIG, FOREIGN_TOKENS, FOREIGN_TOKEN_LIST,
    MODULES, MODULE_LIST,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:factory";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// settings for pagination
const MAX_LIMIT: u32 = 30;
const DEFAULT_LIMIT: u32 = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    CONFIG.save(
        deps.storage,
        &Config {
            owner: owner.clone(),
        },
    )?;
    MODULE_LIST.save(deps.storage, &vec![])?;
    FOREIGN_TOKEN_LIST.save(deps.storage, &vec![])?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("sender", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let cfg = CONFIG.load(deps.storage)?;
    ensure_eq!(info.sender, cfg.owner, ContractError::Unauthorized {});

    use ExecuteMsg::*;
    match msg {
        AdmitModule {
            module,
            module_type,
            name,
            url,
        } => modules::admit(deps, module, module_type, name, url),
        UpdateModule { module, name, url } => modules::update(deps, module, name, url),
        RemoveModule { module } => modules::remove(deps, module),
        TransferOwnership { owner } => {
            let owner = deps.api.addr_validate(&owner)?;
            CONFIG.save(
                deps.storage,
                &Config {
                    owner: owner.clone(),
                },
            )?;
            Ok(Response::new()
                .add_attribute("action", "transfer_ownership")
                .add_attribute("owner", owner))
        }
        AdmitForeignToken {
            token,
            is_collateral,
            oracle,
        } => foreign_tokens::admit(deps, token, is_collateral, oracle),
        UpdateForeignToken {
            token,
            is_collateral,
        } => foreign_tokens::update(deps, token, is_collateral),
        RemoveForeignToken { token } => foreign_tokens::remove(deps, token),
        AssignOracle { token, oracle } => foreign_tokens::assign_oracle(deps, token, oracle),
        RemoveOracle { token, oracle } => foreign_tokens::remove_oracle(deps, token, oracle),
    }
}

fn load_module(deps: Deps, module: &Addr) -> Result<ModuleRecord, ContractError> {
    MODULES
        .may_load(deps.storage, module)?
        .ok_or_else(|| ContractError::ModuleNotFound {
            module: module.to_string(),
        })
}

fn load_foreign_token(deps: Deps, token: &Addr) -> Result<ForeignTokenRecord, ContractError> {
    FOREIGN_TOKENS
        .may_load(deps.storage, token)?
        .ok_or_else(|| ContractError::ForeignTokenNotFound {
            token: token.to_string(),
        })
}

mod modules {
    use super::*;

    pub fn admit(
        deps: DepsMut,
        module: String,
        module_type: ModuleType,
        name: String,
        url: String,
    ) -> Result<Response, ContractError> {
        let module = deps.api.addr_validate(&module)?;
        ensure!(
            !MODULES.has(deps.storage, &module),
            ContractError::ModuleAlreadyAdmitted {
                module: module.to_string()
            }
        );

        let reported = query_module_type(&deps.querier, &module)?;
        ensure!(
            reported == module_type,
            ContractError::ModuleTypeMismatch {
                module: module.to_string(),
                declared: module_type,
                reported,
            }
        );

        MODULES.save(
            deps.storage,
            &module,
            &ModuleRecord {
                address: module.clone(),
                module_type,
                name,
                url,
            },
        )?;
        MODULE_LIST.update(deps.storage, |mut list| -> StdResult<_> {
            list.push(module.clone());
            Ok(list)
        })?;

        Ok(Response::new()
            .add_attribute("action", "admit_module")
            .add_attribute("module", module)
            .add_attribute("module_type", module_type.to_string()))
    }

    pub fn update(
        deps: DepsMut,
        module: String,
        name: String,
        url: String,
    ) -> Result<Response, ContractError> {
        let module = deps.api.addr_validate(&module)?;
        let mut record = load_module(deps.as_ref(), &module)?;
        record.name = name;
        record.url = url;
        MODULES.save(deps.storage, &module, &record)?;

        Ok(Response::new()
            .add_attribute("action", "update_module")
            .add_attribute("module", module))
    }

    pub fn remove(deps: DepsMut, module: String) -> Result<Response, ContractError> {
        let module = deps.api.addr_validate(&module)?;
        load_module(deps.as_ref(), &module)?;

        MODULES.remove(deps.storage, &module);
        MODULE_LIST.update(deps.storage, |mut list| -> StdResult<_> {
            list.retain(|admitted| *admitted != module);
            Ok(list)
        })?;

        // a removed module must not keep valuing any token
        let mut unassigned = 0u32;
        for token in FOREIGN_TOKEN_LIST.load(deps.storage)? {
            let mut record = FOREIGN_TOKENS.load(deps.storage, &token)?;
            let before = record.oracles.len();
            record.oracles.retain(|oracle| *oracle != module);
            if record.oracles.len() != before {
                FOREIGN_TOKENS.save(deps.storage, &token, &record)?;
                unassigned += 1;
            }
        }

        Ok(Response::new()
            .add_attribute("action", "remove_module")
            .add_attribute("module", module)
            .add_attribute("unassigned_from", unassigned.to_string()))
    }
}

mod foreign_tokens {
    use super::*;

    use cosmwasm_std::WasmMsg;

    fn ensure_oracle(deps: Deps, oracle: &Addr) -> Result<OracleContract, ContractError> {
        let is_oracle = MODULES
            .may_load(deps.storage, oracle)?
            .map_or(false, |record| record.module_type == ModuleType::Oracle);
        ensure!(
            is_oracle,
            ContractError::NotAnOracle {
                module: oracle.to_string()
            }
        );
        Ok(OracleContract(oracle.clone()))
    }

    /// Adds `oracle` unless already assigned and prepares it to value `token`.
    fn join_oracle(
        record: &mut ForeignTokenRecord,
        oracle: &OracleContract,
    ) -> Result<WasmMsg, ContractError> {
        if !record.oracles.contains(oracle.addr()) {
            record.oracles.push(oracle.addr().clone());
        }
        Ok(oracle.initialize_msg(&record.address, 0)?)
    }

    pub fn admit(
        deps: DepsMut,
        token: String,
        is_collateral: bool,
        oracle: String,
    ) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let oracle = ensure_oracle(deps.as_ref(), &deps.api.addr_validate(&oracle)?)?;

        let mut record = match FOREIGN_TOKENS.may_load(deps.storage, &token)? {
            Some(record) => record,
            None => {
                FOREIGN_TOKEN_LIST.update(deps.storage, |mut list| -> StdResult<_> {
                    list.push(token.clone());
                    Ok(list)
                })?;
                ForeignTokenRecord {
                    address: token.clone(),
                    is_collateral,
                    oracles: vec![],
                }
            }
        };
        record.is_collateral = is_collateral;
        let initialize = join_oracle(&mut record, &oracle)?;
        FOREIGN_TOKENS.save(deps.storage, &token, &record)?;

        Ok(Response::new()
            .add_attribute("action", "admit_foreign_token")
            .add_attribute("token", token)
            .add_attribute("is_collateral", is_collateral.to_string())
            .add_attribute("oracle", oracle.0)
            .add_message(initialize))
    }

    pub fn update(
        deps: DepsMut,
        token: String,
        is_collateral: bool,
    ) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let mut record = load_foreign_token(deps.as_ref(), &token)?;
        record.is_collateral = is_collateral;
        FOREIGN_TOKENS.save(deps.storage, &token, &record)?;

        Ok(Response::new()
            .add_attribute("action", "update_foreign_token")
            .add_attribute("token", token)
            .add_attribute("is_collateral", is_collateral.to_string()))
    }

    pub fn remove(deps: DepsMut, token: String) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        load_foreign_token(deps.as_ref(), &token)?;

        FOREIGN_TOKENS.remove(deps.storage, &token);
        FOREIGN_TOKEN_LIST.update(deps.storage, |mut list| -> StdResult<_> {
            list.retain(|registered| *registered != token);
            Ok(list)
        })?;

        Ok(Response::new()
            .add_attribute("action", "remove_foreign_token")
            .add_attribute("token", token))
    }

    pub fn assign_oracle(
        deps: DepsMut,
        token: String,
        oracle: String,
    ) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let oracle = ensure_oracle(deps.as_ref(), &deps.api.addr_validate(&oracle)?)?;
        let mut record = load_foreign_token(deps.as_ref(), &token)?;

        let index_token = oracle.index_token(&deps.querier)?.index_token;
        let is_collateral = FOREIGN_TOKENS
            .may_load(deps.storage, &index_token)?
            .map_or(false, |index| index.is_collateral);
        ensure!(
            is_collateral,
            ContractError::IndexTokenNotCollateral {
                index_token: index_token.to_string()
            }
        );

        let initialize = join_oracle(&mut record, &oracle)?;
        FOREIGN_TOKENS.save(deps.storage, &token, &record)?;

        Ok(Response::new()
            .add_attribute("action", "assign_oracle")
            .add_attribute("token", token)
            .add_attribute("oracle", oracle.0)
            .add_message(initialize))
    }

    pub fn remove_oracle(
        deps: DepsMut,
        token: String,
        oracle: String,
    ) -> Result<Response, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let oracle = deps.api.addr_validate(&oracle)?;
        let mut record = load_foreign_token(deps.as_ref(), &token)?;

        let position = record
            .oracles
            .iter()
            .position(|assigned| *assigned == oracle)
            .ok_or_else(|| ContractError::OracleNotAssigned {
                token: token.to_string(),
                oracle: oracle.to_string(),
            })?;
        record.oracles.remove(position);
        FOREIGN_TOKENS.save(deps.storage, &token, &record)?;

        Ok(Response::new()
            .add_attribute("action", "remove_oracle")
            .add_attribute("token", token)
            .add_attribute("oracle", oracle))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    let res = match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?)?,
        QueryMsg::IsModule { module } => to_json_binary(&query::is_module(deps, module)?)?,
        QueryMsg::IsValidModuleType {
            module,
            module_type,
        } => to_json_binary(&query::is_valid_module_type(deps, module, module_type)?)?,
        QueryMsg::ModuleCount {} => to_json_binary(&query::module_count(deps)?)?,
        QueryMsg::ModuleAtIndex { index } => {
            to_json_binary(&query::module_at_index(deps, index)?)?
        }
        QueryMsg::Module { module } => {
            let module = deps.api.addr_validate(&module)?;
            to_json_binary(&load_module(deps, &module)?)?
        }
        QueryMsg::ListModules { start_after, limit } => {
            to_json_binary(&query::list_modules(deps, start_after, limit)?)?
        }
        QueryMsg::ForeignToken { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&load_foreign_token(deps, &token)?)?
        }
        QueryMsg::ForeignTokenCount {} => to_json_binary(&query::foreign_token_count(deps)?)?,
        QueryMsg::ForeignTokenAtIndex { index } => {
            to_json_binary(&query::foreign_token_at_index(deps, index)?)?
        }
        QueryMsg::ForeignTokenOracleCount { token } => {
            to_json_binary(&query::oracle_count(deps, token)?)?
        }
        QueryMsg::ForeignTokenOracleAtIndex { token, index } => {
            to_json_binary(&query::oracle_at_index(deps, token, index)?)?
        }
        QueryMsg::IsCollateral { token } => to_json_binary(&query::is_collateral(deps, token)?)?,
        QueryMsg::ListForeignTokens { start_after, limit } => {
            to_json_binary(&query::list_foreign_tokens(deps, start_after, limit)?)?
        }
    };

    Ok(res)
}

mod query {
    use super::*;

    use crate::msg::{
        CountResponse, IsCollateralResponse, IsModuleResponse, IsValidModuleTypeResponse,
        ListForeignTokensResponse, ListModulesResponse, OracleResponse,
    };

    fn count(len: usize) -> u32 {
        len.try_into().unwrap_or(u32::MAX)
    }

    fn at_index(list: &[Addr], index: u32) -> Result<&Addr, ContractError> {
        list.get(index as usize)
            .ok_or_else(|| ContractError::IndexOutOfRange {
                index,
                count: count(list.len()),
            })
    }

    pub fn is_module(deps: Deps, module: String) -> Result<IsModuleResponse, ContractError> {
        let module = deps.api.addr_validate(&module)?;
        Ok(IsModuleResponse {
            is_module: MODULES.has(deps.storage, &module),
        })
    }

    pub fn is_valid_module_type(
        deps: Deps,
        module: String,
        module_type: ModuleType,
    ) -> Result<IsValidModuleTypeResponse, ContractError> {
        let module = deps.api.addr_validate(&module)?;
        let is_valid = MODULES
            .may_load(deps.storage, &module)?
            .map_or(false, |record| record.module_type == module_type);
        Ok(IsValidModuleTypeResponse { is_valid })
    }

    pub fn module_count(deps: Deps) -> Result<CountResponse, ContractError> {
        let list = MODULE_LIST.load(deps.storage)?;
        Ok(CountResponse {
            count: count(list.len()),
        })
    }

    pub fn module_at_index(deps: Deps, index: u32) -> Result<ModuleRecord, ContractError> {
        let list = MODULE_LIST.load(deps.storage)?;
        let module = at_index(&list, index)?;
        load_module(deps, module)
    }

    pub fn list_modules(
        deps: Deps,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> Result<ListModulesResponse, ContractError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        let start_after = start_after
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?;
        let start = start_after.as_ref().map(Bound::exclusive);

        let modules: Vec<ModuleRecord> = MODULES
            .range(deps.storage, start, None, Order::Ascending)
            .take(limit)
            .map(|item| item.map(|(_, record)| record))
            .collect::<StdResult<_>>()?;

        Ok(ListModulesResponse { modules })
    }

    pub fn foreign_token_count(deps: Deps) -> Result<CountResponse, ContractError> {
        let list = FOREIGN_TOKEN_LIST.load(deps.storage)?;
        Ok(CountResponse {
            count: count(list.len()),
        })
    }

    pub fn foreign_token_at_index(
        deps: Deps,
        index: u32,
    ) -> Result<ForeignTokenRecord, ContractError> {
        let list = FOREIGN_TOKEN_LIST.load(deps.storage)?;
        let token = at_index(&list, index)?;
        load_foreign_token(deps, token)
    }

    pub fn oracle_count(deps: Deps, token: String) -> Result<CountResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let record = load_foreign_token(deps, &token)?;
        Ok(CountResponse {
            count: count(record.oracles.len()),
        })
    }

    pub fn oracle_at_index(
        deps: Deps,
        token: String,
        index: u32,
    ) -> Result<OracleResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let record = load_foreign_token(deps, &token)?;
        Ok(OracleResponse {
            oracle: at_index(&record.oracles, index)?.clone(),
        })
    }

    pub fn is_collateral(deps: Deps, token: String) -> Result<IsCollateralResponse, ContractError> {
        let token = deps.api.addr_validate(&token)?;
        let is_collateral = FOREIGN_TOKENS
            .may_load(deps.storage, &token)?
            .map_or(false, |record| record.is_collateral);
        Ok(IsCollateralResponse { is_collateral })
    }

    pub fn list_foreign_tokens(
        deps: Deps,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> Result<ListForeignTokensResponse, ContractError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
        let start_after = start_after
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?;
        let start = start_after.as_ref().map(Bound::exclusive);

        let foreign_tokens: Vec<ForeignTokenRecord> = FOREIGN_TOKENS
            .range(deps.storage, start, None, Order::Ascending)
            .take(limit)
            .map(|item| item.map(|(_, record)| record))
            .collect::<StdResult<_>>()?;

        Ok(ListForeignTokensResponse { foreign_tokens })
    }
}
