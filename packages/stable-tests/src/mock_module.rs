//! Module double that only reports its type.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult,
};
use cw_storage_plus::Item;

use utils::module::{ModuleQueryMsg, ModuleType, ModuleTypeResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub module_type: ModuleType,
}

const MODULE_TYPE: Item<ModuleType> = Item::new("module_type");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    MODULE_TYPE.save(deps.storage, &msg.module_type)?;
    Ok(Response::new())
}

pub fn execute(_deps: DepsMut, _env: Env, _info: MessageInfo, _msg: Empty) -> StdResult<Response> {
    Ok(Response::new())
}

pub fn query(deps: Deps, _env: Env, msg: ModuleQueryMsg) -> StdResult<Binary> {
    match msg {
        ModuleQueryMsg::ModuleType {} => to_json_binary(&ModuleTypeResponse {
            module_type: MODULE_TYPE.load(deps.storage)?,
        }),
    }
}
