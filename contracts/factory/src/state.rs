use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use utils::module::ModuleType;

#[cw_serde]
pub struct Config {
    /// The only address allowed to change the registry
    pub owner: Addr,
}

#[cw_serde]
pub struct ModuleRecord {
    pub address: Addr,
    pub module_type: ModuleType,
    pub name: String,
    pub url: String,
}

#[cw_serde]
pub struct ForeignTokenRecord {
    pub address: Addr,
    pub is_collateral: bool,
    /// Oracle modules valuing the token, in assignment order without duplicates
    pub oracles: Vec<Addr>,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const MODULES: Map<&Addr, ModuleRecord> = Map::new("modules");
/// Admitted modules in admission order
pub const MODULE_LIST: Item<Vec<Addr>> = Item::new("module_list");

pub const FOREIGN_TOKENS: Map<&Addr, ForeignTokenRecord> = Map::new("foreign_tokens");
/// Registered foreign tokens in admission order
pub const FOREIGN_TOKEN_LIST: Item<Vec<Addr>> = Item::new("foreign_token_list");
