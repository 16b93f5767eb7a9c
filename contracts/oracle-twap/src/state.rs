use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use utils::twap::PairInfo;

#[cw_serde]
pub struct Config {
    /// Can register pairs
    pub owner: Addr,
    pub index_token: Addr,
    pub index_decimals: u8,
    /// Minimum number of seconds between two accepted samples
    pub period: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// Base token -> averaging state, present once initialized
pub const PAIR_INFOS: Map<&Addr, PairInfo> = Map::new("pair_infos");
