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
    pub short_period: u64,
    pub long_period: u64,
}

/// Two independent averages over the same pair.
#[cw_serde]
pub struct Windows {
    pub short: PairInfo,
    pub long: PairInfo,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const WINDOWS: Map<&Addr, Windows> = Map::new("windows");
