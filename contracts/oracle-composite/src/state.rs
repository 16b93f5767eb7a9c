use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

#[cw_serde]
pub struct Config {
    /// Interim token of the last hop
    pub index_token: Addr,
    pub index_decimals: u8,
}

/// One step of the route: `oracle` values the previous hop's token in `interim_token`.
#[cw_serde]
pub struct Hop {
    pub interim_token: Addr,
    pub oracle: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// Never empty once instantiated
pub const HOPS: Item<Vec<Hop>> = Item::new("hops");
