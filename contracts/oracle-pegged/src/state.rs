use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Unit every token is valued in, one to one
    pub index_token: Addr,
    pub index_decimals: u8,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// Decimals of every token this oracle was initialized for
pub const TOKEN_DECIMALS: Map<&Addr, u8> = Map::new("token_decimals");
