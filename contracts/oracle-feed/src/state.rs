use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

#[cw_serde]
pub struct Config {
    /// Manages the feed registry
    pub owner: Addr,
    /// USD pegged token the feeds' answers are paid out in
    pub index_token: Addr,
    pub index_decimals: u8,
    /// Rounds older than this many seconds are rejected
    pub max_feed_age: Option<u64>,
}

pub const CONFIG: Item<Config> = Item::new("config");
