use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

#[cw_serde]
pub struct Config {
    /// Manages the feed registry
    pub owner: Addr,
    pub index_token: Addr,
    pub index_decimals: u8,
    /// Nested oracle whose valuation is weighed against the feed
    pub twap_oracle: Addr,
    pub max_feed_age: Option<u64>,
}

pub const CONFIG: Item<Config> = Item::new("config");
