//! Chainlink-style price feeds and the registry of feeds kept by feed based oracles.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    Addr, Decimal256, DepsMut, Int256, QuerierWrapper, Response, StdError, Storage, Uint256,
};
use cw_storage_plus::Map;
use thiserror::Error;

use crate::decimals::{rescale, ConversionError};
use crate::token::query_decimals;

/// Quote currency every registered feed must be denominated in.
pub const USD: &str = "USD";

#[cw_serde]
#[derive(QueryResponses)]
pub enum FeedQueryMsg {
    #[returns(FeedDescriptionResponse)]
    Description {},
    #[returns(RoundDataResponse)]
    LatestRoundData {},
}

#[cw_serde]
pub struct FeedDescriptionResponse {
    pub base: String,
    pub quote: String,
    /// Decimals of `answer` in [`RoundDataResponse`].
    pub decimals: u8,
}

#[cw_serde]
pub struct RoundDataResponse {
    pub round_id: u64,
    /// Signed, only positive answers are usable prices.
    pub answer: Int256,
    /// Seconds since epoch.
    pub updated_at: u64,
}

#[derive(Error, Debug, PartialEq)]
pub enum FeedError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("A feed is already registered for {token}")]
    AlreadyRegistered { token: String },

    #[error("No feed registered for {token}")]
    NotRegistered { token: String },

    #[error("Feed {feed} quotes in {quote}, only USD feeds are accepted")]
    NonUsdFeed { feed: String, quote: String },

    #[error("Feed {feed} reported a non-positive answer")]
    InvalidFeedAnswer { feed: String },

    #[error("Feed {feed} was last updated at {updated_at}")]
    StaleFeed { feed: String, updated_at: u64 },
}

#[cw_serde]
pub struct FeedRecord {
    pub feed: Addr,
    pub decimals: u8,
    /// Precision of the token valued by this feed
    pub token_decimals: u8,
    /// `BASE / QUOTE` as reported by the feed.
    pub description: String,
}

/// Token -> feed valuing it. A wrapped asset is registered against its underlying asset's feed.
pub const FEEDS: Map<&Addr, FeedRecord> = Map::new("feeds");

/// Queries the feed, checks it quotes in USD and records how to value `token` with it.
pub fn describe_feed(
    querier: &QuerierWrapper,
    token: &Addr,
    feed: &Addr,
) -> Result<FeedRecord, FeedError> {
    let description: FeedDescriptionResponse =
        querier.query_wasm_smart(feed, &FeedQueryMsg::Description {})?;
    if description.quote != USD {
        return Err(FeedError::NonUsdFeed {
            feed: feed.to_string(),
            quote: description.quote,
        });
    }
    Ok(FeedRecord {
        feed: feed.clone(),
        decimals: description.decimals,
        token_decimals: query_decimals(querier, token)?,
        description: format!("{} / {}", description.base, description.quote),
    })
}

pub fn register_feed(
    storage: &mut dyn Storage,
    querier: &QuerierWrapper,
    token: &Addr,
    feed: &Addr,
) -> Result<FeedRecord, FeedError> {
    if FEEDS.has(storage, token) {
        return Err(FeedError::AlreadyRegistered {
            token: token.to_string(),
        });
    }
    let record = describe_feed(querier, token, feed)?;
    FEEDS.save(storage, token, &record)?;
    Ok(record)
}

pub fn update_feed(
    storage: &mut dyn Storage,
    querier: &QuerierWrapper,
    token: &Addr,
    feed: &Addr,
) -> Result<FeedRecord, FeedError> {
    load_feed(storage, token)?;
    let record = describe_feed(querier, token, feed)?;
    FEEDS.save(storage, token, &record)?;
    Ok(record)
}

pub fn unregister_feed(storage: &mut dyn Storage, token: &Addr) -> Result<(), FeedError> {
    load_feed(storage, token)?;
    FEEDS.remove(storage, token);
    Ok(())
}

pub fn load_feed(storage: &dyn Storage, token: &Addr) -> Result<FeedRecord, FeedError> {
    FEEDS
        .may_load(storage, token)?
        .ok_or_else(|| FeedError::NotRegistered {
            token: token.to_string(),
        })
}

/// `RegisterOracle` handler shared by feed based oracles. The caller checks ownership.
pub fn register_oracle(deps: DepsMut, token: String, feed: String) -> Result<Response, FeedError> {
    let token = deps.api.addr_validate(&token)?;
    let feed = deps.api.addr_validate(&feed)?;
    let record = register_feed(deps.storage, &deps.querier, &token, &feed)?;

    Ok(Response::new()
        .add_attribute("action", "register_oracle")
        .add_attribute("token", token)
        .add_attribute("feed", feed)
        .add_attribute("description", record.description))
}

/// `UpdateOracle` handler shared by feed based oracles. The caller checks ownership.
pub fn update_oracle(deps: DepsMut, token: String, feed: String) -> Result<Response, FeedError> {
    let token = deps.api.addr_validate(&token)?;
    let feed = deps.api.addr_validate(&feed)?;
    let record = update_feed(deps.storage, &deps.querier, &token, &feed)?;

    Ok(Response::new()
        .add_attribute("action", "update_oracle")
        .add_attribute("token", token)
        .add_attribute("feed", feed)
        .add_attribute("description", record.description))
}

/// `UnregisterOracle` handler shared by feed based oracles. The caller checks ownership.
pub fn unregister_oracle(deps: DepsMut, token: String) -> Result<Response, FeedError> {
    let token = deps.api.addr_validate(&token)?;
    unregister_feed(deps.storage, &token)?;

    Ok(Response::new()
        .add_attribute("action", "unregister_oracle")
        .add_attribute("token", token))
}

/// Latest USD price reported by the feed, in whole units.
///
/// With `max_age` set, rounds older than `max_age` seconds before `now` are rejected.
pub fn latest_price(
    querier: &QuerierWrapper,
    record: &FeedRecord,
    now: u64,
    max_age: Option<u64>,
) -> Result<Decimal256, FeedError> {
    let round: RoundDataResponse =
        querier.query_wasm_smart(&record.feed, &FeedQueryMsg::LatestRoundData {})?;
    if round.answer <= Int256::zero() {
        return Err(FeedError::InvalidFeedAnswer {
            feed: record.feed.to_string(),
        });
    }
    if let Some(max_age) = max_age {
        if now.saturating_sub(round.updated_at) > max_age {
            return Err(FeedError::StaleFeed {
                feed: record.feed.to_string(),
                updated_at: round.updated_at,
            });
        }
    }
    // positive, so the two's complement bytes read the same unsigned
    let answer = Uint256::from_be_bytes(round.answer.to_be_bytes());
    let atomics = rescale(
        answer,
        record.decimals,
        Decimal256::DECIMAL_PLACES as u8,
    )?;
    Ok(Decimal256::new(atomics))
}
