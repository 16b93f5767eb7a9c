//! Time weighted average prices computed from a pair's cumulative price accumulators.
//!
//! Sampling is pull based: an oracle calls [`PairInfo::update`] with a fresh sample whenever
//! someone asks it to, and the averages only move once a full `period` has elapsed since the
//! previous sample. Averages keep the pair's [`PRICE_SCALE`] fixed point and valuations are taken
//! straight from the raw-unit price, so the only rounding left is the truncation to one raw unit
//! of the result.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    Addr, ConversionOverflowError, Decimal256, DepsMut, QuerierWrapper, Response, StdError,
    Storage, Uint256, Uint512,
};
use cw_storage_plus::Map;
use thiserror::Error;

use crate::decimals::{pow10, ConversionError};
use crate::pair::{
    query_cumulative_prices, query_pair, CumulativePricesResponse, PairResponse, PRICE_SCALE,
};
use crate::token::query_decimals;

#[derive(Error, Debug, PartialEq)]
pub enum TwapError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Conversion(#[from] ConversionError),

    #[error("{0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("Pair {pair} has no reserves")]
    ZeroReserves { pair: String },

    #[error("Token {token} is not traded by pair {pair}")]
    TokenNotInPair { token: String, pair: String },

    #[error("No pair registered for {token}")]
    PairNotRegistered { token: String },

    #[error("Gathering price history for {token}, try again later")]
    GatheringHistory { token: String },
}

#[cw_serde]
pub struct TokenPair {
    pub pair: Addr,
    pub decimals: u8,
}

/// Base token -> pair trading it against the index token
pub const PAIRS: Map<&Addr, TokenPair> = Map::new("pairs");

/// Registers `pair` as the price source of `token`. The caller checks ownership.
pub fn register_pair(
    deps: DepsMut,
    index_token: &Addr,
    token: String,
    pair: String,
) -> Result<Response, TwapError> {
    let token = deps.api.addr_validate(&token)?;
    let pair = deps.api.addr_validate(&pair)?;

    let tokens = query_pair(&deps.querier, &pair)?;
    for required in [&token, index_token] {
        if &tokens.token0 != required && &tokens.token1 != required {
            return Err(TwapError::TokenNotInPair {
                token: required.to_string(),
                pair: pair.to_string(),
            });
        }
    }

    let decimals = query_decimals(&deps.querier, &token)?;
    PAIRS.save(
        deps.storage,
        &token,
        &TokenPair {
            pair: pair.clone(),
            decimals,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "register_pair")
        .add_attribute("token", token)
        .add_attribute("pair", pair))
}

pub fn load_registered_pair(storage: &dyn Storage, token: &Addr) -> Result<TokenPair, TwapError> {
    PAIRS
        .may_load(storage, token)?
        .ok_or_else(|| TwapError::PairNotRegistered {
            token: token.to_string(),
        })
}

fn ensure_reserves(pair: &Addr, sample: &CumulativePricesResponse) -> Result<(), TwapError> {
    if sample.reserve0.is_zero() || sample.reserve1.is_zero() {
        return Err(TwapError::ZeroReserves {
            pair: pair.to_string(),
        });
    }
    Ok(())
}

/// Current sample of `pair`, failing when either reserve is empty.
pub fn query_sample(
    querier: &QuerierWrapper,
    pair: &Addr,
) -> Result<CumulativePricesResponse, TwapError> {
    let sample = query_cumulative_prices(querier, pair)?;
    ensure_reserves(pair, &sample)?;
    Ok(sample)
}

/// Averaging state for one pair and one window length.
#[cw_serde]
pub struct PairInfo {
    pub pair: Addr,
    pub token0: Addr,
    pub token1: Addr,
    pub price0_cumulative_last: Uint256,
    pub price1_cumulative_last: Uint256,
    /// Raw `token1` per raw `token0` scaled by [`PRICE_SCALE`], `None` until a full period has
    /// been observed.
    pub price0_average: Option<Uint256>,
    /// Raw `token0` per raw `token1` scaled by [`PRICE_SCALE`], `None` until a full period has
    /// been observed.
    pub price1_average: Option<Uint256>,
    pub last_timestamp: u64,
    pub period: u64,
}

impl PairInfo {
    /// Takes the first sample of `pair`.
    pub fn initialize(
        querier: &QuerierWrapper,
        pair: Addr,
        period: u64,
    ) -> Result<Self, TwapError> {
        let tokens = query_pair(querier, &pair)?;
        let sample = query_cumulative_prices(querier, &pair)?;
        Self::from_sample(pair, tokens, &sample, period)
    }

    pub fn from_sample(
        pair: Addr,
        tokens: PairResponse,
        sample: &CumulativePricesResponse,
        period: u64,
    ) -> Result<Self, TwapError> {
        ensure_reserves(&pair, sample)?;
        Ok(Self {
            pair,
            token0: tokens.token0,
            token1: tokens.token1,
            price0_cumulative_last: sample.price0_cumulative,
            price1_cumulative_last: sample.price1_cumulative,
            price0_average: None,
            price1_average: None,
            last_timestamp: sample.block_timestamp,
            period,
        })
    }

    /// Recomputes the averages when at least `period` seconds passed since the last accepted
    /// sample. Returns whether the averages changed.
    pub fn update(&mut self, sample: &CumulativePricesResponse) -> bool {
        let elapsed = sample.block_timestamp.saturating_sub(self.last_timestamp);
        if elapsed == 0 || elapsed < self.period {
            return false;
        }

        let elapsed = Uint256::from(elapsed);
        // accumulators may wrap, their difference is still exact
        let delta0 = sample
            .price0_cumulative
            .wrapping_sub(self.price0_cumulative_last);
        let delta1 = sample
            .price1_cumulative
            .wrapping_sub(self.price1_cumulative_last);

        self.price0_average = Some(delta0 / elapsed);
        self.price1_average = Some(delta1 / elapsed);
        self.price0_cumulative_last = sample.price0_cumulative;
        self.price1_cumulative_last = sample.price1_cumulative;
        self.last_timestamp = sample.block_timestamp;
        true
    }

    pub fn contains(&self, token: &Addr) -> bool {
        &self.token0 == token || &self.token1 == token
    }

    /// Average raw amount of the other token paid per raw unit of `token`, scaled by
    /// [`PRICE_SCALE`].
    pub fn average_price(&self, token: &Addr) -> Result<Uint256, TwapError> {
        let average = if token == &self.token0 {
            self.price0_average
        } else if token == &self.token1 {
            self.price1_average
        } else {
            return Err(TwapError::TokenNotInPair {
                token: token.to_string(),
                pair: self.pair.to_string(),
            });
        };
        average.ok_or_else(|| TwapError::GatheringHistory {
            token: token.to_string(),
        })
    }
}

/// `a * b / c` with a 512 bit intermediate.
fn mul_div(a: Uint256, b: Uint256, c: Uint256) -> Result<Uint256, TwapError> {
    let product = Uint512::from(a)
        .checked_mul(Uint512::from(b))
        .map_err(ConversionError::from)?;
    let quotient = product
        .checked_div(Uint512::from(c))
        .map_err(ConversionError::from)?;
    Ok(Uint256::try_from(quotient)?)
}

/// Raw index units worth `amount` raw token units at the scaled raw-unit `price`.
pub fn value_at(amount: Uint256, price: Uint256) -> Result<Uint256, TwapError> {
    if price.is_zero() {
        return Err(ConversionError::ZeroPrice {}.into());
    }
    mul_div(amount, price, Uint256::from(PRICE_SCALE))
}

/// Raw token units worth `index_amount` raw index units at the scaled raw-unit `price`.
pub fn amount_at(index_amount: Uint256, price: Uint256) -> Result<Uint256, TwapError> {
    if price.is_zero() {
        return Err(ConversionError::ZeroPrice {}.into());
    }
    mul_div(index_amount, Uint256::from(PRICE_SCALE), price)
}

/// Converts a scaled raw-unit price into whole index units per whole token.
pub fn whole_unit_price(
    price: Uint256,
    token_decimals: u8,
    index_decimals: u8,
) -> Result<Decimal256, TwapError> {
    // scaled by 10^36 in, 10^18 out
    let denominator = pow10(index_decimals)?
        .checked_mul(Decimal256::one().atomics())
        .map_err(ConversionError::from)?;
    let atomics = mul_div(price, pow10(token_decimals)?, denominator)?;
    Ok(Decimal256::new(atomics))
}
