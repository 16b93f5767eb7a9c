use super::suite::{SuiteBuilder, HOUR, OWNER, USER};

use cosmwasm_std::{Decimal256, Uint256};
use utils::feed::FeedError;

use crate::ContractError;

const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;
const ONE_INDEX: u128 = 1_000_000_000_000_000_000;
/// 5.25 with 8 decimals
const FIL_PRICE: i128 = 525_000_000;

#[test]
fn only_owner_manages_feeds() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "USD", FIL_PRICE);

    let err = suite.register_oracle(USER, &renfil, &feed).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    suite.register_oracle(OWNER, &renfil, &feed).unwrap();

    let err = suite.update_oracle(USER, &renfil, &feed).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
    let err = suite.unregister_oracle(USER, &renfil).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
    let err = suite.update_config(USER, HOUR).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
}

#[test]
fn wrapped_token_uses_underlying_feed() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "USD", FIL_PRICE);
    suite.register_oracle(OWNER, &renfil, &feed).unwrap();

    let record = suite.query_feed(&renfil).unwrap();
    assert_eq!(record.feed, feed);
    assert_eq!(record.decimals, 8);
    assert_eq!(record.token_decimals, 18);
    assert_eq!(record.description, "FIL / USD");

    assert_eq!(suite.query_price(&renfil).unwrap(), Decimal256::percent(525));

    let read = suite.read(&renfil, 2 * ONE_TOKEN).unwrap();
    assert_eq!(read.amount, Uint256::from(10_500_000_000_000_000_000u128));
    assert_eq!(read.volatility, Decimal256::zero());

    let required = suite.amount_required(&renfil, 21 * ONE_INDEX).unwrap();
    assert_eq!(required.amount, Uint256::from(4 * ONE_TOKEN));
}

#[test]
fn index_with_fewer_decimals() {
    let mut suite = SuiteBuilder::new().with_index_decimals(6).build();
    let wbtc = suite.create_token("WBTC", 8);
    let feed = suite.create_feed("BTC", "USD", 30_000_00000000);
    suite.register_oracle(OWNER, &wbtc, &feed).unwrap();

    // 0.5 BTC
    let read = suite.read(&wbtc, 50_000_000u128).unwrap();
    assert_eq!(read.amount, Uint256::from(15_000_000_000u128));
}

#[test]
fn register_and_update_are_exclusive() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "USD", FIL_PRICE);
    let other = suite.create_feed("FIL", "USD", 2 * FIL_PRICE);

    let err = suite.update_oracle(OWNER, &renfil, &feed).unwrap_err();
    assert_eq!(
        ContractError::Feed(FeedError::NotRegistered {
            token: renfil.to_string()
        }),
        err.downcast().unwrap()
    );

    suite.register_oracle(OWNER, &renfil, &feed).unwrap();
    let err = suite.register_oracle(OWNER, &renfil, &other).unwrap_err();
    assert_eq!(
        ContractError::Feed(FeedError::AlreadyRegistered {
            token: renfil.to_string()
        }),
        err.downcast().unwrap()
    );

    suite.update_oracle(OWNER, &renfil, &other).unwrap();
    assert_eq!(suite.query_price(&renfil).unwrap(), Decimal256::percent(1050));
}

#[test]
fn only_usd_feeds_accepted() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "EUR", FIL_PRICE);

    let err = suite.register_oracle(OWNER, &renfil, &feed).unwrap_err();
    assert_eq!(
        ContractError::Feed(FeedError::NonUsdFeed {
            feed: feed.to_string(),
            quote: "EUR".to_owned()
        }),
        err.downcast().unwrap()
    );
}

#[test]
fn unregistered_token_cannot_be_valued() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "USD", FIL_PRICE);

    let err = suite.initialize(&renfil).unwrap_err();
    assert_eq!(
        ContractError::Feed(FeedError::NotRegistered {
            token: renfil.to_string()
        }),
        err.downcast().unwrap()
    );

    suite.register_oracle(OWNER, &renfil, &feed).unwrap();
    suite.initialize(&renfil).unwrap();
    suite.unregister_oracle(OWNER, &renfil).unwrap();

    let err = suite.read(&renfil, ONE_TOKEN).unwrap_err();
    assert!(err.to_string().contains("No feed registered"));
}

#[test]
fn zero_answer_is_rejected() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "USD", FIL_PRICE);
    suite.register_oracle(OWNER, &renfil, &feed).unwrap();

    suite.set_answer(&feed, 0);
    let err = suite.initialize(&renfil).unwrap_err();
    assert_eq!(
        ContractError::Feed(FeedError::InvalidFeedAnswer {
            feed: feed.to_string()
        }),
        err.downcast().unwrap()
    );
    let err = suite.read(&renfil, ONE_TOKEN).unwrap_err();
    assert!(err.to_string().contains("non-positive answer"));
}

#[test]
fn negative_answer_is_rejected() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "USD", FIL_PRICE);
    suite.register_oracle(OWNER, &renfil, &feed).unwrap();

    suite.set_answer(&feed, -FIL_PRICE);
    let err = suite.initialize(&renfil).unwrap_err();
    assert_eq!(
        ContractError::Feed(FeedError::InvalidFeedAnswer {
            feed: feed.to_string()
        }),
        err.downcast().unwrap()
    );
    let err = suite.amount_required(&renfil, ONE_INDEX).unwrap_err();
    assert!(err.to_string().contains("non-positive answer"));
}

#[test]
fn stale_rounds_are_rejected() {
    let mut suite = SuiteBuilder::new().with_max_feed_age(HOUR).build();
    let renfil = suite.create_token("renFIL", 18);
    let feed = suite.create_feed("FIL", "USD", FIL_PRICE);
    suite.register_oracle(OWNER, &renfil, &feed).unwrap();

    suite.advance_seconds(HOUR);
    suite.read(&renfil, ONE_TOKEN).unwrap();

    suite.advance_seconds(1);
    let err = suite.read(&renfil, ONE_TOKEN).unwrap_err();
    assert!(err.to_string().contains("was last updated at"));

    // a fresh round revives the feed
    suite.set_answer(&feed, FIL_PRICE);
    suite.read(&renfil, ONE_TOKEN).unwrap();

    // lifting the limit accepts old rounds again
    suite.advance_seconds(10 * HOUR);
    suite.update_config(OWNER, None::<u64>).unwrap();
    suite.read(&renfil, ONE_TOKEN).unwrap();
}

#[test]
fn update_is_noop() {
    let mut suite = SuiteBuilder::new().build();
    let renfil = suite.create_token("renFIL", 18);

    suite.update(&renfil).unwrap();
}
