use super::suite::{SuiteBuilder, HOUR, OWNER, USER};

use cosmwasm_std::{Addr, Decimal256, Uint256};
use utils::twap::TwapError;

use crate::ContractError;

const ONE_USDC: u128 = 1_000_000;
const ONE_INDEX: u128 = 1_000_000_000_000_000_000;

#[test]
fn only_owner_registers_pairs() {
    let mut suite = SuiteBuilder::new().build();
    let usdc = suite.create_token("USDC", 6);
    let pair = suite.create_pair(&usdc, ONE_USDC, 2 * ONE_INDEX);

    let err = suite.register_pair(USER, &usdc, &pair).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
}

#[test]
fn both_windows_must_complete() {
    let mut suite = SuiteBuilder::new().build();
    let usdc = suite.create_token("USDC", 6);
    let pair = suite.create_pair(&usdc, ONE_USDC, 2 * ONE_INDEX);
    suite.register_pair(OWNER, &usdc, &pair).unwrap();

    let err = suite.read(&usdc, ONE_USDC).unwrap_err();
    assert!(err.to_string().contains("Oracle was not initialized"));

    suite.initialize(&usdc).unwrap();
    suite.advance_seconds(HOUR);
    suite.update(&usdc).unwrap();

    // short window done, long one still gathering
    let windows = suite.query_windows(&usdc).unwrap();
    assert!(windows.short.price0_average.is_some());
    assert!(windows.long.price0_average.is_none());
    let err = suite.read(&usdc, ONE_USDC).unwrap_err();
    assert!(err.to_string().contains("Gathering price history"));

    suite.advance_seconds(3 * HOUR);
    suite.update(&usdc).unwrap();
    let read = suite.read(&usdc, ONE_USDC).unwrap();
    assert_eq!(read.amount, Uint256::from(2 * ONE_INDEX));
    assert_eq!(read.volatility, Decimal256::zero());
}

#[test]
fn read_takes_lower_and_required_takes_higher_price() {
    let mut suite = SuiteBuilder::new().build();
    let usdc = suite.create_token("USDC", 6);
    let pair = suite.create_pair(&usdc, ONE_USDC, 2 * ONE_INDEX);
    suite.register_pair(OWNER, &usdc, &pair).unwrap();
    suite.initialize(&usdc).unwrap();

    suite.advance_seconds(HOUR);
    suite.update(&usdc).unwrap();

    // price jumps to 4 for the last hour of the long window
    suite.advance_seconds(2 * HOUR);
    suite.set_reserves(&pair, ONE_USDC, 4 * ONE_INDEX);
    suite.advance_seconds(HOUR);
    suite.update(&usdc).unwrap();

    // short: (2 * 2h + 4 * 1h) / 3h, long: (2 * 3h + 4 * 1h) / 4h
    let prices = suite.query_window_prices(&usdc).unwrap();
    assert_eq!(
        prices.short,
        Decimal256::from_atomics(2_666_666_666_666_666_666u128, 18).unwrap()
    );
    assert_eq!(prices.long, Decimal256::percent(250));

    let read = suite.read(&usdc, ONE_USDC).unwrap();
    assert_eq!(read.amount, Uint256::from(2_500_000_000_000_000_000u128));
    assert!(read.volatility > Decimal256::percent(6));
    assert!(read.volatility < Decimal256::percent(7));

    // 8 index units at 2.666.. per token
    let required = suite.amount_required(&usdc, 8 * ONE_INDEX).unwrap();
    assert_eq!(required.amount, Uint256::from(3 * ONE_USDC));
    assert_eq!(required.volatility, read.volatility);

    // at the lower price the same 8 units would have needed 3.2 tokens
    assert!(required.amount < Uint256::from(3_200_000u128));
}

#[test]
fn update_before_initialization_is_noop() {
    let mut suite = SuiteBuilder::new().build();

    suite.update(&Addr::unchecked("unknown")).unwrap();
}

#[test]
fn initialize_again_rejects_drained_pair() {
    let mut suite = SuiteBuilder::new().build();
    let usdc = suite.create_token("USDC", 6);

    let err = suite.initialize(&usdc).unwrap_err();
    assert_eq!(
        ContractError::Twap(TwapError::PairNotRegistered {
            token: usdc.to_string()
        }),
        err.downcast().unwrap()
    );

    let pair = suite.create_pair(&usdc, ONE_USDC, 2 * ONE_INDEX);
    suite.register_pair(OWNER, &usdc, &pair).unwrap();
    suite.initialize(&usdc).unwrap();
    let first = suite.query_windows(&usdc).unwrap();

    suite.advance_seconds(HOUR);
    suite.set_reserves(&pair, 0, 0);
    let err = suite.initialize(&usdc).unwrap_err();
    assert_eq!(
        ContractError::Twap(TwapError::ZeroReserves {
            pair: pair.to_string()
        }),
        err.downcast().unwrap()
    );
    assert_eq!(suite.query_windows(&usdc).unwrap(), first);
}
