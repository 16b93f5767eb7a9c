use super::suite::{SuiteBuilder, DENOM, OWNER, USER};

use cosmwasm_std::{coins, Addr};
use cw_utils::PaymentError;
use utils::module::ModuleType;

use crate::msg::ExecuteMsg;
use crate::ContractError;

#[test]
fn admitted_module_is_listed() {
    let mut suite = SuiteBuilder::new().build();
    let strategy = suite.create_module(ModuleType::Strategy);
    assert!(!suite.is_module(&strategy));

    suite
        .admit_module(OWNER, &strategy, ModuleType::Strategy)
        .unwrap();

    assert!(suite.is_module(&strategy));
    assert!(suite.is_valid_module_type(&strategy, ModuleType::Strategy));
    assert!(!suite.is_valid_module_type(&strategy, ModuleType::Oracle));
    assert_eq!(suite.module_count(), 1);

    let record = suite.query_module(&strategy).unwrap();
    assert_eq!(record.address, strategy);
    assert_eq!(record.module_type, ModuleType::Strategy);
    assert_eq!(record.name, "strategy module");
    assert_eq!(suite.module_at_index(0).unwrap(), record);
}

#[test]
fn declared_type_must_match_reported() {
    let mut suite = SuiteBuilder::new().build();
    let strategy = suite.create_module(ModuleType::Strategy);

    let err = suite
        .admit_module(OWNER, &strategy, ModuleType::Oracle)
        .unwrap_err();
    assert_eq!(
        ContractError::ModuleTypeMismatch {
            module: strategy.to_string(),
            declared: ModuleType::Oracle,
            reported: ModuleType::Strategy
        },
        err.downcast().unwrap()
    );
    assert!(!suite.is_module(&strategy));
}

#[test]
fn module_admitted_once() {
    let mut suite = SuiteBuilder::new().build();
    let voter_roll = suite.create_module(ModuleType::VoterRoll);
    suite
        .admit_module(OWNER, &voter_roll, ModuleType::VoterRoll)
        .unwrap();

    let err = suite
        .admit_module(OWNER, &voter_roll, ModuleType::VoterRoll)
        .unwrap_err();
    assert_eq!(
        ContractError::ModuleAlreadyAdmitted {
            module: voter_roll.to_string()
        },
        err.downcast().unwrap()
    );
    assert_eq!(suite.module_count(), 1);
}

#[test]
fn only_owner_mutates_registry() {
    let mut suite = SuiteBuilder::new().build();
    let controller = suite.create_module(ModuleType::Controller);

    let err = suite
        .admit_module(USER, &controller, ModuleType::Controller)
        .unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
    assert!(!suite.is_module(&controller));

    suite
        .admit_module(OWNER, &controller, ModuleType::Controller)
        .unwrap();
    let err = suite.remove_module(USER, &controller).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
    assert!(suite.is_module(&controller));
}

#[test]
fn funds_are_rejected() {
    let mut suite = SuiteBuilder::new().build();
    let controller = suite.create_module(ModuleType::Controller);

    let err = suite
        .execute_with_funds(
            OWNER,
            ExecuteMsg::AdmitModule {
                module: controller.to_string(),
                module_type: ModuleType::Controller,
                name: "controller".to_owned(),
                url: "".to_owned(),
            },
            &coins(100, DENOM),
        )
        .unwrap_err();
    assert_eq!(
        ContractError::Payment(PaymentError::NonPayable {}),
        err.downcast().unwrap()
    );
}

#[test]
fn owner_updates_metadata() {
    let mut suite = SuiteBuilder::new().build();
    let version = suite.create_module(ModuleType::Version);
    let update = ExecuteMsg::UpdateModule {
        module: version.to_string(),
        name: "v2".to_owned(),
        url: "https://example.com/v2".to_owned(),
    };

    let err = suite.execute(OWNER, update.clone()).unwrap_err();
    assert_eq!(
        ContractError::ModuleNotFound {
            module: version.to_string()
        },
        err.downcast().unwrap()
    );

    suite
        .admit_module(OWNER, &version, ModuleType::Version)
        .unwrap();
    let err = suite.execute(USER, update.clone()).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    suite.execute(OWNER, update).unwrap();
    let record = suite.query_module(&version).unwrap();
    assert_eq!(record.name, "v2");
    assert_eq!(record.url, "https://example.com/v2");
    assert_eq!(record.module_type, ModuleType::Version);
}

#[test]
fn removal_cascades_to_foreign_tokens() {
    let mut suite = SuiteBuilder::new().build();
    let oracle = suite.admitted_oracle();
    let other_oracle = suite.admitted_oracle();
    let usdc = suite.create_token("USDC");
    let weth = suite.create_token("WETH");
    suite.admit_foreign_token(OWNER, &usdc, true, &oracle).unwrap();
    suite
        .admit_foreign_token(OWNER, &weth, false, &oracle)
        .unwrap();
    suite
        .admit_foreign_token(OWNER, &weth, false, &other_oracle)
        .unwrap();

    let err = suite
        .remove_module(OWNER, &Addr::unchecked("unknown"))
        .unwrap_err();
    assert_eq!(
        ContractError::ModuleNotFound {
            module: "unknown".to_owned()
        },
        err.downcast().unwrap()
    );

    suite.remove_module(OWNER, &oracle).unwrap();
    assert!(!suite.is_module(&oracle));
    assert_eq!(suite.module_count(), 1);
    assert_eq!(suite.module_at_index(0).unwrap().address, other_oracle);

    assert!(suite.query_foreign_token(&usdc).unwrap().oracles.is_empty());
    assert_eq!(
        suite.query_foreign_token(&weth).unwrap().oracles,
        vec![other_oracle]
    );
    // oracle state is untouched
    assert_eq!(suite.initialized_at(&oracle, &usdc), Some(0));
}

#[test]
fn module_index_out_of_range() {
    let mut suite = SuiteBuilder::new().build();
    suite.admitted_oracle();

    let err = suite.module_at_index(1).unwrap_err();
    assert!(err
        .to_string()
        .contains("Index 1 out of range, there are 1 entries"));
}

#[test]
fn ownership_can_be_transferred() {
    let mut suite = SuiteBuilder::new().build();
    let transfer = ExecuteMsg::TransferOwnership {
        owner: USER.to_owned(),
    };

    let err = suite.execute(USER, transfer.clone()).unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());

    suite.execute(OWNER, transfer).unwrap();
    assert_eq!(suite.query_config().unwrap().owner, USER);

    let strategy = suite.create_module(ModuleType::Strategy);
    let err = suite
        .admit_module(OWNER, &strategy, ModuleType::Strategy)
        .unwrap_err();
    assert_eq!(ContractError::Unauthorized {}, err.downcast().unwrap());
    suite
        .admit_module(USER, &strategy, ModuleType::Strategy)
        .unwrap();
}

#[test]
fn list_modules_default_pagination() {
    let mut suite = SuiteBuilder::new().build();

    // the default pagination limit is 10 entries per page
    let mut modules: Vec<Addr> = (0..15)
        .map(|_| {
            let module = suite.create_module(ModuleType::Strategy);
            suite
                .admit_module(OWNER, &module, ModuleType::Strategy)
                .unwrap();
            module
        })
        .collect();
    modules.sort();

    let page1 = suite.list_modules(None, None::<u32>).unwrap();
    assert_eq!(page1, modules[..10]);
    let page2 = suite.list_modules(page1.last(), None::<u32>).unwrap();
    assert_eq!(page2, modules[10..]);
}

#[test]
fn list_modules_limit_is_capped() {
    let mut suite = SuiteBuilder::new().build();
    for _ in 0..35 {
        let module = suite.create_module(ModuleType::Controller);
        suite
            .admit_module(OWNER, &module, ModuleType::Controller)
            .unwrap();
    }

    assert_eq!(suite.list_modules(None, 3).unwrap().len(), 3);
    assert_eq!(suite.list_modules(None, 100).unwrap().len(), 30);
    assert_eq!(suite.module_count(), 35);
}
