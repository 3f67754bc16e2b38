//! # Sale Flows
//!
//! Purchases, pricing administration, the supply ceiling and proceeds.

use super::fixtures::*;
use shared_types::{DomainEvent, TokenId, U256};
use warden_runtime::RuntimeError;
use wd_01_identity_allocator::AllocatorError;
use wd_02_sale_engine::{PaymentError, SaleError, StableCoinLedger};

fn price_18() -> U256 {
    U256::from(9_900_000_000_000_000_000u128)
}

#[test]
fn test_two_buyers_and_withdrawal() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    assert_eq!(runtime.final_price(&USDC).unwrap(), price_18());

    domain.fund(BOB, USDC, units(100));
    domain.fund(ALICE, USDC, units(100));

    let bob_ids = runtime.buy(BOB, USDC, 2).unwrap();
    let alice_ids = runtime.buy(ALICE, USDC, 2).unwrap();
    assert_eq!(bob_ids, vec![TokenId(1_000_001), TokenId(1_000_002)]);
    assert_eq!(alice_ids, vec![TokenId(1_000_003), TokenId(1_000_004)]);
    assert_eq!(runtime.balance_of(&BOB), 2);
    assert_eq!(runtime.owner_of(TokenId(1_000_004)).unwrap(), ALICE);

    let collected = price_18() * 4;
    assert_eq!(domain.payments.balance_of(&USDC, &VAULT), collected);
    assert_eq!(domain.payments.balance_of(&USDC, &BOB), units(100) - price_18() * 2);

    let mints = runtime
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, DomainEvent::Transfer { from, .. } if *from == [0u8; 20]))
        .count();
    assert_eq!(mints, 4);

    assert_eq!(
        runtime
            .withdraw_proceeds(ADMIN, TREASURY, USDC, units(10))
            .unwrap(),
        units(10)
    );
    assert_eq!(
        runtime
            .withdraw_proceeds(ADMIN, TREASURY, USDC, U256::zero())
            .unwrap(),
        collected - units(10)
    );
    assert_eq!(domain.payments.balance_of(&USDC, &TREASURY), collected);
    assert!(domain.payments.balance_of(&USDC, &VAULT).is_zero());

    let withdrawn: Vec<U256> = runtime
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            DomainEvent::ProceedsWithdrawn { amount, .. } => Some(amount),
            _ => None,
        })
        .collect();
    assert_eq!(withdrawn, vec![units(10), collected - units(10)]);
}

#[test]
fn test_withdrawal_is_admin_only() {
    let domain = create_test_domain(1, &[]);
    assert!(matches!(
        domain
            .runtime
            .withdraw_proceeds(BOB, BOB, USDC, U256::zero()),
        Err(RuntimeError::Sale(SaleError::NotAuthorized(_)))
    ));
}

#[test]
fn test_unfunded_buy_changes_nothing() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    let next = runtime.next_token_id();

    let err = runtime.buy(BOB, USDC, 1).unwrap_err();
    match err {
        RuntimeError::Sale(ref sale) => assert!(sale.is_insufficient_funds()),
        other => panic!("unexpected error: {other}"),
    }

    domain.payments.mint(&USDC, &BOB, units(1)).unwrap();
    domain
        .payments
        .approve(&USDC, &BOB, &VAULT, U256::MAX)
        .unwrap();
    assert!(matches!(
        runtime.buy(BOB, USDC, 1),
        Err(RuntimeError::Sale(SaleError::Payment(
            PaymentError::InsufficientBalance { .. }
        )))
    ));

    assert_eq!(runtime.next_token_id(), next);
    assert_eq!(runtime.balance_of(&BOB), 0);
    assert!(runtime.drain_events().is_empty());
}

#[test]
fn test_supply_ceiling() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    domain.fund(BOB, USDC, units(100));

    assert_eq!(
        runtime.set_max_token_id(ADMIN, TokenId(1_000_100)).unwrap(),
        TokenId(1_000_100)
    );
    runtime.buy(BOB, USDC, 2).unwrap();

    // Zero pins the ceiling to the last identifier sold.
    assert_eq!(
        runtime.set_max_token_id(ADMIN, TokenId(0)).unwrap(),
        TokenId(1_000_002)
    );
    assert_eq!(runtime.max_token_id(), TokenId(1_000_002));

    let before = domain.payments.balance_of(&USDC, &BOB);
    let err = runtime.buy(BOB, USDC, 1).unwrap_err();
    match err {
        RuntimeError::Sale(ref sale) => assert!(sale.is_supply_overflow()),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(runtime.next_token_id(), TokenId(1_000_003));
    assert_eq!(domain.payments.balance_of(&USDC, &BOB), before);

    assert!(matches!(
        runtime.set_max_token_id(ADMIN, TokenId(1_000_001)),
        Err(RuntimeError::Sale(SaleError::Allocator(
            AllocatorError::InvalidMaxTokenId { .. }
        )))
    ));

    let ceilings: Vec<TokenId> = runtime
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            DomainEvent::MaxTokenIdSet { max_token_id } => Some(max_token_id),
            _ => None,
        })
        .collect();
    assert_eq!(ceilings, vec![TokenId(1_000_100), TokenId(1_000_002)]);
}

#[test]
fn test_price_and_discount_admin() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;

    runtime.set_price(ADMIN, 1_980).unwrap();
    runtime.set_discount(ADMIN, 5_000).unwrap();
    assert_eq!(runtime.final_price(&USDC).unwrap(), price_18());

    assert!(matches!(
        runtime.set_discount(ADMIN, 10_000),
        Err(RuntimeError::Sale(SaleError::InvalidDiscount(10_000)))
    ));
    assert!(matches!(
        runtime.set_price(BOB, 1),
        Err(RuntimeError::Sale(SaleError::NotAuthorized(_)))
    ));

    assert_eq!(
        runtime.drain_events(),
        vec![
            DomainEvent::PriceSet { cents: 1_980 },
            DomainEvent::DiscountSet {
                basis_points: 5_000
            },
        ]
    );
}

#[test]
fn test_stable_coin_lifecycle() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;

    assert!(matches!(
        runtime.final_price(&DAI),
        Err(RuntimeError::Sale(SaleError::UnknownStableCoin(_)))
    ));

    runtime.set_stable_coin(ADMIN, DAI, true).unwrap();
    assert_eq!(runtime.final_price(&DAI).unwrap(), U256::from(9_900_000u64));
    let accepted: Vec<_> = runtime.stable_coins().iter().map(|c| c.token).collect();
    assert_eq!(accepted, vec![USDC, DAI]);

    domain.fund(BOB, DAI, U256::from(9_900_000u64));
    assert_eq!(runtime.buy(BOB, DAI, 1).unwrap().len(), 1);

    runtime.set_stable_coin(ADMIN, DAI, false).unwrap();
    let accepted: Vec<_> = runtime.stable_coins().iter().map(|c| c.token).collect();
    assert_eq!(accepted, vec![USDC]);

    domain.fund(BOB, DAI, U256::from(9_900_000u64));
    assert!(matches!(
        runtime.buy(BOB, DAI, 1),
        Err(RuntimeError::Sale(SaleError::UnknownStableCoin(_)))
    ));
    assert!(matches!(
        runtime.set_stable_coin(ADMIN, DAI, false),
        Err(RuntimeError::Sale(SaleError::UnknownStableCoin(_)))
    ));
}
