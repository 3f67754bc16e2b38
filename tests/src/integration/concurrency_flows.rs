//! # Concurrency Flows
//!
//! Many threads calling one `DomainRuntime` at once.

use super::fixtures::*;
use shared_types::{Address, TokenId};
use std::thread;
use warden_runtime::RuntimeError;
use wd_02_sale_engine::StableCoinLedger;
use wd_04_bridge_relay::BridgeError;

const THREADS: usize = 8;

#[test]
fn test_concurrent_redelivery_applies_once() {
    let home = create_test_domain(1, &[2]);
    let away = create_test_domain(2, &[1]);
    let token_id = home.mint_to(BOB);
    let outbound = home
        .runtime
        .send_cross_domain(BOB, token_id, 2, ALICE)
        .unwrap();
    let message = deliver(1, &outbound);

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| scope.spawn(|| away.runtime.receive_message(&message)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for result in results.into_iter().filter(|r| r.is_err()) {
        assert!(matches!(
            result,
            Err(RuntimeError::Bridge(BridgeError::MessageAlreadyApplied { sequence: 0, .. }))
        ));
    }
    assert_eq!(away.runtime.balance_of(&ALICE), 1);
    assert_eq!(away.runtime.owner_of(token_id).unwrap(), ALICE);
}

#[test]
fn test_concurrent_buys_at_the_ceiling() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    runtime.set_max_token_id(ADMIN, TokenId(1_000_003)).unwrap();

    let buyers: Vec<Address> = (0..THREADS).map(|i| [0x10 + i as u8; 20]).collect();
    for buyer in &buyers {
        domain.fund(*buyer, USDC, units(10));
    }

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = buyers
            .iter()
            .map(|buyer| scope.spawn(move || runtime.buy(*buyer, USDC, 1)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut sold: Vec<TokenId> = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .flatten()
        .copied()
        .collect();
    sold.sort();
    assert_eq!(
        sold,
        vec![TokenId(1_000_001), TokenId(1_000_002), TokenId(1_000_003)]
    );
    for result in results.iter().filter(|r| r.is_err()) {
        match result {
            Err(RuntimeError::Sale(sale)) => assert!(sale.is_supply_overflow()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    // Only the three winners paid.
    let price = runtime.final_price(&USDC).unwrap();
    assert_eq!(domain.payments.balance_of(&USDC, &VAULT), price * 3);
    let paid = buyers
        .iter()
        .filter(|b| domain.payments.balance_of(&USDC, b) < units(10))
        .count();
    assert_eq!(paid, 3);
    assert_eq!(runtime.next_token_id(), TokenId(1_000_004));
}
