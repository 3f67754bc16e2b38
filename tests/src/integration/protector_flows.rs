//! # Protector Flows
//!
//! Guardian activation, locking, signature checks and protected transfers.

use super::fixtures::*;
use shared_crypto::Secp256k1KeyPair;
use shared_types::DomainEvent;
use warden_runtime::RuntimeError;
use wd_01_identity_allocator::LedgerError;
use wd_03_protector_auth::AuthError;

fn auth_err(result: Result<(), RuntimeError>) -> AuthError {
    match result {
        Err(RuntimeError::Auth(e)) => e,
        other => panic!("expected an authorization error, got {other:?}"),
    }
}

#[test]
fn test_first_protector_locks_token() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    let token_id = domain.mint_to(BOB);
    runtime.drain_events();

    let guardian = Secp256k1KeyPair::generate();
    let update = domain.signed_update(BOB, token_id, guardian.address(), true, &guardian);
    runtime.set_protector(BOB, &update).unwrap();

    assert_eq!(
        runtime.drain_events(),
        vec![
            DomainEvent::ProtectorChange {
                token_id,
                protector: guardian.address(),
                active: true,
            },
            DomainEvent::Locked {
                token_id,
                locked: true,
            },
        ]
    );
    assert!(runtime.is_locked(token_id));
    assert!(matches!(
        runtime.transfer(BOB, ALICE, token_id),
        Err(RuntimeError::Ledger(LedgerError::TokenLocked(_)))
    ));
}

#[test]
fn test_later_changes_need_an_active_protector() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    let token_id = domain.mint_to(BOB);

    let first = Secp256k1KeyPair::generate();
    let second = Secp256k1KeyPair::generate();
    runtime
        .set_protector(
            BOB,
            &domain.signed_update(BOB, token_id, first.address(), true, &first),
        )
        .unwrap();

    // The nominee alone cannot join an existing guardian set.
    let self_signed = domain.signed_update(BOB, token_id, second.address(), true, &second);
    assert_eq!(
        auth_err(runtime.set_protector(BOB, &self_signed)),
        AuthError::Unauthorized(second.address())
    );

    let approved = domain.signed_update(BOB, token_id, second.address(), true, &first);
    runtime.set_protector(BOB, &approved).unwrap();
    assert_eq!(
        runtime.protectors_of(token_id),
        vec![first.address(), second.address()]
    );

    // Removing one of two keeps the lock; removing the last releases it.
    runtime
        .set_protector(
            BOB,
            &domain.signed_update(BOB, token_id, first.address(), false, &second),
        )
        .unwrap();
    assert!(runtime.is_locked(token_id));
    runtime
        .set_protector(
            BOB,
            &domain.signed_update(BOB, token_id, second.address(), false, &second),
        )
        .unwrap();
    assert!(!runtime.is_locked(token_id));
    assert!(runtime.protectors_of(token_id).is_empty());
    runtime.transfer(BOB, ALICE, token_id).unwrap();
}

#[test]
fn test_only_owner_may_submit() {
    let domain = create_test_domain(1, &[]);
    let token_id = domain.mint_to(BOB);
    let guardian = Secp256k1KeyPair::generate();
    let update = domain.signed_update(ALICE, token_id, guardian.address(), true, &guardian);

    assert!(matches!(
        auth_err(domain.runtime.set_protector(ALICE, &update)),
        AuthError::NotTokenOwner { .. }
    ));
}

#[test]
fn test_expired_then_valid() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    let token_id = domain.mint_to(BOB);
    let guardian = Secp256k1KeyPair::generate();
    let update = domain.signed_update(BOB, token_id, guardian.address(), true, &guardian);

    domain.clock.advance(3_601);
    assert!(matches!(
        auth_err(runtime.set_protector(BOB, &update)),
        AuthError::ExpiredSignature { .. }
    ));
    assert!(!runtime.is_locked(token_id));

    // Nothing was consumed, so the same approval works inside its window.
    domain.clock.set(NOW + 10);
    runtime.set_protector(BOB, &update).unwrap();
    assert!(runtime.is_locked(token_id));
}

#[test]
fn test_replayed_approval_rejected() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    let token_id = domain.mint_to(BOB);

    let first = Secp256k1KeyPair::generate();
    let second = Secp256k1KeyPair::generate();
    runtime
        .set_protector(
            BOB,
            &domain.signed_update(BOB, token_id, first.address(), true, &first),
        )
        .unwrap();

    let add_second = domain.signed_update(BOB, token_id, second.address(), true, &first);
    runtime.set_protector(BOB, &add_second).unwrap();
    runtime
        .set_protector(
            BOB,
            &domain.signed_update(BOB, token_id, second.address(), false, &first),
        )
        .unwrap();

    assert_eq!(
        auth_err(runtime.set_protector(BOB, &add_second)),
        AuthError::SignatureReplayed
    );
    assert_eq!(runtime.protectors_of(token_id), vec![first.address()]);
}

#[test]
fn test_wrong_domain_rejected() {
    let domain = create_test_domain(1, &[]);
    let other = create_test_domain(2, &[]);
    let token_id = domain.mint_to(BOB);
    let guardian = Secp256k1KeyPair::generate();

    // Signed for the same owner and token on another domain.
    let foreign = other.signed_update(BOB, token_id, guardian.address(), true, &guardian);
    assert_eq!(
        auth_err(domain.runtime.set_protector(BOB, &foreign)),
        AuthError::WrongDomain {
            expected: 1,
            actual: 2
        }
    );
}

#[test]
fn test_protected_transfer_resets_guardians() {
    let domain = create_test_domain(1, &[]);
    let runtime = &domain.runtime;
    let token_id = domain.mint_to(BOB);
    let guardian = Secp256k1KeyPair::generate();
    runtime
        .set_protector(
            BOB,
            &domain.signed_update(BOB, token_id, guardian.address(), true, &guardian),
        )
        .unwrap();
    runtime.drain_events();

    let intruder = Secp256k1KeyPair::generate();
    let forged = domain.signed_transfer(BOB, token_id, CAROL, &intruder);
    assert!(matches!(
        auth_err(runtime.protected_transfer(BOB, &forged)),
        AuthError::Unauthorized(_)
    ));

    let transfer = domain.signed_transfer(BOB, token_id, CAROL, &guardian);
    runtime.protected_transfer(BOB, &transfer).unwrap();

    assert_eq!(runtime.owner_of(token_id).unwrap(), CAROL);
    assert!(!runtime.is_locked(token_id));
    assert!(runtime.protectors_of(token_id).is_empty());
    assert_eq!(
        runtime.drain_events(),
        vec![
            DomainEvent::Transfer {
                from: BOB,
                to: CAROL,
                token_id,
            },
            DomainEvent::ProtectorChange {
                token_id,
                protector: guardian.address(),
                active: false,
            },
            DomainEvent::Locked {
                token_id,
                locked: false,
            },
        ]
    );

    // The new owner starts unprotected.
    runtime.transfer(CAROL, ALICE, token_id).unwrap();
}

#[test]
fn test_protected_transfer_requires_lock() {
    let domain = create_test_domain(1, &[]);
    let token_id = domain.mint_to(BOB);
    let guardian = Secp256k1KeyPair::generate();
    let transfer = domain.signed_transfer(BOB, token_id, CAROL, &guardian);

    assert_eq!(
        auth_err(domain.runtime.protected_transfer(BOB, &transfer)),
        AuthError::NotLocked(token_id)
    );
}
