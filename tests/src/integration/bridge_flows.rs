//! # Bridge Flows
//!
//! Two domains trusting each other, wired by hand in place of the relay.

use super::fixtures::*;
use shared_crypto::Secp256k1KeyPair;
use shared_types::{DomainEvent, TokenId};
use warden_runtime::RuntimeError;
use wd_01_identity_allocator::{InvalidTokenReason, LedgerError};
use wd_04_bridge_relay::{BridgeError, BridgeMessage, ReceiveOutcome, TransferPayload};

fn bridge_err<T: std::fmt::Debug>(result: Result<T, RuntimeError>) -> BridgeError {
    match result {
        Err(RuntimeError::Bridge(e)) => e,
        other => panic!("expected a bridge error, got {other:?}"),
    }
}

fn inbound(source_domain: u64, token_id: TokenId, sequence: u64) -> BridgeMessage {
    BridgeMessage {
        payload: TransferPayload {
            recipient: ALICE,
            token_id,
        }
        .encode(),
        source_emitter: emitter_of(source_domain),
        source_domain,
        sequence_nonce: sequence,
    }
}

#[test]
fn test_round_trip() {
    let home = create_test_domain(1, &[2]);
    let away = create_test_domain(2, &[1]);
    let token_id = home.mint_to(BOB);
    home.runtime.drain_events();

    let outbound = home
        .runtime
        .send_cross_domain(BOB, token_id, 2, ALICE)
        .unwrap();
    assert_eq!(outbound.sequence, 0);
    assert_eq!(outbound.target_domain, 2);
    assert_eq!(home.runtime.drain_outbox(), vec![outbound.clone()]);
    assert!(matches!(
        home.runtime.owner_of(token_id),
        Err(RuntimeError::Ledger(LedgerError::InTransit { .. }))
    ));
    assert_eq!(home.runtime.balance_of(&BOB), 0);
    assert_eq!(
        home.runtime.drain_events(),
        vec![
            DomainEvent::Transfer {
                from: BOB,
                to: [0u8; 20],
                token_id,
            },
            DomainEvent::CrossDomainSent {
                token_id,
                recipient: ALICE,
                target_domain: 2,
                sequence: 0,
            },
        ]
    );

    let outcome = away.runtime.receive_message(&deliver(1, &outbound)).unwrap();
    assert_eq!(
        outcome,
        ReceiveOutcome::Minted {
            token_id,
            recipient: ALICE,
        }
    );
    assert_eq!(away.runtime.owner_of(token_id).unwrap(), ALICE);

    // Back home, to a different owner.
    let returning = away
        .runtime
        .send_cross_domain(ALICE, token_id, 1, CAROL)
        .unwrap();
    let outcome = home
        .runtime
        .receive_message(&deliver(2, &returning))
        .unwrap();
    assert_eq!(
        outcome,
        ReceiveOutcome::Finalized {
            token_id,
            recipient: CAROL,
        }
    );
    assert_eq!(home.runtime.owner_of(token_id).unwrap(), CAROL);
    assert_eq!(home.runtime.balance_of(&CAROL), 1);

    // Allocation continues after the returning id.
    assert_eq!(home.mint_to(BOB), TokenId(1_000_002));
}

#[test]
fn test_redelivery_is_a_no_op() {
    let away = create_test_domain(2, &[1]);
    let message = inbound(1, TokenId(1_000_007), 3);

    away.runtime.receive_message(&message).unwrap();
    let err = bridge_err(away.runtime.receive_message(&message));
    assert!(matches!(
        err,
        BridgeError::MessageAlreadyApplied { sequence: 3, .. }
    ));
    assert!(err.is_delivery_noise());
    assert_eq!(away.runtime.balance_of(&ALICE), 1);

    let received = away
        .runtime
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, DomainEvent::CrossDomainReceived { .. }))
        .count();
    assert_eq!(received, 1);
}

#[test]
fn test_tag_mismatch_rejected_without_recording() {
    let away = create_test_domain(2, &[1]);

    // Domain 1 relays an identifier from namespace 3.
    let err = bridge_err(away.runtime.receive_message(&inbound(1, TokenId(3_000_001), 4)));
    assert!(err.is_invalid_token_id());
    assert!(matches!(
        err,
        BridgeError::Allocator(wd_01_identity_allocator::AllocatorError::InvalidTokenId {
            reason: InvalidTokenReason::TagMismatch { .. },
            ..
        })
    ));
    assert_eq!(away.runtime.balance_of(&ALICE), 0);

    // The same sequence still applies once the payload is valid.
    away.runtime
        .receive_message(&inbound(1, TokenId(1_000_001), 4))
        .unwrap();
    assert_eq!(away.runtime.balance_of(&ALICE), 1);
}

#[test]
fn test_untrusted_emitter_ignored() {
    let away = create_test_domain(2, &[1]);

    let mut spoofed = inbound(1, TokenId(1_000_001), 0);
    spoofed.source_emitter = [0xEE; 32];
    let err = bridge_err(away.runtime.receive_message(&spoofed));
    assert!(matches!(err, BridgeError::UntrustedEmitter { domain: 1, .. }));
    assert!(err.is_delivery_noise());

    let err = bridge_err(away.runtime.receive_message(&inbound(9, TokenId(9_000_001), 0)));
    assert!(matches!(err, BridgeError::UntrustedEmitter { domain: 9, .. }));
    assert_eq!(away.runtime.balance_of(&ALICE), 0);
}

#[test]
fn test_locally_held_token_cannot_arrive() {
    let home = create_test_domain(1, &[2]);
    let token_id = home.mint_to(BOB);

    // Domain 2 claims to return a token that never left.
    let err = bridge_err(home.runtime.receive_message(&inbound(2, token_id, 0)));
    assert!(matches!(err, BridgeError::NotInTransitFrom { .. }));
    assert_eq!(home.runtime.owner_of(token_id).unwrap(), BOB);
}

#[test]
fn test_send_checks() {
    let home = create_test_domain(1, &[2]);
    let token_id = home.mint_to(BOB);

    assert!(matches!(
        bridge_err(home.runtime.send_cross_domain(BOB, token_id, 3, ALICE)),
        BridgeError::UnknownDomain(3)
    ));
    assert!(matches!(
        bridge_err(home.runtime.send_cross_domain(BOB, token_id, 1, ALICE)),
        BridgeError::UnknownDomain(1)
    ));
    assert!(matches!(
        bridge_err(home.runtime.send_cross_domain(ALICE, token_id, 2, ALICE)),
        BridgeError::Ledger(LedgerError::NotOwner { .. })
    ));

    // A locked token stays home.
    let guardian = Secp256k1KeyPair::generate();
    home.runtime
        .set_protector(
            BOB,
            &home.signed_update(BOB, token_id, guardian.address(), true, &guardian),
        )
        .unwrap();
    assert!(matches!(
        bridge_err(home.runtime.send_cross_domain(BOB, token_id, 2, ALICE)),
        BridgeError::Ledger(LedgerError::TokenLocked(_))
    ));
    assert!(home.runtime.drain_outbox().is_empty());
}

#[test]
fn test_relayed_token_cannot_hop_onward() {
    let home = create_test_domain(1, &[2, 3]);
    let middle = create_test_domain(2, &[1, 3]);
    let token_id = home.mint_to(BOB);

    let first_hop = home
        .runtime
        .send_cross_domain(BOB, token_id, 2, ALICE)
        .unwrap();
    middle
        .runtime
        .receive_message(&deliver(1, &first_hop))
        .unwrap();
    middle.runtime.drain_events();

    // Domain 3 would validate against namespace 2 and refuse it.
    assert_eq!(
        bridge_err(middle.runtime.send_cross_domain(ALICE, token_id, 3, CAROL)),
        BridgeError::ForeignNamespace {
            token_id,
            target_domain: 3,
        }
    );
    assert_eq!(middle.runtime.owner_of(token_id).unwrap(), ALICE);
    assert!(middle.runtime.drain_outbox().is_empty());
    assert!(middle.runtime.drain_events().is_empty());

    // The way home stays open.
    let back = middle
        .runtime
        .send_cross_domain(ALICE, token_id, 1, CAROL)
        .unwrap();
    assert_eq!(back.sequence, 0);
    home.runtime.receive_message(&deliver(2, &back)).unwrap();
    assert_eq!(home.runtime.owner_of(token_id).unwrap(), CAROL);
}

#[test]
fn test_outbound_sequences_increase() {
    let home = create_test_domain(1, &[2]);
    let first = home.mint_to(BOB);
    let second = home.mint_to(BOB);

    let a = home.runtime.send_cross_domain(BOB, first, 2, ALICE).unwrap();
    let b = home.runtime.send_cross_domain(BOB, second, 2, ALICE).unwrap();
    assert_eq!((a.sequence, b.sequence), (0, 1));
    assert_eq!(a.emitter, emitter_of(1));
    assert_eq!(
        TransferPayload::decode(&b.payload).unwrap(),
        TransferPayload {
            recipient: ALICE,
            token_id: second,
        }
    );
}
