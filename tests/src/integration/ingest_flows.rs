//! # Ingest Flows
//!
//! Outbound messages of one domain fed to another as relay JSON lines.

use super::fixtures::*;
use shared_types::TokenId;
use tokio::io::BufReader;
use warden_runtime::{run_ingest, IngestSummary};

fn as_lines(source_domain: u64, messages: &[wd_04_bridge_relay::OutboundMessage]) -> String {
    messages
        .iter()
        .map(|m| serde_json::to_string(&deliver(source_domain, m)).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_relay_feed_applies_each_delivery_once() {
    let home = create_test_domain(1, &[2]);
    let away = create_test_domain(2, &[1]);
    let first = home.mint_to(BOB);
    let second = home.mint_to(BOB);
    home.runtime.send_cross_domain(BOB, first, 2, ALICE).unwrap();
    home.runtime.send_cross_domain(BOB, second, 2, CAROL).unwrap();
    let outbox = home.runtime.drain_outbox();

    // The relay redelivers the first message and emits one garbled line.
    let feed = format!(
        "{}\n{}\n{{\"payload\":\"0x00\"\n",
        as_lines(1, &outbox),
        as_lines(1, &outbox[..1])
    );
    let summary = run_ingest(BufReader::new(feed.as_bytes()), &away.runtime)
        .await
        .unwrap();

    assert_eq!(
        summary,
        IngestSummary {
            applied: 2,
            ignored: 1,
            rejected: 0,
            malformed: 1,
            events: 4,
        }
    );
    assert_eq!(away.runtime.owner_of(first).unwrap(), ALICE);
    assert_eq!(away.runtime.owner_of(second).unwrap(), CAROL);
    assert!(away.runtime.drain_events().is_empty());
}

#[tokio::test]
async fn test_relay_feed_rejects_foreign_namespace() {
    let away = create_test_domain(2, &[1]);
    let home = create_test_domain(1, &[2]);
    let token_id = home.mint_to(BOB);
    let mut outbound = home
        .runtime
        .send_cross_domain(BOB, token_id, 2, ALICE)
        .unwrap();
    // Rewrite the payload to claim an identifier from namespace 5.
    outbound.payload = wd_04_bridge_relay::TransferPayload {
        recipient: ALICE,
        token_id: TokenId(5_000_001),
    }
    .encode();

    let feed = as_lines(1, &[outbound]);
    let summary = run_ingest(BufReader::new(feed.as_bytes()), &away.runtime)
        .await
        .unwrap();

    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.events, 0);
    assert_eq!(away.runtime.balance_of(&ALICE), 0);
}
