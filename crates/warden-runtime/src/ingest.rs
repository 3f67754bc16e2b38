//! # Relay Ingestion
//!
//! Applies relay deliveries read as JSON lines:
//!
//! ```text
//! {"payload":"0x…","source_emitter":"0x…","source_domain":2,"sequence_nonce":7}
//! ```
//!
//! One bad line never stops the loop. Duplicate and untrusted deliveries are
//! expected steady-state traffic and are logged at `debug`. Domain events are
//! drained after every delivery, so a long-running ingest holds none.

use anyhow::{Context, Result};
use serde::Serialize;
use shared_types::{format_address, DomainEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};
use wd_02_sale_engine::StableCoinLedger;
use wd_04_bridge_relay::{BridgeMessage, ReceiveOutcome};

use crate::container::DomainRuntime;

/// Counters for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Messages that changed ownership.
    pub applied: usize,
    /// Duplicate or untrusted deliveries.
    pub ignored: usize,
    /// Deliveries refused by validation.
    pub rejected: usize,
    /// Lines that were not a delivery.
    pub malformed: usize,
    /// Domain events drained while applying deliveries.
    pub events: usize,
}

/// Read deliveries from `reader` until EOF and apply each one.
pub async fn run_ingest<R, P>(reader: R, runtime: &DomainRuntime<P>) -> Result<IngestSummary>
where
    R: AsyncBufRead + Unpin,
    P: StableCoinLedger,
{
    let mut summary = IngestSummary::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read relay delivery")?
    {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message: BridgeMessage = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("[runtime] Line {}: not a relay delivery: {}", line_no, e);
                summary.malformed += 1;
                continue;
            }
        };

        match runtime.receive_message(&message) {
            Ok(outcome) => {
                summary.applied += 1;
                log_outcome(line_no, &message, &outcome);
            }
            Err(e) if e.is_delivery_noise() => {
                summary.ignored += 1;
                debug!("[runtime] Line {}: ignored: {}", line_no, e);
            }
            Err(e) => {
                summary.rejected += 1;
                warn!(
                    "[runtime] Line {}: rejected delivery {} from domain {}: {}",
                    line_no, message.sequence_nonce, message.source_domain, e
                );
            }
        }

        summary.events += log_events(line_no, runtime.drain_events());
    }

    Ok(summary)
}

fn log_events(line_no: usize, events: Vec<DomainEvent>) -> usize {
    for event in &events {
        match serde_json::to_string(event) {
            Ok(json) => debug!("[runtime] Line {}: event {}", line_no, json),
            Err(_) => debug!("[runtime] Line {}: event {:?}", line_no, event),
        }
    }
    events.len()
}

fn log_outcome(line_no: usize, message: &BridgeMessage, outcome: &ReceiveOutcome) {
    match outcome {
        ReceiveOutcome::Minted {
            token_id,
            recipient,
        } => info!(
            "[runtime] Line {}: minted {} to {} (domain {}, seq {})",
            line_no,
            token_id,
            format_address(recipient),
            message.source_domain,
            message.sequence_nonce
        ),
        ReceiveOutcome::Finalized {
            token_id,
            recipient,
        } => info!(
            "[runtime] Line {}: returned {} to {} (domain {}, seq {})",
            line_no,
            token_id,
            format_address(recipient),
            message.source_domain,
            message.sequence_nonce
        ),
    }
}
