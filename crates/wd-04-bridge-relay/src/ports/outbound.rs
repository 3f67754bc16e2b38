//! # Outbound Ports
//!
//! Hand-off of outbound messages to the relay network.

use crate::domain::OutboundMessage;

/// Relay publisher - outbound port.
pub trait RelayOutbox: Send {
    /// Queue `message` for delivery.
    fn publish(&mut self, message: OutboundMessage);
}
