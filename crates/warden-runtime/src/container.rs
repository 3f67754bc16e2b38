//! # Domain Container
//!
//! Holds every subsystem of one domain and serializes access to them.
//!
//! ## Wiring
//!
//! ```text
//! DomainConfig ──► IdentityAllocator ──► SaleEngine<P>
//!              ──► DomainSeparator   ──► ProtectorService
//!              ──► TrustedRelay[]    ──► BridgeRelay<InMemoryOutbox>
//! ```
//!
//! ## Thread Safety
//!
//! - The whole `DomainState` sits behind one `parking_lot::Mutex`
//! - Every facade call holds the lock for its full duration, so
//!   check-then-set on consumed signatures and applied messages and the
//!   payment-then-allocate sequence of `buy` never interleave
//! - `now` is read from the injected `TimeSource` inside the lock

use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{
    format_address, Address, DomainEvent, DomainId, EventLog, Hash, TimeSource, Timestamp,
    TokenId, U256, ZERO_ADDRESS,
};
use tracing::{debug, info};
use wd_01_identity_allocator::{IdentityAllocator, IdentityAllocatorApi, LedgerError, TokenLedger};
use wd_02_sale_engine::{SaleApi, SaleEngine, SaleError, StableCoin, StableCoinLedger};
use wd_03_protector_auth::{
    DomainSeparator, ProtectedTransfer, ProtectorApi, ProtectorService, ProtectorUpdate,
};
use wd_04_bridge_relay::{
    BridgeApi, BridgeMessage, BridgeRelay, InMemoryOutbox, OutboundMessage, ReceiveOutcome,
};

use crate::config::DomainConfig;
use crate::errors::RuntimeError;

/// Mutable state of one domain.
pub struct DomainState<P: StableCoinLedger> {
    /// Ownership and lock flags.
    pub ledger: TokenLedger,
    /// Sale engine (owns the allocator).
    pub sale: SaleEngine<P>,
    /// Guardian sets and the signature verifier.
    pub protectors: ProtectorService,
    /// Relay endpoint.
    pub bridge: BridgeRelay<InMemoryOutbox>,
    /// Events not yet drained.
    pub events: EventLog,
}

/// Single-writer facade over one domain.
pub struct DomainRuntime<P: StableCoinLedger> {
    domain_id: DomainId,
    state: Mutex<DomainState<P>>,
    clock: Arc<dyn TimeSource>,
}

impl<P: StableCoinLedger> DomainRuntime<P> {
    /// Validate `config` and build every subsystem.
    pub fn new(
        config: &DomainConfig,
        payments: P,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, RuntimeError> {
        config.validate()?;

        let allocator = IdentityAllocator::new(config.allocator_config())?;
        let sale = SaleEngine::new(
            config.price_config(),
            allocator,
            payments,
            config.admin,
            config.proceeds_holder(),
        )?;
        let protectors = ProtectorService::new(DomainSeparator::new(
            config.domain_id,
            config.verifying_contract,
        ));
        let mut bridge = BridgeRelay::new(config.domain_id, config.relay_emitter, InMemoryOutbox::new());
        for trusted in &config.trusted_emitters {
            bridge.trust(trusted.to_relay());
        }

        info!(
            "[runtime] Domain {} ready (tag {}, admin {}, {} trusted remote(s))",
            config.domain_id,
            config.domain_tag(),
            format_address(&config.admin),
            config.trusted_emitters.len()
        );

        Ok(Self {
            domain_id: config.domain_id,
            state: Mutex::new(DomainState {
                ledger: TokenLedger::new(),
                sale,
                protectors,
                bridge,
                events: EventLog::new(),
            }),
            clock,
        })
    }

    /// Id of this domain.
    pub fn domain_id(&self) -> DomainId {
        self.domain_id
    }

    /// Current time as seen by signature checks.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Run `f` against the locked state.
    pub fn inspect<R>(&self, f: impl FnOnce(&DomainState<P>) -> R) -> R {
        let state = self.state.lock();
        f(&state)
    }

    // =========================================================================
    // ALLOCATION & SALE
    // =========================================================================

    /// Allocate the next identifier and mint it to `to` (admin).
    pub fn allocate(&self, caller: Address, to: Address) -> Result<TokenId, RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState {
            ledger, sale, events, ..
        } = &mut *guard;
        if caller != sale.admin() {
            return Err(SaleError::NotAuthorized(caller).into());
        }
        if to == ZERO_ADDRESS {
            return Err(LedgerError::ZeroAddress.into());
        }
        if let Some(planned) = sale.allocator().peek_batch(1)?.first() {
            if ledger.exists(*planned) {
                return Err(LedgerError::TokenAlreadyExists(*planned).into());
            }
        }
        let token_id = sale.allocator_mut().allocate_next()?;
        ledger.mint(to, token_id, events)?;
        Ok(token_id)
    }

    /// Price of one identifier in `token`'s smallest unit.
    pub fn final_price(&self, token: &Address) -> Result<U256, RuntimeError> {
        Ok(self.state.lock().sale.final_price(token)?)
    }

    /// Buy `count` identifiers paying with `token`.
    pub fn buy(
        &self,
        buyer: Address,
        token: Address,
        count: u64,
    ) -> Result<Vec<TokenId>, RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState {
            ledger, sale, events, ..
        } = &mut *guard;
        Ok(sale.buy(ledger, buyer, token, count, events)?)
    }

    /// Set the base price in cents (admin).
    pub fn set_price(&self, caller: Address, cents: u32) -> Result<(), RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState { sale, events, .. } = &mut *guard;
        Ok(sale.set_price(caller, cents, events)?)
    }

    /// Set the discount in basis points (admin).
    pub fn set_discount(&self, caller: Address, basis_points: u32) -> Result<(), RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState { sale, events, .. } = &mut *guard;
        Ok(sale.set_discount(caller, basis_points, events)?)
    }

    /// Accept or stop accepting a payment token (admin).
    pub fn set_stable_coin(
        &self,
        caller: Address,
        token: Address,
        active: bool,
    ) -> Result<(), RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState { sale, events, .. } = &mut *guard;
        Ok(sale.set_stable_coin(caller, token, active, events)?)
    }

    /// Accepted payment tokens.
    pub fn stable_coins(&self) -> Vec<StableCoin> {
        self.state.lock().sale.stable_coins()
    }

    /// Change the supply ceiling (admin). Zero pins it to the last id sold.
    pub fn set_max_token_id(&self, caller: Address, value: TokenId) -> Result<TokenId, RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState { sale, events, .. } = &mut *guard;
        Ok(sale.set_max_token_id(caller, value, events)?)
    }

    /// Current supply ceiling.
    pub fn max_token_id(&self) -> TokenId {
        self.state.lock().sale.allocator().max_token_id()
    }

    /// Identifier the next allocation will return.
    pub fn next_token_id(&self) -> TokenId {
        self.state.lock().sale.allocator().next_token_id()
    }

    /// Move sale proceeds to `beneficiary` (admin). Zero moves everything.
    pub fn withdraw_proceeds(
        &self,
        caller: Address,
        beneficiary: Address,
        token: Address,
        amount: U256,
    ) -> Result<U256, RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState { sale, events, .. } = &mut *guard;
        Ok(sale.withdraw_proceeds(caller, beneficiary, token, amount, events)?)
    }

    // =========================================================================
    // OWNERSHIP & PROTECTORS
    // =========================================================================

    /// Owner-initiated transfer.
    pub fn transfer(&self, caller: Address, to: Address, token_id: TokenId) -> Result<(), RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState { ledger, events, .. } = &mut *guard;
        Ok(ledger.transfer(caller, to, token_id, events)?)
    }

    /// Current owner of a token.
    pub fn owner_of(&self, token_id: TokenId) -> Result<Address, RuntimeError> {
        Ok(self.state.lock().ledger.owner_of(token_id)?)
    }

    /// Tokens held by `owner`.
    pub fn balance_of(&self, owner: &Address) -> usize {
        self.state.lock().ledger.balance_of(owner)
    }

    /// Whether a token is locked by protectors.
    pub fn is_locked(&self, token_id: TokenId) -> bool {
        self.state.lock().ledger.is_locked(token_id)
    }

    /// Active protectors of a token.
    pub fn protectors_of(&self, token_id: TokenId) -> Vec<Address> {
        self.state.lock().protectors.protectors_of(token_id)
    }

    /// Digest a protector must sign for `update` submitted by `caller`.
    pub fn update_digest(&self, caller: Address, update: &ProtectorUpdate) -> Hash {
        let state = self.state.lock();
        let request = state.protectors.update_request(caller, update);
        state.protectors.digest(&request)
    }

    /// Digest a protector must sign for `transfer` submitted by `caller`.
    pub fn transfer_digest(&self, caller: Address, transfer: &ProtectedTransfer) -> Hash {
        let state = self.state.lock();
        let request = state.protectors.transfer_request(caller, transfer);
        state.protectors.digest(&request)
    }

    /// Activate or deactivate a protector with a signed approval.
    pub fn set_protector(&self, caller: Address, update: &ProtectorUpdate) -> Result<(), RuntimeError> {
        let mut guard = self.state.lock();
        let now = self.clock.now();
        let DomainState {
            ledger,
            protectors,
            events,
            ..
        } = &mut *guard;
        Ok(protectors.set_protector(ledger, caller, update, now, events)?)
    }

    /// Move a locked token with a protector's signed approval.
    pub fn protected_transfer(
        &self,
        caller: Address,
        transfer: &ProtectedTransfer,
    ) -> Result<(), RuntimeError> {
        let mut guard = self.state.lock();
        let now = self.clock.now();
        let DomainState {
            ledger,
            protectors,
            events,
            ..
        } = &mut *guard;
        Ok(protectors.protected_transfer(ledger, caller, transfer, now, events)?)
    }

    // =========================================================================
    // BRIDGE
    // =========================================================================

    /// Apply a relayed message.
    pub fn receive_message(&self, message: &BridgeMessage) -> Result<ReceiveOutcome, RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState {
            ledger,
            sale,
            bridge,
            events,
            ..
        } = &mut *guard;
        Ok(bridge.receive_message(ledger, sale.allocator(), message, events)?)
    }

    /// Escrow a token and publish it towards `target_domain`.
    pub fn send_cross_domain(
        &self,
        caller: Address,
        token_id: TokenId,
        target_domain: DomainId,
        recipient: Address,
    ) -> Result<OutboundMessage, RuntimeError> {
        let mut guard = self.state.lock();
        let DomainState {
            ledger,
            sale,
            bridge,
            events,
            ..
        } = &mut *guard;
        Ok(bridge.send_cross_domain(
            ledger,
            sale.allocator(),
            caller,
            token_id,
            target_domain,
            recipient,
            events,
        )?)
    }

    /// Take the messages waiting for the relay.
    pub fn drain_outbox(&self) -> Vec<OutboundMessage> {
        self.state.lock().bridge.outbox_mut().drain()
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&self) -> Vec<DomainEvent> {
        let events = self.state.lock().events.drain();
        debug!("[runtime] Drained {} event(s)", events.len());
        events
    }
}
