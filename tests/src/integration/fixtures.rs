//! # Test Fixtures
//!
//! Domains, accounts and signing helpers shared by the flows.

use std::sync::Arc;

use shared_crypto::{RecoverableSignature, Secp256k1KeyPair};
use shared_types::{
    Address, DomainId, EmitterAddress, ManualTimeSource, TimeSource, Timestamp, TokenId, U256,
};
use warden_runtime::{DomainConfig, DomainRuntime, StableCoinConfig, TrustedEmitterConfig};
use wd_02_sale_engine::InMemoryStableCoins;
use wd_03_protector_auth::{ProtectedTransfer, ProtectorUpdate};
use wd_04_bridge_relay::{BridgeMessage, OutboundMessage};

pub const NOW: Timestamp = 1_700_000_000;
pub const ADMIN: Address = [0xAD; 20];
pub const VAULT: Address = [0x7A; 20];
pub const TREASURY: Address = [0x7E; 20];
pub const BOB: Address = [0xB0; 20];
pub const ALICE: Address = [0xA1; 20];
pub const CAROL: Address = [0xCA; 20];
pub const USDC: Address = [0x05; 20];
pub const DAI: Address = [0x0D; 20];

/// One domain with its clock and payment ledger.
pub struct TestDomain {
    pub runtime: DomainRuntime<InMemoryStableCoins>,
    pub payments: InMemoryStableCoins,
    pub clock: Arc<ManualTimeSource>,
}

/// Relay emitter of `domain_id`.
pub fn emitter_of(domain_id: DomainId) -> EmitterAddress {
    [domain_id as u8; 32]
}

/// `value` whole tokens with 18 decimals.
pub fn units(value: u64) -> U256 {
    U256::from(value) * U256::exp10(18)
}

/// Domain whose tag equals its id, trusting each of `remotes` with their own
/// id as tag. USDC (18 decimals) is accepted; DAI (6 decimals) is registered
/// with the payment ledger but not accepted.
pub fn create_test_domain(domain_id: DomainId, remotes: &[DomainId]) -> TestDomain {
    let config = DomainConfig {
        domain_id,
        admin: ADMIN,
        proceeds_holder: VAULT,
        verifying_contract: [0xC0 + domain_id as u8; 20],
        relay_emitter: emitter_of(domain_id),
        stable_coins: vec![StableCoinConfig {
            token: USDC,
            decimals: 18,
        }],
        trusted_emitters: remotes
            .iter()
            .map(|remote| TrustedEmitterConfig {
                domain: *remote,
                emitter: emitter_of(*remote),
                domain_tag: *remote,
                max_sequence: None,
            })
            .collect(),
        ..DomainConfig::default()
    };

    let payments = InMemoryStableCoins::new();
    payments.register(USDC, 18);
    payments.register(DAI, 6);
    let clock = Arc::new(ManualTimeSource::new(NOW));
    let runtime = DomainRuntime::new(&config, payments.clone(), clock.clone()).unwrap();

    TestDomain {
        runtime,
        payments,
        clock,
    }
}

impl TestDomain {
    /// Give `buyer` `amount` of `token` and approve the vault for all of it.
    pub fn fund(&self, buyer: Address, token: Address, amount: U256) {
        self.payments.mint(&token, &buyer, amount).unwrap();
        self.payments.approve(&token, &buyer, &VAULT, amount).unwrap();
    }

    /// Admin-mint one identifier to `owner`.
    pub fn mint_to(&self, owner: Address) -> TokenId {
        self.runtime.allocate(ADMIN, owner).unwrap()
    }

    /// Update valid for the next hour, signed by `signer` for `owner`.
    pub fn signed_update(
        &self,
        owner: Address,
        token_id: TokenId,
        protector: Address,
        active: bool,
        signer: &Secp256k1KeyPair,
    ) -> ProtectorUpdate {
        let now = self.clock.now();
        let mut update = ProtectorUpdate {
            token_id,
            protector,
            active,
            valid_since: now,
            valid_until: now + 3_600,
            domain_id: self.runtime.domain_id(),
            signer: signer.address(),
            signature: blank_signature(),
        };
        update.signature = signer
            .sign_prehash(&self.runtime.update_digest(owner, &update))
            .unwrap();
        update
    }

    /// Protected transfer valid for the next hour, signed by `signer`.
    pub fn signed_transfer(
        &self,
        owner: Address,
        token_id: TokenId,
        to: Address,
        signer: &Secp256k1KeyPair,
    ) -> ProtectedTransfer {
        let now = self.clock.now();
        let mut transfer = ProtectedTransfer {
            token_id,
            to,
            valid_since: now,
            valid_until: now + 3_600,
            domain_id: self.runtime.domain_id(),
            signer: signer.address(),
            signature: blank_signature(),
        };
        transfer.signature = signer
            .sign_prehash(&self.runtime.transfer_digest(owner, &transfer))
            .unwrap();
        transfer
    }
}

/// Placeholder replaced once the digest is known.
pub fn blank_signature() -> RecoverableSignature {
    RecoverableSignature {
        r: [0; 32],
        s: [0; 32],
        v: 27,
    }
}

/// What the relay delivers for an outbound message from `source_domain`.
pub fn deliver(source_domain: DomainId, message: &OutboundMessage) -> BridgeMessage {
    BridgeMessage {
        payload: message.payload.clone(),
        source_emitter: message.emitter,
        source_domain,
        sequence_nonce: message.sequence,
    }
}
