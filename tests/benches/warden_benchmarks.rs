//! # Warden Benchmarks
//!
//! Hot paths of the per-domain single writer:
//!
//! | Path | Work |
//! |------|------|
//! | typed-data digest | 14 keccak words |
//! | signer recovery | secp256k1 public key recovery |
//! | payload decode | 64-byte word parse |
//! | buy | price, payment, allocation, mint |

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use shared_crypto::{recover_address, Secp256k1KeyPair};
use shared_types::{ManualTimeSource, TokenId, U256};
use warden_runtime::{DomainConfig, DomainRuntime, StableCoinConfig};
use wd_02_sale_engine::InMemoryStableCoins;
use wd_03_protector_auth::{ActionCode, DomainSeparator, SignedRequest};
use wd_04_bridge_relay::TransferPayload;

const ADMIN: [u8; 20] = [0xAD; 20];
const BUYER: [u8; 20] = [0xB0; 20];
const USDC: [u8; 20] = [0x05; 20];

fn create_request(signer: &Secp256k1KeyPair) -> SignedRequest {
    SignedRequest {
        selector: ActionCode::AddProtector.selector(),
        requester: BUYER,
        actor: signer.address(),
        target_contract: [0x7A; 20],
        token_id: TokenId(1_000_001),
        action: ActionCode::AddProtector,
        extra1: U256::zero(),
        extra2: U256::zero(),
        valid_since: 1_700_000_000,
        valid_until: 1_700_003_600,
        domain_id: 1,
        signer: signer.address(),
    }
}

fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("wd-03-protector-auth");
    let domain = DomainSeparator::new(1, [0x7A; 20]);
    let key = Secp256k1KeyPair::generate();
    let request = create_request(&key);
    let digest = request.digest(&domain);
    let signature = key.sign_prehash(&digest).unwrap();

    group.bench_function("typed_data_digest", |b| {
        b.iter(|| black_box(&request).digest(black_box(&domain)))
    });
    group.bench_function("recover_signer", |b| {
        b.iter(|| recover_address(black_box(&digest), black_box(&signature)).unwrap())
    });
    group.finish();
}

fn bench_payload(c: &mut Criterion) {
    let encoded = TransferPayload {
        recipient: BUYER,
        token_id: TokenId(2_000_042),
    }
    .encode();

    c.bench_function("wd-04-payload-decode", |b| {
        b.iter(|| TransferPayload::decode(black_box(&encoded)).unwrap())
    });
}

fn bench_buy(c: &mut Criterion) {
    c.bench_function("wd-02-buy-one", |b| {
        b.iter_batched(
            || {
                let config = DomainConfig {
                    admin: ADMIN,
                    stable_coins: vec![StableCoinConfig {
                        token: USDC,
                        decimals: 18,
                    }],
                    ..DomainConfig::default()
                };
                let payments = InMemoryStableCoins::new();
                payments.register(USDC, 18);
                payments.mint(&USDC, &BUYER, U256::exp10(20)).unwrap();
                payments.approve(&USDC, &BUYER, &ADMIN, U256::MAX).unwrap();
                DomainRuntime::new(&config, payments, Arc::new(ManualTimeSource::new(0))).unwrap()
            },
            |runtime| runtime.buy(BUYER, USDC, 1).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_signatures, bench_payload, bench_buy);
criterion_main!(benches);
