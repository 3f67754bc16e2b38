//! # Domain Configuration
//!
//! Versioned configuration for one domain and its trusted remotes.
//!
//! ## Sources (later wins)
//!
//! 1. `DomainConfig::default()`
//! 2. JSON file named by `WD_CONFIG`
//! 3. Environment overrides: `WD_DOMAIN_ID`, `WD_ADMIN`, `WD_MAX_TOKEN_ID`,
//!    `WD_LOG_LEVEL`
//!
//! ## Production Requirements
//!
//! - `admin` MUST NOT be the zero address (the default is zero on purpose)
//! - `domain_id` MUST NOT be zero
//! - each remote domain is trusted at most once, and never the local one

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::{
    hex_serde, parse_address, Address, DomainId, EmitterAddress, TokenId, ZERO_ADDRESS,
};
use thiserror::Error;
use tracing::Level;
use wd_01_identity_allocator::{AllocatorConfig, Namespace, MAX_SEQUENCE};
use wd_02_sale_engine::{PriceConfig, StableCoin};
use wd_04_bridge_relay::TrustedRelay;

/// Configuration layout version this build understands.
pub const CONFIG_VERSION: u32 = 1;

/// Environment variable naming the JSON configuration file.
pub const ENV_CONFIG_PATH: &str = "WD_CONFIG";

/// Complete domain configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    /// Layout version.
    pub version: u32,
    /// Id of this domain (also the typed-data chain id).
    pub domain_id: DomainId,
    /// Identifier namespace tag. Defaults to `domain_id`.
    pub domain_tag: Option<u64>,
    /// Sale and supply administrator.
    #[serde(with = "hex_serde")]
    pub admin: Address,
    /// Account that receives payments. Defaults to `admin` when zero.
    #[serde(with = "hex_serde")]
    pub proceeds_holder: Address,
    /// Contract signed requests are bound to.
    #[serde(with = "hex_serde")]
    pub verifying_contract: Address,
    /// Emitter identity of this domain on the relay.
    #[serde(with = "hex_serde")]
    pub relay_emitter: EmitterAddress,
    /// First sequence handed out by the allocator.
    pub first_sequence: u64,
    /// Supply ceiling. `None` means the end of the namespace.
    pub max_token_id: Option<u128>,
    /// Base price in US cents.
    pub base_price_cents: u32,
    /// Discount in basis points.
    pub discount_bps: u32,
    /// Payment tokens accepted at startup.
    pub stable_coins: Vec<StableCoinConfig>,
    /// Log level for the binary (`trace` .. `error`).
    pub log_level: String,
    /// Remote domains whose relay messages are accepted.
    pub trusted_emitters: Vec<TrustedEmitterConfig>,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            domain_id: 1,
            domain_tag: None,
            admin: ZERO_ADDRESS, // MUST be overridden
            proceeds_holder: ZERO_ADDRESS,
            verifying_contract: ZERO_ADDRESS,
            relay_emitter: [0u8; 32],
            first_sequence: 1,
            max_token_id: None,
            base_price_cents: 990,
            discount_bps: 0,
            stable_coins: Vec::new(),
            log_level: "info".to_string(),
            trusted_emitters: Vec::new(),
        }
    }
}

/// A payment token accepted at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableCoinConfig {
    /// Token contract.
    #[serde(with = "hex_serde")]
    pub token: Address,
    /// Token decimals.
    pub decimals: u8,
}

/// A trusted remote domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedEmitterConfig {
    /// Remote domain id.
    pub domain: DomainId,
    /// Relay emitter of that domain.
    #[serde(with = "hex_serde")]
    pub emitter: EmitterAddress,
    /// Namespace tag the remote domain allocates from.
    pub domain_tag: u64,
    /// Highest sequence accepted from it. `None` means the whole span.
    #[serde(default)]
    pub max_sequence: Option<u64>,
}

impl TrustedEmitterConfig {
    /// Relay registration for the bridge.
    pub fn to_relay(&self) -> TrustedRelay {
        TrustedRelay {
            domain: self.domain,
            emitter: self.emitter,
            namespace: Namespace::with_max_sequence(
                self.domain_tag,
                self.max_sequence.unwrap_or(MAX_SEQUENCE),
            ),
        }
    }
}

impl DomainConfig {
    /// Namespace tag of this domain.
    pub fn domain_tag(&self) -> u64 {
        self.domain_tag.unwrap_or(self.domain_id)
    }

    /// Account collecting sale proceeds.
    pub fn proceeds_holder(&self) -> Address {
        if self.proceeds_holder == ZERO_ADDRESS {
            self.admin
        } else {
            self.proceeds_holder
        }
    }

    /// Allocator parameters.
    pub fn allocator_config(&self) -> AllocatorConfig {
        AllocatorConfig {
            domain_tag: self.domain_tag(),
            first_sequence: self.first_sequence,
            max_token_id: self.max_token_id.map(TokenId),
        }
    }

    /// Initial price configuration.
    pub fn price_config(&self) -> PriceConfig {
        PriceConfig {
            base_price_cents: self.base_price_cents,
            discount_bps: self.discount_bps,
            stable_coins: self
                .stable_coins
                .iter()
                .map(|coin| StableCoin {
                    token: coin.token,
                    decimals: coin.decimals,
                })
                .collect(),
        }
    }

    /// Parsed log level.
    pub fn level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Validate configuration before any subsystem is built.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the version is not `CONFIG_VERSION`
    /// - the admin is the zero address
    /// - the domain id is zero
    /// - a trusted domain repeats or names this domain
    /// - the log level does not parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: CONFIG_VERSION,
            });
        }
        if self.admin == ZERO_ADDRESS {
            return Err(ConfigError::ZeroAdmin);
        }
        if self.domain_id == 0 {
            return Err(ConfigError::ZeroDomainId);
        }
        let mut seen = HashSet::new();
        for trusted in &self.trusted_emitters {
            if trusted.domain == self.domain_id {
                return Err(ConfigError::TrustedLocalDomain(trusted.domain));
            }
            if !seen.insert(trusted.domain) {
                return Err(ConfigError::DuplicateTrustedDomain(trusted.domain));
            }
        }
        self.level()?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layout version is not understood.
    #[error("Unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version in the file.
        found: u32,
        /// Version this build reads.
        supported: u32,
    },

    /// Admin is not set.
    #[error("Admin is the zero address. Set WD_ADMIN or provide it in the config file.")]
    ZeroAdmin,

    /// Domain id is not set.
    #[error("Domain id must be non-zero")]
    ZeroDomainId,

    /// The same remote domain is trusted twice.
    #[error("Domain {0} is trusted more than once")]
    DuplicateTrustedDomain(DomainId),

    /// The local domain is listed as a remote.
    #[error("Domain {0} is the local domain and cannot be trusted as a remote")]
    TrustedLocalDomain(DomainId),

    /// Log level does not parse.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// An environment override does not parse.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },

    /// The config file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `DomainConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<DomainConfig, ConfigError> {
    load_config_with(|key| std::env::var(key).ok())
}

/// Load configuration with an explicit variable lookup.
pub fn load_config_with<F>(lookup: F) -> Result<DomainConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(ENV_CONFIG_PATH) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read { path, source })?;
            serde_json::from_str(&text)?
        }
        None => DomainConfig::default(),
    };

    if let Some(value) = lookup("WD_DOMAIN_ID") {
        config.domain_id = value.parse().map_err(|_| ConfigError::InvalidEnv {
            var: "WD_DOMAIN_ID",
            value,
        })?;
    }
    if let Some(value) = lookup("WD_ADMIN") {
        config.admin = parse_address(&value).map_err(|_| ConfigError::InvalidEnv {
            var: "WD_ADMIN",
            value,
        })?;
    }
    if let Some(value) = lookup("WD_MAX_TOKEN_ID") {
        let parsed: u128 = value.parse().map_err(|_| ConfigError::InvalidEnv {
            var: "WD_MAX_TOKEN_ID",
            value,
        })?;
        config.max_token_id = Some(parsed);
    }
    if let Some(value) = lookup("WD_LOG_LEVEL") {
        config.log_level = value;
    }

    Ok(config)
}
