//! Deployment configuration.
//!
//! A [`BulletConfig`] names the network and the hashes of the deployed
//! validators. It is loaded once at startup and passed around by reference.
//!
//! ```yaml
//! network: preprod
//! contracts:
//!   bullet: 0101..
//!   stake_bullet: 0202..
//!   ...
//! ```

use crate::{Address, Credential, Network, ScriptHash};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

/// The network and deployed validators an application talks to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulletConfig {
    /// Network used for every address this configuration produces.
    #[serde(default)]
    pub network: Network,
    /// Hashes of the deployed validators.
    pub contracts: Contracts,
}

/// Script hashes of the deployed Bullet validators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contracts {
    /// The custody account spending validator.
    pub bullet: ScriptHash,
    /// The nonce holding validator.
    pub bullet_nonce: ScriptHash,
    /// The custody account stake validator.
    pub stake_bullet: ScriptHash,
    /// The proxy spending validator.
    pub proxy: ScriptHash,
    /// The one-shot proxy minting policy.
    pub one_shot_mint: ScriptHash,
    /// Hot key authorisation.
    pub hot_auth: ScriptHash,
    /// Intent authorisation.
    pub intent_auth: ScriptHash,
    /// Wallet authorisation.
    pub wallet_auth: ScriptHash,
    /// Cold key authorisation.
    pub cold_auth: ScriptHash,
    /// Change of credential authorisation.
    pub change_auth: ScriptHash,
    /// Account deletion.
    pub delete: ScriptHash,
    /// The wallet stake validator.
    pub wallet_stake: ScriptHash,
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid YAML for [`BulletConfig`].
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BulletConfig {
    /// Parse a configuration from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// The custody address: the bullet validator staked to the stake validator.
    pub fn bullet_address(&self) -> Address {
        Address::base(
            Credential::Script(self.contracts.bullet),
            Credential::Script(self.contracts.stake_bullet),
        )
    }

    /// The stake credential hash that owns custody accounts by default.
    pub fn user_stake(&self) -> ScriptHash {
        self.contracts.stake_bullet
    }

    /// The credential of the intent authorisation validator.
    pub fn intent_auth_credential(&self) -> Credential {
        Credential::Script(self.contracts.intent_auth)
    }
}
