//! Command implementations. Each returns the text to print on success.

use anyhow::{bail, ensure, Context};
use bullet_sign::{KeySigner, SigningContext};
use bullet_types::{
    config::BulletConfig,
    intent::{decode_intent, encode_intent},
    signed::encode_redeemer,
    Address, Hash28, Intent, IntentionRedeemer, SignedIntention,
};
use ed25519_dalek::VerifyingKey;
use serde::de::DeserializeOwned;
use std::{fs, path::Path, path::PathBuf};

pub struct SignArgs {
    pub config: PathBuf,
    pub intent: PathBuf,
    pub address: String,
    pub signing_key: String,
    pub user_stake: Option<String>,
}

pub struct RedeemerArgs {
    pub signed: Vec<PathBuf>,
    pub change_output: u64,
    pub constraint_output: u64,
    pub constraint_redeemer: u64,
    pub groups: Vec<String>,
}

pub fn encode(intent: &Path) -> anyhow::Result<String> {
    let intent: Intent = read_json(intent)?;
    Ok(hex::encode(encode_intent(&intent)))
}

pub fn decode(hex: &str) -> anyhow::Result<String> {
    let bytes = hex::decode(hex.trim()).context("intent is not valid hex")?;
    let intent = decode_intent(&bytes)?;
    Ok(serde_json::to_string_pretty(&intent)?)
}

pub async fn sign(args: SignArgs) -> anyhow::Result<String> {
    let config = BulletConfig::from_yaml_file(&args.config)?;
    let intent: Intent = read_json(&args.intent)?;
    let ctx = context(&config, &args.address)?;
    let user_stake = match &args.user_stake {
        Some(hash) => hash.parse::<Hash28>().context("invalid user stake hash")?,
        None => config.user_stake(),
    };
    let secret: [u8; 32] = decode_fixed(&args.signing_key).context("invalid signing key")?;
    let signer = KeySigner::from_bytes(&secret);

    tracing::info!(public_key = %hex::encode(signer.verifying_key().as_bytes()), "signing intent");
    let signed = bullet_sign::sign_intent(user_stake, intent, &ctx, &signer).await?;
    Ok(serde_json::to_string_pretty(&signed)?)
}

pub fn verify(
    config: &Path,
    signed: &Path,
    address: &str,
    public_keys: &[String],
) -> anyhow::Result<String> {
    let config = BulletConfig::from_yaml_file(config)?;
    let signed: SignedIntention = read_json(signed)?;
    let ctx = context(&config, address)?;
    let keys = public_keys
        .iter()
        .map(|key| {
            let bytes: [u8; 32] = decode_fixed(key)?;
            VerifyingKey::from_bytes(&bytes).context("invalid public key")
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    bullet_sign::verify(&signed, &ctx, &keys)?;
    Ok(format!("{} valid signature(s)", keys.len()))
}

pub fn redeemer(args: RedeemerArgs) -> anyhow::Result<String> {
    let intentions = args
        .signed
        .iter()
        .map(|path| read_json(path))
        .collect::<anyhow::Result<Vec<SignedIntention>>>()?;
    let intention_groups = args
        .groups
        .iter()
        .map(|group| hex::decode(group).context("intention group is not valid hex"))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let redeemer = IntentionRedeemer {
        intentions,
        intention_groups,
        change_output: args.change_output,
        constraint_output: args.constraint_output,
        constraint_redeemer: args.constraint_redeemer,
    };
    Ok(hex::encode(encode_redeemer(&redeemer)))
}

/// The signing context for `address`, which must be an enterprise address on
/// the configured network.
fn context(config: &BulletConfig, address: &str) -> anyhow::Result<SigningContext> {
    let bytes = hex::decode(address.trim()).context("address is not valid hex")?;
    let (network, address) = Address::from_bytes(&bytes)?;
    ensure!(
        network == config.network,
        "address is on {network:?} but the config is for {:?}",
        config.network
    );
    ensure!(
        address.stake_credential.is_none(),
        "signer address must be an enterprise address, found a stake credential"
    );
    Ok(SigningContext::new(network, address.payment_credential))
}

fn decode_fixed<const N: usize>(hex: &str) -> anyhow::Result<[u8; N]> {
    let bytes = hex::decode(hex.trim()).context("not valid hex")?;
    match <[u8; N]>::try_from(bytes) {
        Ok(array) => Ok(array),
        Err(bytes) => bail!("expected {N} bytes, found {}", bytes.len()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid JSON in {}", path.display()))
}
