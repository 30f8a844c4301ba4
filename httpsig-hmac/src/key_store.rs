use crate::{
  crypto::{AlgorithmName, SharedKey},
  error::{HttpSigError, HttpSigResult},
};
use base64::{engine::general_purpose, Engine as _};
use rustc_hash::FxHashMap;

/* ---------------------------------------- */
#[derive(Clone, Default)]
/// Read-only mapping from keyId to shared secret
pub struct KeyStore {
  keys: FxHashMap<String, Vec<u8>>,
}

impl KeyStore {
  /// Create an empty key store
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a secret given as text
  pub fn with_key(mut self, key_id: &str, secret: impl AsRef<[u8]>) -> Self {
    self.keys.insert(key_id.to_string(), secret.as_ref().to_vec());
    self
  }

  /// Add a secret given in standard base64
  pub fn with_base64_key(self, key_id: &str, secret: &str) -> HttpSigResult<Self> {
    let secret = general_purpose::STANDARD.decode(secret)?;
    Ok(self.with_key(key_id, secret))
  }

  /// Check if the key id is registered
  pub fn contains(&self, key_id: &str) -> bool {
    self.keys.contains_key(key_id)
  }

  /// Number of registered key ids
  pub fn len(&self) -> usize {
    self.keys.len()
  }

  /// Whether no key is registered
  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  /// Get the secret bound to the key id
  pub fn get(&self, key_id: &str) -> HttpSigResult<&[u8]> {
    self
      .keys
      .get(key_id)
      .map(|v| v.as_slice())
      .ok_or_else(|| HttpSigError::UnknownKey(key_id.to_string()))
  }

  /// Build the shared key for the key id and the given algorithm
  pub fn shared_key(&self, key_id: &str, alg: &AlgorithmName) -> HttpSigResult<SharedKey> {
    self.get(key_id).map(|secret| SharedKey::new(alg, secret))
  }
}

impl<K, V> FromIterator<(K, V)> for KeyStore
where
  K: Into<String>,
  V: AsRef<[u8]>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let keys = iter
      .into_iter()
      .map(|(key_id, secret)| (key_id.into(), secret.as_ref().to_vec()))
      .collect();
    Self { keys }
  }
}

impl std::fmt::Debug for KeyStore {
  /// Secrets are never printed
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut key_ids = self.keys.keys().collect::<Vec<_>>();
    key_ids.sort();
    f.debug_struct("KeyStore").field("key_ids", &key_ids).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::crypto::SigningKey;

  #[test]
  fn test_from_iter_and_lookup() {
    let store = [("test", "askldjakldjalkjfalskjf"), ("other", "another secret")]
      .into_iter()
      .collect::<KeyStore>();
    assert_eq!(store.len(), 2);
    assert!(store.contains("test"));
    assert_eq!(store.get("test").unwrap(), b"askldjakldjalkjfalskjf");
    assert!(matches!(store.get("missing"), Err(HttpSigError::UnknownKey(ref k)) if k == "missing"));
  }

  #[test]
  fn test_builder_and_base64() {
    let store = KeyStore::new()
      .with_key("plain", "secret")
      .with_base64_key("encoded", "c2VjcmV0")
      .unwrap();
    assert_eq!(store.get("plain").unwrap(), store.get("encoded").unwrap());
    assert!(KeyStore::new().with_base64_key("bad", "not base64!").is_err());
    assert!(KeyStore::new().is_empty());
  }

  #[test]
  fn test_shared_key() {
    let store = KeyStore::new().with_key("test", "secret");
    let key = store.shared_key("test", &AlgorithmName::HmacSha512).unwrap();
    assert_eq!(key.alg(), AlgorithmName::HmacSha512);
    assert!(store.shared_key("missing", &AlgorithmName::HmacSha512).is_err());
  }

  #[test]
  fn test_debug_hides_secrets() {
    let store = KeyStore::new().with_key("test", "askldjakldjalkjfalskjf");
    let printed = format!("{store:?}");
    assert!(printed.contains("test"));
    assert!(!printed.contains("askldjakldjalkjfalskjf"));
  }
}
