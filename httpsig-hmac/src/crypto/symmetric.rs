use super::AlgorithmName;
use crate::error::{HttpSigError, HttpSigResult};
use hmac::{digest::KeyInit, Hmac, Mac};

type HmacSha1 = Hmac<sha1::Sha1>;
type HmacSha256 = Hmac<sha2::Sha256>;
type HmacSha384 = Hmac<sha2::Sha384>;
type HmacSha512 = Hmac<sha2::Sha512>;

/* -------------------------------- */
/// Shared key for http signature, i.e., the secret bound to a keyId together with the digest it is used with
pub enum SharedKey {
  /// hmac_sha1
  HmacSha1(Vec<u8>),
  /// hmac_sha256
  HmacSha256(Vec<u8>),
  /// hmac_sha384
  HmacSha384(Vec<u8>),
  /// hmac_sha512
  HmacSha512(Vec<u8>),
}

impl SharedKey {
  /// Create a new shared key for the given algorithm from raw secret bytes
  pub fn new(alg: &AlgorithmName, secret: &[u8]) -> Self {
    let secret = secret.to_vec();
    match alg {
      AlgorithmName::HmacSha1 => SharedKey::HmacSha1(secret),
      AlgorithmName::HmacSha256 => SharedKey::HmacSha256(secret),
      AlgorithmName::HmacSha384 => SharedKey::HmacSha384(secret),
      AlgorithmName::HmacSha512 => SharedKey::HmacSha512(secret),
    }
  }
}

impl super::SigningKey for SharedKey {
  /// Sign the data
  fn sign(&self, data: &[u8]) -> HttpSigResult<Vec<u8>> {
    match self {
      SharedKey::HmacSha1(key) => compute_mac::<HmacSha1>(key, data),
      SharedKey::HmacSha256(key) => compute_mac::<HmacSha256>(key, data),
      SharedKey::HmacSha384(key) => compute_mac::<HmacSha384>(key, data),
      SharedKey::HmacSha512(key) => compute_mac::<HmacSha512>(key, data),
    }
  }
  /// Get the algorithm name
  fn alg(&self) -> AlgorithmName {
    use super::VerifyingKey;
    <Self as VerifyingKey>::alg(self)
  }
}

impl super::VerifyingKey for SharedKey {
  /// Verify the mac in constant time
  fn verify(&self, data: &[u8], expected_mac: &[u8]) -> HttpSigResult<()> {
    match self {
      SharedKey::HmacSha1(key) => verify_mac::<HmacSha1>(key, data, expected_mac),
      SharedKey::HmacSha256(key) => verify_mac::<HmacSha256>(key, data, expected_mac),
      SharedKey::HmacSha384(key) => verify_mac::<HmacSha384>(key, data, expected_mac),
      SharedKey::HmacSha512(key) => verify_mac::<HmacSha512>(key, data, expected_mac),
    }
  }

  /// Get the algorithm name
  fn alg(&self) -> AlgorithmName {
    match self {
      SharedKey::HmacSha1(_) => AlgorithmName::HmacSha1,
      SharedKey::HmacSha256(_) => AlgorithmName::HmacSha256,
      SharedKey::HmacSha384(_) => AlgorithmName::HmacSha384,
      SharedKey::HmacSha512(_) => AlgorithmName::HmacSha512,
    }
  }
}

/* -------------------------------- */
fn new_mac<M: Mac + KeyInit>(key: &[u8]) -> HttpSigResult<M> {
  <M as Mac>::new_from_slice(key).map_err(|e| HttpSigError::InvalidKey(e.to_string()))
}

fn compute_mac<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> HttpSigResult<Vec<u8>> {
  let mut mac = new_mac::<M>(key)?;
  mac.update(data);
  Ok(mac.finalize().into_bytes().to_vec())
}

fn verify_mac<M: Mac + KeyInit>(key: &[u8], data: &[u8], expected_mac: &[u8]) -> HttpSigResult<()> {
  let mut mac = new_mac::<M>(key)?;
  mac.update(data);
  mac
    .verify_slice(expected_mac)
    .map_err(|_| HttpSigError::InvalidSignature("Invalid mac".to_string()))
}
