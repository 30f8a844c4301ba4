mod symmetric;

use crate::error::{HttpSigError, HttpSigResult};

pub use symmetric::SharedKey;

/// Prefix of every supported algorithm identifier
const HMAC_FAMILY_PREFIX: &str = "hmac_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Algorithm names, written `<family>_<digest>` on the wire
pub enum AlgorithmName {
  HmacSha1,
  HmacSha256,
  HmacSha384,
  HmacSha512,
}

impl AlgorithmName {
  pub fn as_str(&self) -> &'static str {
    match self {
      AlgorithmName::HmacSha1 => "hmac_sha1",
      AlgorithmName::HmacSha256 => "hmac_sha256",
      AlgorithmName::HmacSha384 => "hmac_sha384",
      AlgorithmName::HmacSha512 => "hmac_sha512",
    }
  }
}

impl std::fmt::Display for AlgorithmName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl core::str::FromStr for AlgorithmName {
  type Err = HttpSigError;

  /// Strip the hmac family prefix and dispatch on the digest name.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let Some(digest) = s.strip_prefix(HMAC_FAMILY_PREFIX) else {
      return Err(HttpSigError::UnsupportedAlgorithm(s.to_string()));
    };
    match digest {
      "sha1" => Ok(Self::HmacSha1),
      "sha256" => Ok(Self::HmacSha256),
      "sha384" => Ok(Self::HmacSha384),
      "sha512" => Ok(Self::HmacSha512),
      _ => Err(HttpSigError::UnsupportedAlgorithm(s.to_string())),
    }
  }
}

/// SigningKey trait
pub trait SigningKey {
  fn sign(&self, data: &[u8]) -> HttpSigResult<Vec<u8>>;
  fn alg(&self) -> AlgorithmName;
}

/// VerifyingKey trait
pub trait VerifyingKey {
  fn verify(&self, data: &[u8], signature: &[u8]) -> HttpSigResult<()>;
  fn alg(&self) -> AlgorithmName;
}
