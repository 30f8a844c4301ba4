use crate::{
  crypto::{AlgorithmName, SigningKey, VerifyingKey},
  error::{HttpSigError, HttpSigResult},
  key_store::KeyStore,
  signature_base::{is_pseudo_header, HttpSignatureBase},
  signature_params::HttpSignatureParams,
  trace::*,
};
use base64::{engine::general_purpose, Engine as _};
use std::{
  str::FromStr,
  time::{SystemTime, UNIX_EPOCH},
};

/* ---------------------------------------- */
#[derive(Debug, Clone)]
/// Signing and verification context holding the read-only key store.
///
/// Each call builds its own working state, so a single context can be shared across threads.
pub struct SignatureContext {
  keys: KeyStore,
}

impl SignatureContext {
  /// Create a new context from the given key store
  pub fn new(keys: KeyStore) -> Self {
    Self { keys }
  }

  /// Key store of this context
  pub fn keys(&self) -> &KeyStore {
    &self.keys
  }

  /// Compute the mac over the signature base and build the signature params to be emitted.
  /// Fails if the algorithm is not supported or the key id is unknown.
  pub fn sign_base(&self, base: &HttpSignatureBase, key_id: &str, algorithm: &str) -> HttpSigResult<HttpSignatureParams> {
    let alg = AlgorithmName::from_str(algorithm)?;
    let key = self.keys.shared_key(key_id, &alg)?;
    let signature = general_purpose::STANDARD.encode(key.sign(&base.as_bytes())?);
    let headers = base.covered_names();
    debug!("Signed with keyId `{}` ({}) over [{}]", key_id, alg, headers.join(" "));

    Ok(HttpSignatureParams {
      keyid: key_id.to_string(),
      algorithm: alg.to_string(),
      created: base.created(),
      headers,
      signature,
    })
  }

  /// Verify the signature carried in the params against the signature base rebuilt on the receiver side.
  /// The mac is compared in constant time.
  pub fn verify_base(&self, base: &HttpSignatureBase, params: &HttpSignatureParams) -> HttpSigResult<()> {
    let alg = AlgorithmName::from_str(&params.algorithm)?;
    let key = self.keys.shared_key(&params.keyid, &alg)?;
    let expected_mac = general_purpose::STANDARD
      .decode(&params.signature)
      .map_err(|e| HttpSigError::InvalidSignature(format!("signature is not base64: {e}")))?;
    key.verify(&base.as_bytes(), &expected_mac)
  }
}

/// Current unix timestamp used as `created` when signing
pub fn now_unix_secs() -> u64 {
  // a clock set before the epoch is treated as the epoch itself
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_secs())
    .unwrap_or_default()
}

/// Http field names to be rebuilt on verification, i.e., the covered names except the pseudo-headers, in order
pub fn covered_field_names(params: &HttpSignatureParams) -> Vec<&str> {
  params
    .headers
    .iter()
    .map(|s| s.as_str())
    .filter(|name| !is_pseudo_header(name))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  const KEY_ID: &str = "test";
  const SECRET: &str = "askldjakldjalkjfalskjf";
  const CREATED: u64 = 1571234567;

  fn build_context() -> SignatureContext {
    SignatureContext::new([(KEY_ID, SECRET)].into_iter().collect())
  }

  fn build_base(username: &str) -> HttpSignatureBase {
    let mut base = HttpSignatureBase::new("GET", "/test", CREATED);
    base.add_field("username", &[username]);
    base
  }

  #[test]
  fn test_sign_then_verify_base() {
    let ctx = build_context();
    for alg in ["hmac_sha1", "hmac_sha256", "hmac_sha384", "hmac_sha512"] {
      let params = ctx.sign_base(&build_base("inghamn"), KEY_ID, alg).unwrap();
      assert_eq!(params.keyid, KEY_ID);
      assert_eq!(params.algorithm, alg);
      assert_eq!(params.created, CREATED);
      assert_eq!(params.headers, vec!["(request-target)", "(created)", "username"]);
      assert!(ctx.verify_base(&build_base("inghamn"), &params).is_ok());
      assert!(ctx.verify_base(&build_base("someone"), &params).is_err());
    }
  }

  #[test]
  fn test_deterministic_at_fixed_created() {
    let ctx = build_context();
    let first = ctx.sign_base(&build_base("inghamn"), KEY_ID, "hmac_sha256").unwrap();
    let second = ctx.sign_base(&build_base("inghamn"), KEY_ID, "hmac_sha256").unwrap();
    assert_eq!(first.signature, second.signature);
    assert_eq!(first.to_string(), second.to_string());
  }

  #[test]
  fn test_known_signature_values() {
    // signature base: "(request-target): get /test\n(created): 1571234567\nusername: inghamn"
    let vectors = [
      ("hmac_sha1", "fr/8fgjYXsxnTI0kLc9c/Gq6IFA="),
      ("hmac_sha256", "X3kvEHVJ2ZXM04dr//XA4NtSRsrsWGYtOEX/z+T9LBs="),
      (
        "hmac_sha512",
        "TRx2motCXq8UZachnTNdeCigL+bkgeIpAQZTQyKgvGGELGYdYpRTbBFPC4R4vCOzhnzGtzKulnqXVth2b/vnRw==",
      ),
    ];
    let ctx = build_context();
    for (alg, expected) in vectors {
      let params = ctx.sign_base(&build_base("inghamn"), KEY_ID, alg).unwrap();
      assert_eq!(params.signature, expected);
    }
  }

  #[test]
  fn test_sign_unsupported_algorithm() {
    let ctx = build_context();
    let res = ctx.sign_base(&build_base("inghamn"), KEY_ID, "rsa_sha256");
    assert!(matches!(res, Err(HttpSigError::UnsupportedAlgorithm(_))));
  }

  #[test]
  fn test_sign_unknown_key() {
    let ctx = build_context();
    let res = ctx.sign_base(&build_base("inghamn"), "missing", "hmac_sha256");
    assert!(matches!(res, Err(HttpSigError::UnknownKey(_))));
  }

  #[test]
  fn test_verify_errors() {
    let ctx = build_context();
    let params = ctx.sign_base(&build_base("inghamn"), KEY_ID, "hmac_sha256").unwrap();

    let mut unknown_key = params.clone();
    unknown_key.keyid = "missing".to_string();
    assert!(matches!(
      ctx.verify_base(&build_base("inghamn"), &unknown_key),
      Err(HttpSigError::UnknownKey(_))
    ));

    let mut unsupported = params.clone();
    unsupported.algorithm = "rsa_sha256".to_string();
    assert!(matches!(
      ctx.verify_base(&build_base("inghamn"), &unsupported),
      Err(HttpSigError::UnsupportedAlgorithm(_))
    ));

    let mut not_base64 = params.clone();
    not_base64.signature = "%%%".to_string();
    assert!(matches!(
      ctx.verify_base(&build_base("inghamn"), &not_base64),
      Err(HttpSigError::InvalidSignature(_))
    ));

    let mut other_alg = params;
    other_alg.algorithm = "hmac_sha512".to_string();
    assert!(ctx.verify_base(&build_base("inghamn"), &other_alg).is_err());
  }

  #[test]
  fn test_covered_field_names() {
    let params = HttpSignatureParams {
      keyid: KEY_ID.to_string(),
      algorithm: "hmac_sha256".to_string(),
      created: CREATED,
      headers: vec!["(request-target)", "date", "(created)", "username"]
        .into_iter()
        .map(String::from)
        .collect(),
      signature: String::new(),
    };
    assert_eq!(covered_field_names(&params), vec!["date", "username"]);
  }

  #[test]
  fn test_now_unix_secs() {
    assert!(now_unix_secs() > CREATED);
  }
}
