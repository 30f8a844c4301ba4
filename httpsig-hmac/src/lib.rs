//! # httpsig-hmac
//!
//! Shared-secret HMAC signatures over a canonical subset of an http request.
//!
//! The signature base consists of the `(request-target)` and `(created)` pseudo-headers followed by caller-selected
//! http fields. The mac is carried with its parameters as
//! `keyId="..",algorithm="hmac_<digest>",created="..",headers="..",signature="<base64>"`.
//!
//! This crate is independent of any http library. See `httpsig-hmac-hyper` to sign and verify `http::Request` directly.

mod context;
mod crypto;
mod error;
mod key_store;
mod signature_base;
mod signature_params;
mod trace;
mod util;

pub mod prelude {
  pub use crate::{
    context::{covered_field_names, now_unix_secs, SignatureContext},
    crypto::{AlgorithmName, SharedKey, SigningKey, VerifyingKey},
    error::{HttpSigError, HttpSigResult},
    key_store::KeyStore,
    signature_base::{is_pseudo_header, HttpSignatureBase, CREATED, REQUEST_TARGET},
    signature_params::{HttpSignatureParams, AUTHORIZATION_PREFIX},
  };
}

/* ----------------------------------------------------------------- */
#[cfg(test)]
mod tests {
  use super::prelude::*;

  const KEY_ID: &str = "test";
  const SECRET: &str = "askldjakldjalkjfalskjf";

  /// Sender and receiver sides only exchange the serialized `Authorization` value
  #[test]
  fn test_with_serialized_signature_params() {
    let ctx = SignatureContext::new(KeyStore::new().with_key(KEY_ID, SECRET));

    // sender
    let mut base = HttpSignatureBase::new("GET", "/test", now_unix_secs());
    base.add_field("username", &["inghamn"]);
    let authorization = ctx.sign_base(&base, KEY_ID, "hmac_sha256").unwrap().authorization_header_value();
    assert!(authorization.starts_with(r##"Signature: keyId="test",algorithm="hmac_sha256",created=""##));

    // receiver
    let params = HttpSignatureParams::try_from_authorization(&authorization).unwrap();
    let mut received_base = HttpSignatureBase::new("GET", "/test", params.created);
    for name in covered_field_names(&params) {
      received_base.add_field(name, &["inghamn"]);
    }
    assert_eq!(received_base.to_string(), base.to_string());
    assert!(ctx.verify_base(&received_base, &params).is_ok());
  }

  #[test]
  fn test_context_is_shareable_across_threads() {
    let ctx = std::sync::Arc::new(SignatureContext::new(KeyStore::new().with_key(KEY_ID, SECRET)));
    let handles = (0..4)
      .map(|i| {
        let ctx = ctx.clone();
        std::thread::spawn(move || {
          let mut base = HttpSignatureBase::new("POST", "/items", 1571234567 + i);
          base.add_field("username", &["inghamn"]);
          let params = ctx.sign_base(&base, KEY_ID, "hmac_sha256").unwrap();
          ctx.verify_base(&base, &params).is_ok()
        })
      })
      .collect::<Vec<_>>();
    assert!(handles.into_iter().all(|h| h.join().unwrap()));
  }
}
