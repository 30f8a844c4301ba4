use crate::error::{HyperSigError, HyperSigResult};
use http::{
  header::{HeaderName, HeaderValue, AUTHORIZATION},
  Request,
};
use httpsig_hmac::prelude::{covered_field_names, now_unix_secs, HttpSignatureBase, HttpSignatureParams, SignatureContext};
use tracing::debug;

/// `Signature` header name
const SIGNATURE_HEADER: &str = "signature";

/* --------------------------------------- */
/// A trait about http message signature for request
pub trait MessageSignatureReq {
  type Error;

  /// Check if the request has the `authorization` header
  fn has_message_signature(&self) -> bool;

  /// Extract signature params from the first `authorization` header
  fn get_signature_params(&self) -> Result<HttpSignatureParams, Self::Error>;

  /// Sign the request with the key bound to `key_id`, covering `(request-target)`, `(created)` and the given header names.
  /// Returns a signed copy carrying `signature` and `authorization` headers and leaves `self` untouched.
  fn sign_message(
    &self,
    context: &SignatureContext,
    key_id: &str,
    algorithm: &str,
    header_names: &[&str],
  ) -> Result<Self, Self::Error>
  where
    Self: Sized;

  /// Verify the signature carried in the `authorization` header.
  /// Any failure, e.g., missing header, unknown key id, unsupported algorithm, malformed params or mismatch, results in `false`.
  fn verify_message_signature(&self, context: &SignatureContext) -> bool;
}

/* --------------------------------------- */
impl<B> MessageSignatureReq for Request<B>
where
  B: Clone,
{
  type Error = HyperSigError;

  fn has_message_signature(&self) -> bool {
    self.headers().contains_key(AUTHORIZATION)
  }

  fn get_signature_params(&self) -> HyperSigResult<HttpSignatureParams> {
    let Some(authorization) = self.headers().get(AUTHORIZATION) else {
      return Err(HyperSigError::NoSignatureHeaders(
        "The request does not have authorization header".to_string(),
      ));
    };
    let params = HttpSignatureParams::try_from_authorization(authorization.to_str()?)?;
    Ok(params)
  }

  fn sign_message(
    &self,
    context: &SignatureContext,
    key_id: &str,
    algorithm: &str,
    header_names: &[&str],
  ) -> HyperSigResult<Self> {
    let signature_base = build_signature_base(self, now_unix_secs(), header_names)?;
    let signature_params = context.sign_base(&signature_base, key_id, algorithm)?;

    let signature = HeaderValue::from_str(&signature_params.to_string())?;
    let authorization = HeaderValue::from_str(&signature_params.authorization_header_value())?;

    let mut signed = self.clone();
    signed
      .headers_mut()
      .insert(HeaderName::from_static(SIGNATURE_HEADER), signature);
    signed.headers_mut().insert(AUTHORIZATION, authorization);
    Ok(signed)
  }

  fn verify_message_signature(&self, context: &SignatureContext) -> bool {
    match verify_message_signature_inner(self, context) {
      Ok(()) => true,
      Err(e) => {
        debug!("Rejected message signature: {e}");
        false
      }
    }
  }
}

/* --------------------------------------- */
// inner functions
/// Verify inner function keeping the reason of failure for logging
fn verify_message_signature_inner<B>(req: &Request<B>, context: &SignatureContext) -> HyperSigResult<()>
where
  B: Clone,
{
  let signature_params = req.get_signature_params()?;
  let field_names = covered_field_names(&signature_params);
  let signature_base = build_signature_base(req, signature_params.created, &field_names)?;
  context.verify_base(&signature_base, &signature_params)?;
  Ok(())
}

/// Request target, i.e., path and query of the request uri
fn request_target<B>(req: &Request<B>) -> &str {
  req.uri().path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
}

/// Build signature base from hyper http request
/// - created: the created timestamp, current time on signing, or the one carried in the params on verification
/// - header_names: http fields to be covered following the pseudo-headers
fn build_signature_base<B>(req: &Request<B>, created: u64, header_names: &[&str]) -> HyperSigResult<HttpSignatureBase> {
  let mut signature_base = HttpSignatureBase::new(req.method().as_str(), request_target(req), created);
  for name in header_names {
    let field_values = req
      .headers()
      .get_all(*name)
      .iter()
      .map(|v| v.to_str())
      .collect::<Result<Vec<_>, _>>()?;
    signature_base.add_field(name, &field_values);
  }
  Ok(signature_base)
}

/* --------------------------------------- */
#[cfg(test)]
#[path = "hyper_http_tests.rs"]
mod tests;
