use thiserror::Error;

/// Result type for http signature
pub type HttpSigResult<T> = std::result::Result<T, HttpSigError>;

/// Error type for http signature
#[derive(Error, Debug)]
pub enum HttpSigError {
  #[error("Base64 decode error: {0}")]
  Base64DecodeError(#[from] base64::DecodeError),

  /* ----- Crypto errors ----- */
  /// Algorithm identifier is not of the `hmac_<digest>` family or names an unknown digest
  #[error("Unsupported algorithm: {0}")]
  UnsupportedAlgorithm(String),
  /// Key material rejected by the mac
  #[error("Invalid key: {0}")]
  InvalidKey(String),
  /// keyId not found in the key store
  #[error("Unknown key id: {0}")]
  UnknownKey(String),

  /* ----- Signature header errors ----- */
  /// Failed to parse the signature parameters carried in the header
  #[error("Malformed signature header: {0}")]
  MalformedSignatureHeader(String),

  /// Invalid Signature
  #[error("Invalid Signature: {0}")]
  InvalidSignature(String),
}
