use crate::{
  error::{HttpSigError, HttpSigResult},
  trace::*,
  util::has_unique_elements,
};

/// Literal prefix of the `Authorization` header value carrying signature params
pub const AUTHORIZATION_PREFIX: &str = "Signature: ";

const KEY_ID: &str = "keyId";
const ALGORITHM: &str = "algorithm";
const CREATED: &str = "created";
const HEADERS: &str = "headers";
const SIGNATURE: &str = "signature";

/* ---------------------------------------- */
#[derive(Debug, Clone, PartialEq, Eq)]
/// Struct defining the signature parameters carried in `Signature` and `Authorization` headers
pub struct HttpSignatureParams {
  /// key id selecting the shared secret
  pub keyid: String,
  /// algorithm name, e.g., `hmac_sha256`. Kept as given so that unsupported ones can still be carried and reported.
  pub algorithm: String,
  /// created unix timestamp
  pub created: u64,
  /// covered names in order, pseudo-headers included
  pub headers: Vec<String>,
  /// base64 encoded mac
  pub signature: String,
}

impl HttpSignatureParams {
  /// Parse signature params from the `Authorization` header value, i.e., `Signature: keyId="..",...`
  pub fn try_from_authorization(value: &str) -> HttpSigResult<Self> {
    let Some(params) = value.strip_prefix(AUTHORIZATION_PREFIX) else {
      return Err(HttpSigError::MalformedSignatureHeader(format!(
        "Authorization value does not start with `{}`",
        AUTHORIZATION_PREFIX.trim_end()
      )));
    };
    Self::try_from(params)
  }

  /// Serialize as the `Authorization` header value
  pub fn authorization_header_value(&self) -> String {
    format!("{AUTHORIZATION_PREFIX}{self}")
  }
}

impl std::fmt::Display for HttpSignatureParams {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{KEY_ID}=\"{}\",{ALGORITHM}=\"{}\",{CREATED}=\"{}\",{HEADERS}=\"{}\",{SIGNATURE}=\"{}\"",
      self.keyid,
      self.algorithm,
      self.created,
      self.headers.join(" "),
      self.signature
    )
  }
}

impl TryFrom<&str> for HttpSignatureParams {
  type Error = HttpSigError;

  /// Parse `key="value"` pairs separated by commas. Every one of the five keys must appear exactly once, and nothing else is accepted.
  fn try_from(value: &str) -> HttpSigResult<Self> {
    let pairs = split_top_level(value)?
      .into_iter()
      .map(parse_pair)
      .collect::<HttpSigResult<Vec<_>>>()?;

    if !has_unique_elements(pairs.iter().map(|(k, _)| *k)) {
      return Err(HttpSigError::MalformedSignatureHeader(
        "duplicate signature parameter".to_string(),
      ));
    }

    let mut keyid = None;
    let mut algorithm = None;
    let mut created = None;
    let mut headers = None;
    let mut signature = None;
    for (key, v) in pairs {
      match key {
        KEY_ID => keyid = Some(v.to_string()),
        ALGORITHM => algorithm = Some(v.to_string()),
        CREATED => {
          let parsed = v
            .parse::<u64>()
            .map_err(|e| HttpSigError::MalformedSignatureHeader(format!("invalid created `{v}`: {e}")))?;
          created = Some(parsed)
        }
        HEADERS => headers = Some(v.split(' ').filter(|s| !s.is_empty()).map(|s| s.to_string()).collect()),
        SIGNATURE => signature = Some(v.to_string()),
        _ => {
          error!("Invalid signature parameter: {}", key);
          return Err(HttpSigError::MalformedSignatureHeader(format!(
            "unknown signature parameter `{key}`"
          )));
        }
      }
    }

    let missing = |name: &str| HttpSigError::MalformedSignatureHeader(format!("missing signature parameter `{name}`"));
    Ok(Self {
      keyid: keyid.ok_or_else(|| missing(KEY_ID))?,
      algorithm: algorithm.ok_or_else(|| missing(ALGORITHM))?,
      created: created.ok_or_else(|| missing(CREATED))?,
      headers: headers.ok_or_else(|| missing(HEADERS))?,
      signature: signature.ok_or_else(|| missing(SIGNATURE))?,
    })
  }
}

impl std::str::FromStr for HttpSignatureParams {
  type Err = HttpSigError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::try_from(s)
  }
}

/* ---------------------------------------- */
/// Split on commas that are not inside a quoted value
fn split_top_level(value: &str) -> HttpSigResult<Vec<&str>> {
  let mut tokens = vec![];
  let mut in_quotes = false;
  let mut start = 0;
  for (i, c) in value.char_indices() {
    match c {
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => {
        tokens.push(&value[start..i]);
        start = i + 1;
      }
      _ => {}
    }
  }
  if in_quotes {
    return Err(HttpSigError::MalformedSignatureHeader(
      "unterminated quoted value".to_string(),
    ));
  }
  tokens.push(&value[start..]);
  Ok(tokens)
}

/// Split `key="value"` on the first `=` and strip a single pair of surrounding quotes
fn parse_pair(token: &str) -> HttpSigResult<(&str, &str)> {
  let Some((key, value)) = token.split_once('=') else {
    return Err(HttpSigError::MalformedSignatureHeader(format!(
      "signature parameter without `=`: `{token}`"
    )));
  };
  let key = key.trim();
  let value = value.trim();
  if key.is_empty() {
    return Err(HttpSigError::MalformedSignatureHeader(format!(
      "signature parameter without key: `{token}`"
    )));
  }
  let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
    return Err(HttpSigError::MalformedSignatureHeader(format!(
      "signature parameter `{key}` is not quoted"
    )));
  };
  Ok((key, inner))
}
