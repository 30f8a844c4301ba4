use indexmap::IndexMap;

/// Pseudo-header carrying the lowercased method and the path with query
pub const REQUEST_TARGET: &str = "(request-target)";
/// Pseudo-header carrying the creation timestamp in unix seconds
pub const CREATED: &str = "(created)";

/// Signature Base, i.e., the canonical header set a signature is computed over.
///
/// The two pseudo-headers always come first, followed by http fields in the order they were added.
#[derive(Debug, Clone)]
pub struct HttpSignatureBase {
  /// lowercased names and their (already joined) values, in insertion order
  component_lines: IndexMap<String, String>,
  /// created unix timestamp, kept as a number for signature params
  created: u64,
}

impl HttpSignatureBase {
  /// Creates a new signature base with the pseudo-headers only
  pub fn new(method: &str, request_target: &str, created: u64) -> Self {
    let mut component_lines = IndexMap::new();
    component_lines.insert(
      REQUEST_TARGET.to_string(),
      format!("{} {}", method.to_ascii_lowercase(), request_target),
    );
    component_lines.insert(CREATED.to_string(), created.to_string());
    Self { component_lines, created }
  }

  /// Add an http field with all of its values. Multiple values are joined with `, `, and missing field results in an empty value.
  /// A name that is already covered keeps its first position and value.
  pub fn add_field<S: AsRef<str>>(&mut self, name: &str, field_values: &[S]) -> &mut Self {
    let joined = field_values.iter().map(|v| v.as_ref()).collect::<Vec<_>>().join(", ");
    self.component_lines.entry(name.to_ascii_lowercase()).or_insert(joined);
    self
  }

  /// Created timestamp
  pub fn created(&self) -> u64 {
    self.created
  }

  /// Covered names in order, pseudo-headers included
  pub fn covered_names(&self) -> Vec<String> {
    self.component_lines.keys().cloned().collect()
  }

  /// Returns the signature base string as bytes to be signed
  pub fn as_bytes(&self) -> Vec<u8> {
    self.to_string().into_bytes()
  }
}

impl std::fmt::Display for HttpSignatureBase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let signature_base = self
      .component_lines
      .iter()
      .map(|(name, value)| format!("{name}: {value}"))
      .collect::<Vec<_>>()
      .join("\n");
    write!(f, "{}", signature_base.trim_end())
  }
}

/// Whether the name is one of the pseudo-headers
pub fn is_pseudo_header(name: &str) -> bool {
  name == REQUEST_TARGET || name == CREATED
}
