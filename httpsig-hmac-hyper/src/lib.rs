//! # httpsig-hmac-hyper
//!
//! `httpsig-hmac-hyper` provides a convenient API for `Hyper` users to sign http requests with a shared secret and to verify them.
//! It extends hyper's http request with [`MessageSignatureReq`].
//!
//! Signing returns a signed copy of the request carrying `Signature` and `Authorization: Signature: ...` headers.
//! Verification is a predicate: it returns `false` for every kind of failure without telling which one.

mod error;
mod hyper_http;

pub use error::{HyperSigError, HyperSigResult};
pub use httpsig_hmac::prelude;
pub use hyper_http::MessageSignatureReq;

/* ----------------------------------------------------------------- */
