//! OAuth2 token endpoint plumbing.
//!
//! - [`Grant`]: the grant a request is made under (the only varying policy)
//! - [`TokenEndpoint`]: builds the form POST, sends it, decodes the answer
//! - [`RequestObserver`]: diagnostic hook called on every outgoing request
//!
//! Note: this module does NOT cache tokens or retry. Each exchange is one
//! independent round trip.

mod endpoint;
mod grant;
mod trace;

pub use endpoint::{TokenEndpoint, FORM_CONTENT_TYPE};
pub use grant::{Grant, CLIENT_CREDENTIALS, JWT_BEARER, ON_BEHALF_OF};
pub use trace::{curl_command, CurlTrace, NoopObserver, RequestObserver};
