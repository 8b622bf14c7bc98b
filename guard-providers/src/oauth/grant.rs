//! OAuth2 grant parameters.

use crate::config::RefresherConfig;

/// `grant_type` for service-to-service tokens.
pub const CLIENT_CREDENTIALS: &str = "client_credentials";

/// `grant_type` for On-Behalf-Of delegation (RFC 7523 JWT bearer assertion).
pub const JWT_BEARER: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// `requested_token_use` value that selects the On-Behalf-Of flow.
pub const ON_BEHALF_OF: &str = "on_behalf_of";

/// The grant a token request is made under.
///
/// This is the only thing that differs between refreshers; the request
/// shape and response handling are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant<'a> {
    /// `client_credentials`. Nothing from the caller is forwarded.
    ClientCredentials,
    /// JWT bearer with `requested_token_use=on_behalf_of`; the caller's
    /// token travels as the `assertion`.
    OnBehalfOf {
        /// The caller's token.
        assertion: &'a str,
    },
}

impl<'a> Grant<'a> {
    /// Value of the `grant_type` form field.
    pub fn grant_type(&self) -> &'static str {
        match self {
            Self::ClientCredentials => CLIENT_CREDENTIALS,
            Self::OnBehalfOf { .. } => JWT_BEARER,
        }
    }

    /// Form fields for a token request against `config`.
    pub fn form<'b>(&self, config: &'b RefresherConfig) -> Vec<(&'static str, &'b str)>
    where
        'a: 'b,
    {
        let mut form = vec![
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ];

        if let Self::OnBehalfOf { assertion } = *self {
            form.push(("assertion", assertion));
            form.push(("requested_token_use", ON_BEHALF_OF));
        }

        form.push(("scope", config.scope.as_str()));
        form.push(("grant_type", self.grant_type()));
        form
    }
}
