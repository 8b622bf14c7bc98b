//! Azure Active Directory presets.

use guard_core::ConfigError;

use crate::config::RefresherConfig;

/// Azure AD login host.
pub const LOGIN_HOST: &str = "https://login.microsoftonline.com";

/// Scope granting the application's configured Microsoft Graph permissions.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// v2.0 token endpoint of `tenant_id`.
pub fn login_url(tenant_id: &str) -> String {
    format!("{}/{}/oauth2/v2.0/token", LOGIN_HOST, tenant_id)
}

impl RefresherConfig {
    /// Config for an Azure AD tenant requesting Microsoft Graph access.
    pub fn azure(
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        RefresherConfig::new(client_id, client_secret, login_url(tenant_id))
            .with_scope(GRAPH_DEFAULT_SCOPE)
    }

    /// Create from the standard Azure environment variables.
    ///
    /// Reads `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`;
    /// `AZURE_SCOPE` overrides the Graph default scope.
    pub fn azure_from_env() -> Result<Self, ConfigError> {
        let var = |key: &str| std::env::var(key).map_err(|_| ConfigError::MissingEnv(key.to_string()));

        let tenant_id = var("AZURE_TENANT_ID")?;
        let mut config = Self::azure(&tenant_id, var("AZURE_CLIENT_ID")?, var("AZURE_CLIENT_SECRET")?);
        if let Ok(scope) = std::env::var("AZURE_SCOPE") {
            config.scope = scope;
        }
        Ok(config)
    }
}
