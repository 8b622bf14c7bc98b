use anyhow::{Context, Result};
use guard::direct::{self, GrantKind};
use guard::{AuthResponse, RefresherConfig};
use tracing::debug;

pub async fn exchange(kind: GrantKind, config: RefresherConfig, input: &str) -> Result<()> {
    debug!(grant = %kind, login_url = %config.login_url, "Requesting token");
    let resp = direct::token(kind, config, input)
        .await
        .with_context(|| format!("{kind} token request failed"))?;
    println!("{}", render(&resp)?);
    Ok(())
}

fn render(resp: &AuthResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(resp)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_uses_wire_names() {
        let out = render(&AuthResponse::new("abc", "Bearer", 3599)).unwrap();
        assert_eq!(
            out,
            "{\n  \"access_token\": \"abc\",\n  \"token_type\": \"Bearer\",\n  \"expires_in\": 3599\n}"
        );
    }
}
