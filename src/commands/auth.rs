use anyhow::{Context, Result};
use log::{error, info};
use std::io::Write;

use crate::api::AdminApi;

/// Log in and print the access token, ready for `SHOPADMIN_TOKEN`.
#[tracing::instrument(skip(api, password, out))]
pub async fn login<A: AdminApi, W: Write>(
    api: &A,
    email: &str,
    password: &str,
    out: &mut W,
) -> Result<()> {
    let response = api
        .login(email, password)
        .await
        .inspect_err(|e| error!("Login failed: {}", e))
        .context("Login failed")?;

    info!("Logged in as {}", email);
    writeln!(out, "{}", response.access_token)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, LoginResponse, MockAdminApi};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_login_prints_access_token() {
        let mut api = MockAdminApi::new();
        api.expect_login()
            .with(eq("admin@shop.test"), eq("hunter2"))
            .times(1)
            .returning(|_, _| {
                Ok(LoginResponse {
                    access_token: "at-123".to_string(),
                    refresh_token: Some("rt".to_string()),
                    user: serde_json::Value::Null,
                })
            });

        let mut out = Vec::new();
        login(&api, "admin@shop.test", "hunter2", &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "at-123\n");
    }

    #[test_log::test(tokio::test)]
    async fn test_login_failure_keeps_server_message() {
        let mut api = MockAdminApi::new();
        api.expect_login()
            .returning(|_, _| Err(ApiError::new("Invalid credentials")));

        let mut out = Vec::new();
        let err = login(&api, "a@b.c", "wrong", &mut out).await.unwrap_err();

        assert_eq!(err.to_string(), "Login failed");
        assert_eq!(err.root_cause().to_string(), "Invalid credentials");
        assert!(out.is_empty());
    }
}
