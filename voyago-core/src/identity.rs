use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Credential verification failed: {0}")]
    AuthFailed(String),
}

/// External credential-verification step. The core only consumes the
/// resulting identity string; token issuance and session security live
/// behind this seam.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify_credentials(&self, identifier: &str, secret: &str)
        -> Result<String, AuthError>;
}

/// Accepts any non-empty identifier with a secret of at least six
/// characters and returns the identifier as the verified identity.
pub struct MockCredentialVerifier;

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<String, AuthError> {
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::AuthFailed(
                "identifier and secret are required".to_string(),
            ));
        }
        if secret.len() < 6 {
            return Err(AuthError::AuthFailed(
                "secret must be at least 6 characters".to_string(),
            ));
        }

        tracing::info!("Verified credentials for {}", identifier);
        Ok(identifier.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_verifier_accepts_valid_credentials() {
        let verifier = MockCredentialVerifier;
        let identity = verifier
            .verify_credentials("traveler@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(identity, "traveler@example.com");
    }

    #[tokio::test]
    async fn test_mock_verifier_rejects_short_secret() {
        let verifier = MockCredentialVerifier;
        let result = verifier
            .verify_credentials("traveler@example.com", "short")
            .await;
        assert!(matches!(result, Err(AuthError::AuthFailed(_))));
    }
}
