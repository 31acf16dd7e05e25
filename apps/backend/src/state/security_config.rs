use jsonwebtoken::Algorithm;

/// Configuration for the two request-auth factors: JWT signing and
/// HMAC request signing.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// JWT secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
    /// Access token lifetime in minutes
    pub jwt_expire_minutes: i64,
    /// Shared secret for HMAC request signatures
    pub hmac_secret: Vec<u8>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secrets and the default
    /// one-hour token lifetime.
    pub fn new(jwt_secret: impl Into<Vec<u8>>, hmac_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            jwt_expire_minutes: 60,
            hmac_secret: hmac_secret.into(),
        }
    }

    pub fn with_expire_minutes(mut self, minutes: i64) -> Self {
        self.jwt_expire_minutes = minutes;
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(
            b"default_jwt_secret_for_tests_only".to_vec(),
            b"default_hmac_secret_for_tests_only".to_vec(),
        )
    }
}
