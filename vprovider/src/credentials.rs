//! API token handling for the generation collaborator.

pub const REPLICATE_API_TOKEN_ENV: &str = "REPLICATE_API_TOKEN";

#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// Resolves the API token from an explicit value, falling back to the
/// `REPLICATE_API_TOKEN` environment variable.
pub fn resolve_api_token(explicit: Option<&str>) -> Option<SecretString> {
    select_token(explicit, std::env::var(REPLICATE_API_TOKEN_ENV).ok())
}

fn select_token(explicit: Option<&str>, env_value: Option<String>) -> Option<SecretString> {
    if let Some(token) = explicit {
        let token = token.trim();
        if !token.is_empty() {
            return Some(SecretString::new(token));
        }
    }

    env_value
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .map(SecretString::new)
}
