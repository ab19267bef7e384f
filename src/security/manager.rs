//! In-memory credential store keyed by service URL

use super::CredentialProvider;
use crate::prelude::HashMap;

/// Registers tokens and keys per service URL and resolves a request URL to
/// the credential of its longest registered prefix.
#[derive(Debug, Default, Clone)]
pub struct SecurityManager {
    tokens: HashMap<String, String>,
    keys: HashMap<String, String>,
}

impl SecurityManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_token(&mut self, service_url: &str, token: impl Into<String>) {
        self.tokens.insert(normalize_url(service_url), token.into());
    }

    pub fn register_key(&mut self, service_url: &str, key: impl Into<String>) {
        self.keys.insert(normalize_url(service_url), key.into());
    }

    pub fn with_token(mut self, service_url: &str, token: impl Into<String>) -> Self {
        self.register_token(service_url, token);
        self
    }

    pub fn with_key(mut self, service_url: &str, key: impl Into<String>) -> Self {
        self.register_key(service_url, key);
        self
    }

    pub fn remove_token(&mut self, service_url: &str) -> Option<String> {
        self.tokens.remove(&normalize_url(service_url))
    }

    pub fn remove_key(&mut self, service_url: &str) -> Option<String> {
        self.keys.remove(&normalize_url(service_url))
    }

    /// Drops every registered credential
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.keys.clear();
    }

    fn lookup(store: &HashMap<String, String>, url: &str) -> Option<String> {
        let url = normalize_url(url);
        store
            .iter()
            .filter(|(registered, _)| is_path_prefix(registered, &url))
            .max_by_key(|(registered, _)| registered.len())
            .map(|(_, value)| value.clone())
    }
}

impl CredentialProvider for SecurityManager {
    fn get_token(&self, url: &str) -> Option<String> {
        Self::lookup(&self.tokens, url)
    }

    fn get_key(&self, url: &str) -> Option<String> {
        Self::lookup(&self.keys, url)
    }
}

/// Strips the query string and trailing slashes
fn normalize_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or_default();
    without_query.trim_end_matches('/').to_string()
}

/// `prefix` matches whole path segments of `url`
fn is_path_prefix(prefix: &str, url: &str) -> bool {
    match url.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
