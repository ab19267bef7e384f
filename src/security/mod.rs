//! Service authentication
//!
//! Credential values come from an injected [`CredentialProvider`]; this module
//! only decides which one a request carries and how it is encoded.

pub mod credential;
pub mod manager;

pub use credential::{Credential, CredentialKind, ServerType};
pub use manager::SecurityManager;

/// Source of credentials for service URLs
pub trait CredentialProvider: Send + Sync {
    /// Bearer token registered for `url`
    fn get_token(&self, url: &str) -> Option<String>;

    /// Service key registered for `url`
    fn get_key(&self, url: &str) -> Option<String>;
}

/// Provider that never has a credential
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn get_token(&self, _url: &str) -> Option<String> {
        None
    }

    fn get_key(&self, _url: &str) -> Option<String> {
        None
    }
}

/// Picks the credential a request to `url` should carry
pub fn resolve_credential(
    url: &str,
    server_type: ServerType,
    provider: &dyn CredentialProvider,
) -> Option<Credential> {
    match server_type {
        ServerType::IServer | ServerType::Default => provider.get_token(url).map(Credential::token),
        ServerType::Portal => provider
            .get_token(url)
            .map(Credential::token)
            .or_else(|| provider.get_key(url).map(Credential::key)),
        ServerType::Online => provider.get_key(url).map(Credential::key),
    }
}

/// Appends the resolved credential to `url`, or returns it unchanged
pub fn append_credential(
    url: &str,
    server_type: ServerType,
    provider: &dyn CredentialProvider,
) -> String {
    match resolve_credential(url, server_type, provider) {
        Some(credential) => {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{}{}{}", url, separator, credential.url_parameters())
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://host/maps/World/image.png?width=256";

    fn provider(token: Option<&str>, key: Option<&str>) -> SecurityManager {
        let mut manager = SecurityManager::new();
        if let Some(token) = token {
            manager.register_token("http://host/maps/World", token);
        }
        if let Some(key) = key {
            manager.register_key("http://host/maps/World", key);
        }
        manager
    }

    #[test]
    fn test_server_uses_token_only() {
        let both = provider(Some("t1"), Some("k1"));
        assert_eq!(append_credential(URL, ServerType::IServer, &both), format!("{}&token=t1", URL));
        assert_eq!(append_credential(URL, ServerType::Default, &both), format!("{}&token=t1", URL));

        let key_only = provider(None, Some("k1"));
        assert_eq!(append_credential(URL, ServerType::IServer, &key_only), URL);
    }

    #[test]
    fn test_portal_falls_back_to_key() {
        let both = provider(Some("t1"), Some("k1"));
        assert_eq!(append_credential(URL, ServerType::Portal, &both), format!("{}&token=t1", URL));

        let key_only = provider(None, Some("k1"));
        let url = append_credential(URL, ServerType::Portal, &key_only);
        assert_eq!(url, format!("{}&key=k1", URL));
        assert!(!url.contains("token="));
    }

    #[test]
    fn test_online_uses_key_only() {
        let token_only = provider(Some("t1"), None);
        assert_eq!(append_credential(URL, ServerType::Online, &token_only), URL);

        let key_only = provider(None, Some("k1"));
        assert_eq!(append_credential(URL, ServerType::Online, &key_only), format!("{}&key=k1", URL));
    }

    #[test]
    fn test_separator_without_query() {
        let manager = provider(Some("t1"), None);
        assert_eq!(
            append_credential("http://host/maps/World", ServerType::IServer, &manager),
            "http://host/maps/World?token=t1"
        );
        assert_eq!(append_credential(URL, ServerType::Portal, &NoCredentials), URL);
    }
}
