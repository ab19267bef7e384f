//! Credentials appended to service requests and the server types that decide
//! which credential a request carries.

use serde::{Deserialize, Serialize};

/// Query parameter a credential is sent as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    Token,
    Key,
}

impl CredentialKind {
    pub fn param_name(&self) -> &'static str {
        match self {
            CredentialKind::Token => "token",
            CredentialKind::Key => "key",
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.param_name())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    kind: CredentialKind,
    value: String,
}

impl Credential {
    pub fn new(kind: CredentialKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn token(value: impl Into<String>) -> Self {
        Self::new(CredentialKind::Token, value)
    }

    pub fn key(value: impl Into<String>) -> Self {
        Self::new(CredentialKind::Key, value)
    }

    pub fn kind(&self) -> CredentialKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Encodes the credential as a `name=value` query parameter
    pub fn url_parameters(&self) -> String {
        format!("{}={}", self.kind.param_name(), self.value)
    }
}

// Values never end up in logs
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("kind", &self.kind)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Kind of server a layer talks to; decides the credential lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServerType {
    /// Standalone map server, authenticated by token
    IServer,
    /// Portal in front of one or more servers, token first then key
    Portal,
    /// Public cloud service, authenticated by key
    Online,
    #[default]
    Default,
}

impl ServerType {
    /// Parses a server type name; unknown names fall back to [`ServerType::Default`]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "ISERVER" => ServerType::IServer,
            "IPORTAL" | "PORTAL" => ServerType::Portal,
            "ONLINE" => ServerType::Online,
            _ => ServerType::Default,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerType::IServer => "ISERVER",
            ServerType::Portal => "IPORTAL",
            ServerType::Online => "ONLINE",
            ServerType::Default => "DEFAULT",
        }
    }
}

impl From<String> for ServerType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ServerType> for String {
    fn from(server_type: ServerType) -> Self {
        server_type.name().to_string()
    }
}

impl std::fmt::Display for ServerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
