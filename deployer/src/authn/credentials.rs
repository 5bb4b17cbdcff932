//! Credentials used to acquire a bearer token

use std::fmt;

use secrecy::SecretString;

/// Authentication method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// A bearer token supplied up front
    Bearer,

    /// Anypoint username and password
    User,

    /// Connected app client credentials
    ConnectedApp,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthType::Bearer => "bearer",
            AuthType::User => "user",
            AuthType::ConnectedApp => "connectedapp",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bearer" => Ok(AuthType::Bearer),
            "user" => Ok(AuthType::User),
            "connectedapp" => Ok(AuthType::ConnectedApp),
            _ => Err(format!(
                "Invalid auth type: {} (expected bearer, user or connectedapp)",
                s
            )),
        }
    }
}

/// Credentials for one of the supported authentication methods
#[derive(Debug)]
pub enum Credentials {
    Bearer(SecretString),
    User {
        username: String,
        password: SecretString,
    },
    ConnectedApp {
        client_id: String,
        client_secret: SecretString,
    },
}

impl Credentials {
    /// Get the authentication method
    pub fn auth_type(&self) -> AuthType {
        match self {
            Credentials::Bearer(_) => AuthType::Bearer,
            Credentials::User { .. } => AuthType::User,
            Credentials::ConnectedApp { .. } => AuthType::ConnectedApp,
        }
    }
}
