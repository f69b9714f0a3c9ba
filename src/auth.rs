//! Roles, capabilities and the guard every record operation calls before touching a store.

use crate::error::{AppError, ConfigError};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Permission tier an operation requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    User,
    Admin,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::User => "user",
            Capability::Admin => "admin",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl std::str::FromStr for Role {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ConfigError::InvalidValue {
                key: "role",
                reason: format!("unknown role '{}' (expected USER or ADMIN)", s),
            }),
        }
    }
}

/// An authenticated caller. Admin implies user, so the role set always contains `User`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub email: String,
    pub roles: BTreeSet<Role>,
}

impl Caller {
    pub fn new(email: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        let mut roles: BTreeSet<Role> = roles.into_iter().collect();
        roles.insert(Role::User);
        Caller {
            email: email.into(),
            roles,
        }
    }

    pub fn user(email: impl Into<String>) -> Self {
        Caller::new(email, [Role::User])
    }

    pub fn admin(email: impl Into<String>) -> Self {
        Caller::new(email, [Role::Admin])
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::User => self.roles.contains(&Role::User) || self.is_admin(),
            Capability::Admin => self.is_admin(),
        }
    }
}

/// Gate an operation on the caller's roles. No side effects.
pub fn authorize(caller: Option<&Caller>, required: Capability) -> Result<(), AppError> {
    let caller = caller.ok_or(AppError::Unauthenticated)?;
    if caller.has(required) {
        return Ok(());
    }
    tracing::warn!(email = %caller.email, capability = required.as_str(), "caller lacks capability");
    Err(AppError::Forbidden {
        capability: required.as_str(),
    })
}

/// Resolves a bearer token into a caller. `None` means the token is not recognised.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, token: &str) -> Option<Caller>;
}

/// Fixed token table, typically loaded from `API_TOKENS`.
#[derive(Clone, Debug, Default)]
pub struct StaticTokens {
    by_token: HashMap<String, Caller>,
}

impl StaticTokens {
    pub fn new() -> Self {
        StaticTokens {
            by_token: HashMap::new(),
        }
    }

    pub fn with(mut self, token: impl Into<String>, caller: Caller) -> Self {
        self.by_token.insert(token.into(), caller);
        self
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }

    /// Parse `token=email:ROLE|ROLE` entries separated by commas. Blank entries are skipped.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let mut tokens = StaticTokens::new();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (token, identity) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidToken(entry.to_string()))?;
            let (email, roles) = identity
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidToken(entry.to_string()))?;
            let (token, email) = (token.trim(), email.trim());
            if token.is_empty() || email.is_empty() {
                return Err(ConfigError::InvalidToken(entry.to_string()));
            }
            let roles = roles
                .split('|')
                .filter(|r| !r.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Role>, _>>()?;
            tokens.by_token.insert(token.to_string(), Caller::new(email, roles));
        }
        Ok(tokens)
    }
}

impl IdentityProvider for StaticTokens {
    fn resolve(&self, token: &str) -> Option<Caller> {
        self.by_token.get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_caller_is_unauthenticated() {
        let err = authorize(None, Capability::User).unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[test]
    fn plain_user_cannot_write() {
        let user = Caller::user("cgaucho@ucsb.edu");
        assert!(authorize(Some(&user), Capability::User).is_ok());
        let err = authorize(Some(&user), Capability::Admin).unwrap_err();
        assert!(matches!(err, AppError::Forbidden { capability: "admin" }));
    }

    #[test]
    fn admin_implies_user() {
        let admin = Caller::admin("phtcon@ucsb.edu");
        assert!(admin.roles.contains(&Role::User));
        assert!(authorize(Some(&admin), Capability::User).is_ok());
        assert!(authorize(Some(&admin), Capability::Admin).is_ok());
    }

    #[test]
    fn parses_token_table() {
        let tokens = StaticTokens::parse("abc=admin@ucsb.edu:ROLE_ADMIN|USER, def=user@ucsb.edu:user").unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.resolve("abc").unwrap().is_admin());
        let user = tokens.resolve("def").unwrap();
        assert_eq!(user.email, "user@ucsb.edu");
        assert!(!user.is_admin());
        assert!(tokens.resolve("nope").is_none());
    }

    #[test]
    fn rejects_malformed_token_entries() {
        assert!(StaticTokens::parse("abc").is_err());
        assert!(StaticTokens::parse("abc=user@ucsb.edu").is_err());
        assert!(StaticTokens::parse("abc=user@ucsb.edu:OWNER").is_err());
        assert!(StaticTokens::parse("").unwrap().is_empty());
    }
}
