//! Authenticated user identity.
//!
//! Identity is issued by the external auth provider; this crate only
//! carries it as a value. An absent user means "not signed in".

use serde::{Deserialize, Serialize};

/// Fallback display name for users without one.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// The authenticated user as handed over by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-assigned stable user id.
    pub uid: String,
    /// Human-readable display name, if the provider supplied one.
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Create a user with no display name.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
        }
    }

    /// Attach a display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name, falling back to [`ANONYMOUS_NAME`].
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(ANONYMOUS_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_anonymous() {
        let user = AuthUser::new("uid-1");
        assert_eq!(user.name(), ANONYMOUS_NAME);
    }

    #[test]
    fn name_uses_display_name_when_present() {
        let user = AuthUser::new("uid-1").with_display_name("Asha");
        assert_eq!(user.name(), "Asha");
    }
}
