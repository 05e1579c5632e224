//! # Session resolution
//!
//! [`SessionResolver`] turns what is persisted under [`keys::TOKEN`] and
//! [`keys::USER`] into an in-memory [`AuthState`]. It owns two stores: the
//! persistent one (survives reloads) and the ephemeral one that carries the
//! per-tab [`keys::VISITED`] marker.
//!
//! ## Rules
//!
//! - Token and user record are both present or the state is unauthenticated.
//!   A lone token or a lone user record is removed.
//! - A user record that does not parse is corruption: both keys are wiped and the
//!   state is unauthenticated. Nothing is returned as an error.
//! - On the first resolution in a tab (no visit marker), credentials are cleared
//!   before evaluation and the marker is set.
//!
//! Resolution is idempotent: a second call sees the already-normalised store.

use crate::keys;
use crate::models::{Role, StoredUser};
use crate::storage::{read_json, write_json, KeyValueStore};
use crate::StoreError;

/// A signed-in user and the credential the backend issued for them.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: StoredUser,
}

/// Authentication state derived from persisted storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(s) => Some(s),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn user(&self) -> Option<&StoredUser> {
        self.session().map(|s| &s.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.token.as_str())
    }
}

/// Reads and writes the persisted session.
#[derive(Clone, Debug)]
pub struct SessionResolver<S: KeyValueStore> {
    persistent: S,
    ephemeral: S,
}

impl<S: KeyValueStore> SessionResolver<S> {
    pub fn new(persistent: S, ephemeral: S) -> Self {
        Self {
            persistent,
            ephemeral,
        }
    }

    pub fn persistent(&self) -> &S {
        &self.persistent
    }

    /// Resolve at application start, honouring the first-visit rule.
    pub fn resolve_startup(&self) -> AuthState {
        if self.ephemeral.get(keys::VISITED).is_none() {
            tracing::debug!("First load in this tab; discarding persisted credentials");
            self.clear_credentials();
            self.ephemeral.set(keys::VISITED, "true");
            return AuthState::Unauthenticated;
        }
        self.refresh()
    }

    /// Re-evaluate the persisted credentials, e.g. after another tab changed them.
    pub fn refresh(&self) -> AuthState {
        let token = self
            .persistent
            .get(keys::TOKEN)
            .filter(|t| !t.trim().is_empty());

        let user = match read_json::<StoredUser, _>(&self.persistent, keys::USER) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Discarding stored session: {}", e);
                self.clear_credentials();
                return AuthState::Unauthenticated;
            }
        };

        match (token, user) {
            (Some(token), Some(user)) => AuthState::Authenticated(Session { token, user }),
            (None, None) => AuthState::Unauthenticated,
            _ => {
                tracing::debug!("Partial session in storage; clearing");
                self.clear_credentials();
                AuthState::Unauthenticated
            }
        }
    }

    /// Persist a freshly issued session.
    pub fn sign_in(&self, token: &str, user: &StoredUser) -> Result<AuthState, StoreError> {
        write_json(&self.persistent, keys::USER, user)?;
        self.persistent.set(keys::TOKEN, token);
        tracing::info!("Signed in as {} ({})", user.username, user.role);
        Ok(AuthState::Authenticated(Session {
            token: token.to_string(),
            user: user.clone(),
        }))
    }

    /// Forget the session and the cart that belonged to it.
    pub fn sign_out(&self) -> AuthState {
        self.clear_credentials();
        self.persistent.remove(keys::CART);
        tracing::info!("Signed out");
        AuthState::Unauthenticated
    }

    fn clear_credentials(&self) {
        self.persistent.remove(keys::TOKEN);
        self.persistent.remove(keys::USER);
    }
}

/// Where to send a user after a successful login.
///
/// A preserved in-app path wins over the role's landing page. Paths that leave
/// the app or point back at the login view are ignored.
pub fn post_login_destination(role: Role, return_to: Option<&str>) -> String {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && path != "/auth"
                && !path.starts_with("/auth?") =>
        {
            path.to_string()
        }
        _ => role.landing_path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn customer() -> StoredUser {
        StoredUser {
            user_id: 42,
            username: "leaf".to_string(),
            role: Role::Customer,
            first_name: Some("Lea".to_string()),
            last_name: Some("Fern".to_string()),
            email: None,
        }
    }

    /// A resolver whose tab has already been marked as visited.
    fn visited() -> (MemoryStore, SessionResolver<MemoryStore>) {
        let local = MemoryStore::new();
        let session = MemoryStore::new();
        session.set(keys::VISITED, "true");
        (local.clone(), SessionResolver::new(local, session))
    }

    #[test]
    fn test_token_and_user_resolve_authenticated() {
        let (local, resolver) = visited();
        local.set(keys::TOKEN, "t-1");
        local.set(keys::USER, &serde_json::to_string(&customer()).unwrap());

        let state = resolver.resolve_startup();
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Customer));
        assert_eq!(state.token(), Some("t-1"));
    }

    #[test]
    fn test_missing_user_is_unauthenticated_and_cleared() {
        let (local, resolver) = visited();
        local.set(keys::TOKEN, "t-1");

        assert_eq!(resolver.resolve_startup(), AuthState::Unauthenticated);
        assert!(local.get(keys::TOKEN).is_none());
    }

    #[test]
    fn test_missing_token_is_unauthenticated_and_cleared() {
        let (local, resolver) = visited();
        local.set(keys::USER, &serde_json::to_string(&customer()).unwrap());

        assert_eq!(resolver.resolve_startup(), AuthState::Unauthenticated);
        assert!(local.get(keys::USER).is_none());
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let (local, resolver) = visited();
        local.set(keys::TOKEN, "");
        local.set(keys::USER, &serde_json::to_string(&customer()).unwrap());

        assert_eq!(resolver.refresh(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_malformed_user_wipes_store_idempotently() {
        let (local, resolver) = visited();
        local.set(keys::TOKEN, "t-1");
        local.set(keys::USER, "{not json");

        let first = resolver.resolve_startup();
        assert_eq!(first, AuthState::Unauthenticated);
        assert!(local.get(keys::TOKEN).is_none());
        assert!(local.get(keys::USER).is_none());

        let second = resolver.resolve_startup();
        assert_eq!(first, second);
    }

    #[test]
    fn test_user_without_role_is_corrupt() {
        let (local, resolver) = visited();
        local.set(keys::TOKEN, "t-1");
        local.set(keys::USER, r#"{"userId":1,"username":"x"}"#);

        assert_eq!(resolver.refresh(), AuthState::Unauthenticated);
        assert!(local.is_empty());
    }

    #[test]
    fn test_first_visit_discards_valid_credentials() {
        let local = MemoryStore::new();
        let tab = MemoryStore::new();
        local.set(keys::TOKEN, "stale");
        local.set(keys::USER, &serde_json::to_string(&customer()).unwrap());
        let resolver = SessionResolver::new(local.clone(), tab.clone());

        assert_eq!(resolver.resolve_startup(), AuthState::Unauthenticated);
        assert!(local.get(keys::TOKEN).is_none());
        assert_eq!(tab.get(keys::VISITED).as_deref(), Some("true"));

        // Marker set: the next resolution evaluates normally.
        resolver.sign_in("fresh", &customer()).unwrap();
        assert!(resolver.resolve_startup().is_authenticated());
    }

    #[test]
    fn test_sign_in_then_refresh_roundtrip() {
        let (_, resolver) = visited();
        let signed = resolver.sign_in("tok", &customer()).unwrap();
        assert_eq!(resolver.refresh(), signed);
    }

    #[test]
    fn test_sign_out_clears_session_and_cart() {
        let (local, resolver) = visited();
        resolver.sign_in("tok", &customer()).unwrap();
        local.set(keys::CART, "[]");
        local.set(keys::THEME, "dark");

        assert_eq!(resolver.sign_out(), AuthState::Unauthenticated);
        assert!(local.get(keys::TOKEN).is_none());
        assert!(local.get(keys::USER).is_none());
        assert!(local.get(keys::CART).is_none());
        assert_eq!(local.get(keys::THEME).as_deref(), Some("dark"));
    }

    #[test]
    fn test_external_sign_in_is_seen_on_refresh() {
        let (local, resolver) = visited();
        assert_eq!(resolver.refresh(), AuthState::Unauthenticated);

        local.apply_external(keys::TOKEN, Some("other-tab"));
        local.apply_external(
            keys::USER,
            Some(&serde_json::to_string(&customer()).unwrap()),
        );
        assert_eq!(resolver.refresh().token(), Some("other-tab"));
    }

    #[test]
    fn test_post_login_destination() {
        assert_eq!(post_login_destination(Role::Customer, None), "/products");
        assert_eq!(
            post_login_destination(Role::Seller, None),
            "/seller/dashboard"
        );
        assert_eq!(
            post_login_destination(Role::Customer, Some("/product/9")),
            "/product/9"
        );
        assert_eq!(
            post_login_destination(Role::Admin, Some("https://evil.example")),
            "/admin/dashboard"
        );
        assert_eq!(
            post_login_destination(Role::Customer, Some("//evil.example")),
            "/products"
        );
        assert_eq!(post_login_destination(Role::Customer, Some("/auth")), "/products");
    }
}
