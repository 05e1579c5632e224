//! # Route access gate
//!
//! Pure decision logic behind the router guard. Every navigation is classified
//! into a [`NavigationState`] from the path's [`Requirement`] and the current
//! [`AuthState`], and the state decides the [`Access`] outcome:
//!
//! | State | Outcome |
//! |-------|---------|
//! | `Unresolved` | [`Access::Pending`] (the session has not been read yet) |
//! | `Unauthenticated` | [`Access::SignIn`] with the intended path preserved |
//! | `AuthenticatedMismatch` | [`Access::SignIn`] with no return path |
//! | `AuthenticatedMatch` | [`Access::Render`], or the role's home redirect |
//!
//! A signed-in user with the wrong role is sent to the sign-in view exactly like
//! an anonymous visitor. There is no separate "forbidden" page.

use store::{AuthState, Role};

/// What a path demands of the visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    Role(Role),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationState {
    Unresolved,
    Unauthenticated,
    AuthenticatedMatch,
    AuthenticatedMismatch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Pending,
    Render,
    /// Go to `/auth`; `return_to` is where to continue after signing in.
    SignIn { return_to: Option<String> },
    /// Replace the current entry with another in-app path.
    Redirect(String),
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Static route table.
pub fn requirement_for(path: &str) -> Requirement {
    match strip_query(path).trim_end_matches('/') {
        "/cart" | "/products" | "/profile" => Requirement::Authenticated,
        "/admin" | "/admin/dashboard" => Requirement::Role(Role::Admin),
        "/seller" | "/seller/dashboard" => Requirement::Role(Role::Seller),
        "/customer" | "/customer/dashboard" => Requirement::Role(Role::Customer),
        _ => Requirement::Public,
    }
}

/// Classify a navigation to a gated path.
pub fn navigation_state(requirement: Requirement, auth: Option<&AuthState>) -> NavigationState {
    let Some(auth) = auth else {
        return NavigationState::Unresolved;
    };
    match (requirement, auth.role()) {
        (_, None) => NavigationState::Unauthenticated,
        (Requirement::Role(required), Some(role)) if role != required => {
            NavigationState::AuthenticatedMismatch
        }
        _ => NavigationState::AuthenticatedMatch,
    }
}

/// Where a role's bare section path leads once access is granted.
fn role_home_redirect(path: &str) -> Option<&'static str> {
    match strip_query(path).trim_end_matches('/') {
        "/admin" => Some("/admin/dashboard"),
        "/seller" => Some("/seller/dashboard"),
        "/customer" | "/customer/dashboard" => Some("/"),
        _ => None,
    }
}

/// Decide what to do with a navigation to `path`. `auth` is `None` until the
/// persisted session has been read.
pub fn decide(path: &str, auth: Option<&AuthState>) -> Access {
    let requirement = requirement_for(path);
    if requirement == Requirement::Public {
        return Access::Render;
    }
    match navigation_state(requirement, auth) {
        NavigationState::Unresolved => Access::Pending,
        NavigationState::Unauthenticated => Access::SignIn {
            return_to: Some(path.to_string()),
        },
        NavigationState::AuthenticatedMismatch => Access::SignIn { return_to: None },
        NavigationState::AuthenticatedMatch => match role_home_redirect(path) {
            Some(target) => Access::Redirect(target.to_string()),
            None => Access::Render,
        },
    }
}

/// Views that render full-screen, without the navbar and footer.
pub fn is_chromeless(path: &str) -> bool {
    let path = strip_query(path);
    path == "/auth" || path.contains("/admin/dashboard") || path.contains("/seller/dashboard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{Session, StoredUser};

    fn signed_in(role: Role) -> AuthState {
        AuthState::Authenticated(Session {
            token: "t".to_string(),
            user: StoredUser {
                user_id: 1,
                username: "u".to_string(),
                role,
                first_name: None,
                last_name: None,
                email: None,
            },
        })
    }

    #[test]
    fn test_route_table() {
        assert_eq!(requirement_for("/"), Requirement::Public);
        assert_eq!(requirement_for("/product/4"), Requirement::Public);
        assert_eq!(requirement_for("/orders"), Requirement::Public);
        assert_eq!(requirement_for("/cart"), Requirement::Authenticated);
        assert_eq!(requirement_for("/products?q=bag"), Requirement::Authenticated);
        assert_eq!(requirement_for("/admin/dashboard"), Requirement::Role(Role::Admin));
        assert_eq!(requirement_for("/seller/"), Requirement::Role(Role::Seller));
    }

    #[test]
    fn test_admin_dashboard_while_unauthenticated_goes_to_auth() {
        let access = decide("/admin/dashboard", Some(&AuthState::Unauthenticated));
        assert_eq!(
            access,
            Access::SignIn {
                return_to: Some("/admin/dashboard".to_string())
            }
        );
    }

    #[test]
    fn test_seller_dashboard_as_customer_goes_to_auth() {
        let access = decide("/seller/dashboard", Some(&signed_in(Role::Customer)));
        assert_eq!(access, Access::SignIn { return_to: None });
    }

    #[test]
    fn test_matching_role_renders() {
        assert_eq!(decide("/admin/dashboard", Some(&signed_in(Role::Admin))), Access::Render);
        assert_eq!(decide("/profile", Some(&signed_in(Role::Seller))), Access::Render);
        assert_eq!(decide("/about", Some(&AuthState::Unauthenticated)), Access::Render);
    }

    #[test]
    fn test_role_home_redirects() {
        assert_eq!(
            decide("/admin", Some(&signed_in(Role::Admin))),
            Access::Redirect("/admin/dashboard".to_string())
        );
        assert_eq!(
            decide("/seller", Some(&signed_in(Role::Seller))),
            Access::Redirect("/seller/dashboard".to_string())
        );
        assert_eq!(
            decide("/customer/dashboard", Some(&signed_in(Role::Customer))),
            Access::Redirect("/".to_string())
        );
        assert_eq!(
            decide("/customer", Some(&signed_in(Role::Admin))),
            Access::SignIn { return_to: None }
        );
    }

    #[test]
    fn test_unresolved_is_pending() {
        assert_eq!(decide("/cart", None), Access::Pending);
        assert_eq!(decide("/", None), Access::Render);
        assert_eq!(
            navigation_state(Requirement::Authenticated, None),
            NavigationState::Unresolved
        );
    }

    #[test]
    fn test_chromeless_views() {
        assert!(is_chromeless("/auth"));
        assert!(is_chromeless("/auth?redirect=/cart"));
        assert!(is_chromeless("/admin/dashboard"));
        assert!(!is_chromeless("/admin"));
        assert!(!is_chromeless("/products"));
    }
}
