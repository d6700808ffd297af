//! Property-based tests for route guards

use proptest::prelude::*;
use proptest::sample::subsequence;
use revisewise::egui_app::guards::{require_auth, require_role, GuardDecision};
use revisewise::egui_app::session::Session;
use revisewise::shared::{Role, UserProfile};

/// Known roles plus the catch-all an unrecognised role string decodes to
fn any_role() -> impl Strategy<Value = Role> {
    let mut roles = Role::ALL.to_vec();
    roles.push(Role::Unknown);
    prop::sample::select(roles)
}

fn allowed_roles() -> impl Strategy<Value = Vec<Role>> {
    subsequence(Role::ALL.to_vec(), 0..=Role::ALL.len())
}

fn any_user() -> impl Strategy<Value = Option<UserProfile>> {
    prop::option::of((1i64..10_000, any_role()).prop_map(|(id, role)| {
        UserProfile::new(id, "Generated", "generated@example.com", role)
    }))
}

proptest! {
    #[test]
    fn test_no_token_never_renders(user in any_user(), allowed in allowed_roles()) {
        let session = Session::new(None, user);
        prop_assert_eq!(require_auth(&session), GuardDecision::RedirectHome);
        prop_assert_eq!(require_role(&session, &allowed), GuardDecision::RedirectHome);
    }

    #[test]
    fn test_token_without_user_is_not_forbidden(token in "[a-z0-9]{1,32}", allowed in allowed_roles()) {
        let session = Session::new(Some(token), None);
        prop_assert_eq!(require_auth(&session), GuardDecision::Render);
        prop_assert_eq!(require_role(&session, &allowed), GuardDecision::RedirectHome);
    }

    #[test]
    fn test_role_decision_matches_membership(
        token in "[a-z0-9]{1,32}",
        role in any_role(),
        allowed in allowed_roles()
    ) {
        let user = UserProfile::new(1, "Generated", "generated@example.com", role);
        let session = Session::new(Some(token), Some(user));
        let decision = require_role(&session, &allowed);

        if allowed.contains(&role) {
            prop_assert_eq!(decision, GuardDecision::Render);
        } else {
            prop_assert_eq!(decision, GuardDecision::RedirectForbidden);
        }
    }

    #[test]
    fn test_unrecognised_role_is_forbidden_never_home(
        token in "[a-z0-9]{1,32}",
        role_name in "[a-z]{3,12}",
        allowed in allowed_roles()
    ) {
        let raw = format!(r#"{{"id":7,"role":"{}"}}"#, role_name);
        let user: UserProfile = serde_json::from_str(&raw).expect("any id-bearing record decodes");
        prop_assume!(!Role::ALL.contains(&user.role));
        let session = Session::new(Some(token), Some(user));

        prop_assert_eq!(require_role(&session, &allowed), GuardDecision::RedirectForbidden);
    }

    #[test]
    fn test_empty_token_counts_as_absent(role in any_role()) {
        let user = UserProfile::new(1, "Generated", "generated@example.com", role);
        let session = Session::new(Some(String::new()), Some(user));
        prop_assert!(!session.is_logged_in);
        prop_assert_eq!(require_role(&session, &Role::ALL), GuardDecision::RedirectHome);
    }
}
