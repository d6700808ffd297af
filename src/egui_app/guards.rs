/**
 * Route Guards
 *
 * Pure decision functions evaluated on every navigation and whenever the
 * session changes. A guard never renders anything itself; the navigator
 * turns its decision into the route that is actually shown.
 */

use crate::egui_app::session::Session;
use crate::shared::Role;

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the protected view
    Render,
    /// Send the visitor to the root route
    RedirectHome,
    /// Send the visitor to the role-forbidden page
    RedirectForbidden,
}

/// Access requirement attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    Public,
    /// A token must be present
    Authenticated,
    /// A token and a decoded user whose role is in the list
    Roles(&'static [Role]),
}

/// Authentication guard: only the presence of a token matters.
pub fn require_auth(session: &Session) -> GuardDecision {
    if session.token.is_some() {
        GuardDecision::Render
    } else {
        GuardDecision::RedirectHome
    }
}

/// Role guard. A missing or undecodable user is treated like a missing
/// token, never like a role mismatch.
pub fn require_role(session: &Session, allowed: &[Role]) -> GuardDecision {
    let user = match (&session.token, &session.user) {
        (Some(_), Some(user)) => user,
        _ => return GuardDecision::RedirectHome,
    };

    if allowed.contains(&user.role) {
        GuardDecision::Render
    } else {
        GuardDecision::RedirectForbidden
    }
}

pub fn decide(session: &Session, policy: AccessPolicy) -> GuardDecision {
    let decision = match policy {
        AccessPolicy::Public => GuardDecision::Render,
        AccessPolicy::Authenticated => require_auth(session),
        AccessPolicy::Roles(allowed) => require_role(session, allowed),
    };
    tracing::debug!(target: "revisewise::guard", ?policy, ?decision, "guard evaluated");
    decision
}
