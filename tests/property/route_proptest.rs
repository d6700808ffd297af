//! Property-based tests for route parsing and resolution

use proptest::prelude::*;
use revisewise::egui_app::routes::{home_for, resolve, Route};
use revisewise::egui_app::session::Session;
use revisewise::shared::Role;

use crate::common::logged_in;

fn known_route() -> impl Strategy<Value = Route> {
    prop_oneof![
        Just(Route::Landing),
        Just(Route::Login),
        Just(Route::Signup),
        Just(Route::Syllabus),
        Just(Route::About),
        Just(Route::ConnectionCheck),
        Just(Route::Forbidden),
        Just(Route::Dashboard),
        Just(Route::StudentDashboard),
        Just(Route::TeacherDashboard),
        Just(Route::StudentProgressOverview),
        Just(Route::AdminDashboard),
        Just(Route::UploadQuestion),
        Just(Route::Quiz),
        Just(Route::Progress),
        (1i64..1_000_000).prop_map(Route::EditQuestion),
    ]
}

fn any_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_path_round_trips(route in known_route()) {
        prop_assert_eq!(Route::parse(&route.path()), route);
    }

    #[test]
    fn test_unknown_paths_are_not_found(segment in "[a-z]{3,12}") {
        let path = format!("/zz-{}", segment);
        prop_assert_eq!(Route::parse(&path), Route::NotFound(path.clone()));
    }

    #[test]
    fn test_anonymous_resolves_to_target_or_landing(route in known_route()) {
        let shown = resolve(route.clone(), &Session::anonymous());
        prop_assert!(shown == route || shown == Route::Landing);
    }

    #[test]
    fn test_logged_in_is_never_sent_home(route in known_route(), role in any_role()) {
        let shown = resolve(route.clone(), &logged_in(role));
        prop_assert!(shown == route || shown == Route::Forbidden);
    }

    #[test]
    fn test_home_always_renders_for_its_role(role in any_role()) {
        let home = home_for(role);
        prop_assert_eq!(resolve(home.clone(), &logged_in(role)), home);
    }
}
