use strum::{EnumIter, IntoStaticStr};

/// Client-side routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr, EnumIter)]
pub(crate) enum AppRoute {
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/register")]
    Register,
    #[strum(serialize = "/home")]
    Home,
    #[strum(serialize = "/events")]
    Events,
    #[strum(serialize = "/categories")]
    Categories,
}

impl AppRoute {
    pub(crate) fn path(self) -> &'static str {
        self.into()
    }

    pub(crate) fn requires_session(self) -> bool {
        matches!(self, AppRoute::Home | AppRoute::Events | AppRoute::Categories)
    }
}

/// What a guarded route does for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GuardOutcome {
    Render,
    Redirect(AppRoute),
}

/// Presence check only; an expired token passes until the backend says 401.
pub(crate) fn guard(route: AppRoute, token: Option<&str>) -> GuardOutcome {
    if !route.requires_session() {
        return GuardOutcome::Render;
    }
    match token {
        Some(t) if !t.trim().is_empty() => GuardOutcome::Render,
        _ => GuardOutcome::Redirect(AppRoute::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_route_paths() {
        let paths: Vec<&str> = AppRoute::iter().map(AppRoute::path).collect();
        assert_eq!(
            paths,
            vec!["/login", "/register", "/home", "/events", "/categories"]
        );
    }

    #[test]
    fn test_unauthenticated_events_redirects_to_login() {
        assert_eq!(
            guard(AppRoute::Events, None),
            GuardOutcome::Redirect(AppRoute::Login)
        );
        assert_eq!(
            guard(AppRoute::Categories, Some("")),
            GuardOutcome::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn test_any_present_token_is_trusted() {
        assert_eq!(guard(AppRoute::Home, Some("expired.jwt")), GuardOutcome::Render);
    }

    #[test]
    fn test_public_routes_never_redirect() {
        assert_eq!(guard(AppRoute::Login, None), GuardOutcome::Render);
        assert_eq!(guard(AppRoute::Register, None), GuardOutcome::Render);
    }
}
