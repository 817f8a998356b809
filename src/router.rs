use crate::models::Applicant;

/// The client-side route table.
///
/// `UserNotFound` exists in the table but the lookup flow never navigates to
/// it; lookup failures are reported in place (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Start,
    CheckClient,
    Dashboard,
    UserNotFound,
    KycUpload,
    BusinessProofUpload,
    IncomeProofUpload,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Start => "/",
            Route::CheckClient => "/check-client",
            Route::Dashboard => "/dashboard",
            Route::UserNotFound => "/UserNotFound",
            Route::KycUpload => "/kyc-upload",
            Route::BusinessProofUpload => "/business-proof-upload",
            Route::IncomeProofUpload => "/income-proof-upload",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Start),
            "/check-client" => Some(Route::CheckClient),
            "/dashboard" => Some(Route::Dashboard),
            "/UserNotFound" => Some(Route::UserNotFound),
            "/kyc-upload" => Some(Route::KycUpload),
            "/business-proof-upload" => Some(Route::BusinessProofUpload),
            "/income-proof-upload" => Some(Route::IncomeProofUpload),
            _ => None,
        }
    }
}

/// Holds the current route and the navigation-scoped applicant hand-off.
///
/// The record travels only through [`Navigator::navigate_with`]; it is never
/// written to the URL or persisted, and a reload drops it.
#[derive(Debug, Default)]
pub struct Navigator {
    route: Option<Route>,
    state: Option<Applicant>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            route: Some(Route::Start),
            state: None,
        }
    }

    pub fn route(&self) -> Route {
        self.route.unwrap_or(Route::Start)
    }

    /// Navigate without state. Any previously handed-off record is dropped.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigating to {}", route.path());
        self.route = Some(route);
        self.state = None;
    }

    /// Navigate and hand an applicant record to the target screen.
    pub fn navigate_with(&mut self, route: Route, applicant: Applicant) {
        tracing::debug!(
            "Navigating to {} with applicant {}",
            route.path(),
            applicant.applicant_id
        );
        self.route = Some(route);
        self.state = Some(applicant);
    }

    /// Full reload of the current surface: the route survives, the
    /// navigation-scoped state does not.
    pub fn reload(&mut self) {
        tracing::debug!("Reloading {}", self.route().path());
        self.state = None;
    }

    pub fn state(&self) -> Option<&Applicant> {
        self.state.as_ref()
    }

    pub fn take_state(&mut self) -> Option<Applicant> {
        self.state.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Start,
            Route::CheckClient,
            Route::Dashboard,
            Route::UserNotFound,
            Route::KycUpload,
            Route::BusinessProofUpload,
            Route::IncomeProofUpload,
        ] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn reload_drops_handed_off_state() {
        let mut nav = Navigator::new();
        nav.navigate_with(Route::Dashboard, Applicant::placeholder());
        assert!(nav.state().is_some());

        nav.reload();
        assert_eq!(nav.route(), Route::Dashboard);
        assert!(nav.state().is_none());
    }

    #[test]
    fn plain_navigation_drops_previous_state() {
        let mut nav = Navigator::new();
        nav.navigate_with(Route::Dashboard, Applicant::placeholder());
        nav.navigate(Route::KycUpload);
        assert!(nav.state().is_none());
    }
}
