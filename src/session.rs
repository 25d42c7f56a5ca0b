//! Application session state.
//!
//! The front end moves through a fixed set of pages. Instead of scattered
//! flags, one [`Session`] value holds the current [`Page`] plus whatever the
//! later pages need, and every move goes through [`Session::dispatch`] or
//! [`Session::process`]:
//!
//! ```text
//! Login ──OpenRegister──▶ Register ──Registered/Back──▶ Login
//! Login ──LogIn──▶ Input ──Submit──▶ Process ──process()──▶ Result
//!                    ▲                  │                      │
//!                    └──────Back────────┘                      │
//!                    └──────────────────Retry──────────────────┘
//! any page but Login/Register ──LogOut──▶ Login
//! ```
//!
//! Credentials are not checked here; `LogIn` carries an already
//! authenticated user name.

use crate::error::{Error, Result};
use crate::pipeline::{Recommendation, Recommender};
use crate::profile::{ProfileFields, StudentProfile};

/// Front-end page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Sign-in form.
    Login,
    /// Account creation form.
    Register,
    /// Profile entry form.
    Input,
    /// Clustering step.
    Process,
    /// Recommendation display.
    Result,
}

impl Page {
    /// Lowercase page name.
    pub fn name(self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Register => "register",
            Page::Input => "input",
            Page::Process => "process",
            Page::Result => "result",
        }
    }
}

/// User actions that move between pages.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Open the registration form.
    OpenRegister,
    /// Registration completed.
    Registered,
    /// Signed in as the given user.
    LogIn(String),
    /// Submit the profile form.
    Submit(StudentProfile),
    /// Go back one step.
    Back,
    /// Start over from the result page.
    Retry,
    /// Sign out.
    LogOut,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::OpenRegister => "open register",
            Action::Registered => "finish registration",
            Action::LogIn(_) => "log in",
            Action::Submit(_) => "submit",
            Action::Back => "go back",
            Action::Retry => "retry",
            Action::LogOut => "log out",
        }
    }
}

/// State carried across pages.
#[derive(Debug, Clone)]
pub struct Session {
    page: Page,
    user: Option<String>,
    profile: Option<StudentProfile>,
    result: Option<Recommendation>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// New session on the login page.
    pub fn new() -> Self {
        Self {
            page: Page::Login,
            user: None,
            profile: None,
            result: None,
        }
    }

    /// Current page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Signed-in user.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Last submitted profile.
    pub fn profile(&self) -> Option<&StudentProfile> {
        self.profile.as_ref()
    }

    /// Last recommendation.
    pub fn result(&self) -> Option<&Recommendation> {
        self.result.as_ref()
    }

    /// Apply a navigation action. On error the session is unchanged.
    pub fn dispatch(&mut self, action: Action) -> Result<Page> {
        let from = self.page;
        let next = match (from, action) {
            (Page::Login, Action::OpenRegister) => Page::Register,
            (Page::Register, Action::Registered | Action::Back) => Page::Login,
            (Page::Login, Action::LogIn(user)) => {
                self.user = Some(user);
                Page::Input
            }
            (Page::Input, Action::Submit(profile)) => {
                profile.validate()?;
                self.profile = Some(profile);
                Page::Process
            }
            (Page::Process, Action::Back) => Page::Input,
            (Page::Result, Action::Retry) => {
                self.result = None;
                Page::Input
            }
            (Page::Input | Page::Process | Page::Result, Action::LogOut) => {
                *self = Self::new();
                Page::Login
            }
            (page, action) => {
                return Err(Error::InvalidTransition {
                    from: page.name(),
                    action: action.name(),
                })
            }
        };
        log::debug!("session: {} -> {}", from.name(), next.name());
        self.page = next;
        Ok(next)
    }

    /// Run the pipeline for the submitted profile and move to the result page.
    pub fn process<R: ProfileFields>(
        &mut self,
        recommender: &Recommender,
        reference: &[R],
    ) -> Result<&Recommendation> {
        if self.page != Page::Process {
            return Err(Error::InvalidTransition {
                from: self.page.name(),
                action: "process",
            });
        }
        let profile = self.profile.as_ref().ok_or_else(|| {
            Error::InvalidProfile("no profile submitted".into())
        })?;

        let rec = recommender.recommend(profile, reference)?;
        self.page = Page::Result;
        Ok(self.result.insert(rec))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dataset::ReferenceRow;

    fn profile() -> StudentProfile {
        StudentProfile::new("Iis", "Psikologi", "PMR").with_skills(["Kolaborasi"])
    }

    fn reference() -> Vec<ReferenceRow> {
        vec![
            ReferenceRow {
                minat: "Ekonomi".into(),
                ekskul: "OSIS".into(),
                skill: "Leadership".into(),
                club_count: Some(3.0),
                contribution: Some(4.0),
                achievement: Some(4.0),
            },
            ReferenceRow {
                minat: "Kimia".into(),
                ekskul: "Robotik".into(),
                skill: "Analisis Data".into(),
                club_count: Some(1.0),
                contribution: Some(3.0),
                achievement: Some(5.0),
            },
        ]
    }

    #[test]
    fn test_happy_path() {
        let mut s = Session::new();
        assert_eq!(s.dispatch(Action::LogIn("iis".into())).unwrap(), Page::Input);
        assert_eq!(s.dispatch(Action::Submit(profile())).unwrap(), Page::Process);

        let rec = s.process(&Recommender::default(), &reference()).unwrap();
        assert_eq!(rec.name, "Iis");
        assert_eq!(s.page(), Page::Result);
        assert!(s.result().is_some());

        assert_eq!(s.dispatch(Action::Retry).unwrap(), Page::Input);
        assert!(s.result().is_none());
        assert_eq!(s.user(), Some("iis"));
    }

    #[test]
    fn test_register_round_trip() {
        let mut s = Session::new();
        s.dispatch(Action::OpenRegister).unwrap();
        assert_eq!(s.page(), Page::Register);
        s.dispatch(Action::Registered).unwrap();
        assert_eq!(s.page(), Page::Login);
    }

    #[test]
    fn test_illegal_moves_rejected() {
        let mut s = Session::new();
        let err = s.dispatch(Action::Submit(profile())).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTransition {
                from: "login",
                action: "submit"
            }
        );
        assert_eq!(s.page(), Page::Login);

        assert!(s.dispatch(Action::LogOut).is_err());
        assert!(s.process(&Recommender::default(), &reference()).is_err());
    }

    #[test]
    fn test_invalid_profile_stays_on_input() {
        let mut s = Session::new();
        s.dispatch(Action::LogIn("iis".into())).unwrap();
        let blank = StudentProfile::new(" ", "Psikologi", "PMR");
        assert!(s.dispatch(Action::Submit(blank)).is_err());
        assert_eq!(s.page(), Page::Input);
        assert!(s.profile().is_none());
    }

    #[test]
    fn test_logout_clears_state() {
        let mut s = Session::new();
        s.dispatch(Action::LogIn("iis".into())).unwrap();
        s.dispatch(Action::Submit(profile())).unwrap();
        s.dispatch(Action::LogOut).unwrap();
        assert_eq!(s.page(), Page::Login);
        assert!(s.user().is_none());
        assert!(s.profile().is_none());
    }
}
