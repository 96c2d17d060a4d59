//! Mock authentication: one fixed credential pair, a simulated round-trip,
//! and a persisted session marker.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use log::{debug, warn};
use regex::Regex;

use crate::io::storage::{SESSION_KEY, Storage, StorageError, load_json, save_json};
use crate::model::{SessionMarker, User};

pub const DEMO_EMAIL: &str = "demo@taskdeck.dev";
pub const DEMO_PASSWORD: &str = "demo1234";

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MISSING_CREDENTIALS: &str = "Email and password are required";
pub const MALFORMED_EMAIL: &str = "Enter a valid email address";

/// Error type for login attempts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no login attempt in progress")]
    NothingPending,
}

fn demo_user() -> User {
    User {
        id: "user-demo".into(),
        email: DEMO_EMAIL.into(),
        name: "Demo User".into(),
    }
}

fn email_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

#[derive(Debug, Clone)]
struct PendingLogin {
    email: String,
    password: String,
    deadline: Instant,
}

/// Authentication state shared by every screen and command.
///
/// A fresh gate is loading until [`AuthGate::restore`] has looked for a
/// persisted session.
#[derive(Debug, Clone)]
pub struct AuthGate {
    user: Option<User>,
    restoring: bool,
    pending: Option<PendingLogin>,
    error: Option<String>,
    delay: Duration,
}

impl AuthGate {
    pub fn new(delay: Duration) -> Self {
        AuthGate {
            user: None,
            restoring: true,
            pending: None,
            error: None,
            delay,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True while restoring a session or while a login attempt is in flight
    /// True until [`AuthGate::restore`] has run. This is what [`guard`] waits on.
    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    /// True while restoring or while a login attempt is pending. A pending
    /// login does not hold back [`guard`]; the login form shows it instead.
    pub fn is_loading(&self) -> bool {
        self.restoring || self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Look for a persisted session marker. Always ends the loading phase.
    pub fn restore(&mut self, storage: &dyn Storage) -> Result<(), StorageError> {
        let result = load_json::<SessionMarker>(storage, SESSION_KEY);
        self.restoring = false;
        if let Some(marker) = result? {
            debug!("restored session for {}", marker.user.email);
            self.user = Some(marker.user);
        }
        Ok(())
    }

    /// Validate the input and start an attempt that resolves at
    /// `now + delay`. A newer attempt replaces a pending one.
    pub fn begin_login(&mut self, email: &str, password: &str, now: Instant) -> Result<(), AuthError> {
        let email = email.trim();
        let err = if email.is_empty() || password.is_empty() {
            Some(MISSING_CREDENTIALS)
        } else if !email_re().is_some_and(|re| re.is_match(email)) {
            Some(MALFORMED_EMAIL)
        } else {
            None
        };
        if let Some(msg) = err {
            self.pending = None;
            self.error = Some(msg.to_string());
            return Err(AuthError::Validation(msg));
        }

        self.error = None;
        self.pending = Some(PendingLogin {
            email: email.to_string(),
            password: password.to_string(),
            deadline: now + self.delay,
        });
        Ok(())
    }

    /// When the pending attempt resolves
    pub fn login_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Resolve the pending attempt once its deadline has passed. Returns
    /// `None` while nothing is ready.
    pub fn poll(
        &mut self,
        now: Instant,
        storage: &dyn Storage,
    ) -> Option<Result<User, AuthError>> {
        let ready = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !ready {
            return None;
        }
        let attempt = self.pending.take()?;
        Some(self.resolve(attempt, storage))
    }

    /// Blocking login: start an attempt, wait out the delay, resolve it.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        storage: &dyn Storage,
    ) -> Result<User, AuthError> {
        self.begin_login(email, password, Instant::now())?;
        if let Some(deadline) = self.login_deadline() {
            std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        }
        let attempt = self.pending.take().ok_or(AuthError::NothingPending)?;
        self.resolve(attempt, storage)
    }

    /// Forget the user and the persisted marker.
    pub fn logout(&mut self, storage: &dyn Storage) -> Result<(), StorageError> {
        self.user = None;
        self.pending = None;
        self.error = None;
        storage.remove(SESSION_KEY)
    }

    fn resolve(&mut self, attempt: PendingLogin, storage: &dyn Storage) -> Result<User, AuthError> {
        if !attempt.email.eq_ignore_ascii_case(DEMO_EMAIL) || attempt.password != DEMO_PASSWORD {
            debug!("login rejected for {}", attempt.email);
            self.error = Some(INVALID_CREDENTIALS.to_string());
            return Err(AuthError::InvalidCredentials);
        }
        let user = demo_user();
        let marker = SessionMarker { user: user.clone() };
        if let Err(e) = save_json(storage, SESSION_KEY, &marker) {
            // The session still holds for this run
            warn!("could not persist session: {}", e);
        }
        self.error = None;
        self.user = Some(user.clone());
        Ok(user)
    }
}

// ---------------------------------------------------------------------------
// Route guard
// ---------------------------------------------------------------------------

/// Screens and command groups of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Projects,
    Project(String),
    Notifications,
    Team,
    Search,
}

impl Route {
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// What a screen should do given the auth state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Render,
    Loading,
    Redirect(Route),
}

/// Decide whether `route` may render. Only the session restore yields
/// `Loading`.
pub fn guard(route: &Route, auth: &AuthGate) -> Guard {
    if auth.is_restoring() {
        return Guard::Loading;
    }
    match (route.is_protected(), auth.is_authenticated()) {
        (true, false) => Guard::Redirect(Route::Login),
        (false, true) => Guard::Redirect(Route::Dashboard),
        _ => Guard::Render,
    }
}
