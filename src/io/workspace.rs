//! The running session's state: projects, notifications and authentication,
//! bound to the storage they were loaded from.

use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use crate::io::storage::{
    NOTIFICATIONS_KEY, PROJECTS_KEY, Storage, StorageError, load_json, save_json,
};
use crate::model::{Config, Notification, Project, User};
use crate::ops::auth::{AuthError, AuthGate};
use crate::ops::notifications::NotificationStore;
use crate::ops::store::ProjectStore;
use crate::seed;

/// Which collections a save wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub projects: bool,
    pub notifications: bool,
}

impl SaveReport {
    pub fn wrote_anything(&self) -> bool {
        self.projects || self.notifications
    }
}

/// State container with an explicit init/dispose lifecycle.
///
/// Collections missing from storage are seeded and written on the first
/// save. Mutations go through [`Workspace::store`] and
/// [`Workspace::notifications`]; [`Workspace::save`] persists whatever they
/// marked dirty.
pub struct Workspace<S: Storage> {
    storage: S,
    config: Config,
    pub store: ProjectStore,
    pub notifications: NotificationStore,
    pub auth: AuthGate,
}

impl<S: Storage> Workspace<S> {
    pub fn init(storage: S, config: Config) -> Result<Self, StorageError> {
        let store = match load_json::<Vec<Project>>(&storage, PROJECTS_KEY)? {
            Some(projects) => {
                debug!("loaded {} projects", projects.len());
                ProjectStore::new(projects, seed::team())
            }
            None => {
                debug!("seeding projects");
                let mut store = ProjectStore::new(seed::projects(), seed::team());
                store.mark_dirty();
                store
            }
        };

        let notifications = match load_json::<Vec<Notification>>(&storage, NOTIFICATIONS_KEY)? {
            Some(items) => NotificationStore::new(items),
            None => {
                debug!("seeding notifications");
                let mut notifications = NotificationStore::new(seed::notifications());
                notifications.mark_dirty();
                notifications
            }
        };

        let mut auth = AuthGate::new(Duration::from_millis(config.auth.login_delay_ms));
        auth.restore(&storage)?;

        Ok(Workspace {
            storage,
            config,
            store,
            notifications,
            auth,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current user, if signed in
    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    /// Blocking login against this workspace's storage.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        self.auth.login(email, password, &self.storage)
    }

    /// Resolve a pending login once its delay has passed.
    pub fn poll_login(&mut self, now: Instant) -> Option<Result<User, AuthError>> {
        self.auth.poll(now, &self.storage)
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.auth.logout(&self.storage)
    }

    /// Write every dirty collection. A collection stays dirty if its write
    /// fails.
    pub fn save(&mut self) -> Result<SaveReport, StorageError> {
        let mut report = SaveReport::default();
        if self.store.is_dirty() {
            save_json(&self.storage, PROJECTS_KEY, self.store.projects())?;
            self.store.mark_clean();
            report.projects = true;
        }
        if self.notifications.is_dirty() {
            save_json(&self.storage, NOTIFICATIONS_KEY, self.notifications.items())?;
            self.notifications.mark_clean();
            report.notifications = true;
        }
        if report.wrote_anything() {
            debug!(
                "saved workspace (projects: {}, notifications: {})",
                report.projects, report.notifications
            );
        }
        Ok(report)
    }

    /// Save and release the workspace.
    pub fn dispose(mut self) -> Result<SaveReport, StorageError> {
        self.save()
    }
}
