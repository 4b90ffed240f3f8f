//! # Account & Session Context
//!
//! Login state, remembered email, and the user profile, held by an explicit
//! session object instead of ambient global storage.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SettingsStore Keys                                   │
//! │                                                                         │
//! │  remembered_email   "shopper@example.com"   login screen prefill        │
//! │  is_logged_in       "true" / "false"        session gate                │
//! │  saved_username     registration username   login comparison            │
//! │  saved_password     registration password   login comparison            │
//! │  user_email         profile email           loaded at startup           │
//! │  user_username      profile username        loaded at startup           │
//! │  user_password      profile password        loaded at startup           │
//! │                                                                         │
//! │  Absent keys default to blank/false — reads never fail.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store persists whatever it is given verbatim; anything secret-worthy
//! is the injected implementation's concern (a keychain-backed store slots
//! in without touching this module).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};

// Key names, kept stable so an on-device store survives upgrades.
const KEY_REMEMBERED_EMAIL: &str = "remembered_email";
const KEY_IS_LOGGED_IN: &str = "is_logged_in";
const KEY_SAVED_USERNAME: &str = "saved_username";
const KEY_SAVED_PASSWORD: &str = "saved_password";
const KEY_USER_EMAIL: &str = "user_email";
const KEY_USER_USERNAME: &str = "user_username";
const KEY_USER_PASSWORD: &str = "user_password";

// =============================================================================
// Settings Store Seam
// =============================================================================

/// Key-value settings storage.
///
/// On-device implementations (preferences files, keychains) are external
/// collaborators; [`MemoryStore`] covers tests and demos.
pub trait SettingsStore: Send + Sync {
    /// Reads a key; `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a key.
    fn set(&self, key: &str, value: &str);

    /// Removes a key. Absent is a no-op.
    fn remove(&self, key: &str);

    /// Reads a boolean key; absent or unparseable defaults to `false`.
    fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(|v| v == "true").unwrap_or(false)
    }

    /// Writes a boolean key.
    fn set_bool(&self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}

/// In-memory settings store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("settings mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("settings mutex poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .expect("settings mutex poisoned")
            .remove(key);
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The profile fields the storefront keeps for a registered shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub username: String,
    pub password: String,
}

// =============================================================================
// Session
// =============================================================================

/// Explicit session context for one shopper on one device.
///
/// Constructed once at startup; reads the stored profile and login flag,
/// then serves as the single writer for account state. The current profile
/// is observable through a watch channel the same way cart snapshots are.
pub struct Session {
    store: Arc<dyn SettingsStore>,
    logged_in: Mutex<bool>,
    user_tx: watch::Sender<Option<UserProfile>>,
}

impl Session {
    /// Opens a session over the given store, loading persisted state.
    ///
    /// A profile is only considered present when all three of its fields
    /// were stored non-blank (partial writes are treated as absent).
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        let logged_in = store.get_bool(KEY_IS_LOGGED_IN);

        let user = match (
            store.get(KEY_USER_EMAIL),
            store.get(KEY_USER_USERNAME),
            store.get(KEY_USER_PASSWORD),
        ) {
            (Some(email), Some(username), Some(password))
                if !email.is_empty() && !username.is_empty() && !password.is_empty() =>
            {
                Some(UserProfile {
                    email,
                    username,
                    password,
                })
            }
            _ => None,
        };

        debug!(logged_in, has_profile = user.is_some(), "session opened");

        let (user_tx, _) = watch::channel(user);
        Session {
            store,
            logged_in: Mutex::new(logged_in),
            user_tx,
        }
    }

    /// Whether a shopper is currently logged in.
    pub fn is_logged_in(&self) -> bool {
        *self.logged_in.lock().expect("session mutex poisoned")
    }

    /// Subscribes to profile changes.
    pub fn user(&self) -> watch::Receiver<Option<UserProfile>> {
        self.user_tx.subscribe()
    }

    /// Current profile snapshot.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.user_tx.borrow().clone()
    }

    // -------------------------------------------------------------------------
    // Registration & Login
    // -------------------------------------------------------------------------

    /// Stores credentials for a new account.
    pub fn register(&self, username: &str, password: &str) -> SessionResult<()> {
        if username.trim().is_empty() {
            return Err(SessionError::MissingField { field: "username" });
        }
        if password.is_empty() {
            return Err(SessionError::MissingField { field: "password" });
        }

        self.store.set(KEY_SAVED_USERNAME, username);
        self.store.set(KEY_SAVED_PASSWORD, password);
        debug!(username, "registered account");
        Ok(())
    }

    /// Logs in by comparing against the stored credentials.
    ///
    /// Absent stored credentials compare as blank, so login before
    /// registration fails the same way a typo does.
    pub fn login(&self, username: &str, password: &str) -> SessionResult<()> {
        let saved_username = self.store.get(KEY_SAVED_USERNAME).unwrap_or_default();
        let saved_password = self.store.get(KEY_SAVED_PASSWORD).unwrap_or_default();

        if username != saved_username || password != saved_password {
            warn!(username, "login rejected");
            return Err(SessionError::InvalidCredentials);
        }

        self.store.set_bool(KEY_IS_LOGGED_IN, true);
        *self.logged_in.lock().expect("session mutex poisoned") = true;
        debug!(username, "login accepted");
        Ok(())
    }

    /// Clears the logged-in flag. Stored credentials and profile survive.
    pub fn logout(&self) {
        self.store.set_bool(KEY_IS_LOGGED_IN, false);
        *self.logged_in.lock().expect("session mutex poisoned") = false;
        debug!("logged out");
    }

    // -------------------------------------------------------------------------
    // Profile
    // -------------------------------------------------------------------------

    /// Updates the profile's email and username.
    pub fn update_profile(&self, email: &str, username: &str) -> SessionResult<()> {
        if email.trim().is_empty() {
            return Err(SessionError::MissingField { field: "email" });
        }
        if username.trim().is_empty() {
            return Err(SessionError::MissingField { field: "username" });
        }

        let mut user = self.current_user().ok_or(SessionError::NoProfile)?;
        user.email = email.to_string();
        user.username = username.to_string();

        self.persist_user(&user);
        self.user_tx.send_replace(Some(user));
        Ok(())
    }

    /// Changes the password after verifying the current one.
    pub fn change_password(&self, current: &str, new: &str) -> SessionResult<()> {
        let stored = self.store.get(KEY_SAVED_PASSWORD).unwrap_or_default();
        if current != stored {
            return Err(SessionError::InvalidCredentials);
        }
        if new.is_empty() {
            return Err(SessionError::MissingField { field: "password" });
        }

        self.store.set(KEY_SAVED_PASSWORD, new);

        if let Some(mut user) = self.current_user() {
            user.password = new.to_string();
            self.persist_user(&user);
            self.user_tx.send_replace(Some(user));
        }
        Ok(())
    }

    /// Stores a full profile (first registration completing checkout, or a
    /// restored account).
    pub fn set_profile(&self, profile: UserProfile) {
        self.persist_user(&profile);
        self.user_tx.send_replace(Some(profile));
    }

    fn persist_user(&self, user: &UserProfile) {
        self.store.set(KEY_USER_EMAIL, &user.email);
        self.store.set(KEY_USER_USERNAME, &user.username);
        self.store.set(KEY_USER_PASSWORD, &user.password);
    }

    // -------------------------------------------------------------------------
    // Remembered Email
    // -------------------------------------------------------------------------

    /// Remembers the email shown prefilled on the login screen.
    pub fn remember_email(&self, email: &str) {
        self.store.set(KEY_REMEMBERED_EMAIL, email);
    }

    /// The remembered email, if any.
    pub fn remembered_email(&self) -> Option<String> {
        self.store.get(KEY_REMEMBERED_EMAIL)
    }

    /// Forgets the remembered email.
    pub fn clear_remembered_email(&self) {
        self.store.remove(KEY_REMEMBERED_EMAIL);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
