//! Authentication store.
//!
//! Holds the current user profile. The access token in [`TokenStorage`] is
//! the single source of truth for whether the client is authenticated; the
//! profile is a cache that [`AuthStore::fetch_user_info`] refreshes.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use shopfront_core::{ChangePassword, TokenPair, User, UserLogin, UserRegister, UserRole};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use super::Loading;
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::messages::{Locale, Message};
use crate::notify::Notifier;
use crate::router::{HOME_PATH, LOGIN_PATH};
use crate::storage::{StorageError, TokenStorage};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    /// An auth action is in flight.
    Authenticating,
    Authenticated,
}

/// Why registration was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationFailure {
    EmailTaken,
    PhoneTaken,
    UsernameTaken,
    /// Backend detail shown verbatim.
    Detail(String),
    /// No detail available (network failure, empty body).
    Unknown,
}

impl RegistrationFailure {
    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        match err.detail() {
            Some(d) if d.contains("Email is already registered") => Self::EmailTaken,
            Some(d) if d.contains("Phone number is already registered") => Self::PhoneTaken,
            Some(d) if d.contains("Username is already registered") => Self::UsernameTaken,
            Some(d) => Self::Detail(d.to_string()),
            None => Self::Unknown,
        }
    }

    /// User-facing text in `locale`.
    #[must_use]
    pub fn message(&self, locale: Locale) -> &str {
        match self {
            Self::EmailTaken => Message::EmailTaken.text(locale),
            Self::PhoneTaken => Message::PhoneTaken.text(locale),
            Self::UsernameTaken => Message::UsernameTaken.text(locale),
            Self::Detail(detail) => detail,
            Self::Unknown => Message::RegisterFailed.text(locale),
        }
    }
}

impl fmt::Display for RegistrationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message(Locale::En))
    }
}

/// Why login was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    InvalidCredentials,
    InactiveAccount,
    EmailUnverified,
    Detail(String),
    Unknown,
}

impl LoginFailure {
    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        match err.detail() {
            Some(d) if d.contains("Invalid email or password") => Self::InvalidCredentials,
            Some(d) if d.contains("Inactive user") => Self::InactiveAccount,
            Some(d) if d.contains("Forbidden") => Self::EmailUnverified,
            Some(d) => Self::Detail(d.to_string()),
            None => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(&self, locale: Locale) -> &str {
        match self {
            Self::InvalidCredentials => Message::InvalidCredentials.text(locale),
            Self::InactiveAccount => Message::InactiveAccount.text(locale),
            Self::EmailUnverified => Message::EmailUnverified.text(locale),
            Self::Detail(detail) => detail,
            Self::Unknown => Message::LoginFailed.text(locale),
        }
    }
}

impl fmt::Display for LoginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message(Locale::En))
    }
}

/// Errors returned by [`AuthStore`] actions.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("registration failed: {reason}")]
    Registration {
        reason: RegistrationFailure,
        #[source]
        source: ApiError,
    },

    #[error("login failed: {reason}")]
    Login {
        reason: LoginFailure,
        #[source]
        source: ApiError,
    },

    /// The token pair could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Authentication state and actions. Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthStoreInner>,
}

struct AuthStoreInner {
    api: ApiClient,
    user: RwLock<Option<User>>,
    loading: Loading,
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("phase", &self.phase())
            .field("role", &self.role())
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(AuthStoreInner {
                api,
                user: RwLock::new(None),
                loading: Loading::default(),
            }),
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The cached profile of the logged-in user.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner
            .user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens().has_access_token()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.is_active()
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.is_loading() {
            AuthPhase::Authenticating
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.inner
            .user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|u| u.role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Some(UserRole::Admin)
    }

    #[must_use]
    pub fn is_vendor(&self) -> bool {
        self.role() == Some(UserRole::Vendor)
    }

    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.role() == Some(UserRole::Customer)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Registration` with the translated reason; the
    /// reason has already been shown to the user.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn register(&self, data: &UserRegister) -> Result<User, AuthError> {
        let _loading = self.inner.loading.begin();

        match self.inner.api.auth().register(data).await {
            Ok(user) => {
                info!(user_id = %user.id, "account registered");
                self.notify_success(Message::RegisterSuccess);
                Ok(user)
            }
            Err(source) => {
                let reason = RegistrationFailure::from_error(&source);
                self.notifier().error(reason.message(self.locale()));
                Err(AuthError::Registration { reason, source })
            }
        }
    }

    /// Log in, persist the token pair, load the profile and go home.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Login` with the translated reason (already shown to
    /// the user), or `AuthError::Storage` if the tokens cannot be saved.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn login(&self, data: &UserLogin) -> Result<TokenPair, AuthError> {
        let _loading = self.inner.loading.begin();

        let tokens = match self.inner.api.auth().login(data).await {
            Ok(tokens) => tokens,
            Err(source) => {
                let reason = LoginFailure::from_error(&source);
                self.notifier().error(reason.message(self.locale()));
                return Err(AuthError::Login { reason, source });
            }
        };

        if let Err(e) = self.tokens().save(&tokens) {
            error!(error = %e, "failed to persist tokens after login");
            return Err(e.into());
        }
        self.fetch_user_info().await;

        info!("logged in");
        self.notify_success(Message::LoginSuccess);
        self.inner.api.http().navigator().navigate(HOME_PATH);
        Ok(tokens)
    }

    /// Log out. Local state is cleared even when the server call fails.
    #[instrument(skip_all)]
    pub async fn logout(&self) {
        if let Err(e) = self.inner.api.auth().logout().await {
            warn!(error = %e, "logout request failed");
        }

        self.clear_session();
        self.notify_success(Message::LogoutSuccess);
        self.inner.api.http().navigator().navigate(LOGIN_PATH);
    }

    /// Refresh the cached profile. Without a stored token this does nothing.
    /// Any failure ends the session.
    #[instrument(skip_all)]
    pub async fn fetch_user_info(&self) {
        if !self.is_authenticated() {
            return;
        }

        match self.inner.api.auth().current_user().await {
            Ok(user) => {
                debug!(user_id = %user.id, role = %user.role, "profile loaded");
                *self.inner.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch user info");
                if e.is_unauthorized() {
                    self.notifier()
                        .warning(Message::SessionExpired.text(self.locale()));
                }
                self.clear_session();
            }
        }
    }

    /// Rehydrate the session at startup. Safe to call repeatedly.
    pub async fn check_auth(&self) {
        if self.is_authenticated() {
            self.fetch_user_info().await;
        }
    }

    /// Confirm an email address with the token from the verification mail.
    ///
    /// # Errors
    ///
    /// Returns the API error; it has already been shown to the user.
    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<(), AuthError> {
        let _loading = self.inner.loading.begin();
        self.inner.api.auth().verify_email(token).await?;
        self.notify_success(Message::EmailVerified);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the API error; it has already been shown to the user.
    #[instrument(skip_all)]
    pub async fn change_password(&self, data: &ChangePassword) -> Result<(), AuthError> {
        let _loading = self.inner.loading.begin();
        self.inner.api.auth().change_password(data).await?;
        self.notify_success(Message::PasswordChanged);
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn tokens(&self) -> &TokenStorage {
        self.inner.api.http().tokens()
    }

    fn notifier(&self) -> &dyn Notifier {
        self.inner.api.http().notifier().as_ref()
    }

    fn locale(&self) -> Locale {
        self.inner.api.http().locale()
    }

    fn notify_success(&self, message: Message) {
        self.notifier().success(message.text(self.locale()));
    }

    fn clear_session(&self) {
        *self.inner.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        if let Err(e) = self.tokens().clear() {
            error!(error = %e, "failed to clear stored tokens");
        }
    }
}
