//! Services the forms talk to, provided through context.
//!
//! ## Usage
//!
//! Wrap the part of the tree that contains forms in [`provide_services`], and
//! the part that needs the signed-in user in [`provide_session`]. Forms built
//! outside of them fail with [`BuildError::MissingScope`].
use std::{fmt, sync::Arc};

use futures::future::BoxFuture;
use thiserror::Error;
use trellis_ui::{BuildContext, BuildError};

use crate::{date_fields::CalendarDate, storage::Storage};

/// Failure reported by a remote service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The email and password do not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The request was understood and refused.
    #[error("{0}")]
    Rejected(String),
    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Everything the signup form submits.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Name shown to other users.
    pub display_name: String,
    /// Avatar location.
    pub photo_url: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Day the user started training.
    pub start_date: CalendarDate,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("display_name", &self.display_name)
            .field("photo_url", &self.photo_url)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("start_date", &self.start_date)
            .finish()
    }
}

/// Account backend.
pub trait AuthService: Send + Sync {
    /// Signs in with an email and password.
    fn login(&self, email: &str, password: &str) -> BoxFuture<'static, Result<(), ServiceError>>;

    /// Creates an account and signs in.
    fn signup(&self, request: SignupRequest) -> BoxFuture<'static, Result<(), ServiceError>>;
}

/// Source of a user's previous posts.
pub trait PostArchive: Send + Sync {
    /// Most recent post messages of `uid`, newest first.
    fn recent_posts(&self, uid: &str) -> BoxFuture<'static, Result<Vec<String>, ServiceError>>;
}

/// Services shared by all forms of an application.
#[derive(Clone)]
pub struct Services {
    /// Account backend.
    pub auth: Arc<dyn AuthService>,
    /// Previous posts.
    pub posts: Arc<dyn PostArchive>,
    /// Local key-value storage for drafts.
    pub storage: Arc<dyn Storage>,
}

impl Services {
    /// Name reported when a form is built without services.
    pub const PROVIDER: &'static str = "provide_services";

    /// Bundles the services.
    pub fn new(
        auth: Arc<dyn AuthService>,
        posts: Arc<dyn PostArchive>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            auth,
            posts,
            storage,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// User id.
    pub uid: String,
    /// Name shown to other users.
    pub display_name: String,
    /// Avatar location.
    pub photo_url: Option<String>,
}

impl Session {
    /// Name reported when a component needs a session that was not provided.
    pub const PROVIDER: &'static str = "provide_session";
}

/// Makes `services` available to everything built inside `f`.
pub fn provide_services<F, R>(cx: &mut BuildContext<'_>, services: Services, f: F) -> R
where
    F: FnOnce(&mut BuildContext<'_>) -> R,
{
    cx.provide_context(services, f)
}

/// Makes `session` available to everything built inside `f`.
pub fn provide_session<F, R>(cx: &mut BuildContext<'_>, session: Session, f: F) -> R
where
    F: FnOnce(&mut BuildContext<'_>) -> R,
{
    cx.provide_context(session, f)
}

pub(crate) fn use_services(
    cx: &BuildContext<'_>,
    consumer: &'static str,
) -> Result<Arc<Services>, BuildError> {
    cx.require_context::<Services>(consumer, Services::PROVIDER)
}

pub(crate) fn use_session(
    cx: &BuildContext<'_>,
    consumer: &'static str,
) -> Result<Arc<Session>, BuildError> {
    cx.require_context::<Session>(consumer, Session::PROVIDER)
}
