use std::collections::HashMap;

use futures::{FutureExt, future::BoxFuture};
use parking_lot::Mutex;
use tracing::info;
use trellis_components::services::{
    AuthService, PostArchive, ServiceError, Session, SignupRequest,
};

struct Account {
    uid: String,
    password: String,
    display_name: String,
    photo_url: Option<String>,
}

/// In-process stand-in for the account and post backends.
#[derive(Default)]
pub struct DemoBackend {
    accounts: Mutex<HashMap<String, Account>>,
    posts: Mutex<HashMap<String, Vec<String>>>,
    session: Mutex<Option<Session>>,
}

impl DemoBackend {
    /// Backend with one known account, `demo@example.com` / `demo`.
    pub fn seeded() -> Self {
        let backend = Self::default();
        backend.accounts.lock().insert(
            "demo@example.com".to_string(),
            Account {
                uid: "demo".to_string(),
                password: "demo".to_string(),
                display_name: "Demo".to_string(),
                photo_url: None,
            },
        );
        backend.posts.lock().insert(
            "demo".to_string(),
            vec!["Ran 5k before breakfast".to_string(), "Leg day".to_string()],
        );
        backend
    }

    /// The signed-in user, if any.
    pub fn session(&self) -> Option<Session> {
        self.session.lock().clone()
    }

    /// Stores a post of the signed-in user, newest first.
    pub fn publish(&self, message: String) {
        let Some(session) = self.session() else {
            return;
        };
        info!(uid = %session.uid, "post published");
        self.posts
            .lock()
            .entry(session.uid)
            .or_default()
            .insert(0, message);
    }

    fn sign_in(&self, account: &Account) {
        *self.session.lock() = Some(Session {
            uid: account.uid.clone(),
            display_name: account.display_name.clone(),
            photo_url: account.photo_url.clone(),
        });
    }
}

impl AuthService for DemoBackend {
    fn login(&self, email: &str, password: &str) -> BoxFuture<'static, Result<(), ServiceError>> {
        let result = match self.accounts.lock().get(email) {
            Some(account) if account.password == password => {
                self.sign_in(account);
                Ok(())
            }
            _ => Err(ServiceError::InvalidCredentials),
        };
        futures::future::ready(result).boxed()
    }

    fn signup(&self, request: SignupRequest) -> BoxFuture<'static, Result<(), ServiceError>> {
        let mut accounts = self.accounts.lock();
        let result = if accounts.contains_key(&request.email) {
            Err(ServiceError::Rejected("email already in use".to_string()))
        } else {
            let account = Account {
                uid: format!("user-{}", accounts.len() + 1),
                password: request.password,
                display_name: request.display_name,
                photo_url: Some(request.photo_url).filter(|url| !url.is_empty()),
            };
            info!(uid = %account.uid, start = %request.start_date, "account created");
            self.sign_in(&account);
            accounts.insert(request.email, account);
            Ok(())
        };
        futures::future::ready(result).boxed()
    }
}

impl PostArchive for DemoBackend {
    fn recent_posts(&self, uid: &str) -> BoxFuture<'static, Result<Vec<String>, ServiceError>> {
        let posts = self.posts.lock().get(uid).cloned().unwrap_or_default();
        futures::future::ready(Ok(posts)).boxed()
    }
}
