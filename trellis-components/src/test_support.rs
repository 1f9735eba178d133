//! Stub services and helpers shared by the form tests.
use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use parking_lot::Mutex;
use trellis_ui::{Frame, NodeId};

use crate::{
    services::{AuthService, PostArchive, ServiceError, Services, Session, SignupRequest},
    storage::{MemoryStorage, Storage},
};

#[derive(Default)]
pub(crate) struct StubAuth {
    pub(crate) logins: Mutex<Vec<(String, String)>>,
    pub(crate) signups: Mutex<Vec<SignupRequest>>,
    pub(crate) failure: Mutex<Option<ServiceError>>,
}

impl StubAuth {
    pub(crate) fn failing(error: ServiceError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    fn outcome(&self) -> BoxFuture<'static, Result<(), ServiceError>> {
        let result = match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        };
        futures::future::ready(result).boxed()
    }
}

impl AuthService for StubAuth {
    fn login(&self, email: &str, password: &str) -> BoxFuture<'static, Result<(), ServiceError>> {
        self.logins
            .lock()
            .push((email.to_string(), password.to_string()));
        self.outcome()
    }

    fn signup(&self, request: SignupRequest) -> BoxFuture<'static, Result<(), ServiceError>> {
        self.signups.lock().push(request);
        self.outcome()
    }
}

#[derive(Default)]
pub(crate) struct StubPosts {
    pub(crate) posts: Vec<String>,
    pub(crate) requests: Mutex<Vec<String>>,
}

impl StubPosts {
    pub(crate) fn with(posts: &[&str]) -> Self {
        Self {
            posts: posts.iter().map(|p| p.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl PostArchive for StubPosts {
    fn recent_posts(&self, uid: &str) -> BoxFuture<'static, Result<Vec<String>, ServiceError>> {
        self.requests.lock().push(uid.to_string());
        futures::future::ready(Ok(self.posts.clone())).boxed()
    }
}

pub(crate) struct Fixture {
    pub(crate) auth: Arc<StubAuth>,
    pub(crate) posts: Arc<StubPosts>,
    pub(crate) storage: Arc<MemoryStorage>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_auth(StubAuth::default())
    }

    pub(crate) fn with_auth(auth: StubAuth) -> Self {
        Self {
            auth: Arc::new(auth),
            posts: Arc::new(StubPosts::default()),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    pub(crate) fn services(&self) -> Services {
        Services::new(
            Arc::clone(&self.auth) as Arc<dyn AuthService>,
            Arc::clone(&self.posts) as Arc<dyn PostArchive>,
            Arc::clone(&self.storage) as Arc<dyn Storage>,
        )
    }
}

pub(crate) fn session() -> Session {
    Session {
        uid: "u-1".to_string(),
        display_name: "Ryan".to_string(),
        photo_url: Some("https://example.com/ryan.png".to_string()),
    }
}

pub(crate) fn node(frame: &Frame, label: &str) -> NodeId {
    match frame.find_by_label(label) {
        Some(id) => id,
        None => panic!("no element labelled {label:?}\n{}", frame.outline()),
    }
}

pub(crate) fn node_by_id(frame: &Frame, id: &str) -> NodeId {
    match frame.find_by_id(id) {
        Some(node) => node,
        None => panic!("no element with id {id:?}\n{}", frame.outline()),
    }
}
