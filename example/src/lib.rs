//! Scripted demo session: log in, write a post, then reload the draft.
mod app;
mod backend;

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;
use tracing::{info, warn};
use trellis_components::{
    services::Services,
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
};
use trellis_ui::{
    BuildError, Component, DispatchError, EntryPoint, Frame, InputEvent, NodeId, Runtime,
    RuntimeConfig, from_fn,
};

use crate::backend::DemoBackend;

/// Failure of a demo step.
#[derive(Debug, Error)]
pub enum DemoError {
    /// A pass failed.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// An event could not be delivered.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// The frame has no element with the given label, id or placeholder.
    #[error("no element matching {0:?}")]
    Missing(String),
}

fn open_storage() -> (Arc<dyn Storage>, Result<PathBuf, StorageError>) {
    match FileStorage::open_default("trellis-demo") {
        Ok(storage) => {
            let path = storage.path().to_path_buf();
            (Arc::new(storage), Ok(path))
        }
        Err(err) => (Arc::new(MemoryStorage::new()), Err(err)),
    }
}

fn demo_app(backend: Arc<DemoBackend>, storage: Arc<dyn Storage>) -> impl Component {
    let services = Services::new(backend.clone(), backend.clone(), storage);
    from_fn("app", move |cx| app::app(cx, &backend, &services))
}

/// Builds the demo application.
pub fn entry(backend: Arc<DemoBackend>, storage: Arc<dyn Storage>) -> EntryPoint<impl Component> {
    EntryPoint::new(demo_app(backend, storage)).config(RuntimeConfig {
        name: "demo".to_string(),
        ..Default::default()
    })
}

struct Driver {
    runtime: Runtime,
}

impl Driver {
    /// Renders until neither effects nor background work change anything.
    fn frame(&mut self) -> Result<&Frame, DemoError> {
        loop {
            self.runtime.settle()?;
            let finished = self.runtime.run_pending();
            if finished == 0 {
                break;
            }
            info!(finished, "background work completed");
        }
        Ok(self.runtime.render()?)
    }

    /// Finds an element by label, id or placeholder.
    fn locate(&mut self, query: &str) -> Result<NodeId, DemoError> {
        let frame = self.frame()?;
        frame
            .find_by_label(query)
            .or_else(|| frame.find_by_id(query))
            .or_else(|| frame.find(|el| el.attrs.placeholder.as_deref() == Some(query)))
            .ok_or_else(|| DemoError::Missing(query.to_string()))
    }

    fn send(&mut self, query: &str, event: InputEvent) -> Result<(), DemoError> {
        let target = self.locate(query)?;
        info!(query, ?event, "input");
        Ok(self.runtime.dispatch(target, event)?)
    }

    fn type_into(&mut self, query: &str, value: &str) -> Result<(), DemoError> {
        self.send(query, InputEvent::Change(value.to_string()))
    }

    fn show(&mut self, step: &str) -> Result<(), DemoError> {
        let outline = self.frame()?.outline();
        info!(step, "\n{outline}");
        Ok(())
    }
}

/// Runs the scripted session against the in-process backend.
pub fn run() -> Result<(), DemoError> {
    let backend = Arc::new(DemoBackend::seeded());
    let (storage, location) = open_storage();
    let mut session = Driver {
        runtime: entry(Arc::clone(&backend), Arc::clone(&storage)).launch(),
    };
    match location {
        Ok(path) => info!(path = %path.display(), "drafts stored on disk"),
        Err(err) => warn!(%err, "falling back to in-memory drafts"),
    }
    session.show("start")?;

    session.type_into("login:email", "demo@example.com")?;
    session.type_into("login:password", "wrong")?;
    session.send("Login", InputEvent::Click)?;
    session.show("rejected login")?;

    session.type_into("login:password", "demo")?;
    session.send("show password", InputEvent::Click)?;
    session.send("Login", InputEvent::Click)?;
    session.show("signed in")?;

    session.send("Recent posts", InputEvent::Select("Leg day".to_string()))?;
    session.type_into("Tell us about your workout!", "Leg day, then 20 minutes of rowing")?;
    session.show("draft")?;

    // A fresh runtime over the same storage picks the draft back up.
    let mut reloaded = Driver {
        runtime: Runtime::new(demo_app(backend, storage)),
    };
    reloaded.type_into("login:email", "demo@example.com")?;
    reloaded.type_into("login:password", "demo")?;
    reloaded.send("Login", InputEvent::Click)?;
    reloaded.show("draft restored")?;

    reloaded.send("Post", InputEvent::Click)?;
    reloaded.show("posted")?;
    Ok(())
}
