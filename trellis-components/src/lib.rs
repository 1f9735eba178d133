//! Form controls and application forms built on trellis-ui.
//!
//! The primitives ([`text`], [`text_input`], [`checkbox`], [`select`],
//! [`button`], [`form`], [`avatar`]) emit elements and translate input events
//! into typed callbacks. [`date_fields`] is a compound owner whose month, day
//! and year fields are arranged freely by the caller. The application forms
//! ([`login_form`], [`signup_form`], [`new_post`]) read their backends from
//! [`services`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use futures::{FutureExt, future::BoxFuture};
//! use trellis_components::{
//!     login_form::{LoginFormArgs, login_form},
//!     services::{AuthService, PostArchive, ServiceError, Services, SignupRequest, provide_services},
//!     storage::MemoryStorage,
//! };
//! use trellis_ui::{Runtime, from_fn};
//!
//! struct Offline;
//!
//! impl AuthService for Offline {
//!     fn login(&self, _: &str, _: &str) -> BoxFuture<'static, Result<(), ServiceError>> {
//!         futures::future::ready(Err(ServiceError::Unavailable("offline".into()))).boxed()
//!     }
//!
//!     fn signup(&self, _: SignupRequest) -> BoxFuture<'static, Result<(), ServiceError>> {
//!         futures::future::ready(Err(ServiceError::Unavailable("offline".into()))).boxed()
//!     }
//! }
//!
//! impl PostArchive for Offline {
//!     fn recent_posts(&self, _: &str) -> BoxFuture<'static, Result<Vec<String>, ServiceError>> {
//!         futures::future::ready(Ok(Vec::new())).boxed()
//!     }
//! }
//!
//! let services = Services::new(Arc::new(Offline), Arc::new(Offline), Arc::new(MemoryStorage::new()));
//! let mut runtime = Runtime::new(from_fn("app", move |cx| {
//!     provide_services(cx, services.clone(), |cx| login_form(cx, &LoginFormArgs::default()))
//! }));
//! let frame = runtime.render().unwrap();
//! assert!(frame.find_by_label("Login").is_some());
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod avatar;
pub mod button;
pub mod checkbox;
pub mod date_fields;
pub mod form;
pub mod login_form;
pub mod new_post;
pub mod recent_posts;
pub mod select;
pub mod services;
pub mod signup_form;
pub mod storage;
pub mod text;
pub mod text_input;

#[cfg(test)]
mod test_support;
