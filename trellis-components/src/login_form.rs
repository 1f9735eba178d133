//! Email and password sign-in form.
//!
//! ## Usage
//!
//! Build inside [`provide_services`](crate::services::provide_services). The
//! form keeps its own field state, signs in through the provided
//! [`AuthService`](crate::services::AuthService) on submit and reports the
//! failure text if signing in fails.
use std::sync::Arc;

use derive_setters::Setters;
use tracing::{debug, warn};
use trellis_ui::{BuildContext, BuildResult, Callback};

use crate::{
    button::{ButtonArgs, button},
    checkbox::{CheckboxArgs, checkbox},
    form::{FormArgs, form},
    services::use_services,
    text::{ContainerArgs, TextArgs, container, text_with},
    text_input::{TextInputArgs, text_input},
};

/// Arguments for the [`login_form`] component.
#[derive(Clone, Setters)]
pub struct LoginFormArgs {
    /// Placeholder of the email input.
    #[setters(into)]
    pub email_placeholder: String,
    /// Called after signing in succeeded.
    #[setters(skip)]
    pub on_success: Callback,
}

impl LoginFormArgs {
    /// Sets the success handler.
    pub fn on_success<F>(mut self, on_success: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_success = Callback::new(on_success);
        self
    }
}

impl Default for LoginFormArgs {
    fn default() -> Self {
        Self {
            email_placeholder: "you@example.com".to_string(),
            on_success: Callback::noop(),
        }
    }
}

/// Sign-in form with a "show password" toggle.
pub fn login_form(cx: &mut BuildContext<'_>, args: &LoginFormArgs) -> BuildResult {
    cx.component("login_form", |cx| {
        let services = use_services(cx, "login_form")?;
        let email = cx.remember(String::new);
        let password = cx.remember(String::new);
        let show_password = cx.remember(|| false);
        let loading = cx.remember(|| false);
        let error = cx.remember(|| None::<String>);

        let on_submit = {
            let auth = Arc::clone(&services.auth);
            let spawner = cx.spawner();
            let (email, password) = (email.clone(), password.clone());
            let (loading, error) = (loading.clone(), error.clone());
            let on_success = args.on_success.clone();
            move || {
                if loading.get() {
                    debug!("login already in flight");
                    return;
                }
                loading.set(true);
                error.set_if_changed(None);
                let request = auth.login(&email.get(), &password.get());
                let (loading, error, on_success) = (loading.clone(), error.clone(), on_success.clone());
                spawner.spawn(async move {
                    match request.await {
                        Ok(()) => {
                            debug!("login succeeded");
                            loading.set(false);
                            on_success.call();
                        }
                        Err(err) => {
                            warn!(%err, "login failed");
                            loading.set(false);
                            error.set(Some(err.to_string()));
                        }
                    }
                });
            }
        };

        let showing = show_password.get();
        form(cx, &FormArgs::default().on_submit(on_submit), |cx| {
            if let Some(message) = error.get() {
                text_with(cx, &TextArgs::new(message).class("LoginForm_error"))?;
            }
            text_input(
                cx,
                &TextInputArgs::default()
                    .id("login:email")
                    .label("Email:")
                    .placeholder(args.email_placeholder.clone())
                    .value(email.get())
                    .class("inputField")
                    .on_change_shared(email.setter()),
            )?;
            text_input(
                cx,
                &TextInputArgs::default()
                    .id("login:password")
                    .label("Password:")
                    .input_type(if showing { "text" } else { "password" })
                    .placeholder("Password")
                    .value(password.get())
                    .class("inputField")
                    .on_change_shared(password.setter()),
            )?;
            container(cx, &ContainerArgs::default(), |cx| {
                checkbox(
                    cx,
                    &CheckboxArgs::default()
                        .label("show password")
                        .checked(showing)
                        .class("passwordCheckbox")
                        .on_toggle_shared(show_password.setter()),
                )
            })?;
            let label = if loading.get() { "Loading.. " } else { "Login" };
            button(
                cx,
                &ButtonArgs::submit(label).icon("sign-in").class("TabsButton"),
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use trellis_ui::{BuildError, InputEvent, Runtime, from_fn};

    use super::*;
    use crate::{
        services::{ServiceError, provide_services},
        test_support::{Fixture, StubAuth, node, node_by_id},
    };

    fn runtime(fixture: &Fixture, args: LoginFormArgs) -> Runtime {
        let services = fixture.services();
        Runtime::new(from_fn("app", move |cx| {
            provide_services(cx, services.clone(), |cx| login_form(cx, &args))
        }))
    }

    fn input_type(runtime: &mut Runtime) -> Option<String> {
        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        let password = node_by_id(frame, "login:password");
        frame
            .element(password)
            .and_then(|el| el.attrs.input_type.clone())
    }

    #[test]
    fn renders_labelled_inputs() {
        let fixture = Fixture::new();
        let mut runtime = runtime(&fixture, LoginFormArgs::default());
        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        let Some(email) = frame.element(node(frame, "Email:")) else {
            panic!("email input missing");
        };
        assert_eq!(email.attrs.id.as_deref(), Some("login:email"));
        assert_eq!(email.attrs.placeholder.as_deref(), Some("you@example.com"));
        assert!(email.attrs.label_hidden);
        assert!(frame.find_by_label("Login").is_some());
    }

    #[test]
    fn show_password_toggles_input_type() {
        let fixture = Fixture::new();
        let mut runtime = runtime(&fixture, LoginFormArgs::default());
        assert_eq!(input_type(&mut runtime).as_deref(), Some("password"));

        let toggle = match runtime.frame() {
            Some(frame) => node(frame, "show password"),
            None => panic!("no frame"),
        };
        assert!(runtime.dispatch(toggle, InputEvent::Click).is_ok());
        assert_eq!(input_type(&mut runtime).as_deref(), Some("text"));

        let toggle = match runtime.frame() {
            Some(frame) => node(frame, "show password"),
            None => panic!("no frame"),
        };
        assert!(runtime.dispatch(toggle, InputEvent::Click).is_ok());
        assert_eq!(input_type(&mut runtime).as_deref(), Some("password"));
    }

    #[test]
    fn submit_signs_in_with_typed_credentials() {
        let fixture = Fixture::new();
        let successes = Arc::new(parking_lot::Mutex::new(0));
        let counter = Arc::clone(&successes);
        let args = LoginFormArgs::default().on_success(move || *counter.lock() += 1);
        let mut runtime = runtime(&fixture, args);

        let (email, password) = match runtime.render() {
            Ok(frame) => (
                node_by_id(frame, "login:email"),
                node_by_id(frame, "login:password"),
            ),
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(runtime.dispatch(email, InputEvent::Change("ryan@example.com".into())).is_ok());
        assert!(runtime.dispatch(password, InputEvent::Change("hunter2".into())).is_ok());

        let submit = match runtime.render() {
            Ok(frame) => node(frame, "Login"),
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());

        match runtime.render() {
            Ok(frame) => assert!(frame.find_by_label("Loading.. ").is_some()),
            Err(err) => panic!("render failed: {err}"),
        }
        assert_eq!(runtime.run_pending(), 1);
        assert_eq!(
            *fixture.auth.logins.lock(),
            vec![("ryan@example.com".to_string(), "hunter2".to_string())]
        );
        assert_eq!(*successes.lock(), 1);
        match runtime.render() {
            Ok(frame) => assert!(frame.find_by_label("Login").is_some()),
            Err(err) => panic!("render failed: {err}"),
        }
    }

    #[test]
    fn failed_login_shows_the_error() {
        let fixture = Fixture::with_auth(StubAuth::failing(ServiceError::InvalidCredentials));
        let mut runtime = runtime(&fixture, LoginFormArgs::default());
        let submit = match runtime.render() {
            Ok(frame) => node(frame, "Login"),
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());
        runtime.run_pending();

        let frame = match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(frame.contains_text("invalid email or password"));
        assert!(frame.find_by_label("Login").is_some());
    }

    #[test]
    fn double_submit_sends_one_request() {
        let fixture = Fixture::new();
        let mut runtime = runtime(&fixture, LoginFormArgs::default());
        let submit = match runtime.render() {
            Ok(frame) => node(frame, "Login"),
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());
        assert_eq!(runtime.run_pending(), 1);
        assert_eq!(fixture.auth.logins.lock().len(), 1);
    }

    #[test]
    fn requires_services() {
        let mut runtime = Runtime::new(from_fn("app", |cx| {
            login_form(cx, &LoginFormArgs::default())
        }));
        assert!(matches!(
            runtime.render(),
            Err(BuildError::MissingScope {
                consumer: "login_form",
                ..
            })
        ));
    }
}
