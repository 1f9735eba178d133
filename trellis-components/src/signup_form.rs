//! Account signup form with a compound start date.
//!
//! ## Usage
//!
//! Build inside [`provide_services`](crate::services::provide_services). The
//! start date is edited through [`date_fields`] with the month, day and year
//! fields arranged by this form.
use std::sync::Arc;

use derive_setters::Setters;
use tracing::{debug, info, warn};
use trellis_ui::{BuildContext, BuildResult, Callback, State};

use crate::{
    button::{ButtonArgs, button},
    date_fields::{
        CalendarDate, DateFieldsArgs, DayField, FieldAttrs, MonthField, YearField, date_fields,
    },
    form::{FormArgs, form},
    services::{SignupRequest, use_services},
    text::{ContainerArgs, TextArgs, container, text, text_with},
    text_input::{TextInputArgs, text_input},
};

/// Message shown above the form after signing up failed.
pub const SIGNUP_ERROR_MESSAGE: &str = "Oops, there was an error logging you in.";

/// Arguments for the [`signup_form`] component.
#[derive(Clone, Setters)]
pub struct SignupFormArgs {
    /// Initial start date.
    pub start_date: CalendarDate,
    /// First year offered for the start date.
    pub first_year: i32,
    /// Last year offered for the start date.
    pub last_year: i32,
    /// Called after signing up succeeded.
    #[setters(skip)]
    pub on_success: Callback,
}

impl SignupFormArgs {
    /// Sets the success handler.
    pub fn on_success<F>(mut self, on_success: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_success = Callback::new(on_success);
        self
    }
}

impl Default for SignupFormArgs {
    fn default() -> Self {
        Self {
            start_date: CalendarDate::new(2019, 3, 1),
            first_year: 2018,
            last_year: 2019,
            on_success: Callback::noop(),
        }
    }
}

fn labelled_input(
    cx: &mut BuildContext<'_>,
    id: &str,
    label: &str,
    value: &State<String>,
) -> BuildResult {
    text_input(
        cx,
        &TextInputArgs::default()
            .id(id)
            .label(label)
            .placeholder(label)
            .required(true)
            .value(value.get())
            .on_change_shared(value.setter()),
    )
}

/// Signup form: display name, avatar URL, email, password and start date.
pub fn signup_form(cx: &mut BuildContext<'_>, args: &SignupFormArgs) -> BuildResult {
    cx.component("signup_form", |cx| {
        let services = use_services(cx, "signup_form")?;
        let error = cx.remember(|| None::<String>);
        let loading = cx.remember(|| false);
        let initial_date = args.start_date;
        let start_date = cx.remember(move || initial_date);
        let display_name = cx.remember(String::new);
        let photo_url = cx.remember(String::new);
        let email = cx.remember(String::new);
        let password = cx.remember(String::new);

        let on_submit = {
            let auth = Arc::clone(&services.auth);
            let spawner = cx.spawner();
            let fields = (
                display_name.clone(),
                photo_url.clone(),
                email.clone(),
                password.clone(),
                start_date.clone(),
            );
            let (loading, error) = (loading.clone(), error.clone());
            let on_success = args.on_success.clone();
            move || {
                if loading.get() {
                    debug!("signup already in flight");
                    return;
                }
                let (display_name, photo_url, email, password, start_date) = &fields;
                let request = SignupRequest {
                    display_name: display_name.get(),
                    photo_url: photo_url.get(),
                    email: email.get(),
                    password: password.get(),
                    start_date: start_date.get(),
                };
                info!(?request, "signing up");
                loading.set(true);
                let pending = auth.signup(request);
                let (loading, error, on_success) =
                    (loading.clone(), error.clone(), on_success.clone());
                spawner.spawn(async move {
                    match pending.await {
                        Ok(()) => on_success.call(),
                        Err(err) => {
                            warn!(%err, "signup failed");
                            loading.set(false);
                            error.set(Some(err.to_string()));
                        }
                    }
                });
            }
        };

        container(cx, &ContainerArgs::default().class("SignupForm"), |cx| {
            if let Some(message) = error.get() {
                container(cx, &ContainerArgs::default().class("SignupForm_error"), |cx| {
                    text(cx, SIGNUP_ERROR_MESSAGE)?;
                    text_with(cx, &TextArgs::new(message).class("SignupForm_error_detail"))
                })?;
            }
            form(cx, &FormArgs::default().on_submit(on_submit), |cx| {
                labelled_input(cx, "displayName", "Display Name", &display_name)?;
                labelled_input(cx, "photoURL", "Avatar URL", &photo_url)?;
                labelled_input(cx, "email", "Email", &email)?;
                labelled_input(cx, "password", "Password", &password)?;
                container(cx, &ContainerArgs::default(), |cx| {
                    text(cx, "Start:")?;
                    let dates = DateFieldsArgs::new(start_date.get())
                        .on_change_shared(start_date.setter())
                        .child(MonthField::new(FieldAttrs::default().aria_label("Start Month")))
                        .child(DayField::new(FieldAttrs::default().aria_label("Start Day")))
                        .child(YearField::new(
                            args.first_year,
                            args.last_year,
                            FieldAttrs::default().aria_label("Start year"),
                        ));
                    date_fields(cx, &dates)
                })?;
                let label = if loading.get() { "Loading..." } else { "Sign Up" };
                button(
                    cx,
                    &ButtonArgs::submit(label).icon("dumbbell").class("TabsButton"),
                )
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use trellis_ui::{Frame, InputEvent, Runtime, from_fn};

    use super::*;
    use crate::{
        services::{ServiceError, provide_services},
        test_support::{Fixture, StubAuth, node, node_by_id},
    };

    fn mount(fixture: &Fixture) -> Runtime {
        let services = fixture.services();
        let args = SignupFormArgs::default();
        Runtime::new(from_fn("app", move |cx| {
            provide_services(cx, services.clone(), |cx| signup_form(cx, &args))
        }))
    }

    fn render(runtime: &mut Runtime) -> &Frame {
        match runtime.render() {
            Ok(frame) => frame,
            Err(err) => panic!("render failed: {err}"),
        }
    }

    fn selected(frame: &Frame, label: &str) -> Option<String> {
        frame
            .element(node(frame, label))
            .and_then(|el| el.selected())
            .map(str::to_string)
    }

    fn fill(runtime: &mut Runtime, id: &str, value: &str) {
        let input = node_by_id(render(runtime), id);
        assert!(runtime.dispatch(input, InputEvent::Change(value.to_string())).is_ok());
    }

    #[test]
    fn start_date_defaults_to_march_first_2019() {
        let fixture = Fixture::new();
        let mut runtime = mount(&fixture);
        let frame = render(&mut runtime);
        assert_eq!(selected(frame, "Start Month").as_deref(), Some("3"));
        assert_eq!(selected(frame, "Start Day").as_deref(), Some("1"));
        assert_eq!(selected(frame, "Start year").as_deref(), Some("2019"));
        let years = frame
            .element(node(frame, "Start year"))
            .map(|el| el.option_values().join(","));
        assert_eq!(years.as_deref(), Some("2018,2019"));
        assert!(frame.contains_text("Start:"));
    }

    #[test]
    fn inputs_use_their_label_as_placeholder() {
        let fixture = Fixture::new();
        let mut runtime = mount(&fixture);
        let frame = render(&mut runtime);
        for (id, label) in [
            ("displayName", "Display Name"),
            ("photoURL", "Avatar URL"),
            ("email", "Email"),
            ("password", "Password"),
        ] {
            let Some(input) = frame.element(node_by_id(frame, id)) else {
                panic!("missing {id}");
            };
            assert_eq!(input.attrs.label.as_deref(), Some(label));
            assert_eq!(input.attrs.placeholder.as_deref(), Some(label));
            assert!(input.attrs.required);
        }
    }

    #[test]
    fn changing_month_keeps_day_and_year() {
        let fixture = Fixture::new();
        let mut runtime = mount(&fixture);
        let month = node(render(&mut runtime), "Start Month");
        assert!(runtime.dispatch(month, InputEvent::Select("7".into())).is_ok());

        let frame = render(&mut runtime);
        assert_eq!(selected(frame, "Start Month").as_deref(), Some("7"));
        assert_eq!(selected(frame, "Start Day").as_deref(), Some("1"));
        assert_eq!(selected(frame, "Start year").as_deref(), Some("2019"));
    }

    #[test]
    fn submit_sends_every_field() {
        let fixture = Fixture::new();
        let mut runtime = mount(&fixture);
        fill(&mut runtime, "displayName", "Ryan");
        fill(&mut runtime, "photoURL", "https://example.com/ryan.png");
        fill(&mut runtime, "email", "ryan@example.com");
        fill(&mut runtime, "password", "hunter2");
        let year = node(render(&mut runtime), "Start year");
        assert!(runtime.dispatch(year, InputEvent::Select("2018".into())).is_ok());

        let submit = node(render(&mut runtime), "Sign Up");
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());
        assert!(render(&mut runtime).find_by_label("Loading...").is_some());
        assert_eq!(runtime.run_pending(), 1);

        let signups = fixture.auth.signups.lock().clone();
        assert_eq!(
            signups,
            vec![SignupRequest {
                display_name: "Ryan".into(),
                photo_url: "https://example.com/ryan.png".into(),
                email: "ryan@example.com".into(),
                password: "hunter2".into(),
                start_date: CalendarDate::new(2018, 3, 1),
            }]
        );
    }

    #[test]
    fn double_submit_sends_one_signup() {
        let fixture = Fixture::new();
        let mut runtime = mount(&fixture);
        let submit = node(render(&mut runtime), "Sign Up");
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());
        assert_eq!(runtime.run_pending(), 1);
        assert_eq!(fixture.auth.signups.lock().len(), 1);
    }

    #[test]
    fn failure_shows_message_and_restores_button() {
        let fixture = Fixture::with_auth(StubAuth::failing(ServiceError::Rejected(
            "email already in use".into(),
        )));
        let mut runtime = mount(&fixture);
        let submit = node(render(&mut runtime), "Sign Up");
        assert!(runtime.dispatch(submit, InputEvent::Click).is_ok());
        runtime.run_pending();

        let frame = render(&mut runtime);
        assert!(frame.contains_text(SIGNUP_ERROR_MESSAGE));
        assert!(frame.contains_text("email already in use"));
        assert!(frame.find_by_label("Sign Up").is_some());
    }

    #[test]
    fn password_is_not_logged() {
        let request = SignupRequest {
            display_name: String::new(),
            photo_url: String::new(),
            email: String::new(),
            password: "hunter2".into(),
            start_date: CalendarDate::new(2019, 3, 1),
        };
        assert!(!format!("{request:?}").contains("hunter2"));
    }
}
