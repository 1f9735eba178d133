use std::sync::Arc;

use trellis_components::{
    button::{ButtonArgs, button},
    date_fields::CalendarDate,
    login_form::{LoginFormArgs, login_form},
    new_post::{NewPostArgs, new_post},
    services::{Services, provide_services, provide_session},
    signup_form::{SignupFormArgs, signup_form},
    text::{ContainerArgs, container, text},
};
use trellis_ui::{BuildContext, BuildResult, State};

use crate::backend::DemoBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Login,
    Signup,
    Feed,
}

/// Day the demo posts are written for.
pub const TODAY: CalendarDate = CalendarDate::new(2019, 3, 14);

fn tab(cx: &mut BuildContext<'_>, label: &str, screen: &State<Screen>, target: Screen) -> BuildResult {
    let screen = screen.clone();
    button(
        cx,
        &ButtonArgs::plain(label, move || {
            screen.set_if_changed(target);
        })
        .class("TabsButton"),
    )
}

fn feed(cx: &mut BuildContext<'_>, backend: &Arc<DemoBackend>) -> BuildResult {
    let Some(session) = backend.session() else {
        return text(cx, "Signed out");
    };
    let greeting = format!("Hi {}", session.display_name);
    let backend = Arc::clone(backend);
    provide_session(cx, session, |cx| {
        text(cx, greeting)?;
        let args = NewPostArgs::new(TODAY)
            .take_focus(true)
            .show_avatar(true)
            .on_success(move |message| backend.publish(message));
        new_post(cx, &args)
    })
}

/// Root of the demo: login and signup tabs, then the post composer.
pub fn app(cx: &mut BuildContext<'_>, backend: &Arc<DemoBackend>, services: &Services) -> BuildResult {
    let screen = cx.remember(|| Screen::Login);
    provide_services(cx, services.clone(), |cx| {
        container(cx, &ContainerArgs::default().class("App"), |cx| match screen.get() {
            Screen::Login | Screen::Signup => {
                container(cx, &ContainerArgs::default().class("Tabs"), |cx| {
                    tab(cx, "Log In", &screen, Screen::Login)?;
                    tab(cx, "Create Account", &screen, Screen::Signup)
                })?;
                let signed_in = screen.clone();
                if screen.get() == Screen::Login {
                    login_form(
                        cx,
                        &LoginFormArgs::default().on_success(move || signed_in.set(Screen::Feed)),
                    )
                } else {
                    signup_form(
                        cx,
                        &SignupFormArgs::default().on_success(move || signed_in.set(Screen::Feed)),
                    )
                }
            }
            Screen::Feed => feed(cx, backend),
        })
    })
}
