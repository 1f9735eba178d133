//! Forms receive the submit events of the buttons they contain.
use derive_setters::Setters;
use smallvec::SmallVec;
use trellis_ui::{Attributes, BuildContext, BuildResult, Callback, Element, ElementKind, InputEvent};

/// Arguments for the [`form`] component.
#[derive(Clone, Default, Setters)]
pub struct FormArgs {
    /// Style classes.
    #[setters(skip)]
    pub classes: SmallVec<[String; 2]>,
    /// Called when a submit button inside the form is clicked.
    #[setters(skip)]
    pub on_submit: Callback,
}

impl FormArgs {
    /// Adds a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the submit handler.
    pub fn on_submit<F>(mut self, on_submit: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_submit = Callback::new(on_submit);
        self
    }
}

/// A form around `content`.
pub fn form<F>(cx: &mut BuildContext<'_>, args: &FormArgs, content: F) -> BuildResult
where
    F: FnOnce(&mut BuildContext<'_>) -> BuildResult,
{
    let on_submit = args.on_submit.clone();
    let element = Element::new(ElementKind::Form)
        .attrs(Attributes {
            classes: args.classes.clone(),
            ..Default::default()
        })
        .on_input(move |event| {
            if event == InputEvent::Submit {
                on_submit.call();
            }
        });
    cx.element("form", element, content)
}
