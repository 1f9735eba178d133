//! A labelled checkbox.
//!
//! ## Usage
//!
//! Use for boolean options such as revealing a password.
use derive_setters::Setters;
use smallvec::SmallVec;
use trellis_ui::{
    Attributes, BuildContext, BuildResult, CallbackWith, ControlValue, Element, ElementKind,
    InputEvent,
};

/// Arguments for the [`checkbox`] component.
#[derive(Clone, Default, Setters)]
pub struct CheckboxArgs {
    /// Label shown next to the box.
    #[setters(strip_option, into)]
    pub label: Option<String>,
    /// Current checked state.
    pub checked: bool,
    /// Style classes.
    #[setters(skip)]
    pub classes: SmallVec<[String; 2]>,
    /// Called with the new checked state.
    #[setters(skip)]
    pub on_toggle: CallbackWith<bool>,
}

impl CheckboxArgs {
    /// Adds a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the on_toggle handler.
    pub fn on_toggle<F>(mut self, on_toggle: F) -> Self
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.on_toggle = CallbackWith::new(on_toggle);
        self
    }

    /// Sets the on_toggle handler using a shared callback.
    pub fn on_toggle_shared(mut self, on_toggle: impl Into<CallbackWith<bool>>) -> Self {
        self.on_toggle = on_toggle.into();
        self
    }
}

/// A checkbox. A click flips the current state; a toggle event sets it.
pub fn checkbox(cx: &mut BuildContext<'_>, args: &CheckboxArgs) -> BuildResult {
    let checked = args.checked;
    let on_toggle = args.on_toggle.clone();
    let element = Element::new(ElementKind::Checkbox)
        .attrs(Attributes {
            label: args.label.clone(),
            classes: args.classes.clone(),
            input_type: Some("checkbox".to_string()),
            ..Default::default()
        })
        .value(ControlValue::Checked(checked))
        .on_input(move |event| match event {
            InputEvent::Toggle(next) => on_toggle.call(next),
            InputEvent::Click => on_toggle.call(!checked),
            _ => {}
        });
    cx.leaf("checkbox", element)
}
