//! Buttons, optionally submitting their enclosing form.
//!
//! ## Usage
//!
//! A submit button needs no handler of its own: clicking it delivers a submit
//! event to the nearest [`form`](crate::form::form).
use derive_setters::Setters;
use smallvec::SmallVec;
use trellis_ui::{Attributes, BuildContext, BuildResult, Callback, Element, ElementKind, InputEvent};

/// Arguments for the [`button`] component.
#[derive(Clone, Default, Setters)]
pub struct ButtonArgs {
    /// Button label.
    #[setters(into)]
    pub label: String,
    /// Name of an icon glyph shown before the label.
    #[setters(strip_option, into)]
    pub icon: Option<String>,
    /// Whether clicking submits the enclosing form.
    #[setters(skip)]
    pub submit: bool,
    /// Style classes.
    #[setters(skip)]
    pub classes: SmallVec<[String; 2]>,
    /// Click handler.
    #[setters(skip)]
    pub on_click: Option<Callback>,
}

impl ButtonArgs {
    /// A button that submits its form.
    pub fn submit(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            submit: true,
            ..Default::default()
        }
    }

    /// A plain button running `on_click`.
    pub fn plain<F>(label: impl Into<String>, on_click: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            on_click: Some(Callback::new(on_click)),
            ..Default::default()
        }
    }

    /// Adds a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// A button.
pub fn button(cx: &mut BuildContext<'_>, args: &ButtonArgs) -> BuildResult {
    let mut element = Element::new(ElementKind::Button).attrs(Attributes {
        label: Some(args.label.clone()),
        classes: args.classes.clone(),
        submit: args.submit,
        input_type: Some(if args.submit { "submit" } else { "button" }.to_string()),
        ..Default::default()
    });
    if let Some(on_click) = args.on_click.clone() {
        element = element.on_input(move |event| {
            if event == InputEvent::Click {
                on_click.call();
            }
        });
    }
    let icon = args.icon.clone();
    cx.element("button", element, |cx| match icon {
        Some(icon) => cx.leaf(
            "icon",
            Element::new(ElementKind::Image).attrs(Attributes {
                src: Some(format!("icon:{icon}")),
                classes: SmallVec::from_iter(["icon".to_string()]),
                ..Default::default()
            }),
        ),
        None => Ok(()),
    })
}
