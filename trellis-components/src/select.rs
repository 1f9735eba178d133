//! A drop-down list of choices.
use derive_setters::Setters;
use trellis_ui::{
    Attributes, BuildContext, BuildResult, CallbackWith, Choice, ControlValue, Element,
    ElementKind, InputEvent,
};

/// Arguments for the [`select`] component.
#[derive(Clone, Default, Setters)]
pub struct SelectArgs {
    /// Attributes passed to the rendered control as-is.
    pub attrs: Attributes,
    /// Options in display order.
    pub options: Vec<Choice>,
    /// Value of the selected option.
    #[setters(strip_option, into)]
    pub selected: Option<String>,
    /// Called with the value of the chosen option.
    #[setters(skip)]
    pub on_select: CallbackWith<String>,
}

impl SelectArgs {
    /// Sets the selection handler.
    pub fn on_select<F>(mut self, on_select: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_select = CallbackWith::new(on_select);
        self
    }

    /// Sets the selection handler using a shared callback.
    pub fn on_select_shared(mut self, on_select: impl Into<CallbackWith<String>>) -> Self {
        self.on_select = on_select.into();
        self
    }
}

/// A select control. Only [`InputEvent::Select`] is handled.
pub fn select(cx: &mut BuildContext<'_>, args: &SelectArgs) -> BuildResult {
    let on_select = args.on_select.clone();
    let element = Element::new(ElementKind::Select)
        .attrs(args.attrs.clone())
        .value(ControlValue::Choice {
            options: args.options.clone(),
            selected: args.selected.clone(),
        })
        .on_input(move |event| {
            if let InputEvent::Select(value) = event {
                on_select.call(value);
            }
        });
    cx.leaf("select", element)
}
