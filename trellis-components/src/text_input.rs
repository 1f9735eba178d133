//! Single and multi line text inputs.
//!
//! ## Usage
//!
//! Controlled inputs: the caller owns the text and receives every change
//! through `on_change`. The label is attached to the input but hidden
//! visually, so it is only exposed to assistive technology.
use derive_setters::Setters;
use smallvec::SmallVec;
use trellis_ui::{
    Attributes, BuildContext, BuildResult, CallbackWith, ControlValue, Element, ElementKind,
    FocusId, InputEvent,
};

/// Arguments for the [`text_input`] component.
#[derive(Clone, Setters)]
pub struct TextInputArgs {
    /// Element id the label is associated with.
    #[setters(strip_option, into)]
    pub id: Option<String>,
    /// Visually hidden label.
    #[setters(strip_option, into)]
    pub label: Option<String>,
    /// Placeholder shown while empty.
    #[setters(strip_option, into)]
    pub placeholder: Option<String>,
    /// Input type, such as `text`, `password` or `email`.
    #[setters(into)]
    pub input_type: String,
    /// Whether the input is marked as required.
    pub required: bool,
    /// Current text.
    #[setters(into)]
    pub value: String,
    /// Style classes.
    #[setters(skip)]
    pub classes: SmallVec<[String; 2]>,
    /// Focus id to attach, if the input can be focused programmatically.
    #[setters(strip_option)]
    pub focus: Option<FocusId>,
    /// Called with the new text on every edit.
    #[setters(skip)]
    pub on_change: CallbackWith<String>,
}

impl TextInputArgs {
    /// Adds a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<String>>) -> Self {
        self.on_change = on_change.into();
        self
    }

    fn attributes(&self) -> Attributes {
        Attributes {
            id: self.id.clone(),
            label: self.label.clone(),
            placeholder: self.placeholder.clone(),
            classes: self.classes.clone(),
            required: self.required,
            label_hidden: self.label.is_some(),
            ..Default::default()
        }
    }
}

impl Default for TextInputArgs {
    fn default() -> Self {
        Self {
            id: None,
            label: None,
            placeholder: None,
            input_type: "text".to_string(),
            required: false,
            value: String::new(),
            classes: SmallVec::new(),
            focus: None,
            on_change: CallbackWith::noop(),
        }
    }
}

fn change_handler(on_change: &CallbackWith<String>) -> impl Fn(InputEvent) + Send + Sync + 'static {
    let on_change = on_change.clone();
    move |event| {
        if let InputEvent::Change(text) = event {
            on_change.call(text);
        }
    }
}

/// A single line text input.
///
/// # Examples
///
/// ```
/// use trellis_ui::{InputEvent, Runtime, from_fn, testing::Recorder};
/// use trellis_components::text_input::{TextInputArgs, text_input};
///
/// let edits = Recorder::<String>::new();
/// let on_change = edits.callback();
/// let mut runtime = Runtime::new(from_fn("app", move |cx| {
///     let args = TextInputArgs::default()
///         .id("email")
///         .label("Email")
///         .on_change_shared(on_change.clone());
///     text_input(cx, &args)
/// }));
/// let frame = runtime.render().unwrap();
/// let email = frame.find_by_id("email").unwrap();
/// runtime.dispatch(email, InputEvent::Change("a@b.c".into())).unwrap();
/// assert_eq!(edits.calls(), vec!["a@b.c".to_string()]);
/// ```
pub fn text_input(cx: &mut BuildContext<'_>, args: &TextInputArgs) -> BuildResult {
    let mut attrs = args.attributes();
    attrs.input_type = Some(args.input_type.clone());
    let mut element = Element::new(ElementKind::TextInput)
        .attrs(attrs)
        .value(ControlValue::Text(args.value.clone()))
        .on_input(change_handler(&args.on_change));
    if let Some(focus) = args.focus {
        element = element.focus(focus);
    }
    cx.leaf("text_input", element)
}

/// A multi line text input. `input_type` is ignored.
pub fn text_area(cx: &mut BuildContext<'_>, args: &TextInputArgs) -> BuildResult {
    let mut element = Element::new(ElementKind::TextArea)
        .attrs(args.attributes())
        .value(ControlValue::Text(args.value.clone()))
        .on_input(change_handler(&args.on_change));
    if let Some(focus) = args.focus {
        element = element.focus(focus);
    }
    cx.leaf("text_area", element)
}
