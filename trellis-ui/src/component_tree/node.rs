use std::fmt;

use smallvec::SmallVec;

use crate::{focus_state::FocusId, prop::CallbackWith};

/// Input delivered to an element's handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Text of an input or text area changed to the given value.
    Change(String),
    /// A checkbox was toggled to the given state.
    Toggle(bool),
    /// An option with the given value was selected.
    Select(String),
    /// A button was activated.
    Click,
    /// A form was submitted.
    Submit,
}

/// Handler attached to an interactive element.
pub type InputHandlerFn = CallbackWith<InputEvent>;

/// What kind of control an element stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Grouping element without behaviour of its own.
    Container,
    /// Form that receives submits from its submit buttons.
    Form,
    /// Static text.
    Text,
    /// Single-line text input.
    TextInput,
    /// Multi-line text input.
    TextArea,
    /// Choice from a list of options.
    Select,
    /// Boolean toggle.
    Checkbox,
    /// Activatable button.
    Button,
    /// Image, such as an avatar.
    Image,
}

impl ElementKind {
    /// Short tag used in outlines.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Container => "div",
            ElementKind::Form => "form",
            ElementKind::Text => "text",
            ElementKind::TextInput => "input",
            ElementKind::TextArea => "textarea",
            ElementKind::Select => "select",
            ElementKind::Checkbox => "checkbox",
            ElementKind::Button => "button",
            ElementKind::Image => "img",
        }
    }
}

/// Presentation attributes passed through untouched to the rendered control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Element id, used by labels to associate with controls.
    pub id: Option<String>,
    /// Visible or visually hidden label text.
    pub label: Option<String>,
    /// Accessible name when no visible label exists.
    pub aria_label: Option<String>,
    /// Placeholder text for inputs.
    pub placeholder: Option<String>,
    /// Style classes.
    pub classes: SmallVec<[String; 2]>,
    /// Input type such as `text`, `password` or `email`.
    pub input_type: Option<String>,
    /// Whether the control is marked as required.
    pub required: bool,
    /// Whether a button submits its enclosing form.
    pub submit: bool,
    /// Whether the label is only exposed to assistive technology.
    pub label_hidden: bool,
    /// Image source for image elements.
    pub src: Option<String>,
}

impl Attributes {
    /// Whether the given class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// One option of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Value delivered in [`InputEvent::Select`].
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl Choice {
    /// Creates an option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Current value shown by a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ControlValue {
    /// No value.
    #[default]
    None,
    /// Text content.
    Text(String),
    /// Checked state.
    Checked(bool),
    /// Options and the selected option value.
    Choice {
        /// Available options in display order.
        options: Vec<Choice>,
        /// Value of the selected option, if any.
        selected: Option<String>,
    },
}

/// A rendered control.
#[derive(Clone)]
pub struct Element {
    /// Kind of control.
    pub kind: ElementKind,
    /// Presentation attributes.
    pub attrs: Attributes,
    /// Displayed value.
    pub value: ControlValue,
    /// Handler for input events, if the control is interactive.
    pub handler: Option<InputHandlerFn>,
    /// Focus id, if the control can take focus.
    pub focus: Option<FocusId>,
}

impl Element {
    /// Creates an element of the given kind with no attributes.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attrs: Attributes::default(),
            value: ControlValue::None,
            handler: None,
            focus: None,
        }
    }

    /// Sets the attributes.
    pub fn attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Sets the displayed value.
    pub fn value(mut self, value: ControlValue) -> Self {
        self.value = value;
        self
    }

    /// Sets the input handler from a closure.
    pub fn on_input<F>(self, handler: F) -> Self
    where
        F: Fn(InputEvent) + Send + Sync + 'static,
    {
        self.handler(InputHandlerFn::new(handler))
    }

    /// Sets an existing input handler.
    pub fn handler(mut self, handler: InputHandlerFn) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Attaches a focus id.
    pub fn focus(mut self, focus: FocusId) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Text content, if the value is textual.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            ControlValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Option values, if this is a select.
    pub fn option_values(&self) -> Vec<&str> {
        match &self.value {
            ControlValue::Choice { options, .. } => {
                options.iter().map(|o| o.value.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Selected option value, if this is a select.
    pub fn selected(&self) -> Option<&str> {
        match &self.value {
            ControlValue::Choice { selected, .. } => selected.as_deref(),
            _ => None,
        }
    }

    /// Checked state, if this is a checkbox.
    pub fn checked(&self) -> Option<bool> {
        match self.value {
            ControlValue::Checked(checked) => Some(checked),
            _ => None,
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("attrs", &self.attrs)
            .field("value", &self.value)
            .field("interactive", &self.handler.is_some())
            .finish()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.tag())?;
        if let Some(id) = &self.attrs.id {
            write!(f, "#{id}")?;
        }
        for class in &self.attrs.classes {
            write!(f, ".{class}")?;
        }
        if let Some(input_type) = &self.attrs.input_type {
            write!(f, " type={input_type}")?;
        }
        if let Some(label) = &self.attrs.label {
            write!(f, " label={label:?}")?;
        }
        if let Some(aria) = &self.attrs.aria_label {
            write!(f, " aria-label={aria:?}")?;
        }
        if let Some(placeholder) = &self.attrs.placeholder {
            write!(f, " placeholder={placeholder:?}")?;
        }
        match &self.value {
            ControlValue::None => {}
            ControlValue::Text(text) => write!(f, " {text:?}")?,
            ControlValue::Checked(checked) => write!(f, " checked={checked}")?,
            ControlValue::Choice { options, selected } => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                write!(f, " [{}]", values.join(","))?;
                if let Some(selected) = selected {
                    write!(f, " selected={selected}")?;
                }
            }
        }
        Ok(())
    }
}

/// A node of the component tree.
#[derive(Debug, Clone)]
pub struct ComponentNode {
    /// Component name, for debugging and queries.
    pub fn_name: String,
    /// Stable identifier of this component instance across passes.
    pub logic_id: u64,
    /// The control this node renders, if it renders one directly.
    pub element: Option<Element>,
}
