//! Static text and plain grouping containers.
//!
//! ## Usage
//!
//! Show captions, counters and error messages, and group controls that belong
//! together.
use derive_setters::Setters;
use smallvec::SmallVec;
use trellis_ui::{Attributes, BuildContext, BuildResult, ControlValue, Element, ElementKind};

/// Arguments for the [`text_with`] component.
#[derive(Debug, Clone, Default, PartialEq, Setters)]
pub struct TextArgs {
    /// Text shown.
    #[setters(into)]
    pub content: String,
    /// Style classes.
    #[setters(skip)]
    pub classes: SmallVec<[String; 2]>,
}

impl TextArgs {
    /// Creates arguments showing `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            classes: SmallVec::new(),
        }
    }

    /// Adds a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// Static text.
///
/// # Examples
///
/// ```
/// use trellis_ui::{Runtime, from_fn};
/// use trellis_components::text::text;
///
/// let mut runtime = Runtime::new(from_fn("app", |cx| text(cx, "Start:")));
/// let frame = runtime.render().unwrap();
/// assert!(frame.contains_text("Start:"));
/// ```
pub fn text(cx: &mut BuildContext<'_>, content: impl Into<String>) -> BuildResult {
    text_with(cx, &TextArgs::new(content))
}

/// Static text with style classes.
pub fn text_with(cx: &mut BuildContext<'_>, args: &TextArgs) -> BuildResult {
    let element = Element::new(ElementKind::Text)
        .attrs(Attributes {
            classes: args.classes.clone(),
            ..Default::default()
        })
        .value(ControlValue::Text(args.content.clone()));
    cx.leaf("text", element)
}

/// Arguments for the [`container`] component.
#[derive(Debug, Clone, Default, PartialEq, Setters)]
pub struct ContainerArgs {
    /// Element id.
    #[setters(strip_option, into)]
    pub id: Option<String>,
    /// Style classes.
    #[setters(skip)]
    pub classes: SmallVec<[String; 2]>,
}

impl ContainerArgs {
    /// Adds a style class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// Groups `content` under one node.
pub fn container<F>(cx: &mut BuildContext<'_>, args: &ContainerArgs, content: F) -> BuildResult
where
    F: FnOnce(&mut BuildContext<'_>) -> BuildResult,
{
    let element = Element::new(ElementKind::Container).attrs(Attributes {
        id: args.id.clone(),
        classes: args.classes.clone(),
        ..Default::default()
    });
    cx.element("container", element, content)
}
