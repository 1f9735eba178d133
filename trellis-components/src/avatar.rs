//! User avatar image.
use derive_setters::Setters;
use smallvec::SmallVec;
use trellis_ui::{Attributes, BuildContext, BuildResult, Element, ElementKind};

/// Arguments for the [`avatar`] component.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct AvatarArgs {
    /// User id the avatar belongs to.
    #[setters(into)]
    pub uid: String,
    /// Image location. Users without a photo get a placeholder.
    #[setters(strip_option, into)]
    pub src: Option<String>,
    /// Edge length in logical pixels.
    pub size: u32,
}

impl AvatarArgs {
    /// Avatar for `uid` at the default size.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            src: None,
            size: 48,
        }
    }
}

/// An avatar image.
pub fn avatar(cx: &mut BuildContext<'_>, args: &AvatarArgs) -> BuildResult {
    let src = args
        .src
        .clone()
        .unwrap_or_else(|| format!("avatar:{}", args.uid));
    let element = Element::new(ElementKind::Image).attrs(Attributes {
        aria_label: Some(format!("avatar of {}", args.uid)),
        src: Some(src),
        classes: SmallVec::from_iter([format!("Avatar_{}", args.size)]),
        ..Default::default()
    });
    cx.leaf("avatar", element)
}
