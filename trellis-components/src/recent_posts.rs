//! Drop-down of a user's recent post messages.
use std::sync::Arc;

use derive_setters::Setters;
use tracing::{trace, warn};
use trellis_ui::{Attributes, BuildContext, BuildResult, CallbackWith, Choice};

use crate::{
    select::{SelectArgs, select},
    services::use_services,
};

const PROMPT: &str = "Recent posts";
const PREVIEW_CHARS: usize = 40;

/// Arguments for the [`recent_posts_dropdown`] component.
#[derive(Clone, Setters)]
pub struct RecentPostsArgs {
    /// User whose posts are listed.
    #[setters(into)]
    pub uid: String,
    /// Called with the full message of the chosen post.
    #[setters(skip)]
    pub on_select: CallbackWith<String>,
}

impl RecentPostsArgs {
    /// Lists the posts of `uid`.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            on_select: CallbackWith::noop(),
        }
    }

    /// Sets the selection handler using a shared callback.
    pub fn on_select_shared(mut self, on_select: impl Into<CallbackWith<String>>) -> Self {
        self.on_select = on_select.into();
        self
    }
}

fn preview(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Select listing the recent posts of a user, fetched once per user.
///
/// Until the posts arrive only the prompt option is shown.
pub fn recent_posts_dropdown(cx: &mut BuildContext<'_>, args: &RecentPostsArgs) -> BuildResult {
    cx.component("recent_posts_dropdown", |cx| {
        let services = use_services(cx, "recent_posts_dropdown")?;
        let posts = cx.remember_with_key(&args.uid, || None::<Vec<String>>);

        {
            let archive = Arc::clone(&services.posts);
            let spawner = cx.spawner();
            let uid = args.uid.clone();
            let target = posts.clone();
            cx.effect_with(&args.uid, move || {
                let request = archive.recent_posts(&uid);
                spawner.spawn(async move {
                    match request.await {
                        Ok(list) => {
                            trace!(%uid, count = list.len(), "recent posts loaded");
                            target.set(Some(list));
                        }
                        Err(err) => warn!(%uid, %err, "failed to load recent posts"),
                    }
                });
            });
        }

        let mut options = vec![Choice::new("", PROMPT)];
        if let Some(list) = posts.get() {
            options.extend(list.iter().map(|post| Choice::new(post.clone(), preview(post))));
        }
        let on_select = args.on_select.clone();
        let args = SelectArgs::default()
            .attrs(Attributes {
                aria_label: Some(PROMPT.to_string()),
                classes: ["RecentPostsDropdown".to_string()].into_iter().collect(),
                ..Default::default()
            })
            .options(options)
            .selected("")
            .on_select(move |message: String| {
                if !message.is_empty() {
                    on_select.call(message);
                }
            });
        select(cx, &args)
    })
}

#[cfg(test)]
mod tests {
    use trellis_ui::{InputEvent, Runtime, from_fn, testing::Recorder};

    use super::*;
    use crate::{
        services::provide_services,
        test_support::{Fixture, StubPosts, node},
    };

    #[test]
    fn lists_posts_after_they_load() {
        let mut fixture = Fixture::new();
        fixture.posts = Arc::new(StubPosts::with(&["Ran 5k", "Leg day"]));
        let services = fixture.services();
        let picked = Recorder::<String>::new();
        let args = RecentPostsArgs::new("u-1").on_select_shared(picked.callback());
        let mut runtime = Runtime::new(from_fn("app", move |cx| {
            provide_services(cx, services.clone(), |cx| recent_posts_dropdown(cx, &args))
        }));

        match runtime.render() {
            Ok(frame) => {
                let options = frame
                    .element(node(frame, PROMPT))
                    .map(|el| el.option_values().len());
                assert_eq!(options, Some(1));
            }
            Err(err) => panic!("render failed: {err}"),
        }
        assert_eq!(runtime.run_pending(), 1);
        assert_eq!(*fixture.posts.requests.lock(), vec!["u-1".to_string()]);

        let dropdown = match runtime.render() {
            Ok(frame) => {
                let values = frame
                    .element(node(frame, PROMPT))
                    .map(|el| el.option_values().join("|"));
                assert_eq!(values.as_deref(), Some("|Ran 5k|Leg day"));
                node(frame, PROMPT)
            }
            Err(err) => panic!("render failed: {err}"),
        };
        assert_eq!(runtime.run_pending(), 0);

        assert!(runtime.dispatch(dropdown, InputEvent::Select(String::new())).is_ok());
        assert!(runtime.dispatch(dropdown, InputEvent::Select("Leg day".into())).is_ok());
        assert_eq!(picked.calls(), vec!["Leg day".to_string()]);
    }

    #[test]
    fn long_messages_are_shortened_in_labels() {
        let long = "x".repeat(PREVIEW_CHARS + 5);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }
}
