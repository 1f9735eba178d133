//! Composer for a workout post.
//!
//! ## Usage
//!
//! Build inside both [`provide_services`](crate::services::provide_services)
//! and [`provide_session`](crate::services::provide_session). The unsent
//! message is saved as a draft per post date, so closing and reopening the
//! composer for the same day brings it back.
use std::sync::Arc;

use derive_setters::Setters;
use tracing::{debug, warn};
use trellis_ui::{BuildContext, BuildResult, CallbackWith};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    avatar::{AvatarArgs, avatar},
    button::{ButtonArgs, button},
    date_fields::CalendarDate,
    form::{FormArgs, form},
    recent_posts::{RecentPostsArgs, recent_posts_dropdown},
    services::{use_services, use_session},
    storage::{Storage, read_json, write_json},
    text::{ContainerArgs, TextArgs, container, text_with},
    text_input::{TextInputArgs, text_area},
};

/// Longest message that can be posted, in user-perceived characters.
pub const MAX_MESSAGE_LENGTH: usize = 200;

/// Storage key of the draft for posts on `date`.
pub fn new_post_key(date: &CalendarDate) -> String {
    format!("newPost:{date}")
}

/// Message length in user-perceived characters.
pub fn message_length(message: &str) -> usize {
    message.graphemes(true).count()
}

fn load_draft(storage: &dyn Storage, key: &str) -> String {
    match read_json::<String>(storage, key) {
        Ok(draft) => draft.unwrap_or_default(),
        Err(err) => {
            warn!(key, %err, "discarding unreadable draft");
            String::new()
        }
    }
}

fn save_draft(storage: &dyn Storage, key: &str, message: &str) {
    let result = if message.is_empty() {
        storage.remove(key)
    } else {
        write_json(storage, key, message)
    };
    if let Err(err) = result {
        warn!(key, %err, "failed to save draft");
    }
}

/// Arguments for the [`new_post`] component.
#[derive(Clone, Setters)]
pub struct NewPostArgs {
    /// Day the post is for. Drafts are kept per day.
    pub date: CalendarDate,
    /// Focus the message input whenever this becomes `true`.
    pub take_focus: bool,
    /// Show the signed-in user's avatar.
    pub show_avatar: bool,
    /// Called with the message when a valid post is submitted.
    #[setters(skip)]
    pub on_success: CallbackWith<String>,
}

impl NewPostArgs {
    /// Composer for posts on `date`.
    pub fn new(date: CalendarDate) -> Self {
        Self {
            date,
            take_focus: false,
            show_avatar: false,
            on_success: CallbackWith::noop(),
        }
    }

    /// Sets the success handler.
    pub fn on_success<F>(mut self, on_success: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_success = CallbackWith::new(on_success);
        self
    }

    /// Sets the success handler using a shared callback.
    pub fn on_success_shared(mut self, on_success: impl Into<CallbackWith<String>>) -> Self {
        self.on_success = on_success.into();
        self
    }
}

/// Message composer with a character counter, draft persistence and a
/// picker for recent posts.
pub fn new_post(cx: &mut BuildContext<'_>, args: &NewPostArgs) -> BuildResult {
    cx.component("new_post", |cx| {
        let services = use_services(cx, "new_post")?;
        let session = use_session(cx, "new_post")?;
        let key = new_post_key(&args.date);

        let message = {
            let storage = Arc::clone(&services.storage);
            cx.remember_with_key(&key, || load_draft(storage.as_ref(), &key))
        };
        let current = message.get();
        let length = message_length(&current);
        let too_long = length > MAX_MESSAGE_LENGTH;

        {
            let storage = Arc::clone(&services.storage);
            let (draft_key, draft) = (key.clone(), current.clone());
            cx.effect_with((&key, &current), move || {
                save_draft(storage.as_ref(), &draft_key, &draft);
            });
        }

        let focus = cx.focus_handle();
        {
            let take_focus = args.take_focus;
            let focus = focus.clone();
            cx.effect_with(take_focus, move || {
                if take_focus {
                    focus.request_focus();
                }
            });
        }

        let on_submit = {
            let message = message.clone();
            let on_success = args.on_success.clone();
            let storage = Arc::clone(&services.storage);
            let key = key.clone();
            move || {
                let text = message.get();
                if text.trim().is_empty() || message_length(&text) > MAX_MESSAGE_LENGTH {
                    debug!(length = message_length(&text), "not posting invalid message");
                    return;
                }
                on_success.call(text);
                message.set(String::new());
                save_draft(storage.as_ref(), &key, "");
            }
        };

        let mut root = ContainerArgs::default().class("NewPost");
        if too_long {
            root = root.class("NewPost_error");
        }
        container(cx, &root, |cx| {
            if args.show_avatar {
                let mut avatar_args = AvatarArgs::new(session.uid.clone()).size(70);
                avatar_args.src = session.photo_url.clone();
                avatar(cx, &avatar_args)?;
            }
            form(
                cx,
                &FormArgs::default().class("NewPost_form").on_submit(on_submit),
                |cx| {
                    text_area(
                        cx,
                        &TextInputArgs::default()
                            .placeholder("Tell us about your workout!")
                            .value(current)
                            .class("NewPost_input")
                            .focus(focus.id())
                            .on_change_shared(message.setter()),
                    )?;
                    text_with(
                        cx,
                        &TextArgs::new(format!("{length}/{MAX_MESSAGE_LENGTH}"))
                            .class("NewPost_char_count"),
                    )?;
                    recent_posts_dropdown(
                        cx,
                        &RecentPostsArgs::new(session.uid.clone())
                            .on_select_shared(message.setter()),
                    )?;
                    container(
                        cx,
                        &ContainerArgs::default().class("NewPost_buttons"),
                        |cx| {
                            button(
                                cx,
                                &ButtonArgs::submit("Post")
                                    .icon("dumbbell")
                                    .class("icon_button")
                                    .class("cta"),
                            )
                        },
                    )
                },
            )
        })
    })
}
