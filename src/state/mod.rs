mod editor;

pub(crate) use editor::ResourceEditor;

use crate::api::ApiClient;
use crate::app::AppRoute;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos_dom::helpers::set_timeout;
use std::time::Duration;

const NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Transient notifications. A newer notice replaces the current one; each
/// clears itself after [`NOTICE_TTL`] unless superseded.
#[derive(Clone, Copy)]
pub(crate) struct Notices {
    pub current: RwSignal<Option<Notice>>,
    next_id: RwSignal<u64>,
}

impl Notices {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: RwSignal::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    fn push(&self, kind: NoticeKind, message: String) {
        let id = self.next_id.get_untracked().wrapping_add(1);
        self.next_id.set(id);
        self.current.set(Some(Notice { id, kind, message }));

        let current = self.current;
        set_timeout(
            move || {
                if current.get_untracked().map(|n| n.id) == Some(id) {
                    current.set(None);
                }
            },
            NOTICE_TTL,
        );
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

/// Session context threaded through the component tree: the API client
/// (base URL + token) is the only source of authentication state.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub notices: Notices,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
            notices: Notices::new(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.api_client.with(|c| c.get_token().cloned())
    }

    pub fn sign_in(&self, token: String) {
        self.api_client.update(|c| {
            c.set_token(token);
            c.save_to_storage();
        });
    }

    pub fn sign_out(&self) {
        self.api_client.update(|c| c.logout());
    }

    /// The backend rejected our token: drop it and start over at login.
    pub fn expire_session(&self) {
        self.sign_out();
        if let Err(e) = window().location().set_href(AppRoute::Login.path()) {
            warn!("Failed to redirect to login: {:?}", e);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
