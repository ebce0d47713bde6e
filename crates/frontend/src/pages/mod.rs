mod arts;
mod links;
mod login;
mod raids;

pub use arts::ArtsPage;
pub use links::LinksPage;
pub use login::LoginPage;
pub use raids::RaidsPage;

use herald_http::ClientError;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Counter bumped to refetch a collection
#[derive(Default, PartialEq)]
pub(crate) struct Refresh(pub u32);

impl Reducible for Refresh {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Keep a text field in sync with its state handle
pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

pub(crate) fn bind_textarea(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Message to show for a failed API call.
///
/// `None` for a rejected credential: the gateway has already sent the
/// browser back to the login page.
pub(crate) fn describe(error: &ClientError) -> Option<String> {
    if error.is_auth_failure() {
        return None;
    }
    tracing::warn!(%error, "API call failed");
    Some(error.to_string())
}

pub(crate) fn error_banner(error: Option<&String>) -> Html {
    match error {
        Some(message) => html! {
            <div class="mb-4 p-3 rounded-md bg-red-50 border border-red-200 text-sm text-red-700" role="alert">
                {message}
            </div>
        },
        None => html! {},
    }
}

pub(crate) const INPUT_CLASS: &str =
    "block w-full px-3 py-2 border border-gray-300 rounded-md text-sm focus:outline-none focus:ring-1 focus:ring-indigo-500";
pub(crate) const BUTTON_CLASS: &str =
    "px-4 py-2 text-sm font-medium text-white bg-indigo-600 hover:bg-indigo-700 rounded-md disabled:opacity-50";
pub(crate) const DANGER_CLASS: &str =
    "px-3 py-1 text-xs font-medium text-red-700 bg-red-50 hover:bg-red-100 rounded-md";
pub(crate) const SECONDARY_CLASS: &str =
    "px-3 py-1 text-xs font-medium text-gray-700 bg-gray-100 hover:bg-gray-200 rounded-md";
