//! Operator login

use super::{BUTTON_CLASS, INPUT_CLASS, bind_input, error_banner};
use crate::app::Route;
use herald_core::SessionState;
use herald_frontend_common::auth::use_auth;
use herald_frontend_common::Spinner;
use herald_http::ClientError;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    // Already signed in, or just signed in: go to the default protected view
    {
        let navigator = navigator.clone();
        use_effect_with(auth.state(), move |state| {
            if *state == SessionState::Valid {
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Raids);
                }
            }
            || ()
        });
    }

    let on_submit = {
        let auth = auth.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            submitting.set(true);
            error.set(None);

            let auth = auth.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let error = error.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                let result = match auth.public_client() {
                    Ok(client) => client.login(&email, &password).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(token) => {
                        if let Err(e) = auth.accept(token) {
                            error.set(Some(e.to_string()));
                        }
                    }
                    Err(ClientError::AuthenticationFailed(_)) => {
                        error.set(Some("Invalid email or password".to_string()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Login request failed");
                        error.set(Some(e.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    if auth.is_loading() {
        return html! { <Spinner text={"Checking session..."} /> };
    }

    html! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <form onsubmit={on_submit} class="max-w-sm w-full bg-white shadow rounded-lg p-6 space-y-4">
                <h1 class="text-2xl font-bold text-center text-indigo-700">{"Herald Admin"}</h1>
                {error_banner((*error).as_ref())}
                <label class="block text-sm text-gray-700">
                    {"Email"}
                    <input
                        type="email"
                        class={INPUT_CLASS}
                        autocomplete="username"
                        value={(*email).clone()}
                        oninput={bind_input(&email)}
                    />
                </label>
                <label class="block text-sm text-gray-700">
                    {"Password"}
                    <input
                        type="password"
                        class={INPUT_CLASS}
                        autocomplete="current-password"
                        value={(*password).clone()}
                        oninput={bind_input(&password)}
                    />
                </label>
                <button type="submit" class={classes!(BUTTON_CLASS, "w-full")} disabled={*submitting}>
                    if *submitting {
                        <Spinner inline=true />
                    } else {
                        {"Sign in"}
                    }
                </button>
            </form>
        </div>
    }
}
