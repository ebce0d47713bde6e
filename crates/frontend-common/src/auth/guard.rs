//! Route guard component for protected views

use super::context::use_auth;
use crate::browser::BrowserNavigator;
use herald_core::RouteGuard;
use yew::prelude::*;
use yew_router::prelude::use_location;

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub children: Children,
}

/// Renders its children only while the session is valid.
///
/// Validity is re-checked during render on mount, when session loading
/// finishes and on every change of the current path, so a lapsed session
/// never mounts the protected tree. A failed check removes the credential;
/// the replace to the login page happens once the render has committed.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let auth = use_auth();
    let path = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_default();
    let guard = use_mut_ref(RouteGuard::new);

    let admitted = guard.borrow_mut().admits(auth.session(), &path);

    {
        let guard = guard.clone();
        let auth = auth.clone();
        use_effect(move || {
            if guard.borrow_mut().flush_redirect(&BrowserNavigator) {
                auth.notify();
            }
            || ()
        });
    }

    if admitted {
        html! { <>{ props.children.clone() }</> }
    } else {
        html! {}
    }
}
