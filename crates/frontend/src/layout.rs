//! Shell around the protected views

use crate::app::Route;
use herald_frontend_common::auth::use_auth;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let current = use_route::<Route>();

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_: MouseEvent| {
            auth.remove();
            if let Some(navigator) = &navigator {
                navigator.replace(&Route::Login);
            }
        })
    };

    let tab = |route: Route, label: &'static str| {
        let class = if current.as_ref() == Some(&route) {
            "px-4 py-2 text-sm font-medium text-indigo-600 border-b-2 border-indigo-600"
        } else {
            "px-4 py-2 text-sm font-medium text-gray-600 hover:text-gray-900"
        };
        html! {
            <Link<Route> to={route} classes={classes!(class)}>{label}</Link<Route>>
        }
    };

    let expires = auth
        .expires_at()
        .map(|at| at.with_timezone(&chrono::Local).format("%d/%m/%Y %H:%M").to_string());

    html! {
        <div class="min-h-screen flex flex-col bg-gray-50">
            <header class="bg-white border-b border-gray-200">
                <div class="p-4 flex justify-between items-center">
                    <h1 class="text-xl font-bold text-indigo-700">{"Herald Admin"}</h1>
                    <div class="flex items-center gap-3">
                        if let Some(expires) = expires {
                            <span class="text-xs text-gray-500">{format!("Session until {expires}")}</span>
                        }
                        <button
                            onclick={on_logout}
                            class="px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 hover:bg-gray-200 rounded-lg"
                        >
                            {"Logout"}
                        </button>
                    </div>
                </div>
                <nav class="flex">
                    {tab(Route::Raids, "Raids")}
                    {tab(Route::Links, "Links")}
                    {tab(Route::Arts, "Arts")}
                </nav>
            </header>
            <main class="flex-1 p-6">
                {props.children.clone()}
            </main>
        </div>
    }
}
