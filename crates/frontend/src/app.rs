use crate::layout::Layout;
use crate::pages::{ArtsPage, LinksPage, LoginPage, RaidsPage};
use herald_core::{LOGIN_PATH, Navigator};
use herald_frontend_common::{AuthProvider, BrowserNavigator, ProtectedRoute};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Login,
    #[at("/raids")]
    Raids,
    #[at("/links")]
    Links,
    #[at("/arts")]
    Arts,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Login => html! { <LoginPage /> },
        Route::Raids => html! {
            <ProtectedRoute><Layout><RaidsPage /></Layout></ProtectedRoute>
        },
        Route::Links => html! {
            <ProtectedRoute><Layout><LinksPage /></Layout></ProtectedRoute>
        },
        Route::Arts => html! {
            <ProtectedRoute><Layout><ArtsPage /></Layout></ProtectedRoute>
        },
        Route::NotFound => html! { <BackToLogin /> },
    }
}

/// Unknown paths replace themselves with the login page
#[function_component(BackToLogin)]
fn back_to_login() -> Html {
    use_effect_with((), |_| {
        BrowserNavigator.replace(LOGIN_PATH);
        || ()
    });
    html! {}
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <AuthProvider>
                <Switch<Route> render={switch} />
            </AuthProvider>
        </BrowserRouter>
    }
}
