//! Fan art moderation queue

use super::{BUTTON_CLASS, DANGER_CLASS, describe, error_banner};
use herald_frontend_common::auth::use_auth;
use herald_frontend_common::{AppConfig, Spinner};
use herald_http::types::Art;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Arts loaded so far and where the next page starts
#[derive(Clone, Debug, Default, PartialEq)]
struct Gallery {
    arts: Vec<Art>,
    next_page: Option<u32>,
    loaded: bool,
}

enum GalleryAction {
    Appended { arts: Vec<Art>, next_page: Option<u32> },
    Approved(String),
    Removed(String),
}

impl Reducible for Gallery {
    type Action = GalleryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            GalleryAction::Appended { arts, next_page } => {
                next.arts.extend(arts);
                next.next_page = next_page;
                next.loaded = true;
            }
            GalleryAction::Approved(id) => {
                if let Some(art) = next.arts.iter_mut().find(|art| art.id == id) {
                    art.approved = true;
                }
            }
            GalleryAction::Removed(id) => next.arts.retain(|art| art.id != id),
        }
        Rc::new(next)
    }
}

#[function_component(ArtsPage)]
pub fn arts_page() -> Html {
    let auth = use_auth();
    let gallery = use_reducer(Gallery::default);
    let error = use_state(|| None::<String>);
    let fetching = use_state(|| false);

    let load_page = {
        let auth = auth.clone();
        let gallery = gallery.clone();
        let error = error.clone();
        let fetching = fetching.clone();
        Callback::from(move |page: u32| {
            fetching.set(true);
            let auth = auth.clone();
            let gallery = gallery.clone();
            let error = error.clone();
            let fetching = fetching.clone();
            spawn_local(async move {
                let result = match auth.admin_client() {
                    Ok(client) => client.list_arts(page, AppConfig::art_records_per_page()).await,
                    Err(e) => Err(e),
                };
                fetching.set(false);
                match result {
                    Ok(page) => gallery.dispatch(GalleryAction::Appended {
                        arts: page.arts,
                        next_page: page.next_page,
                    }),
                    Err(e) => error.set(describe(&e)),
                }
            });
        })
    };

    {
        let load_page = load_page.clone();
        use_effect_with((), move |_| {
            load_page.emit(1);
            || ()
        });
    }

    let on_approve = {
        let auth = auth.clone();
        let gallery = gallery.clone();
        let error = error.clone();
        Callback::from(move |id: String| {
            let auth = auth.clone();
            let gallery = gallery.clone();
            let error = error.clone();
            spawn_local(async move {
                let result = match auth.admin_client() {
                    Ok(client) => client.approve_art(&id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => gallery.dispatch(GalleryAction::Approved(id)),
                    Err(e) => error.set(describe(&e)),
                }
            });
        })
    };

    let on_delete = {
        let auth = auth.clone();
        let gallery = gallery.clone();
        let error = error.clone();
        Callback::from(move |id: String| {
            if !gloo::dialogs::confirm("Delete this art?") {
                return;
            }
            let auth = auth.clone();
            let gallery = gallery.clone();
            let error = error.clone();
            spawn_local(async move {
                let result = match auth.admin_client() {
                    Ok(client) => client.delete_art(&id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => gallery.dispatch(GalleryAction::Removed(id)),
                    Err(e) => error.set(describe(&e)),
                }
            });
        })
    };

    let load_more = gallery.next_page.map(|page| {
        let load_page = load_page.clone();
        Callback::from(move |_: MouseEvent| load_page.emit(page))
    });

    let grid = if !gallery.loaded {
        html! { <Spinner text={"Loading arts..."} /> }
    } else if gallery.arts.is_empty() {
        html! { <p class="text-sm text-gray-500">{"Nothing to moderate."}</p> }
    } else {
        html! {
            <div class="grid grid-cols-3 gap-4">
                {for gallery.arts.iter().map(|art| {
                    let id = art.id.clone();
                    let approve = {
                        let id = id.clone();
                        let on_approve = on_approve.clone();
                        Callback::from(move |_: MouseEvent| on_approve.emit(id.clone()))
                    };
                    let delete = {
                        let on_delete = on_delete.clone();
                        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                    };
                    html! {
                        <figure key={art.id.clone()} class="bg-white shadow rounded-lg overflow-hidden">
                            <img src={art.url.clone()} alt={art.description.clone()} class="w-full h-48 object-cover" />
                            <figcaption class="p-3 space-y-2">
                                <p class="text-sm font-medium text-gray-900">
                                    {&art.creator}
                                    <span class="ml-2 text-xs text-gray-500">{&art.x_profile}</span>
                                </p>
                                <p class="text-xs text-gray-700">{&art.description}</p>
                                <div class="flex items-center justify-between">
                                    if art.approved {
                                        <span class="text-xs font-medium text-green-700">{"Approved"}</span>
                                    } else {
                                        <button class={BUTTON_CLASS} onclick={approve}>{"Approve"}</button>
                                    }
                                    <button class={DANGER_CLASS} onclick={delete}>{"Delete"}</button>
                                </div>
                            </figcaption>
                        </figure>
                    }
                })}
            </div>
        }
    };

    html! {
        <section class="space-y-6">
            <h2 class="text-lg font-semibold text-gray-900">{"Arts"}</h2>
            {error_banner((*error).as_ref())}
            {grid}
            if let Some(load_more) = load_more {
                <div class="flex justify-center">
                    <button class={BUTTON_CLASS} onclick={load_more} disabled={*fetching}>
                        if *fetching {
                            <Spinner inline=true />
                        } else {
                            {"Load more"}
                        }
                    </button>
                </div>
            }
        </section>
    }
}
