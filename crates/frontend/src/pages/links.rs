//! Curated community and official links

use super::{
    BUTTON_CLASS, DANGER_CLASS, INPUT_CLASS, Refresh, SECONDARY_CLASS, bind_input, describe,
    error_banner,
};
use herald_frontend_common::Spinner;
use herald_frontend_common::auth::use_auth;
use herald_http::types::{Link, LinkKind, NewLink};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

fn kind_label(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Community => "Community",
        LinkKind::Official => "Official",
    }
}

#[function_component(LinksPage)]
pub fn links_page() -> Html {
    let auth = use_auth();
    let links = use_state(|| None::<Vec<Link>>);
    let error = use_state(|| None::<String>);
    let editing = use_state(|| None::<String>);
    let refresh = use_reducer(Refresh::default);

    {
        let auth = auth.clone();
        let links = links.clone();
        let error = error.clone();
        use_effect_with(refresh.0, move |_| {
            spawn_local(async move {
                let result = match auth.admin_client() {
                    Ok(client) => client.list_links().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(list) => links.set(Some(list)),
                    Err(e) => {
                        error.set(describe(&e));
                        links.set(Some(Vec::new()));
                    }
                }
            });
            || ()
        });
    }

    let on_delete = {
        let auth = auth.clone();
        let refresh = refresh.clone();
        let error = error.clone();
        Callback::from(move |id: String| {
            if !gloo::dialogs::confirm("Delete this link?") {
                return;
            }
            let auth = auth.clone();
            let refresh = refresh.clone();
            let error = error.clone();
            spawn_local(async move {
                let result = match auth.admin_client() {
                    Ok(client) => client.delete_link(&id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => refresh.dispatch(()),
                    Err(e) => error.set(describe(&e)),
                }
            });
        })
    };

    let on_saved = {
        let refresh = refresh.clone();
        let error = error.clone();
        let editing = editing.clone();
        Callback::from(move |()| {
            error.set(None);
            editing.set(None);
            refresh.dispatch(());
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |()| editing.set(None))
    };

    let on_error = {
        let error = error.clone();
        Callback::from(move |message: String| error.set(Some(message)))
    };

    let section = |kind: LinkKind, list: &[Link]| {
        let rows: Vec<&Link> = list.iter().filter(|link| link.kind == kind).collect();
        html! {
            <div class="space-y-2">
                <h3 class="text-sm font-semibold text-gray-700">{kind_label(kind)}</h3>
                if rows.is_empty() {
                    <p class="text-sm text-gray-500">{"No links."}</p>
                } else {
                    <ul class="divide-y divide-gray-200 bg-white shadow rounded-lg">
                        {for rows.into_iter().map(|link| {
                            if editing.as_deref() == Some(link.id.as_str()) {
                                return html! {
                                    <li key={link.id.clone()} class="p-3">
                                        <LinkForm
                                            link={Some(link.clone())}
                                            on_saved={on_saved.clone()}
                                            on_error={on_error.clone()}
                                            on_cancel={on_cancel.clone()}
                                        />
                                    </li>
                                };
                            }

                            let on_edit = {
                                let id = link.id.clone();
                                let editing = editing.clone();
                                Callback::from(move |_: MouseEvent| editing.set(Some(id.clone())))
                            };
                            let on_delete = {
                                let id = link.id.clone();
                                let on_delete = on_delete.clone();
                                Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                            };
                            html! {
                                <li key={link.id.clone()} class="p-3 flex justify-between items-center gap-4">
                                    <div class="min-w-0">
                                        <p class="text-sm font-medium text-gray-900">
                                            <span class="text-gray-400 mr-2">{&link.icon}</span>{&link.label}
                                        </p>
                                        <a href={link.url.clone()} target="_blank" rel="noopener" class="text-xs text-indigo-600 break-all">
                                            {&link.url}
                                        </a>
                                    </div>
                                    <div class="flex gap-2">
                                        <button class={SECONDARY_CLASS} onclick={on_edit}>{"Edit"}</button>
                                        <button class={DANGER_CLASS} onclick={on_delete}>{"Delete"}</button>
                                    </div>
                                </li>
                            }
                        })}
                    </ul>
                }
            </div>
        }
    };

    let body = match &*links {
        None => html! { <Spinner text={"Loading links..."} /> },
        Some(list) => html! {
            <>
                {section(LinkKind::Community, list)}
                {section(LinkKind::Official, list)}
            </>
        },
    };

    html! {
        <section class="max-w-3xl space-y-6">
            <h2 class="text-lg font-semibold text-gray-900">{"Links"}</h2>
            {error_banner((*error).as_ref())}
            <LinkForm on_saved={on_saved.clone()} on_error={on_error.clone()} />
            {body}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct LinkFormProps {
    /// Link being edited; a new link is added when absent
    #[prop_or_default]
    link: Option<Link>,
    on_saved: Callback<()>,
    on_error: Callback<String>,
    #[prop_or_default]
    on_cancel: Option<Callback<()>>,
}

#[function_component(LinkForm)]
fn link_form(props: &LinkFormProps) -> Html {
    let auth = use_auth();
    let existing = props.link.as_ref();
    let field = |pick: fn(&Link) -> String| existing.map(pick).unwrap_or_default();
    let label = use_state(|| field(|link| link.label.clone()));
    let url = use_state(|| field(|link| link.url.clone()));
    let icon = use_state(|| field(|link| link.icon.clone()));
    let kind = use_state(|| existing.map_or(LinkKind::Community, |link| link.kind));
    let saving = use_state(|| false);

    let on_kind_change = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let selected = if select.value() == LinkKind::Official.as_str() {
                LinkKind::Official
            } else {
                LinkKind::Community
            };
            kind.set(selected);
        })
    };

    let on_submit = {
        let auth = auth.clone();
        let id = existing.map(|link| link.id.clone());
        let fields = (label.clone(), url.clone(), icon.clone());
        let kind = kind.clone();
        let saving = saving.clone();
        let on_saved = props.on_saved.clone();
        let on_error = props.on_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (label, url, icon) = fields.clone();
            let link = NewLink {
                label: (*label).clone(),
                url: (*url).clone(),
                icon: (*icon).clone(),
                kind: *kind,
            };

            saving.set(true);
            let auth = auth.clone();
            let id = id.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                let result = match (auth.admin_client(), id) {
                    (Ok(client), Some(id)) => client.update_link(Link::from_parts(id, link)).await,
                    (Ok(client), None) => client.create_link(&link).await,
                    (Err(e), _) => Err(e),
                };
                saving.set(false);
                match result {
                    Ok(()) => {
                        for field in [&label, &url, &icon] {
                            field.set(String::new());
                        }
                        on_saved.emit(());
                    }
                    Err(e) => {
                        if let Some(message) = describe(&e) {
                            on_error.emit(message);
                        }
                    }
                }
            });
        })
    };

    let on_cancel = props.on_cancel.clone().map(|on_cancel| {
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    });
    let submit_label = if existing.is_some() { "Save link" } else { "Add link" };

    html! {
        <form onsubmit={on_submit} class="bg-white shadow rounded-lg p-4 grid grid-cols-2 gap-3">
            <input class={INPUT_CLASS} placeholder="Label" value={(*label).clone()} oninput={bind_input(&label)} />
            <input class={INPUT_CLASS} placeholder="Icon" value={(*icon).clone()} oninput={bind_input(&icon)} />
            <input class={classes!(INPUT_CLASS, "col-span-2")} placeholder="URL" value={(*url).clone()} oninput={bind_input(&url)} />
            <select class={INPUT_CLASS} onchange={on_kind_change}>
                {for [LinkKind::Community, LinkKind::Official].into_iter().map(|option| html! {
                    <option value={option.as_str()} selected={*kind == option}>{kind_label(option)}</option>
                })}
            </select>
            <div class="flex justify-end gap-2">
                if let Some(on_cancel) = on_cancel {
                    <button type="button" class={SECONDARY_CLASS} onclick={on_cancel}>{"Cancel"}</button>
                }
                <button type="submit" class={BUTTON_CLASS} disabled={*saving}>{submit_label}</button>
            </div>
        </form>
    }
}
