//! Raid schedule

use super::{
    BUTTON_CLASS, DANGER_CLASS, INPUT_CLASS, Refresh, SECONDARY_CLASS, bind_input, bind_textarea,
    describe, error_banner,
};
use chrono::DateTime;
use herald_frontend_common::Spinner;
use herald_frontend_common::auth::use_auth;
use herald_http::types::{NewRaid, Raid, raid_date_from_input};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// `dd/mm/yyyy` for an ISO-8601 instant, or the raw value if it does not parse
fn display_date(date: &str) -> String {
    DateTime::parse_from_rfc3339(date)
        .map(|at| at.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[function_component(RaidsPage)]
pub fn raids_page() -> Html {
    let auth = use_auth();
    let raids = use_state(|| None::<Vec<Raid>>);
    let error = use_state(|| None::<String>);
    let editing = use_state(|| None::<String>);
    let refresh = use_reducer(Refresh::default);

    {
        let auth = auth.clone();
        let raids = raids.clone();
        let error = error.clone();
        use_effect_with(refresh.0, move |_| {
            spawn_local(async move {
                let result = match auth.admin_client() {
                    Ok(client) => client.list_raids().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(list) => raids.set(Some(list)),
                    Err(e) => {
                        if let Some(message) = describe(&e) {
                            error.set(Some(message));
                        }
                        raids.set(Some(Vec::new()));
                    }
                }
            });
            || ()
        });
    }

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

    let on_error = {
        let error = error.clone();
        Callback::from(move |message: String| error.set(Some(message)))
    };

    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |()| editing.set(None))
    };

    let on_delete = {
        let auth = auth.clone();
        let refresh = refresh.clone();
        let error = error.clone();
        Callback::from(move |id: String| {
            if !gloo::dialogs::confirm("Delete this raid?") {
                return;
            }
            let auth = auth.clone();
            let refresh = refresh.clone();
            let error = error.clone();
            spawn_local(async move {
                let result = match auth.admin_client() {
                    Ok(client) => client.delete_raid(&id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => refresh.dispatch(()),
                    Err(e) => error.set(describe(&e)),
                }
            });
        })
    };

    let list = match &*raids {
        None => html! { <Spinner text={"Loading raids..."} /> },
        Some(list) if list.is_empty() => html! {
            <p class="text-sm text-gray-500">{"No raids scheduled."}</p>
        },
        Some(list) => html! {
            <ul class="divide-y divide-gray-200 bg-white shadow rounded-lg">
                {for list.iter().map(|raid| {
                    if editing.as_deref() == Some(raid.id.as_str()) {
                        return html! {
                            <li key={raid.id.clone()} class="p-4">
                                <RaidForm
                                    raid={Some(raid.clone())}
                                    on_saved={on_saved.clone()}
                                    on_error={on_error.clone()}
                                    on_cancel={on_cancel.clone()}
                                />
                            </li>
                        };
                    }

                    let on_edit = {
                        let id = raid.id.clone();
                        let editing = editing.clone();
                        Callback::from(move |_: MouseEvent| editing.set(Some(id.clone())))
                    };
                    let on_delete = {
                        let id = raid.id.clone();
                        let on_delete = on_delete.clone();
                        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
                    };
                    html! {
                        <li key={raid.id.clone()} class="p-4 flex justify-between items-start gap-4">
                            <div class="min-w-0">
                                <p class="text-sm font-medium text-gray-900">
                                    {display_date(&raid.date)}{" · "}{&raid.platform}
                                </p>
                                <a href={raid.url.clone()} target="_blank" rel="noopener" class="text-xs text-indigo-600 break-all">
                                    {&raid.url}
                                </a>
                                <p class="text-sm text-gray-700 mt-1">{&raid.share_message}</p>
                            </div>
                            <div class="flex gap-2">
                                <button class={SECONDARY_CLASS} onclick={on_edit}>{"Edit"}</button>
                                <button class={DANGER_CLASS} onclick={on_delete}>{"Delete"}</button>
                            </div>
                        </li>
                    }
                })}
            </ul>
        },
    };

    html! {
        <section class="max-w-3xl space-y-6">
            <h2 class="text-lg font-semibold text-gray-900">{"Raids"}</h2>
            {error_banner((*error).as_ref())}
            <RaidForm on_saved={on_saved.clone()} on_error={on_error.clone()} />
            {list}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct RaidFormProps {
    /// Raid being edited; a new raid is scheduled when absent
    #[prop_or_default]
    raid: Option<Raid>,
    on_saved: Callback<()>,
    on_error: Callback<String>,
    #[prop_or_default]
    on_cancel: Option<Callback<()>>,
}

#[function_component(RaidForm)]
fn raid_form(props: &RaidFormProps) -> Html {
    let auth = use_auth();
    let existing = props.raid.as_ref();
    let field = |pick: fn(&Raid) -> String| existing.map(pick).unwrap_or_default();
    let date = use_state(|| field(|raid| display_date(&raid.date)));
    let platform = use_state(|| field(|raid| raid.platform.clone()));
    let url = use_state(|| field(|raid| raid.url.clone()));
    let share_message = use_state(|| field(|raid| raid.share_message.clone()));
    let content = use_state(|| field(|raid| raid.content.clone()));
    let saving = use_state(|| false);

    let on_submit = {
        let auth = auth.clone();
        let id = existing.map(|raid| raid.id.clone());
        let fields = (
            date.clone(),
            platform.clone(),
            url.clone(),
            share_message.clone(),
            content.clone(),
        );
        let saving = saving.clone();
        let on_saved = props.on_saved.clone();
        let on_error = props.on_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (date, platform, url, share_message, content) = fields.clone();

            let Some(iso_date) = raid_date_from_input(&date) else {
                on_error.emit("Date must be written as dd/mm/yyyy".to_string());
                return;
            };
            let raid = NewRaid {
                date: iso_date,
                platform: (*platform).clone(),
                url: (*url).clone(),
                share_message: (*share_message).clone(),
                content: (*content).clone(),
            };

            saving.set(true);
            let auth = auth.clone();
            let id = id.clone();
            let saving = saving.clone();
            let on_saved = on_saved.clone();
            let on_error = on_error.clone();
            spawn_local(async move {
                let result = match (auth.admin_client(), id) {
                    (Ok(client), Some(id)) => client.update_raid(Raid::from_parts(id, raid)).await,
                    (Ok(client), None) => client.create_raid(&raid).await,
                    (Err(e), _) => Err(e),
                };
                saving.set(false);
                match result {
                    Ok(()) => {
                        for field in [&date, &platform, &url, &share_message, &content] {
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
    let submit_label = if existing.is_some() { "Save raid" } else { "Schedule raid" };

    html! {
        <form onsubmit={on_submit} class="bg-white shadow rounded-lg p-4 grid grid-cols-2 gap-3">
            <input class={INPUT_CLASS} placeholder="dd/mm/yyyy" value={(*date).clone()} oninput={bind_input(&date)} />
            <input class={INPUT_CLASS} placeholder="Platform" value={(*platform).clone()} oninput={bind_input(&platform)} />
            <input class={classes!(INPUT_CLASS, "col-span-2")} placeholder="Stream URL" value={(*url).clone()} oninput={bind_input(&url)} />
            <input class={classes!(INPUT_CLASS, "col-span-2")} placeholder="Share message" value={(*share_message).clone()} oninput={bind_input(&share_message)} />
            <textarea class={classes!(INPUT_CLASS, "col-span-2")} rows="4" placeholder="Content (markdown)" value={(*content).clone()} oninput={bind_textarea(&content)}></textarea>
            <div class="col-span-2 flex justify-end gap-2">
                if let Some(on_cancel) = on_cancel {
                    <button type="button" class={SECONDARY_CLASS} onclick={on_cancel}>{"Cancel"}</button>
                }
                <button type="submit" class={BUTTON_CLASS} disabled={*saving}>{submit_label}</button>
            </div>
        </form>
    }
}
