//! Loading spinner component

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub text: Option<String>,
    /// Small spinner that sits inside a button or table row
    #[prop_or_default]
    pub inline: bool,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    if props.inline {
        return html! {
            <span class="inline-block w-4 h-4 border-2 border-gray-300 border-t-indigo-500 rounded-full animate-spin align-middle" role="status"></span>
        };
    }

    html! {
        <div class="text-center p-10" role="status" aria-busy="true">
            <div class="w-10 h-10 border-4 border-gray-200 border-t-indigo-500 rounded-full animate-spin mx-auto mb-5"></div>
            if let Some(text) = &props.text {
                <p class="text-gray-600 text-sm m-0">{text}</p>
            }
        </div>
    }
}
