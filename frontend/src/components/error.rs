use crate::api::{ApiError, BACKEND_UNAVAILABLE, CONNECTIVITY_ERROR, VALIDATION_ERROR};
use leptos::*;

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div
                role="alert"
                class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2"
            >
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    if e.code == VALIDATION_ERROR {
                        if let Some(fields) = e.details.as_ref().and_then(|d| d.as_object()) {
                            return view! {
                                <ul class="list-disc list-inside text-sm">
                                    {fields.values().map(|msg| {
                                        view! { <li>{msg.as_str().unwrap_or_default().to_string()}</li> }
                                    }).collect_view()}
                                </ul>
                            }.into_view();
                        }
                    }
                    match e.code.as_str() {
                        CONNECTIVITY_ERROR | BACKEND_UNAVAILABLE => view! {
                            <div class="text-xs opacity-75">
                                {"Vérifiez votre connexion puis réessayez."}
                            </div>
                        }.into_view(),
                        _ => ().into_view(),
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

/// Message shown under a single form control.
#[component]
pub fn FieldError(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <p class="mt-1 text-sm text-status-error-text">
                {move || error.get().unwrap_or_default()}
            </p>
        </Show>
    }
}
