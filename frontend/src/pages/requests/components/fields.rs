use crate::components::error::FieldError;
use crate::pages::requests::{
    types::{RequestDraft, RequestField},
    view_model::RequestFormViewModel,
};
use leptos::*;

/// Text-like input bound to one draft field.
#[component]
pub fn DraftInput(
    vm: RequestFormViewModel,
    field: RequestField,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    read: fn(&RequestDraft) -> String,
    write: fn(&mut RequestDraft, String),
) -> impl IntoView {
    let value = vm.draft_value(read);
    let error = vm.field_error(field);
    let submitting = vm.submitting();

    view! {
        <div>
            <label class="block text-sm font-medium text-fg" for=field.key()>{label}</label>
            <input
                id=field.key()
                name=field.key()
                type=input_type
                placeholder=placeholder
                class=move || input_class(error.with(Option::is_some))
                prop:value=move || value.get()
                disabled=move || submitting.get()
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    vm.edit(field, |draft| write(draft, raw));
                }
            />
            <FieldError error=error />
        </div>
    }
}

pub fn input_class(has_error: bool) -> String {
    format!(
        "mt-1 block w-full border rounded px-2 py-1 {}",
        if has_error {
            "border-status-error-border"
        } else {
            "border-border"
        }
    )
}
