use crate::pages::documents::{
    components::{confirmation::DocumentConfirmation, form::DocumentFormCard},
    view_model::use_documents_view_model,
};
use crate::pages::requests::utils::SubmissionPhase;
use leptos::*;

#[component]
pub fn DocumentsPanel(#[prop(into)] on_switch: Callback<()>) -> impl IntoView {
    let vm = use_documents_view_model();
    let phase = vm.phase();

    view! {
        <Show
            when=move || phase.get() == SubmissionPhase::Succeeded
            fallback=move || view! { <DocumentFormCard vm=vm /> }
        >
            <DocumentConfirmation vm=vm on_switch=on_switch />
        </Show>
    }
}
