use crate::api::DocumentType;
use crate::components::{employee_search::EmployeeSearch, error::InlineErrorMessage};
use crate::pages::documents::{
    components::certificate_fields::CertificateFields, types::DocumentFormKind,
    view_model::DocumentsViewModel,
};
use crate::pages::requests::components::fields::input_class;
use crate::state::directory::Employee;
use leptos::*;

pub fn document_submit_label(kind: DocumentFormKind, submitting: bool) -> &'static str {
    match (kind, submitting) {
        (_, true) => "Envoi en cours...",
        (DocumentFormKind::Generate, false) => "Générer et envoyer",
        (DocumentFormKind::Certificate, false) => "Envoyer la demande",
    }
}

fn tab_class(active: bool) -> String {
    format!(
        "flex-1 px-3 py-2 text-sm rounded {}",
        if active {
            "bg-action-primary-bg text-white"
        } else {
            "border border-border text-fg"
        }
    )
}

#[component]
pub fn DocumentFormCard(vm: DocumentsViewModel) -> impl IntoView {
    let kind = vm.kind();
    let document_type = vm.draft_value(|draft| draft.document_type);
    let submitting = vm.submitting();
    let can_submit = vm.can_submit();
    let form_error = Signal::derive(move || vm.message.with(|msg| msg.error.clone()));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div>
                <h2 class="text-lg font-medium text-fg">{"Documents administratifs"}</h2>
                <p class="text-sm text-fg-muted">
                    {"Générez une attestation ou demandez une attestation de travail au service RH."}
                </p>
            </div>
            <div class="flex gap-2" role="tablist">
                {DocumentFormKind::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                type="button"
                                role="tab"
                                class=move || tab_class(kind.get() == tab)
                                disabled=move || submitting.get()
                                on:click=move |_| vm.select_kind(tab)
                            >
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <InlineErrorMessage error=form_error />
            <form class="space-y-4" on:submit=on_submit>
                <EmployeeSearch
                    search=vm.search
                    on_input=move |value: String| vm.search_input(value)
                    on_select=move |employee: Employee| vm.select_employee(&employee)
                    disabled=submitting
                />
                <Show
                    when=move || kind.get() == DocumentFormKind::Certificate
                    fallback=move || {
                        view! {
                            <div>
                                <label class="block text-sm font-medium text-fg" for="type_document">
                                    {"Type de document"}
                                </label>
                                <select
                                    id="type_document"
                                    class=input_class(false)
                                    prop:value=move || document_type.get().as_str()
                                    disabled=move || submitting.get()
                                    on:change=move |ev| {
                                        vm.select_document_type(DocumentType::parse(&event_target_value(&ev)))
                                    }
                                >
                                    {DocumentType::ALL
                                        .into_iter()
                                        .map(|doc| view! { <option value=doc.as_str()>{doc.label()}</option> })
                                        .collect_view()}
                                </select>
                            </div>
                            <div class="rounded border border-status-info-border bg-status-info-bg p-3 text-sm text-status-info-text">
                                {"Le document sera généré automatiquement et envoyé à votre adresse email."}
                            </div>
                        }
                    }
                >
                    <CertificateFields vm=vm />
                    <div class="rounded border border-status-info-border bg-status-info-bg p-3 text-sm text-status-info-text">
                        {"Votre demande sera examinée par le service RH avant l'émission de l'attestation."}
                    </div>
                </Show>
                <button
                    type="submit"
                    class="w-full px-4 py-2 rounded bg-action-primary-bg text-white disabled:opacity-50"
                    disabled=move || !can_submit.get()
                >
                    {move || document_submit_label(kind.get(), submitting.get())}
                </button>
            </form>
        </div>
    }
}
