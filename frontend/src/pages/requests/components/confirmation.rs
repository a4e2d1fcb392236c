use crate::pages::requests::{utils::confirmation_copy, view_model::RequestFormViewModel};
use leptos::*;

#[component]
pub fn RequestConfirmation(
    vm: RequestFormViewModel,
    #[prop(into)] on_switch: Callback<()>,
) -> impl IntoView {
    let copy = move || confirmation_copy(vm.form.with(|form| form.submitted_variant));

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-8 text-center space-y-4">
            <i class="fas fa-check-circle text-4xl text-status-success-text"></i>
            <h2 class="text-2xl font-bold text-fg">{move || copy().title}</h2>
            <p class="text-sm text-fg-muted">{move || copy().body}</p>
            <div class="flex flex-col gap-2 sm:flex-row sm:justify-center">
                <button
                    type="button"
                    class="px-4 py-2 rounded bg-action-primary-bg text-white"
                    on:click=move |_| on_switch.call(())
                >
                    <i class="fas fa-file mr-2"></i>
                    {"Demander un document"}
                </button>
                <button
                    type="button"
                    class="px-4 py-2 rounded border border-border text-fg"
                    on:click=move |_| vm.complete_confirmation()
                >
                    {"Nouvelle demande"}
                </button>
            </div>
        </div>
    }
}
