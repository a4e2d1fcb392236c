use crate::components::error::FieldError;
use crate::state::directory::{
    search_employees, use_employee_directory, Employee, EmployeeSearchState,
};
use leptos::*;

#[component]
pub fn EmployeeSearch(
    search: EmployeeSearchState,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into)] on_select: Callback<Employee>,
    #[prop(optional, into)] error: MaybeSignal<Option<String>>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let directory = use_employee_directory();
    let roster = directory.employees();
    let roster_loading = directory.loading();
    let query = search.query_signal();
    let open = search.open_signal();

    let suggestions =
        create_memo(move |_| roster.with(|roster| search_employees(&query.get(), roster)));
    let list_visible = move || open.get() && !query.get().trim().is_empty();
    let error = Signal::derive(move || error.get());
    let has_error = Signal::derive(move || error.with(Option::is_some));

    view! {
        <div class="relative">
            <label class="block text-sm font-medium text-fg">{"Employé"}</label>
            <input
                type="text"
                autocomplete="off"
                placeholder="Rechercher votre nom..."
                class=move || {
                    format!(
                        "mt-1 block w-full border rounded px-2 py-1 {}",
                        if has_error.get() { "border-status-error-border" } else { "border-border" }
                    )
                }
                prop:value=move || query.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
                on:focus=move |_| search.focus(!suggestions.with(Vec::is_empty))
                on:blur=move |_| search.close()
            />
            <Show when=move || roster_loading.get()>
                <p class="mt-1 text-xs text-fg-muted">{"Chargement des employés..."}</p>
            </Show>
            <Show when=list_visible>
                <ul class="absolute z-10 mt-1 w-full max-h-60 overflow-auto rounded border border-border bg-surface-elevated shadow">
                    <Show
                        when=move || !suggestions.with(Vec::is_empty)
                        fallback=|| view! {
                            <li class="px-3 py-2 text-sm text-fg-muted">{"Aucun employé trouvé"}</li>
                        }
                    >
                        <For
                            each=move || suggestions.get()
                            key=|employee| employee.id.to_string()
                            children=move |employee: Employee| {
                                let label = employee.display_label();
                                view! {
                                    <li
                                        class="px-3 py-2 text-sm cursor-pointer hover:bg-action-ghost-bg-hover"
                                        on:mousedown=move |ev| {
                                            // must run before the blur handler closes the list
                                            ev.prevent_default();
                                            on_select.call(employee.clone());
                                        }
                                    >
                                        {label}
                                    </li>
                                }
                            }
                        />
                    </Show>
                </ul>
            </Show>
            <FieldError error=error />
        </div>
    }
}
