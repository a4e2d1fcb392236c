use crate::api::RequestVariant;
use crate::components::{
    employee_search::EmployeeSearch,
    error::{FieldError, InlineErrorMessage},
};
use crate::pages::requests::{
    components::{
        fields::{input_class, DraftInput},
        leave_fields::LeaveFields,
        schedule_fields::{ExpenseField, ScheduleFields},
    },
    types::RequestField,
    view_model::RequestFormViewModel,
};
use crate::state::directory::Employee;
use leptos::*;

pub fn submit_label(submitting: bool) -> &'static str {
    if submitting {
        "Envoi en cours..."
    } else {
        "Envoyer la demande"
    }
}

#[component]
pub fn RequestFormCard(vm: RequestFormViewModel) -> impl IntoView {
    let variant = vm.variant();
    let reason = vm.draft_value(|draft| draft.reason.clone());
    let reason_error = vm.field_error(RequestField::Reason);
    let variant_error = vm.field_error(RequestField::Variant);
    let employee_error = vm.field_error(RequestField::EmployeeId);
    let submitting = vm.submitting();
    let can_submit = vm.can_submit();
    let form_error = Signal::derive(move || vm.message.with(|msg| msg.error.clone()));

    let shows_departure_date = vm.shows(RequestField::DepartureDate);
    let shows_return_date = vm.shows(RequestField::ReturnDate);
    let shows_times = vm.shows(RequestField::DepartureTime);
    let shows_leave = vm.shows(RequestField::LeaveKind);
    let shows_expense = vm.shows(RequestField::TravelExpense);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div>
                <h2 class="text-lg font-medium text-fg">{"Nouvelle demande RH"}</h2>
                <p class="text-sm text-fg-muted">
                    {"Autorisation, congés, mission ou démission : choisissez le type puis complétez le formulaire."}
                </p>
            </div>
            <InlineErrorMessage error=form_error />
            <form class="space-y-4" on:submit=on_submit>
                <EmployeeSearch
                    search=vm.search
                    on_input=move |value: String| vm.search_input(value)
                    on_select=move |employee: Employee| vm.select_employee(&employee)
                    error=employee_error
                    disabled=submitting
                />
                <div>
                    <label class="block text-sm font-medium text-fg" for="type_demande">
                        {"Type de demande"}
                    </label>
                    <select
                        id="type_demande"
                        class=move || input_class(variant_error.with(Option::is_some))
                        prop:value=move || variant.get().map(RequestVariant::as_str).unwrap_or_default()
                        disabled=move || submitting.get()
                        on:change=move |ev| {
                            vm.select_variant(RequestVariant::parse(&event_target_value(&ev)))
                        }
                    >
                        <option value="">{"Sélectionnez un type"}</option>
                        {RequestVariant::ALL
                            .into_iter()
                            .map(|variant| view! { <option value=variant.as_str()>{variant.label()}</option> })
                            .collect_view()}
                    </select>
                    <FieldError error=variant_error />
                </div>
                <div>
                    <label class="block text-sm font-medium text-fg" for="titre">{"Motif"}</label>
                    <textarea
                        id="titre"
                        rows=3
                        placeholder="Décrivez le motif de votre demande..."
                        class=move || input_class(reason_error.with(Option::is_some))
                        prop:value=move || reason.get()
                        disabled=move || submitting.get()
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            vm.edit(RequestField::Reason, |draft| draft.reason = raw);
                        }
                    ></textarea>
                    <FieldError error=reason_error />
                </div>
                <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
                    <Show when=move || shows_departure_date.get()>
                        <DraftInput
                            vm=vm
                            field=RequestField::DepartureDate
                            label="Date de départ"
                            input_type="date"
                            read=|draft| draft.departure_date.clone()
                            write=|draft, value| draft.departure_date = value
                        />
                    </Show>
                    <Show when=move || shows_return_date.get()>
                        <DraftInput
                            vm=vm
                            field=RequestField::ReturnDate
                            label="Date de retour"
                            input_type="date"
                            read=|draft| draft.return_date.clone()
                            write=|draft, value| draft.return_date = value
                        />
                    </Show>
                </div>
                <Show when=move || shows_leave.get()>
                    <LeaveFields vm=vm />
                </Show>
                <Show when=move || shows_times.get()>
                    <ScheduleFields vm=vm />
                </Show>
                <Show when=move || shows_expense.get()>
                    <ExpenseField vm=vm />
                </Show>
                <Show when=move || variant.get() == Some(RequestVariant::Resignation)>
                    <p class="text-sm text-fg-muted">
                        {"Une lettre de démission sera générée et envoyée par email après validation."}
                    </p>
                </Show>
                <button
                    type="submit"
                    class="w-full px-4 py-2 rounded bg-action-primary-bg text-white disabled:opacity-50"
                    disabled=move || !can_submit.get()
                >
                    {move || submit_label(submitting.get())}
                </button>
            </form>
        </div>
    }
}
