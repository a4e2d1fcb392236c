use crate::api::RequestVariant;
use crate::pages::requests::{
    components::fields::DraftInput, types::RequestField, view_model::RequestFormViewModel,
};
use leptos::*;

pub fn time_labels(variant: Option<RequestVariant>) -> (&'static str, &'static str) {
    match variant {
        Some(RequestVariant::Mission) => ("Heure de sortie", "Heure de retour"),
        _ => ("Heure de départ", "Heure d'arrivée"),
    }
}

/// Departure and return times (authorizations and missions).
#[component]
pub fn ScheduleFields(vm: RequestFormViewModel) -> impl IntoView {
    let variant = vm.variant();

    view! {
        <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
            {move || {
                let (start_label, end_label) = time_labels(variant.get());
                view! {
                    <DraftInput
                        vm=vm
                        field=RequestField::DepartureTime
                        label=start_label
                        input_type="time"
                        read=|draft| draft.departure_time.clone()
                        write=|draft, value| draft.departure_time = value
                    />
                    <DraftInput
                        vm=vm
                        field=RequestField::ReturnTime
                        label=end_label
                        input_type="time"
                        read=|draft| draft.return_time.clone()
                        write=|draft, value| draft.return_time = value
                    />
                }
            }}
        </div>
    }
}

#[component]
pub fn ExpenseField(vm: RequestFormViewModel) -> impl IntoView {
    view! {
        <DraftInput
            vm=vm
            field=RequestField::TravelExpense
            label="Frais de déplacement (optionnel)"
            input_type="number"
            placeholder="0.00"
            read=|draft| draft.travel_expense.clone()
            write=|draft, value| draft.travel_expense = value
        />
    }
}
