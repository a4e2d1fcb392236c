use crate::pages::documents::view_model::DocumentsViewModel;
use crate::pages::requests::components::fields::input_class;
use leptos::*;

/// Hire date and role, only asked for work certificate requests.
#[component]
pub fn CertificateFields(vm: DocumentsViewModel) -> impl IntoView {
    let hire_date = vm.draft_value(|draft| draft.hire_date.clone());
    let role = vm.draft_value(|draft| draft.role.clone());
    let submitting = vm.submitting();

    view! {
        <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
            <div>
                <label class="block text-sm font-medium text-fg" for="date_embauche">
                    {"Date d'embauche"}
                </label>
                <input
                    id="date_embauche"
                    type="date"
                    class=input_class(false)
                    prop:value=move || hire_date.get()
                    disabled=move || submitting.get()
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        vm.edit(|draft| draft.hire_date = raw);
                    }
                />
            </div>
            <div>
                <label class="block text-sm font-medium text-fg" for="poste">{"Poste"}</label>
                <input
                    id="poste"
                    type="text"
                    placeholder="Votre poste actuel"
                    class=input_class(false)
                    prop:value=move || role.get()
                    disabled=move || submitting.get()
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        vm.edit(|draft| draft.role = raw);
                    }
                />
            </div>
        </div>
    }
}
