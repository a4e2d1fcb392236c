use crate::api::LeaveKind;
use crate::components::error::FieldError;
use crate::pages::requests::{
    components::fields::DraftInput, types::RequestField, view_model::RequestFormViewModel,
};
use leptos::*;

#[component]
pub fn LeaveFields(vm: RequestFormViewModel) -> impl IntoView {
    let half_day = vm.draft_value(|draft| draft.half_day);
    let leave_kind = vm.draft_value(|draft| draft.leave_kind);
    let kind_error = vm.field_error(RequestField::LeaveKind);
    let submitting = vm.submitting();

    view! {
        <div class="space-y-4 rounded border border-border p-4">
            <label class="inline-flex items-center gap-2 text-sm text-fg">
                <input
                    type="checkbox"
                    prop:checked=move || half_day.get()
                    disabled=move || submitting.get()
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        vm.edit(RequestField::HalfDay, |draft| draft.half_day = checked);
                    }
                />
                {"Demi-journée"}
            </label>
            <fieldset>
                <legend class="block text-sm font-medium text-fg">{"Type de congé"}</legend>
                <div class="mt-2 flex flex-wrap gap-4">
                    {LeaveKind::ALL
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <label class="inline-flex items-center gap-2 text-sm text-fg">
                                    <input
                                        type="radio"
                                        name=RequestField::LeaveKind.key()
                                        value=kind.as_str()
                                        prop:checked=move || leave_kind.get() == Some(kind)
                                        disabled=move || submitting.get()
                                        on:change=move |_| vm.set_leave_kind(kind)
                                    />
                                    {kind.label()}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
                <FieldError error=kind_error />
            </fieldset>
            <Show when=move || leave_kind.get() == Some(LeaveKind::Other)>
                <DraftInput
                    vm=vm
                    field=RequestField::LeaveKindDetail
                    label="Précisez le type de congé"
                    placeholder="Précisez le type de congé"
                    read=|draft| draft.leave_kind_detail.clone()
                    write=|draft, value| draft.leave_kind_detail = value
                />
            </Show>
        </div>
    }
}
