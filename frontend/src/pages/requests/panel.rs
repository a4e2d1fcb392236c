use crate::pages::requests::{
    components::{confirmation::RequestConfirmation, form::RequestFormCard},
    utils::SubmissionPhase,
    view_model::use_request_form_view_model,
};
use leptos::*;

#[component]
pub fn RequestsPanel(#[prop(into)] on_switch: Callback<()>) -> impl IntoView {
    let vm = use_request_form_view_model();
    let phase = vm.phase();

    view! {
        <Show
            when=move || phase.get() == SubmissionPhase::Succeeded
            fallback=move || view! { <RequestFormCard vm=vm /> }
        >
            <RequestConfirmation vm=vm on_switch=on_switch />
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiClient, RequestVariant};
    use crate::pages::requests::view_model::RequestFormViewModel;
    use crate::state::{backend::BackendHealth, directory::EmployeeDirectory};
    use crate::test_support::ssr::render_to_string;
    use std::time::Duration;

    fn provide_view_model() -> RequestFormViewModel {
        let api = ApiClient::new_with_base_url("http://localhost:1");
        let health = BackendHealth::new(api.clone(), false);
        provide_context(health);
        provide_context(EmployeeDirectory::new(api.clone()));
        let vm = RequestFormViewModel::new(api, health, Duration::from_secs(4));
        provide_context(vm);
        vm
    }

    #[test]
    fn renders_blank_form_with_variant_choices() {
        let html = render_to_string(move || {
            provide_view_model();
            view! { <RequestsPanel on_switch=|_: ()| {} /> }
        });
        assert!(html.contains("Nouvelle demande RH"));
        assert!(html.contains("Sélectionnez un type"));
        assert!(html.contains("Démission"));
        assert!(html.contains("Date de départ"));
        assert!(!html.contains("Date de retour"));
        assert!(html.contains("Envoyer la demande"));
    }

    #[test]
    fn leave_variant_renders_leave_fields() {
        let html = render_to_string(move || {
            let vm = provide_view_model();
            vm.select_variant(Some(RequestVariant::Leave));
            view! { <RequestsPanel on_switch=|_: ()| {} /> }
        });
        assert!(html.contains("Date de retour"));
        assert!(html.contains("Demi-journée"));
        assert!(html.contains("Congé sans solde"));
        assert!(!html.contains("Heure de départ"));
    }

    #[test]
    fn mission_variant_renders_outing_times_and_expense() {
        let html = render_to_string(move || {
            let vm = provide_view_model();
            vm.select_variant(Some(RequestVariant::Mission));
            view! { <RequestsPanel on_switch=|_: ()| {} /> }
        });
        assert!(html.contains("Heure de sortie"));
        assert!(html.contains("Frais de déplacement"));
    }

    #[test]
    fn resignation_hides_dates_and_confirms_distinctly() {
        let html = render_to_string(move || {
            let vm = provide_view_model();
            vm.select_variant(Some(RequestVariant::Resignation));
            view! { <RequestsPanel on_switch=|_: ()| {} /> }
        });
        assert!(!html.contains("Date de départ"));
        assert!(html.contains("lettre de démission"));

        let confirmed = render_to_string(move || {
            let vm = provide_view_model();
            vm.form.update(|form| {
                form.phase = SubmissionPhase::Succeeded;
                form.submitted_variant = Some(RequestVariant::Resignation);
            });
            view! { <RequestsPanel on_switch=|_: ()| {} /> }
        });
        assert!(confirmed.contains("Démission enregistrée"));
        assert!(confirmed.contains("Demander un document"));
    }
}
