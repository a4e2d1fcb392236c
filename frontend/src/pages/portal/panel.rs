use crate::api::ApiClient;
use crate::components::layout::Layout;
use crate::pages::{
    documents::{view_model::use_documents_view_model, DocumentsPanel},
    requests::{view_model::use_request_form_view_model, RequestsPanel},
};
use crate::state::{backend::use_backend_health, directory::use_employee_directory};
use leptos::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PortalTab {
    #[default]
    Requests,
    Documents,
}

impl PortalTab {
    pub const ALL: [PortalTab; 2] = [PortalTab::Requests, PortalTab::Documents];

    pub fn label(self) -> &'static str {
        match self {
            PortalTab::Requests => "Demandes",
            PortalTab::Documents => "Documents",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PortalTab::Requests => "fas fa-paper-plane",
            PortalTab::Documents => "fas fa-file-alt",
        }
    }
}

fn tab_class(active: bool) -> String {
    format!(
        "px-4 py-2 text-sm font-medium border-b-2 {}",
        if active {
            "border-action-primary-bg text-fg"
        } else {
            "border-transparent text-fg-muted"
        }
    )
}

/// Single page of the portal: one shared roster and backend probe, and the
/// two forms behind tabs. Leaving a confirmation screen through its switch
/// button starts that form over.
#[component]
pub fn PortalPage() -> impl IntoView {
    if use_context::<ApiClient>().is_none() {
        provide_context(ApiClient::new());
    }
    use_backend_health();
    use_employee_directory();
    let requests = use_request_form_view_model();
    let documents = use_documents_view_model();

    let active = create_rw_signal(PortalTab::default());

    let to_documents = Callback::new(move |_: ()| {
        requests.complete_confirmation();
        active.set(PortalTab::Documents);
    });
    let to_requests = Callback::new(move |_: ()| {
        documents.complete_confirmation();
        active.set(PortalTab::Requests);
    });

    view! {
        <Layout>
            <nav class="flex gap-2 mb-4 border-b border-border" role="tablist">
                {PortalTab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                type="button"
                                role="tab"
                                class=move || tab_class(active.get() == tab)
                                on:click=move |_| active.set(tab)
                            >
                                <i class=format!("{} mr-2", tab.icon())></i>
                                {tab.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <Show
                when=move || active.get() == PortalTab::Documents
                fallback=move || view! { <RequestsPanel on_switch=to_documents /> }
            >
                <DocumentsPanel on_switch=to_requests />
            </Show>
        </Layout>
    }
}
