use crate::state::{
    backend::{use_backend_health, BackendStatus},
    directory::use_employee_directory,
};
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Portail RH"</h1>
                    <span class="text-sm text-fg-muted">"Demandes et documents en ligne"</span>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-4xl mx-auto py-6 sm:px-6 lg:px-8">
                <BackendStatusBanner/>
                {children()}
            </main>
        </div>
    }
}

/// Warns when the backend probe failed or the roster could not be loaded.
#[component]
pub fn BackendStatusBanner() -> impl IntoView {
    let health = use_backend_health();
    let directory = use_employee_directory();
    let status = health.status();
    let checking = health.checking();
    let roster_error = directory.load_error();

    let status_visible = move || should_show_status(status.get());
    let on_recheck = move |_| health.recheck();
    let on_reload = move |_| directory.reload();

    view! {
        <Show when=status_visible>
            <div class="mb-4">
                <div class=move || {
                    let tone = if status.get() == BackendStatus::Checking {
                        "bg-status-warning-bg border-status-warning-border text-status-warning-text"
                    } else {
                        "bg-status-error-bg border-status-error-border text-status-error-text"
                    };
                    format!("border px-4 py-3 rounded {}", tone)
                }>
                    <div class="flex flex-col gap-3 lg:flex-row lg:items-center lg:justify-between">
                        <div>
                            <p class="font-semibold">{move || status.get().label()}</p>
                            <p class="text-sm mt-1">{move || status_detail(status.get())}</p>
                        </div>
                        <Show when=move || status.get() != BackendStatus::Checking>
                            <button
                                class="inline-flex items-center justify-center px-4 py-2 border text-sm font-medium rounded disabled:opacity-60"
                                on:click=on_recheck
                                disabled=move || checking.get()
                            >
                                {move || if checking.get() { "Vérification..." } else { "Réessayer" }}
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </Show>
        <Show when=move || roster_error.with(Option::is_some)>
            <div class="mb-4 bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded">
                <div class="flex items-center justify-between gap-3">
                    <p class="text-sm">
                        {"Impossible de charger la liste des employés. "}
                        {move || roster_error.get().map(|err| err.error).unwrap_or_default()}
                    </p>
                    <button class="px-3 py-1 border rounded text-sm" on:click=on_reload>
                        "Réessayer"
                    </button>
                </div>
            </div>
        </Show>
    }
}

fn should_show_status(status: BackendStatus) -> bool {
    !matches!(status, BackendStatus::Online | BackendStatus::Disabled)
}

fn status_detail(status: BackendStatus) -> &'static str {
    match status {
        BackendStatus::Checking => "Connexion au serveur RH en cours. L'envoi sera possible dans un instant.",
        BackendStatus::Offline => "Le serveur RH ne répond pas. L'envoi des demandes est désactivé.",
        BackendStatus::Error => "Le serveur RH signale une erreur. L'envoi des demandes est désactivé.",
        BackendStatus::Online | BackendStatus::Disabled => "",
    }
}
