use crate::api::{ApiClient, ApiError};
use leptos::*;
use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendStatus {
    #[default]
    Checking,
    Online,
    Offline,
    Error,
    /// Health probing switched off in the runtime config.
    Disabled,
}

impl BackendStatus {
    pub fn from_probe(result: &Result<StatusCode, ApiError>) -> Self {
        match result {
            Ok(status) if status.is_success() => BackendStatus::Online,
            Ok(_) => BackendStatus::Error,
            Err(_) => BackendStatus::Offline,
        }
    }

    pub fn allows_submission(self) -> bool {
        matches!(self, BackendStatus::Online | BackendStatus::Disabled)
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendStatus::Checking => "Vérification du serveur...",
            BackendStatus::Online => "Serveur connecté",
            BackendStatus::Offline => "Serveur injoignable",
            BackendStatus::Error => "Serveur en erreur",
            BackendStatus::Disabled => "",
        }
    }

    /// Error shown instead of letting a submission fail per attempt.
    pub fn unavailable_error(self) -> Option<ApiError> {
        match self {
            BackendStatus::Offline | BackendStatus::Error => Some(ApiError::backend_unavailable(
                "Le serveur RH est indisponible. Réessayez plus tard.",
            )),
            BackendStatus::Checking => Some(ApiError::backend_unavailable(
                "Vérification de la connexion au serveur en cours.",
            )),
            BackendStatus::Online | BackendStatus::Disabled => None,
        }
    }
}

pub async fn probe_backend(api: &ApiClient) -> BackendStatus {
    let result = api.check_health().await;
    let status = BackendStatus::from_probe(&result);
    match status {
        BackendStatus::Online => log::info!("backend health check succeeded"),
        _ => log::warn!("backend health check failed: {:?}", result),
    }
    status
}

#[derive(Clone, Copy)]
pub struct BackendHealth {
    status: RwSignal<BackendStatus>,
    probe_action: Action<(), BackendStatus>,
    enabled: bool,
}

impl BackendHealth {
    pub fn new(api: ApiClient, enabled: bool) -> Self {
        let api = store_value(api);
        let status = create_rw_signal(if enabled {
            BackendStatus::Checking
        } else {
            BackendStatus::Disabled
        });
        let probe_action = create_action(move |_: &()| {
            let api = api.get_value();
            async move {
                let result = probe_backend(&api).await;
                status.set(result);
                result
            }
        });

        let health = Self {
            status,
            probe_action,
            enabled,
        };
        if enabled {
            health.recheck();
        } else {
            log::debug!("backend health check disabled by configuration");
        }
        health
    }

    pub fn status(&self) -> Signal<BackendStatus> {
        self.status.into()
    }

    pub fn status_now(&self) -> BackendStatus {
        self.status.get_untracked()
    }

    pub fn checking(&self) -> Signal<bool> {
        self.probe_action.pending().into()
    }

    pub fn recheck(&self) {
        if !self.enabled || self.probe_action.pending().get_untracked() {
            return;
        }
        self.status.set(BackendStatus::Checking);
        self.probe_action.dispatch(());
    }
}

pub fn use_backend_health() -> BackendHealth {
    match use_context::<BackendHealth>() {
        Some(health) => health,
        None => {
            let api = use_context::<ApiClient>().unwrap_or_default();
            let health = BackendHealth::new(api, crate::config::current().health_check_enabled);
            provide_context(health);
            health
        }
    }
}
