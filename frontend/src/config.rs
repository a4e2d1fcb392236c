use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CONFIRMATION_DELAY_MS: u64 = 4_000;

/// Raw runtime configuration as found in `env.js`, `window.__HR_PORTAL_CONFIG`
/// or `./config.json`. Every key is optional; missing keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "HEALTH_CHECK")]
    pub health_check: Option<bool>,
    #[serde(default, alias = "CONFIRMATION_DELAY_MS")]
    pub confirmation_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub health_check_enabled: bool,
    pub confirmation_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        RuntimeConfig::default().resolve()
    }
}

impl RuntimeConfig {
    pub fn resolve(self) -> AppConfig {
        let api_base_url = self
            .api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let delay_ms = self
            .confirmation_delay_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_CONFIRMATION_DELAY_MS);
        AppConfig {
            api_base_url,
            health_check_enabled: self.health_check.unwrap_or(true),
            confirmation_delay: Duration::from_millis(delay_ms),
        }
    }

    /// Fills keys missing from `self` with the ones from `other`.
    fn or(self, other: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(other.api_base_url),
            health_check: self.health_check.or(other.health_check),
            confirmation_delay_ms: self.confirmation_delay_ms.or(other.confirmation_delay_ms),
        }
    }

    fn is_complete(&self) -> bool {
        self.api_base_url.is_some()
            && self.health_check.is_some()
            && self.confirmation_delay_ms.is_some()
    }
}

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let json = js_sys::JSON::stringify(&any).ok()?.as_string()?;
    match serde_json::from_str::<RuntimeConfig>(&json) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("ignoring malformed window.{}: {}", name, err);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_global(_name: &str) -> Option<RuntimeConfig> {
    None
}

fn snapshot_from_globals() -> RuntimeConfig {
    // env.js (window.__HR_PORTAL_ENV) wins over window.__HR_PORTAL_CONFIG
    let env = read_global("__HR_PORTAL_ENV").unwrap_or_default();
    env.or(read_global("__HR_PORTAL_CONFIG").unwrap_or_default())
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        log::debug!("no config.json served (status {})", resp.status());
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache(config: AppConfig) -> AppConfig {
    let _ = APP_CONFIG.set(config);
    APP_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn await_config() -> AppConfig {
    if let Some(cached) = APP_CONFIG.get() {
        return cached.clone();
    }
    let mut runtime = snapshot_from_globals();
    if !runtime.is_complete() {
        if let Some(file) = fetch_runtime_config().await {
            runtime = runtime.or(file);
        }
    }
    let resolved = runtime.resolve();
    log::info!(
        "runtime config: api_base_url={} health_check={} confirmation_delay={:?}",
        resolved.api_base_url,
        resolved.health_check_enabled,
        resolved.confirmation_delay
    );
    cache(resolved)
}

pub async fn await_api_base_url() -> String {
    await_config().await.api_base_url
}

/// Synchronous view of the configuration; defaults until [`init`] completed.
pub fn current() -> AppConfig {
    APP_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn init() {
    let _ = await_config().await;
}
