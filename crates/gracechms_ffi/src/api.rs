//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the shell controller to Dart via FRB as sync, JSON-bearing calls.
//! - Own the single process-wide [`AppController`].
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every shell call returns a [`ShellResponse`]; failures set `ok=false`.

use gracechms_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppController, Effect, ShellConfig, UiAction,
};
use log::{error, warn};
use std::sync::{Mutex, MutexGuard};

static SHELL: Mutex<Option<AppController>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Response envelope for every shell call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellResponse {
    /// Whether the call was applied.
    pub ok: bool,
    /// Human-readable diagnostics; empty on success.
    pub message: String,
    /// Serialized `ShellView` after the call (empty when unavailable).
    pub view_json: String,
    /// Serialized effect list the host must perform (`[]` when none).
    pub effects_json: String,
}

impl ShellResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            view_json: String::new(),
            effects_json: "[]".to_string(),
        }
    }
}

/// Builds the controller from `GRACECHMS_*` variables and renders `location`.
///
/// # FFI contract
/// - Sync call; opens the store file on first use.
/// - Repeated calls keep the existing controller and re-render nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_start(location: String) -> ShellResponse {
    start_with(&ShellConfig::from_env(), &location)
}

fn start_with(config: &ShellConfig, location: &str) -> ShellResponse {
    let mut guard = lock_shell();
    if guard.is_none() {
        match AppController::from_config(config) {
            Ok(app) => *guard = Some(app),
            Err(err) => {
                error!("event=shell_start module=ffi status=error error={err}");
                return ShellResponse::failure(format!("shell_start failed: {err}"));
            }
        }
    }
    with_started(&mut guard, "shell_start", |app| {
        app.start(location);
        Vec::new()
    })
}

/// Forwards a location change (e.g. a new hash fragment).
#[flutter_rust_bridge::frb(sync)]
pub fn shell_navigate(location: String) -> ShellResponse {
    let mut guard = lock_shell();
    with_started(&mut guard, "shell_navigate", |app| {
        app.on_location_change(&location);
        Vec::new()
    })
}

/// Applies one JSON-encoded `UiAction`, e.g. `{"type":"filter","query":"ann"}`.
///
/// # FFI contract
/// - Malformed JSON returns `ok=false` and leaves state untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_dispatch(action_json: String) -> ShellResponse {
    let action: UiAction = match serde_json::from_str(&action_json) {
        Ok(action) => action,
        Err(err) => {
            warn!("event=shell_dispatch module=ffi status=rejected reason=invalid_action");
            return ShellResponse::failure(format!("shell_dispatch failed: invalid action: {err}"));
        }
    };
    let mut guard = lock_shell();
    with_started(&mut guard, "shell_dispatch", |app| app.dispatch(action))
}

/// Loads the reference page the current screen is waiting for, if any.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_settle_fetch() -> ShellResponse {
    let mut guard = lock_shell();
    with_started(&mut guard, "shell_settle_fetch", |app| {
        app.settle_pending_fetch();
        Vec::new()
    })
}

/// Returns the current view without changing anything.
#[flutter_rust_bridge::frb(sync)]
pub fn shell_view() -> ShellResponse {
    let mut guard = lock_shell();
    with_started(&mut guard, "shell_view", |_| Vec::new())
}

fn lock_shell() -> MutexGuard<'static, Option<AppController>> {
    SHELL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_started(
    guard: &mut MutexGuard<'static, Option<AppController>>,
    operation: &str,
    f: impl FnOnce(&mut AppController) -> Vec<Effect>,
) -> ShellResponse {
    let Some(app) = guard.as_mut() else {
        return ShellResponse::failure(format!("{operation} failed: shell not started"));
    };
    let effects = f(app);

    let view_json = match serde_json::to_string(&app.view()) {
        Ok(json) => json,
        Err(err) => return ShellResponse::failure(format!("{operation} failed: {err}")),
    };
    let effects_json = match serde_json::to_string(&effects) {
        Ok(json) => json,
        Err(err) => return ShellResponse::failure(format!("{operation} failed: {err}")),
    };
    ShellResponse {
        ok: true,
        message: String::new(),
        view_json,
        effects_json,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, shell_dispatch, shell_navigate, shell_settle_fetch,
        start_with,
    };
    use gracechms_core::ShellConfig;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn malformed_action_is_rejected() {
        let response = shell_dispatch("{\"type\":\"unknown\"}".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid action"));
    }

    #[test]
    fn shell_round_trip_renders_views_as_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ShellConfig {
            db_path: dir.path().join("shell.sqlite3"),
            reference_dir: dir.path().to_path_buf(),
            ..ShellConfig::default()
        };

        let started = start_with(&config, "#/");
        assert!(started.ok, "{}", started.message);
        assert!(config.db_path.exists());
        assert!(started.view_json.contains("\"$0.00\""));

        let members = shell_navigate("#/members".to_string());
        assert!(members.ok, "{}", members.message);
        assert!(members.view_json.contains("members-list"));

        let filtered = shell_dispatch("{\"type\":\"filter\",\"query\":\"zz-no-match\"}".to_string());
        assert!(filtered.ok, "{}", filtered.message);
        assert_eq!(filtered.effects_json, "[]");

        let settled = shell_settle_fetch();
        assert!(settled.ok, "{}", settled.message);
    }
}
