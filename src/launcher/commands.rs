use crate::common::error::ToTauriError;
use crate::config;
use crate::launcher::model::{LaunchOutcome, RunMode};
use crate::launcher::process;
use crate::logging;
use crate::registry::storage::ScriptRegistry;

#[tauri::command]
pub fn launch_script(name: String, mode: RunMode) -> Result<LaunchOutcome, String> {
    let registry = ScriptRegistry::from_config().map_err(|e| e.to_tauri_error())?;
    let tool = config::load_tool_config()?;

    let outcome =
        process::launch(&registry, &tool, &name, mode).map_err(|e| e.to_tauri_error())?;

    log::info!("Launched script '{}' ({:?})", outcome.name, mode);
    let detail =
        serde_json::to_string(&outcome).unwrap_or_else(|_| outcome.command_line.clone());
    let _ = logging::write_domain_log("launch", &detail);
    Ok(outcome)
}
