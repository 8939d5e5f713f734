use std::path::Path;

use crate::common::error::{RegistryError, ToTauriError};
use crate::config;
use crate::logging;
use crate::registry::model::ScriptEntry;
use crate::registry::storage::ScriptRegistry;

/// Placeholder shown in the description pane when an entry has no info file.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "Error: no info file found";

#[tauri::command]
pub fn list_scripts() -> Result<Vec<ScriptEntry>, String> {
    let registry = ScriptRegistry::from_config().map_err(|e| e.to_tauri_error())?;

    registry.scan().map_err(|e| e.to_tauri_error())
}

#[tauri::command]
pub fn describe_script(name: String) -> Result<String, String> {
    let registry = ScriptRegistry::from_config().map_err(|e| e.to_tauri_error())?;

    match registry.describe(&name) {
        Ok(text) => Ok(text),
        // A missing info file is not an error, just an empty pane
        Err(RegistryError::NoDescription(_)) => Ok(NO_DESCRIPTION_PLACEHOLDER.to_string()),
        Err(e) => Err(e.to_tauri_error()),
    }
}

#[tauri::command]
pub fn add_script_folder(source: String) -> Result<Vec<ScriptEntry>, String> {
    let registry = ScriptRegistry::from_config().map_err(|e| e.to_tauri_error())?;

    let name = registry
        .add_entry(Path::new(&source))
        .map_err(|e| e.to_tauri_error())?;

    let _ = logging::write_domain_log("audit", &format!("Added script folder: {}", name));
    registry.scan().map_err(|e| e.to_tauri_error())
}

#[tauri::command]
pub fn remove_script_folder(name: String) -> Result<Vec<ScriptEntry>, String> {
    let registry = ScriptRegistry::from_config().map_err(|e| e.to_tauri_error())?;

    registry
        .remove_entry(&name)
        .map_err(|e| e.to_tauri_error())?;

    let _ = logging::write_domain_log("audit", &format!("Removed script folder: {}", name));
    registry.scan().map_err(|e| e.to_tauri_error())
}

#[tauri::command]
pub fn open_scripts_dir() -> Result<(), String> {
    let path = config::get_scripts_dir()?;
    config::open_directory(path)
}
