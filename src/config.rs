use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::{ConfigError, ToTauriError};
use crate::logging;

/// Filename suffix the configured executable must carry.
pub const TOOL_EXE_SUFFIX: &str = "Docklight_Scripting.exe";

/// Stored location of the Docklight Scripting executable.
/// An empty path means the tool has not been configured yet.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub path: String,
    pub valid: bool,
}

impl ToolConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.valid && !self.path.is_empty()
    }
}

/// Get the application root directory
pub fn get_app_root_dir() -> Result<PathBuf, String> {
    // 1. Portable Mode Check (Highest Priority)
    // If a file named "portable" exists next to the executable, use that directory.
    // This keeps the scripts, config and logs together (e.g. on USB drives).
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if exe_dir.join("portable").exists() {
                return Ok(exe_dir.to_path_buf());
            }
        }
    }

    // In Debug mode, keep using the executable directory (Portable/Dev experience)
    if cfg!(debug_assertions) {
        let exe_path =
            std::env::current_exe().map_err(|e| format!("Failed to get exe path: {}", e))?;
        let exe_dir = exe_path.parent().ok_or("Failed to get exe directory")?;
        return Ok(exe_dir.to_path_buf());
    }

    // In Release mode, use standard platform-specific user data directories
    #[cfg(target_os = "linux")]
    {
        let home =
            std::env::var("HOME").map_err(|_| "Failed to resolve HOME variable".to_string())?;
        let path = PathBuf::from(home).join(".config").join("script-launcher");
        if !path.exists() {
            let _ = fs::create_dir_all(&path);
        }
        Ok(path)
    }

    #[cfg(target_os = "macos")]
    {
        let home =
            std::env::var("HOME").map_err(|_| "Failed to resolve HOME variable".to_string())?;
        let path = PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("script-launcher");
        if !path.exists() {
            let _ = fs::create_dir_all(&path);
        }
        Ok(path)
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            let path = PathBuf::from(appdata).join("script-launcher");
            if !path.exists() {
                let _ = fs::create_dir_all(&path);
            }
            return Ok(path);
        }
        // Fallback to exe dir if APPDATA missing (unlikely)
        let exe_path =
            std::env::current_exe().map_err(|e| format!("Failed to get exe path: {}", e))?;
        let exe_dir = exe_path.parent().ok_or("Failed to get exe directory")?;
        Ok(exe_dir.to_path_buf())
    }

    // Fallback for other OS
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        let exe_path =
            std::env::current_exe().map_err(|e| format!("Failed to get exe path: {}", e))?;
        let exe_dir = exe_path.parent().ok_or("Failed to get exe directory")?;
        Ok(exe_dir.to_path_buf())
    }
}

/// Get the configuration directory: config/
pub fn get_config_dir() -> Result<PathBuf, String> {
    let root = get_app_root_dir()?;
    let config_dir = root.join("config");

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    Ok(config_dir)
}

/// Get the scripts root directory: scripts/ (one subfolder per test script)
pub fn get_scripts_dir() -> Result<PathBuf, String> {
    let root = get_app_root_dir()?;
    let scripts_dir = root.join("scripts");

    if !scripts_dir.exists() {
        fs::create_dir_all(&scripts_dir)
            .map_err(|e| format!("Failed to create scripts directory: {}", e))?;
    }
    Ok(scripts_dir)
}

fn get_tool_path_file() -> Result<PathBuf, String> {
    Ok(get_config_dir()?.join("docklight_path.txt"))
}

/// Check a candidate path points at an existing Docklight Scripting executable.
pub fn is_valid_tool_path(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.ends_with(TOOL_EXE_SUFFIX) && Path::new(candidate).is_file()
}

/// Read the stored tool path. A missing or invalid stored path degrades to
/// an empty config, never an error.
pub fn read_tool_path(file: &Path) -> ToolConfig {
    let stored = match fs::read_to_string(file) {
        Ok(content) => content.trim().to_string(),
        Err(_) => return ToolConfig::empty(),
    };

    if is_valid_tool_path(&stored) {
        ToolConfig {
            path: stored,
            valid: true,
        }
    } else {
        if !stored.is_empty() {
            log::warn!("Stored Docklight path is no longer valid: {}", stored);
        }
        ToolConfig::empty()
    }
}

/// Validate a candidate path and overwrite the stored one.
/// Replacing an already configured path re-validates the same way.
pub fn write_tool_path(candidate: &str, file: &Path) -> Result<ToolConfig, ConfigError> {
    let candidate = candidate.trim();
    if !is_valid_tool_path(candidate) {
        return Err(ConfigError::InvalidPath(candidate.to_string()));
    }

    fs::write(file, candidate)?;
    Ok(ToolConfig {
        path: candidate.to_string(),
        valid: true,
    })
}

#[tauri::command]
pub fn load_tool_config() -> Result<ToolConfig, String> {
    let file = get_tool_path_file()?;
    Ok(read_tool_path(&file))
}

#[tauri::command]
pub fn save_tool_config(path: String) -> Result<ToolConfig, String> {
    let file = get_tool_path_file()?;
    let config = write_tool_path(&path, &file).map_err(|e| e.to_tauri_error())?;
    let _ = logging::write_domain_log("audit", &format!("Updated Docklight path: {}", config.path));
    Ok(config)
}

#[tauri::command]
pub fn open_config_dir() -> Result<(), String> {
    let path = get_config_dir()?;
    open_directory(path)
}

#[tauri::command]
pub fn open_logs_dir() -> Result<(), String> {
    let root = get_app_root_dir()?;
    let path = root.join("logs");
    if !path.exists() {
        fs::create_dir_all(&path).map_err(|e| e.to_string())?;
    }
    open_directory(path)
}

pub(crate) fn open_directory(path: std::path::PathBuf) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(path)
            .spawn()
            .map_err(|e| format!("Failed to open directory: {}", e))?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .map_err(|e| format!("Failed to open directory: {}", e))?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .map_err(|e| format!("Failed to open directory: {}", e))?;
    }

    Ok(())
}
