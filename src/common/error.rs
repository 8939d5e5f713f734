use thiserror::Error;

/// Script registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A script folder named '{0}' already exists")]
    AlreadyExists(String),

    #[error("No script was selected")]
    NothingSelected,

    #[error("Script folder not found: {0}")]
    NotFound(String),

    #[error("No description available for '{0}'")]
    NoDescription(String),

    #[error("Not a usable source folder: {0}")]
    InvalidSource(String),
}

/// Tool configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid Docklight Scripting path: {0}")]
    InvalidPath(String),
}

/// Launch errors
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Docklight Scripting path is not configured")]
    NoToolConfigured,

    #[error("No script or project file found in '{0}'")]
    MissingFiles(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Helper trait for converting errors to Tauri-compatible String errors
pub trait ToTauriError {
    fn to_tauri_error(self) -> String;
}

impl<E: std::error::Error> ToTauriError for E {
    fn to_tauri_error(self) -> String {
        self.to_string()
    }
}
