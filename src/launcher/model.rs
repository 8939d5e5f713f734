use serde::{Deserialize, Serialize};

/// How Docklight is asked to run the selected script.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RunMode {
    /// Open the project and wait for the user to press start.
    #[default]
    Manual,
    /// Start the script immediately.
    Auto,
    /// Start immediately with the Docklight window hidden.
    HideWindow,
}

impl RunMode {
    /// Command-line flags passed to Docklight for this mode.
    pub fn flags(self) -> &'static str {
        match self {
            RunMode::Manual => "",
            RunMode::Auto => "-r",
            RunMode::HideWindow => "-r -i",
        }
    }
}

/// What a launch actually started, reported back to the UI.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LaunchOutcome {
    pub name: String,
    pub script: Option<String>,
    pub project: Option<String>,
    pub command_line: String,
}
