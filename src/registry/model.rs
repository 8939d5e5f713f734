use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One selectable script folder under the scripts root.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScriptEntry {
    pub name: String,
    pub path: String,
    pub has_script: bool,
    pub has_project: bool,
}

/// The companion files Docklight consumes for one launch.
/// Either may be absent; the tool itself decides what a partial pair means.
#[derive(Debug, Clone, Default)]
pub struct LaunchFiles {
    pub script: Option<PathBuf>,
    pub project: Option<PathBuf>,
}

impl LaunchFiles {
    pub fn is_empty(&self) -> bool {
        self.script.is_none() && self.project.is_none()
    }
}
