use std::path::Path;
use std::process::Command;

use crate::common::error::{LaunchError, RegistryError};
use crate::config::ToolConfig;
use crate::launcher::model::{LaunchOutcome, RunMode};
use crate::registry::storage::ScriptRegistry;

fn quote(token: &str) -> String {
    format!("\"{}\"", token)
}

/// Build the shell command: tool path, run-mode flags, project, script.
/// Paths are individually quoted; a missing file becomes a quoted empty
/// string, which Docklight treats as "no file".
pub fn build_command_line(
    tool_path: &str,
    mode: RunMode,
    project: Option<&Path>,
    script: Option<&Path>,
) -> String {
    let project = project.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
    let script = script.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();

    let mut parts = vec![quote(tool_path)];
    if !mode.flags().is_empty() {
        parts.push(mode.flags().to_string());
    }
    parts.push(quote(&project));
    parts.push(quote(&script));
    parts.join(" ")
}

/// Check preconditions and resolve everything needed for a launch,
/// without starting anything.
pub fn prepare_launch(
    registry: &ScriptRegistry,
    tool: &ToolConfig,
    name: &str,
    mode: RunMode,
) -> Result<LaunchOutcome, LaunchError> {
    if name.is_empty() {
        return Err(RegistryError::NothingSelected.into());
    }
    if !tool.is_configured() {
        return Err(LaunchError::NoToolConfigured);
    }

    let files = registry.resolve_launch_files(name)?;
    if files.is_empty() {
        return Err(LaunchError::MissingFiles(name.to_string()));
    }

    let command_line = build_command_line(
        &tool.path,
        mode,
        files.project.as_deref(),
        files.script.as_deref(),
    );

    Ok(LaunchOutcome {
        name: name.to_string(),
        script: files.script.map(|p| p.to_string_lossy().into_owned()),
        project: files.project.map(|p| p.to_string_lossy().into_owned()),
        command_line,
    })
}

/// Resolve files, build the command and start Docklight detached.
pub fn launch(
    registry: &ScriptRegistry,
    tool: &ToolConfig,
    name: &str,
    mode: RunMode,
) -> Result<LaunchOutcome, LaunchError> {
    let outcome = prepare_launch(registry, tool, name, mode)?;
    spawn_detached(&outcome.command_line)?;
    Ok(outcome)
}

/// Start a command line through the platform shell and forget the child.
/// The child's lifetime, exit status and output are intentionally unobserved.
pub fn spawn_detached(command_line: &str) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;

        Command::new("cmd")
            .args(["/C", command_line])
            .creation_flags(CREATE_NO_WINDOW)
            .spawn()?;
    }

    #[cfg(not(target_os = "windows"))]
    {
        Command::new("sh").args(["-c", command_line]).spawn()?;
    }

    Ok(())
}
