use super::model::{LaunchFiles, ScriptEntry};
use crate::common::error::RegistryError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of Docklight script files.
pub const SCRIPT_EXT: &str = "pts";
/// Extension of Docklight project files.
pub const PROJECT_EXT: &str = "ptp";
/// Description file shown in the selection view.
pub const INFO_FILE: &str = "info.txt";

/// Script registry over one scripts root directory
pub struct ScriptRegistry {
    pub root_dir: PathBuf,
}

impl ScriptRegistry {
    /// Create a registry with a custom root
    pub fn new(root_dir: PathBuf) -> Result<Self, RegistryError> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Create a registry rooted at the configured scripts directory
    pub fn from_config() -> Result<Self, RegistryError> {
        let scripts_dir = crate::config::get_scripts_dir().map_err(RegistryError::NotFound)?;
        Self::new(scripts_dir)
    }

    fn entry_dir(&self, name: &str) -> PathBuf {
        self.root_dir.join(name)
    }

    /// Full rescan: immediate subdirectories only, sorted by name.
    /// The result is an owned snapshot; callers replace their copy wholly.
    pub fn scan(&self) -> Result<Vec<ScriptEntry>, RegistryError> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            let path = entry.path();
            // Stray files in the root are not scripts
            if !path.is_dir() {
                continue;
            }
            let name = match path.file_name().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            let files = launch_files_in(&path).unwrap_or_default();
            entries.push(ScriptEntry {
                name,
                path: path.to_string_lossy().to_string(),
                has_script: files.script.is_some(),
                has_project: files.project.is_some(),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Read the entry's info.txt description
    pub fn describe(&self, name: &str) -> Result<String, RegistryError> {
        let info_path = self.entry_dir(name).join(INFO_FILE);
        fs::read_to_string(info_path).map_err(|_| RegistryError::NoDescription(name.to_string()))
    }

    /// Resolve the script/project pair inside one entry's folder
    pub fn resolve_launch_files(&self, name: &str) -> Result<LaunchFiles, RegistryError> {
        let dir = self.entry_dir(name);
        if !dir.is_dir() {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        launch_files_in(&dir)
    }

    /// Copy an external folder into the registry under its basename
    pub fn add_entry(&self, source: &Path) -> Result<String, RegistryError> {
        if !source.is_dir() {
            return Err(RegistryError::InvalidSource(
                source.to_string_lossy().to_string(),
            ));
        }
        let name = source
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| RegistryError::InvalidSource(source.to_string_lossy().to_string()))?
            .to_string();

        let dest = self.entry_dir(&name);
        if dest.exists() {
            return Err(RegistryError::AlreadyExists(name));
        }

        copy_dir_recursive(source, &dest)?;
        Ok(name)
    }

    /// Delete an entry's folder
    pub fn remove_entry(&self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::NothingSelected);
        }
        let dir = self.entry_dir(name);
        if !dir.is_dir() {
            return Err(RegistryError::NotFound(name.to_string()));
        }
        fs::remove_dir_all(dir)?;
        Ok(())
    }
}

/// First file per extension, direct contents only. Stops once both are found.
fn launch_files_in(dir: &Path) -> Result<LaunchFiles, RegistryError> {
    let mut files = LaunchFiles::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path.extension().and_then(|s| s.to_str());
        if ext == Some(SCRIPT_EXT) && files.script.is_none() {
            files.script = Some(path.clone());
        } else if ext == Some(PROJECT_EXT) && files.project.is_none() {
            files.project = Some(path.clone());
        }

        if files.script.is_some() && files.project.is_some() {
            break;
        }
    }

    Ok(files)
}

/// Recursive copy of source into dest, preserving the folder layout
fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<(), RegistryError> {
    for entry in WalkDir::new(source).into_iter().filter_map(|e| e.ok()) {
        let relative = match entry.path().strip_prefix(source) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_entry(root: &Path, name: &str, files: &[&str]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"content").unwrap();
        }
    }

    #[test]
    fn test_scan_lists_subfolders_only() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();

        make_entry(temp.path(), "uart_smoke", &[]);
        make_entry(temp.path(), "modbus_poll", &[]);
        fs::write(temp.path().join("stray.txt"), b"not a script").unwrap();

        let entries = registry.scan().unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["modbus_poll", "uart_smoke"]);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();
        make_entry(temp.path(), "a", &["run.pts"]);
        make_entry(temp.path(), "b", &["setup.ptp"]);

        let first = registry.scan().unwrap();
        let second = registry.scan().unwrap();
        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(second.iter()) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.path, y.path);
        }
    }

    #[test]
    fn test_scan_flags_script_and_project_presence() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();
        make_entry(temp.path(), "full", &["run.pts", "setup.ptp"]);
        make_entry(temp.path(), "script_only", &["run.pts"]);
        make_entry(temp.path(), "neither", &["readme.md"]);

        let entries = registry.scan().unwrap();
        let by_name = |n: &str| entries.iter().find(|e| e.name == n).unwrap();

        assert!(by_name("full").has_script);
        assert!(by_name("full").has_project);
        assert!(by_name("script_only").has_script);
        assert!(!by_name("script_only").has_project);
        assert!(!by_name("neither").has_script);
        assert!(!by_name("neither").has_project);
    }

    #[test]
    fn test_describe_reads_info_file() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();
        make_entry(temp.path(), "documented", &[]);
        fs::write(temp.path().join("documented").join(INFO_FILE), "hello").unwrap();
        make_entry(temp.path(), "bare", &[]);

        assert_eq!(registry.describe("documented").unwrap(), "hello");
        assert!(matches!(
            registry.describe("bare"),
            Err(RegistryError::NoDescription(_))
        ));
        assert!(matches!(
            registry.describe("missing_entry"),
            Err(RegistryError::NoDescription(_))
        ));
    }

    #[test]
    fn test_resolve_launch_files() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();
        make_entry(
            temp.path(),
            "full",
            &["notes.txt", "run.pts", "setup.ptp", "info.txt"],
        );
        make_entry(temp.path(), "empty", &["notes.txt"]);

        let files = registry.resolve_launch_files("full").unwrap();
        assert!(files.script.unwrap().ends_with("run.pts"));
        assert!(files.project.unwrap().ends_with("setup.ptp"));

        let files = registry.resolve_launch_files("empty").unwrap();
        assert!(files.is_empty());

        assert!(matches!(
            registry.resolve_launch_files("missing"),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_ignores_nested_folders() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();
        make_entry(temp.path(), "nested", &[]);
        let inner = temp.path().join("nested").join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(inner.join("deep.pts"), b"x").unwrap();

        // Only the entry's direct contents count
        let files = registry.resolve_launch_files("nested").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_add_entry_copies_tree() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().join("root")).unwrap();

        let source = temp.path().join("incoming").join("relay_test");
        fs::create_dir_all(source.join("data")).unwrap();
        fs::write(source.join("run.pts"), b"script").unwrap();
        fs::write(source.join("data").join("frames.bin"), b"\x00\x01").unwrap();

        let name = registry.add_entry(&source).unwrap();
        assert_eq!(name, "relay_test");

        let copied = registry.root_dir.join("relay_test");
        assert!(copied.join("run.pts").is_file());
        assert!(copied.join("data").join("frames.bin").is_file());

        let names: Vec<String> = registry
            .scan()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["relay_test"]);
    }

    #[test]
    fn test_add_entry_rejects_duplicates() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().join("root")).unwrap();
        make_entry(&registry.root_dir, "relay_test", &["run.pts"]);

        let source = temp.path().join("incoming").join("relay_test");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("other.pts"), b"x").unwrap();

        let result = registry.add_entry(&source);
        assert!(matches!(result, Err(RegistryError::AlreadyExists(_))));
        // The existing entry is untouched
        assert!(registry.root_dir.join("relay_test").join("run.pts").is_file());
        assert!(!registry.root_dir.join("relay_test").join("other.pts").exists());
    }

    #[test]
    fn test_add_entry_rejects_non_directory_source() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().join("root")).unwrap();

        let file = temp.path().join("loose.pts");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            registry.add_entry(&file),
            Err(RegistryError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_remove_entry() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();
        make_entry(temp.path(), "doomed", &["run.pts"]);

        registry.remove_entry("doomed").unwrap();
        assert!(registry.scan().unwrap().is_empty());
        assert!(!temp.path().join("doomed").exists());
    }

    #[test]
    fn test_remove_entry_requires_selection() {
        let temp = TempDir::new().unwrap();
        let registry = ScriptRegistry::new(temp.path().to_path_buf()).unwrap();
        make_entry(temp.path(), "kept", &[]);

        assert!(matches!(
            registry.remove_entry(""),
            Err(RegistryError::NothingSelected)
        ));
        assert!(matches!(
            registry.remove_entry("absent"),
            Err(RegistryError::NotFound(_))
        ));
        // No mutation happened
        assert_eq!(registry.scan().unwrap().len(), 1);
    }
}
