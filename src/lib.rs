mod common;
mod config;
mod launcher;
mod logging;
mod registry;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize Specialized Logging (Crash, Audit, Launch)
    if let Ok(root_dir) = config::get_app_root_dir() {
        logging::init_log_dir(root_dir);
        logging::setup_panic_hook();
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            // When a second instance is launched, focus the existing window
            let windows = app.webview_windows();
            if let Some(window) = windows.values().next() {
                let _ = window.set_focus();
                let _ = window.unminimize();
            }
        }))
        .plugin(tauri_plugin_process::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .level_for("script_launcher_lib", log::LevelFilter::Debug)
                .targets([
                    tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Stdout),
                    tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Folder {
                        path: config::get_app_root_dir().unwrap_or_default().join("logs"),
                        file_name: Some("app".to_string()),
                    }),
                ])
                .rotation_strategy(tauri_plugin_log::RotationStrategy::KeepOne)
                .timezone_strategy(tauri_plugin_log::TimezoneStrategy::UseLocal)
                .build(),
        )
        .plugin(tauri_plugin_fs::init())
        .setup(|_app| {
            // Make sure the scripts root exists before the first scan
            match config::get_scripts_dir() {
                Ok(dir) => log::info!("Scripts root: {:?}", dir),
                Err(e) => log::warn!("Could not prepare scripts root: {}", e),
            }

            match config::load_tool_config() {
                Ok(tool) if tool.is_configured() => {
                    log::info!("Docklight Scripting path: {}", tool.path)
                }
                _ => log::info!("Docklight Scripting path not configured yet"),
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            registry::commands::list_scripts,
            registry::commands::describe_script,
            registry::commands::add_script_folder,
            registry::commands::remove_script_folder,
            registry::commands::open_scripts_dir,
            launcher::commands::launch_script,
            config::load_tool_config,
            config::save_tool_config,
            config::open_config_dir,
            config::open_logs_dir,
            common::utils::get_system_info,
            logging::log_domain_event,
            logging::get_logs,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
