use abrepeat::config::Config;
use owo_colors::OwoColorize;
use std::error::Error;
use std::process::Command;

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    println!("{}", "Current abrepeat configuration:".bold());
    println!("  default_volume: {}", config.default_volume);
    println!("  default_speed: {}", config.default_speed);
    println!("  step_seconds: {}", config.step_seconds);
    println!("  max_files: {}", config.max_files);
    println!("  show_tips: {}", config.show_tips);
    println!("  tip_interval_secs: {}", config.tip_interval_secs);
    println!("  log_file: {}", config.log_file);

    if !Config::exists()? {
        println!();
        println!(
            "{} No config file yet, showing defaults. Run 'abrepeat init' to create one.",
            "Note:".yellow()
        );
    }

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    println!("Configuration updated: {} = {}", key.cyan(), value);

    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    if !Config::exists()? {
        return Err("abrepeat not initialized. Run 'abrepeat init' first.".into());
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    // Validate the config after editing
    match Config::load() {
        Ok(_) => println!("Configuration saved successfully"),
        Err(e) => {
            return Err(format!("Configuration validation failed: {e}").into());
        }
    }

    Ok(())
}
