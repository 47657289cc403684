use abrepeat::config::Config;
use owo_colors::OwoColorize;
use std::error::Error;

pub fn handle_init() -> Result<(), Box<dyn Error>> {
    if Config::exists()? {
        return Err(
            "abrepeat is already initialized. Use 'abrepeat config set <key> <value>' to change settings."
                .into(),
        );
    }

    let config = Config::new();
    config.save()?;

    println!("{} abrepeat initialized", "✓".green());
    println!(
        "Configuration saved to: {}",
        Config::config_path()?.display().cyan()
    );
    println!("Player log: {}", config.log_path()?.display());

    Ok(())
}
