use anyhow::{Context, Result};
use cinescout_client::{config, Config};
use toml_edit::{value, DocumentMut};

const VALID_KEYS: &str = "base_url, image_base_url, min_loading_ms";

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    let config_path = config::config_file_path();

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  base_url: {}", config.base_url);
    println!("  image_base_url: {}", config.image_base_url);
    println!("  min_loading_ms: {}", config.min_loading_ms);
    match &config.logging {
        Some(logging) => println!("  logging: {:?}", logging),
        None => println!("  logging: <not set>"),
    }

    println!("\nPriority: CLI args > ENV vars (CINESCOUT_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or print the config file when no key is given.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    let Some(key) = key else {
        let config_path = config::config_file_path();
        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'cinescout config init' to create it.");
        }
        return Ok(());
    };

    println!("{}", config_value(config, &key)?);
    Ok(())
}

fn config_value(config: &Config, key: &str) -> Result<String> {
    match key {
        "base_url" => Ok(config.base_url.clone()),
        "image_base_url" => Ok(config.image_base_url.clone()),
        "min_loading_ms" => Ok(config.min_loading_ms.to_string()),
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    }
}

/// Set a config value in the config file, keeping its comments.
pub fn set_config(key: &str, new_value: &str) -> Result<()> {
    let config_path = config::config_file_path();
    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path)
        .context("Failed to read config file")?;
    let updated = update_document(&contents, key, new_value)?;
    std::fs::write(&config_path, updated)
        .context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, new_value);
    println!("  in {}", config_path.display());

    Ok(())
}

fn update_document(contents: &str, key: &str, new_value: &str) -> Result<String> {
    let mut doc = contents
        .parse::<DocumentMut>()
        .context("Config file is not valid TOML")?;

    match key {
        "base_url" | "image_base_url" => {
            doc[key] = value(new_value);
        }
        "min_loading_ms" => {
            let millis: i64 = new_value
                .parse()
                .with_context(|| format!("min_loading_ms must be a whole number, got {:?}", new_value))?;
            anyhow::ensure!(millis >= 0, "min_loading_ms must not be negative");
            doc[key] = value(millis);
        }
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    }

    Ok(doc.to_string())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure cinescout.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
