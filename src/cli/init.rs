//! Init command implementation
//!
//! Scaffolds a `bistro.toml` (and a `.env.example`) in the target directory.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// bistro.toml already exists
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// API base URL written into the config
    pub base_url: String,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner("Init", "Writing starter configuration");

    let base_path = &config.path;
    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    let config_path = base_path.join("bistro.toml");
    if config_path.exists() && !config.force {
        output.warning("bistro.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let toml_content = generate_bistro_toml(&config);
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create bistro.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "bistro.toml");

    let env_example_path = base_path.join(".env.example");
    if env_example_path.exists() && !config.force {
        output.skipped(".env.example", "already exists");
    } else if let Err(e) = write_file(&env_example_path, &generate_env_example(), config.force) {
        output.warning(&format!("Failed to create .env.example: {}", e));
    } else {
        output.created("env", ".env.example");
    }

    output.complete("Bistro Admin configured");
    output.header("Next Steps");
    output.info("Check the API URL in bistro.toml, then open the dashboard:");
    output.command("bistro-admin dashboard");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(()); // Skip existing files unless force is true
    }
    fs::write(path, content)
}

fn generate_bistro_toml(config: &InitConfig) -> String {
    format!(
        r#"# Bistro Admin configuration

[api]
# Every API path (/menu, /orders, ...) is resolved against this URL.
# Overridden by --api-url or BISTRO_API_URL.
base_url = "{}"

[logging]
# trace, debug, info, warn, error (RUST_LOG takes precedence)
level = "info"
# pretty or json
format = "pretty"
"#,
        config.base_url
    )
}

fn generate_env_example() -> String {
    r#"# Bistro Admin Environment Variables
# Copy this file to .env and adjust.

# Optional: API base URL (overrides bistro.toml)
# BISTRO_API_URL=http://127.0.0.1:5000/api

# Optional: Logging filter
RUST_LOG=info,bistro=debug
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::BistroConfig;
    use tempfile::TempDir;

    fn create_test_config(temp_dir: &TempDir, force: bool) -> InitConfig {
        InitConfig {
            path: temp_dir.path().to_path_buf(),
            force,
            base_url: "http://10.1.1.1:5000/api".to_string(),
        }
    }

    #[test]
    fn test_generated_toml_parses() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let content = generate_bistro_toml(&create_test_config(&temp_dir, false));
        let config = BistroConfig::from_toml(&content).expect("generated config should parse");
        assert_eq!(config.api.base_url, "http://10.1.1.1:5000/api");
    }

    #[test]
    fn test_write_file_skips_existing_without_force() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, "original").expect("Failed to write");

        write_file(&file_path, "new content", false).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "original");

        write_file(&file_path, "new content", true).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }

    #[test]
    fn test_run_creates_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = run(create_test_config(&temp_dir, false), &Output::no_color());

        assert!(matches!(result, InitResult::Success));
        assert!(temp_dir.path().join("bistro.toml").exists());
        assert!(temp_dir.path().join(".env.example").exists());
    }

    #[test]
    fn test_run_already_exists_without_force() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("bistro.toml"), "existing").expect("Failed to write");

        let result = run(create_test_config(&temp_dir, false), &Output::no_color());
        assert!(matches!(result, InitResult::AlreadyExists));
    }

    #[test]
    fn test_run_force_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("bistro.toml"), "existing").expect("Failed to write");

        let result = run(create_test_config(&temp_dir, true), &Output::no_color());
        assert!(matches!(result, InitResult::Success));

        let content =
            fs::read_to_string(temp_dir.path().join("bistro.toml")).expect("Failed to read");
        assert!(content.contains("[api]"));
        assert!(!content.contains("existing"));
    }
}
