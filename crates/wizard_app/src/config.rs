use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use wizard_engine::WizardConfig;
use wizard_logging::wizard_info;

/// Loads the RON config at `path`. A missing file means "use defaults";
/// any other read or parse failure is an error.
pub(crate) fn load_config(path: &Path) -> Result<WizardConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            wizard_info!("No config at {:?}; using defaults", path);
            return Ok(WizardConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };

    let config: WizardConfig = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    wizard_info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, WizardConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wizard.ron");
        fs::write(
            &path,
            r#"(
                api: (step1_base_url: "http://step1.test"),
                search_debounce_ms: 150,
                draft_dir: "drafts",
            )"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.api.step1_base_url, "http://step1.test");
        assert_eq!(config.api.step2_base_url, "http://localhost:4002");
        assert_eq!(config.draft_dir, PathBuf::from("drafts"));
        assert_eq!(config.search_settings().debounce, Duration::from_millis(150));
        assert_eq!(
            config.runner_settings().autosave_delay,
            Duration::from_secs(2)
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wizard.ron");
        fs::write(&path, "(search_debounce_ms: \"soon\")").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
