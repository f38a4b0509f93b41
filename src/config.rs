//! Settings file, data root layout and the agency profile

use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use inquire::Text;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::AgencyProfile;

const DEFAULT_DATA_ROOT: &str = "~/Documents/Vouchers";

const DEFAULT_AGENCY_TEMPLATE: &str = include_str!("../agency.toml");

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub data_root: String,
    /// Program used to open exported vouchers instead of the platform default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            data_root: DEFAULT_DATA_ROOT.to_string(),
            browser: None,
        }
    }
}

impl AppSettings {
    pub fn root(&self) -> PathBuf {
        PathBuf::from(expand_home_dir(&self.data_root))
    }
}

/// Directory layout under the data root
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace { root: root.into() }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("output")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn agency_path(&self) -> PathBuf {
        self.root.join("agency.toml")
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "voucher-maker", "app")
        .ok_or_else(|| Error::Config("cannot determine the configuration directory".into()))?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join("settings.toml"))
}

pub fn load_settings_from(path: &Path) -> Result<Option<AppSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Saved settings, or the defaults when nothing was saved yet
pub fn load_settings() -> Result<AppSettings> {
    let path = get_config_path()?;
    let settings = load_settings_from(&path)?.unwrap_or_default();
    debug!("Using data root {}", settings.data_root);
    Ok(settings)
}

pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<()> {
    let toml_str = toml::to_string_pretty(settings)?;
    fs::write(path, toml_str)?;
    Ok(())
}

pub fn default_agency() -> Result<AgencyProfile> {
    Ok(toml::from_str(DEFAULT_AGENCY_TEMPLATE)?)
}

/// Agency profile from the data root, seeded from the built-in one on first use
pub fn load_agency(workspace: &Workspace) -> Result<AgencyProfile> {
    let path = workspace.agency_path();
    if path.exists() {
        let content = fs::read_to_string(&path)?;
        return Ok(toml::from_str(&content)?);
    }
    info!("Initializing default agency profile at {}", path.display());
    fs::create_dir_all(&workspace.root)?;
    fs::write(&path, DEFAULT_AGENCY_TEMPLATE)?;
    default_agency()
}

pub fn setup_config_wizard() -> anyhow::Result<AppSettings> {
    println!("\n⚙️  --- Configuration Setup ---");
    let path = get_config_path()?;
    let current = load_settings_from(&path)?.unwrap_or_default();

    let data_root = Text::new("Root Data Directory:")
        .with_default(&current.data_root)
        .prompt()?;
    let browser = Text::new("Browser command (leave empty for system default):")
        .with_default(current.browser.as_deref().unwrap_or(""))
        .prompt()?;

    let settings = AppSettings {
        data_root,
        browser: Some(browser.trim().to_string()).filter(|b| !b.is_empty()),
    };
    save_settings_to(&path, &settings)?;
    println!("✅ Settings saved to {}", path.display());
    Ok(settings)
}

pub fn expand_home_dir(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(base_dirs) = BaseDirs::new() {
            let home = base_dirs.home_dir().to_string_lossy();
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_agency_parses() {
        let agency = default_agency().unwrap();
        assert_eq!(agency.gstin, "22AAAAAA0000A1Z5");
        assert_eq!(agency.logo_path, "assets/logo.png");
    }

    #[test]
    fn agency_file_is_seeded_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(dir.path().join("data"));
        let first = load_agency(&ws).unwrap();
        assert!(ws.agency_path().exists());

        let edited = fs::read_to_string(ws.agency_path())
            .unwrap()
            .replace("8822665599", "0000000000");
        fs::write(ws.agency_path(), edited).unwrap();
        let second = load_agency(&ws).unwrap();
        assert_eq!(second.contact_number, "0000000000");
        assert_eq!(second.email, first.email);
    }

    #[test]
    fn settings_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        assert_eq!(load_settings_from(&path).unwrap(), None);

        let settings = AppSettings {
            data_root: "/srv/vouchers".into(),
            browser: Some("firefox".into()),
        };
        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), Some(settings));
    }

    #[test]
    fn settings_without_browser_key() {
        let s: AppSettings = toml::from_str(r#"data_root = "/tmp/v""#).unwrap();
        assert_eq!(s.browser, None);
        assert_eq!(s.root(), PathBuf::from("/tmp/v"));
    }

    #[test]
    fn home_expansion_leaves_absolute_paths() {
        assert_eq!(expand_home_dir("/var/data"), "/var/data");
        if BaseDirs::new().is_some() {
            assert!(!expand_home_dir("~/Documents").starts_with('~'));
        }
    }
}
