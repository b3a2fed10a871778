// Configuration loading and parsing (league.toml, site.toml, credentials.toml).

use crate::model::{Game, Team, TeamDraftCapital};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueData,
    pub site: SiteSettings,
    pub seasons: Vec<SeasonConfig>,
    pub credentials: CredentialsConfig,
}

impl Config {
    pub fn season(&self, id: u32) -> Option<&SeasonConfig> {
        self.seasons.iter().find(|s| s.id == id)
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// The fallback data set: what the site shows when no sheet is published.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueData {
    pub league: LeagueInfo,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub schedule: Vec<Game>,
    #[serde(default)]
    pub draft_capital: Vec<TeamDraftCapital>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueInfo {
    pub name: String,
}

// ---------------------------------------------------------------------------
// site.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire site.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SiteFile {
    http: HttpSettings,
    sheets: SheetSettings,
    real_sports: RealSportsSettings,
    tui: TuiSettings,
    #[serde(default)]
    seasons: Vec<SeasonConfig>,
}

/// The public site settings assembled from the site.toml sections.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub http: HttpSettings,
    pub sheets: SheetSettings,
    pub real_sports: RealSportsSettings,
    pub tui: TuiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetSettings {
    pub timeout_ms: u64,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RealSportsSettings {
    pub base_url: String,
    pub origin: String,
    pub version: String,
    pub device_type: String,
    pub timeout_ms: u64,
    pub cache_ttl_secs: u64,
    pub score_batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TuiSettings {
    pub refresh_secs: u64,
}

/// Google Sheets tab ids for one season's published spreadsheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetGids {
    pub standings: u64,
    pub schedule: u64,
    pub rosters: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonConfig {
    pub id: u32,
    pub label: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub description: String,
    /// Published sheet URL up to (not including) `?gid=`. Empty disables sheets.
    #[serde(default, alias = "sheet_base_url")]
    pub sheet_base_url: String,
    /// Calendar year the `M/D` game dates fall in.
    pub year: i32,
    #[serde(default)]
    pub gids: SheetGids,
}

impl SeasonConfig {
    pub fn sheet_enabled(&self) -> bool {
        !self.sheet_base_url.trim().is_empty()
    }

    pub fn info(&self) -> SeasonInfo<'_> {
        SeasonInfo {
            id: self.id,
            label: &self.label,
            locked: self.locked,
            description: &self.description,
            year: self.year,
        }
    }
}

/// Public view of a season; sheet locations stay server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonInfo<'a> {
    pub id: u32,
    pub label: &'a str,
    pub locked: bool,
    pub description: &'a str,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub real_auth_info: Option<String>,
    pub real_device_uuid: Option<String>,
}

impl CredentialsConfig {
    /// Environment variables take precedence over values read from file.
    fn apply_env(mut self) -> Self {
        if let Some(v) = non_empty_env("REAL_AUTH_INFO") {
            self.real_auth_info = Some(v);
        }
        if let Some(v) = non_empty_env("REAL_DEVICE_UUID") {
            self.real_device_uuid = Some(v);
        }
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate configuration from already-read file contents.
///
/// Paths are used only for error messages.
pub fn parse_config(
    league_text: &str,
    site_text: &str,
    credentials: CredentialsConfig,
) -> Result<Config, ConfigError> {
    parse_with_paths(
        league_text,
        Path::new("league.toml"),
        site_text,
        Path::new("site.toml"),
        credentials,
    )
}

fn parse_with_paths(
    league_text: &str,
    league_path: &Path,
    site_text: &str,
    site_path: &Path,
    credentials: CredentialsConfig,
) -> Result<Config, ConfigError> {
    let mut league: LeagueData =
        toml::from_str(league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.to_path_buf(),
            source: e,
        })?;
    for (i, game) in league.schedule.iter_mut().enumerate() {
        game.id = i;
    }

    let site_file: SiteFile = toml::from_str(site_text).map_err(|e| ConfigError::ParseError {
        path: site_path.to_path_buf(),
        source: e,
    })?;

    let config = Config {
        league,
        site: SiteSettings {
            http: site_file.http,
            sheets: site_file.sheets,
            real_sports: site_file.real_sports,
            tui: site_file.tui,
        },
        seasons: site_file.seasons,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Load and validate configuration from `config/league.toml`,
/// `config/site.toml`, and (optionally) `config/credentials.toml`,
/// all relative to the given `base_dir`.
///
/// This does not auto-copy defaults; `load_config()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;

    let site_path = config_dir.join("site.toml");
    let site_text = read_file(&site_path)?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials: CredentialsConfig = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    parse_with_paths(
        &league_text,
        &league_path,
        &site_text,
        &site_path,
        credentials.apply_env(),
    )
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            // Never overwrite a user's edited copy.
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Loads config relative to the current working directory, copying any
/// missing default files first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;

    if league.teams.is_empty() {
        return Err(invalid("teams", "at least one team is required"));
    }

    let mut names = HashSet::new();
    for team in &league.teams {
        if team.name.trim().is_empty() {
            return Err(invalid("teams.name", "must not be empty"));
        }
        if !names.insert(team.name.as_str()) {
            return Err(invalid(
                "teams.name",
                format!("duplicate team `{}`", team.name),
            ));
        }
    }

    for game in &league.schedule {
        for m in &game.matchups {
            for name in [&m.home, &m.away] {
                if !names.contains(name.as_str()) {
                    return Err(invalid(
                        "schedule.matchups",
                        format!("unknown team `{name}` in {}", game.label),
                    ));
                }
            }
        }
    }

    for capital in &league.draft_capital {
        if !names.contains(capital.team.as_str()) {
            return Err(invalid(
                "draft_capital.team",
                format!("unknown team `{}`", capital.team),
            ));
        }
        for pick in capital.seasons.iter().flat_map(|s| &s.picks) {
            if !names.contains(pick.origin.as_str()) {
                return Err(invalid(
                    "draft_capital.picks.origin",
                    format!("unknown team `{}`", pick.origin),
                ));
            }
        }
    }

    if config.seasons.is_empty() {
        return Err(invalid("seasons", "at least one season is required"));
    }
    let mut ids = HashSet::new();
    for season in &config.seasons {
        if !ids.insert(season.id) {
            return Err(invalid(
                "seasons.id",
                format!("duplicate season id {}", season.id),
            ));
        }
    }

    let site = &config.site;
    if site.real_sports.score_batch_size == 0 {
        return Err(invalid("real_sports.score_batch_size", "must be > 0"));
    }
    let timeouts: &[(&str, u64)] = &[
        ("sheets.timeout_ms", site.sheets.timeout_ms),
        ("real_sports.timeout_ms", site.real_sports.timeout_ms),
    ];
    for (name, val) in timeouts {
        if *val == 0 {
            return Err(invalid(*name, "must be > 0"));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
