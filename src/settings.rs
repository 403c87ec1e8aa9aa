//! Editor settings persisted as JSON, and logging setup.
//!
//! Settings live in `<config dir>/progression-graph/settings.json`. Missing
//! fields take their default values, so older files keep loading.

use crate::constants::{
    DEFAULT_FPS, DEFAULT_SAVE_FILE, DEFAULT_UNIT_SIZE, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH,
};
use crate::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Editor command bound to a character key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewPoint,
    Save,
    Open,
    /// Register an image (nothing selected) or attach one (point selected)
    Image,
    StartLink,
    Text,
    CycleRank,
    CycleState,
    ResetZoom,
}

/// Character keys of the editor commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keymap {
    pub new_point: char,
    pub save: char,
    pub open: char,
    pub image: char,
    pub start_link: char,
    pub text: char,
    pub cycle_rank: char,
    pub cycle_state: char,
    pub reset_zoom: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            new_point: 'p',
            save: 's',
            open: 'o',
            image: 'i',
            start_link: 'l',
            text: 't',
            cycle_rank: 'r',
            cycle_state: 'c',
            reset_zoom: 'z',
        }
    }
}

impl Keymap {
    fn bindings(&self) -> [(char, Command); 9] {
        [
            (self.new_point, Command::NewPoint),
            (self.save, Command::Save),
            (self.open, Command::Open),
            (self.image, Command::Image),
            (self.start_link, Command::StartLink),
            (self.text, Command::Text),
            (self.cycle_rank, Command::CycleRank),
            (self.cycle_state, Command::CycleState),
            (self.reset_zoom, Command::ResetZoom),
        ]
    }

    /// Command bound to `c`; the first binding wins if a key is bound twice
    pub fn command_for(&self, c: char) -> Option<Command> {
        self.bindings()
            .into_iter()
            .find(|&(key, _)| key == c)
            .map(|(_, command)| command)
    }

    /// Key bound to `command`
    pub fn key_for(&self, command: Command) -> char {
        self.bindings()
            .into_iter()
            .find(|&(_, bound)| bound == command)
            .map_or('?', |(key, _)| key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Pixels per graph unit at zoom 1
    pub unit_size: f64,
    pub fps: u32,
    /// Save file opened at startup
    pub default_save_file: PathBuf,
    /// `tracing` filter directives, e.g. `"info"` or `"progression_graph=debug"`
    pub log_filter: String,
    pub keymap: Keymap,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            unit_size: DEFAULT_UNIT_SIZE,
            fps: DEFAULT_FPS,
            default_save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            log_filter: "info".to_string(),
            keymap: Keymap::default(),
        }
    }
}

impl EditorSettings {
    /// Load settings from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
        match parsed {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> GraphResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GraphError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| GraphError::io(path, std::io::Error::other(e)))?;
        fs::write(path, json).map_err(|e| GraphError::io(path, e))
    }
}

/// `<config dir>/progression-graph/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("progression-graph").join("settings.json"))
}

/// Install the global fmt subscriber with the given filter directives.
///
/// Invalid directives fall back to `info`. Calling this twice is harmless.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
