use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use richfind_search::{PatternKind, ScanMode, SearchConfig};

const DEFAULT_SNIPPET_RADIUS: usize = 60;
const MIN_SNIPPET_RADIUS: usize = 10;
const MAX_SNIPPET_RADIUS: usize = 500;
const DEFAULT_SLOP: usize = 0;
const MAX_SLOP: usize = 32;
const DEFAULT_YIELD_INTERVAL_MS: u64 = 1000;
const MIN_YIELD_INTERVAL_MS: u64 = 10;
const DEFAULT_LINES_PER_PAGE: usize = 50;
const DEFAULT_CASE_SENSITIVE: bool = false;

const DEFAULT_CONFIG: &str = "# Search defaults\n\
# Query kind when a command does not name one: literal, wildcard, regex\n\
pattern_kind = literal\n\
# Scan window when a command does not name one: all, forward, backward, selection\n\
scan_mode = all\n\
# Match upper and lower case exactly\n\
# case_sensitive = false\n\
# Words allowed between query terms (0 = exact phrase, max 32)\n\
# slop = 0\n\
\n\
# Results\n\
# Characters of context on each side of a match (10-500)\n\
snippet_radius = 60\n\
# Lines per page used for page numbers\n\
# lines_per_page = 50\n\
\n\
# Advanced\n\
# Milliseconds between host yields during replace all (min 10)\n\
# yield_interval_ms = 1000\n";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub snippet_radius: usize,
    pub case_sensitive: bool,
    pub pattern_kind: PatternKind,
    pub scan_mode: ScanMode,
    pub slop: usize,
    pub yield_interval_ms: u64,
    pub lines_per_page: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
            case_sensitive: DEFAULT_CASE_SENSITIVE,
            pattern_kind: PatternKind::default(),
            scan_mode: ScanMode::default(),
            slop: DEFAULT_SLOP,
            yield_interval_ms: DEFAULT_YIELD_INTERVAL_MS,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
        }
    }
}

impl AppConfig {
    pub fn load_or_create() -> Self {
        let mut config = Self::default();
        let Some(path) = ensure_config_file() else {
            return config;
        };

        match fs::read_to_string(&path) {
            Ok(contents) => config = Self::from_contents(&contents),
            Err(e) => log::warn!("could not read {}: {}", path.display(), e),
        }

        config
    }

    pub fn from_contents(contents: &str) -> Self {
        let mut config = Self::default();
        for (line_number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.splitn(2, '=');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();

            if key.eq_ignore_ascii_case("snippet_radius") || key.eq_ignore_ascii_case("context") {
                if let Ok(radius) = value.parse::<usize>() {
                    config.snippet_radius = radius.clamp(MIN_SNIPPET_RADIUS, MAX_SNIPPET_RADIUS);
                }
            } else if key.eq_ignore_ascii_case("case_sensitive") {
                if let Some(case_sensitive) = parse_bool(value) {
                    config.case_sensitive = case_sensitive;
                }
            } else if key.eq_ignore_ascii_case("pattern_kind") {
                if let Some(kind) = parse_string_value(value).and_then(|v| PatternKind::from_name(&v))
                {
                    config.pattern_kind = kind;
                }
            } else if key.eq_ignore_ascii_case("scan_mode") {
                if let Some(mode) = parse_string_value(value).and_then(|v| ScanMode::from_name(&v)) {
                    config.scan_mode = mode;
                }
            } else if key.eq_ignore_ascii_case("slop") {
                if let Ok(slop) = value.parse::<usize>() {
                    config.slop = slop.min(MAX_SLOP);
                }
            } else if key.eq_ignore_ascii_case("yield_interval_ms") {
                if let Ok(ms) = value.parse::<u64>() {
                    config.yield_interval_ms = ms.max(MIN_YIELD_INTERVAL_MS);
                }
            } else if key.eq_ignore_ascii_case("lines_per_page") {
                if let Ok(lines) = value.parse::<usize>() {
                    config.lines_per_page = lines.max(1);
                }
            } else {
                log::debug!("config line {}: ignoring key '{}'", line_number + 1, key);
            }
        }

        config
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            snippet_radius: self.snippet_radius,
            yield_interval: Duration::from_millis(self.yield_interval_ms),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_string_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let unquoted = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let unquoted = unquoted.trim();
    if unquoted.is_empty() {
        return None;
    }

    Some(unquoted.to_string())
}

pub fn ensure_config_file() -> Option<PathBuf> {
    let path = config_path()?;
    if !path.exists() {
        if let Some(parent) = path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            log::warn!("could not create {}: {}", parent.display(), e);
            return Some(path);
        }
        if let Err(e) = fs::write(&path, DEFAULT_CONFIG) {
            log::warn!("could not write default config to {}: {}", path.display(), e);
        }
    }
    Some(path)
}

fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            return Some(config_dir.join("richfind").join("config.txt"));
        }
    }

    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
        && !xdg_config_home.trim().is_empty()
    {
        return Some(Path::new(&xdg_config_home).join("richfind/config.txt"));
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".config/richfind/config.txt"));
    }

    env::current_dir()
        .ok()
        .map(|dir| dir.join(".config/richfind/config.txt"))
}
