use std::path::PathBuf;

use richfind_search::{DEFAULT_SNIPPET_RADIUS, PatternKind, ScanMode};

/// Config values the one-shot commands fall back to
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDefaults {
    pub pattern_kind: PatternKind,
    pub scan_mode: ScanMode,
    pub slop: usize,
    pub case_sensitive: bool,
    pub snippet_radius: usize,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            pattern_kind: PatternKind::Literal,
            scan_mode: ScanMode::All,
            slop: 0,
            case_sensitive: false,
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
        }
    }
}

impl SearchDefaults {
    pub fn load() -> Self {
        config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .map(|contents| Self::from_contents(&contents))
            .unwrap_or_default()
    }

    pub fn from_contents(contents: &str) -> Self {
        let mut defaults = Self::default();
        if let Some(kind) = lookup(contents, "pattern_kind").and_then(PatternKind::from_name) {
            defaults.pattern_kind = kind;
        }
        if let Some(mode) = lookup(contents, "scan_mode").and_then(ScanMode::from_name) {
            defaults.scan_mode = mode;
        }
        if let Some(slop) = lookup(contents, "slop").and_then(|v| v.parse::<usize>().ok()) {
            defaults.slop = slop.min(32);
        }
        if let Some(value) = lookup(contents, "case_sensitive") {
            defaults.case_sensitive = matches!(
                value.to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            );
        }
        if let Some(radius) =
            lookup(contents, "snippet_radius").and_then(|v| v.parse::<usize>().ok())
        {
            defaults.snippet_radius = radius.clamp(10, 500);
        }
        defaults
    }
}

/// Returns the path to the config file. Resolves in the same order as the
/// bridge binary: the Windows config dir, `XDG_CONFIG_HOME`, then `~/.config`.
pub fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            return Some(config_dir.join("richfind").join("config.txt"));
        }
    }

    let base = dirs::home_dir().or_else(|| std::env::current_dir().ok());
    config_path_from(std::env::var("XDG_CONFIG_HOME").ok(), base)
}

fn config_path_from(xdg_config_home: Option<String>, base: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home
        && !xdg_config_home.trim().is_empty()
    {
        return Some(PathBuf::from(xdg_config_home).join("richfind").join("config.txt"));
    }
    base.map(|dir| dir.join(".config").join("richfind").join("config.txt"))
}

/// Iterates `(line_number, key, value)` over the assignments in a config
/// file, skipping blanks and comments. Lines without `=` yield an empty key.
pub fn entries(contents: &str) -> impl Iterator<Item = (usize, &str, Option<&str>)> {
    contents.lines().enumerate().filter_map(|(index, line)| {
        let trimmed = line.trim();

        // Skip comments and empty lines
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        match trimmed.split_once('=') {
            Some((key, value)) => Some((index + 1, key.trim(), Some(value.trim()))),
            None => Some((index + 1, trimmed, None)),
        }
    })
}

/// Looks up the last value assigned to `key`
pub fn lookup<'a>(contents: &'a str, key: &str) -> Option<&'a str> {
    entries(contents)
        .filter(|(_, k, _)| k.eq_ignore_ascii_case(key))
        .filter_map(|(_, _, value)| value)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_skip_comments() {
        let contents = "# comment\n\nslop = 2\nbroken line\n";
        let parsed: Vec<_> = entries(contents).collect();
        assert_eq!(
            parsed,
            vec![(3, "slop", Some("2")), (4, "broken line", None)]
        );
    }

    #[test]
    fn defaults_follow_config_file() {
        let defaults =
            SearchDefaults::from_contents("pattern_kind = regex\nslop = 99\ncase_sensitive = on\nscan_mode = forward\n");
        assert_eq!(defaults.pattern_kind, PatternKind::Regex);
        assert_eq!(defaults.scan_mode, ScanMode::Forward);
        assert_eq!(defaults.slop, 32);
        assert!(defaults.case_sensitive);
        assert_eq!(defaults.snippet_radius, 60);
    }

    #[test]
    fn xdg_config_home_wins_over_home() {
        let home = Some(PathBuf::from("/home/ada"));
        assert_eq!(
            config_path_from(Some("/xdg".to_string()), home.clone()),
            Some(PathBuf::from("/xdg/richfind/config.txt"))
        );
        assert_eq!(
            config_path_from(Some("  ".to_string()), home.clone()),
            Some(PathBuf::from("/home/ada/.config/richfind/config.txt"))
        );
        assert_eq!(config_path_from(None, None), None);
    }

    #[test]
    fn lookup_takes_last_assignment() {
        let contents = "snippet_radius = 40\nSnippet_Radius = 80\n";
        assert_eq!(lookup(contents, "snippet_radius"), Some("80"));
        assert_eq!(lookup(contents, "slop"), None);
    }
}
