use std::path::Path;

use crate::config::{SearchDefaults, config_path};

pub fn run() {
    let Some(path) = config_path() else {
        eprintln!("Could not determine config directory");
        return;
    };

    let contents = if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                eprintln!("Failed to read config file: {}", e);
                return;
            }
        }
    } else {
        None
    };

    print!("{}", render(&path, contents.as_deref()));
}

fn render(path: &Path, contents: Option<&str>) -> String {
    let mut out = String::new();
    match contents {
        None => {
            out.push_str(&format!("# Config file: {} (not created yet)\n", path.display()));
        }
        Some(contents) if contents.trim().is_empty() => {
            out.push_str(&format!("# Config file: {} (empty)\n", path.display()));
        }
        Some(contents) => {
            out.push_str(&format!("# Config file: {}\n\n", path.display()));
            out.push_str(contents);
            if !contents.ends_with('\n') {
                out.push('\n');
            }
        }
    }

    let effective = contents
        .map(SearchDefaults::from_contents)
        .unwrap_or_default();
    out.push_str("\n# Effective search defaults:\n");
    out.push_str(&format!("# pattern_kind = {:?}\n", effective.pattern_kind).to_lowercase());
    out.push_str(&format!("# scan_mode = {:?}\n", effective.scan_mode).to_lowercase());
    out.push_str(&format!("# slop = {}\n", effective.slop));
    out.push_str(&format!("# case_sensitive = {}\n", effective.case_sensitive));
    out.push_str(&format!("# snippet_radius = {}\n", effective.snippet_radius));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_shows_defaults() {
        let rendered = render(Path::new("/tmp/richfind/config.txt"), None);
        assert!(rendered.contains("(not created yet)"));
        assert!(rendered.contains("# pattern_kind = literal"));
        assert!(rendered.contains("# snippet_radius = 60"));
    }

    #[test]
    fn file_contents_are_echoed_with_effective_values() {
        let rendered = render(Path::new("config.txt"), Some("slop = 3"));
        assert!(rendered.contains("\nslop = 3\n"));
        assert!(rendered.contains("# slop = 3"));
    }
}
