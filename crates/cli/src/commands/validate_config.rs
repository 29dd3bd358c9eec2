use richfind_search::{PatternKind, ScanMode};

use crate::config::{config_path, entries};

const VALID_KEYS: &[&str] = &[
    "pattern_kind",
    "scan_mode",
    "case_sensitive",
    "slop",
    "snippet_radius",
    "lines_per_page",
    "yield_interval_ms",
];

#[derive(Debug, Default, PartialEq)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

pub fn run() {
    let path = match config_path() {
        Some(p) => p,
        None => {
            eprintln!("Could not determine config directory");
            std::process::exit(1);
        }
    };

    println!("Config file: {}", path.display());

    if !path.exists() {
        println!("Status: File does not exist (using defaults)");
        println!("Result: Valid");
        return;
    }

    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            println!("Status: Failed to read file");
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report = validate(&contents);

    // Print results
    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("Status: Valid");
        return;
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &report.errors {
            println!("  {}", error);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }

    println!();
    if report.errors.is_empty() {
        println!("Result: Valid (with warnings)");
    } else {
        println!("Result: Invalid");
        std::process::exit(1);
    }
}

fn validate(contents: &str) -> Report {
    let mut report = Report::default();

    for (line_num, key, value) in entries(contents) {
        let Some(value) = value else {
            report.errors.push(format!(
                "Line {}: Invalid syntax. Expected 'key = value'",
                line_num
            ));
            continue;
        };

        let key = key.to_ascii_lowercase();
        if !VALID_KEYS.contains(&key.as_str()) {
            report
                .warnings
                .push(format!("Line {}: Unknown key '{}'", line_num, key));
            continue;
        }

        match key.as_str() {
            "pattern_kind" => {
                if PatternKind::from_name(value).is_none() {
                    report.errors.push(format!(
                        "Line {}: pattern_kind must be 'literal', 'wildcard' or 'regex'",
                        line_num
                    ));
                }
            }
            "scan_mode" => {
                if ScanMode::from_name(value).is_none() {
                    report.errors.push(format!(
                        "Line {}: scan_mode must be 'all', 'forward', 'backward' or 'selection'",
                        line_num
                    ));
                }
            }
            "case_sensitive" => {
                if !["true", "false"].contains(&value.to_lowercase().as_str()) {
                    report.errors.push(format!(
                        "Line {}: {} must be 'true' or 'false'",
                        line_num, key
                    ));
                }
            }
            "slop" => check_range(&mut report, line_num, &key, value, 0, 32),
            "snippet_radius" => check_range(&mut report, line_num, &key, value, 10, 500),
            "lines_per_page" => check_range(&mut report, line_num, &key, value, 1, usize::MAX),
            "yield_interval_ms" => check_range(&mut report, line_num, &key, value, 10, usize::MAX),
            _ => {}
        }
    }

    report
}

/// Non-numbers are errors; numbers outside the range are clamped at load
/// time, so they only warn.
fn check_range(report: &mut Report, line_num: usize, key: &str, value: &str, min: usize, max: usize) {
    match value.parse::<usize>() {
        Ok(n) if n < min || n > max => {
            let bound = if max == usize::MAX {
                format!("at least {}", min)
            } else {
                format!("between {} and {}", min, max)
            };
            report.warnings.push(format!(
                "Line {}: {} should be {}; {} will be clamped",
                line_num, key, bound, n
            ));
        }
        Ok(_) => {}
        Err(_) => report.errors.push(format!(
            "Line {}: {} must be a positive integer",
            line_num, key
        )),
    }
}
