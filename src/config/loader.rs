//! View option loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TreeError, TreeResult};

use super::options::ViewOptions;

/// Non-fatal configuration warning (an unknown key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load options and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> TreeResult<(ViewOptions, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> TreeResult<(ViewOptions, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let options: ViewOptions = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| TreeError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((options, warnings))
}

/// Load from `path` if it parses, otherwise defaults; env overrides last
pub fn load_or_default(path: Option<&Path>) -> ViewOptions {
    let options = match path {
        Some(path) => match load_with_warnings(path) {
            Ok((options, warnings)) => {
                for warning in &warnings {
                    log::warn!(
                        "unknown key '{}' in {}{}",
                        warning.key,
                        warning.file.display(),
                        warning
                            .suggestion
                            .as_deref()
                            .map(|s| format!(" (did you mean '{s}'?)"))
                            .unwrap_or_default()
                    );
                }
                options
            }
            Err(err) => {
                log::warn!("ignoring view options: {err}");
                ViewOptions::default()
            }
        },
        None => ViewOptions::default(),
    };
    with_env_overrides(options)
}

/// Apply environment variable overrides (CHECKTREE_* prefix)
pub fn with_env_overrides(options: ViewOptions) -> ViewOptions {
    apply_overrides(options, |name| std::env::var(name).ok())
}

fn apply_overrides(
    mut options: ViewOptions,
    lookup: impl Fn(&str) -> Option<String>,
) -> ViewOptions {
    // CHECKTREE_SHOW_ROOT
    if let Some(flag) = lookup("CHECKTREE_SHOW_ROOT").as_deref().and_then(parse_flag) {
        options.show_root = flag;
    }

    // CHECKTREE_SELECT_MULTIPLE
    if let Some(flag) = lookup("CHECKTREE_SELECT_MULTIPLE")
        .as_deref()
        .and_then(parse_flag)
    {
        options.select_multiple = flag;
    }

    options
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &["show_root", "select_multiple"];

    let normalized = to_snake_case(unknown);
    CANDIDATES
        .iter()
        .map(|candidate| (candidate, levenshtein(&normalized, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

/// `showRoot` and `show-root` are common spellings of `show_root`.
fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
