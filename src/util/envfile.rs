use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Parse `KEY=value` lines. Blank lines and `#` comments are skipped and one
/// pair of surrounding quotes is removed from values.
pub fn parse_env_str(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (idx, line) in content.lines().enumerate() {
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let Some((key, val)) = s.split_once('=') else {
            log::warn!("ignoring .env line {} without '=': {}", idx + 1, line);
            continue;
        };
        let val = val.trim();
        let val = if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            &val[1..val.len() - 1]
        } else {
            val
        };
        map.insert(key.trim().to_string(), val.to_string());
    }
    map
}

/// Read a `.env` file into a map without touching the process environment.
/// A missing file yields an empty map.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading env file {}", path.display()))?;
    Ok(parse_env_str(&content))
}

/// Write a commented `.env` template listing every recognised variable.
pub fn write_env_template(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut f = fs::File::create(path)
        .with_context(|| format!("creating env template {}", path.display()))?;
    let template = r#"# roster_matcher environment configuration template
# Copy this file to .env and adjust. Process environment variables win over this file.

# Spreadsheet columns (1-based)
ROSTER_NAME_COLUMN=1
ROSTER_MARK_COLUMN=2
# Set to 0 or none to skip observations
ROSTER_OBSERVATION_COLUMN=3

# Largest accepted edit distance for fuzzy name matches
ROSTER_MAX_DISTANCE=15

# Resolve and report only, without writing to the roster
#ROSTER_DRY_RUN=true
#ROSTER_PROGRESS_EVERY=10
"#;
    f.write_all(template.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comments_quotes_and_junk() {
        let map = parse_env_str(
            "# comment\n\nROSTER_MARK_COLUMN = 4\nROSTER_DRY_RUN=\"true\"\nnot a pair\nEMPTY=\nQ='x'\n",
        );
        assert_eq!(map.get("ROSTER_MARK_COLUMN").map(String::as_str), Some("4"));
        assert_eq!(map.get("ROSTER_DRY_RUN").map(String::as_str), Some("true"));
        assert_eq!(map.get("EMPTY").map(String::as_str), Some(""));
        assert_eq!(map.get("Q").map(String::as_str), Some("x"));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn missing_file_is_empty() {
        let map = load_env_file("definitely/not/here/.env").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn template_round_trips_into_config() {
        let path = std::env::temp_dir().join(format!(
            "roster_matcher_env_template_{}.env",
            std::process::id()
        ));
        write_env_template(&path).unwrap();
        let map = load_env_file(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(map.get("ROSTER_MAX_DISTANCE").map(String::as_str), Some("15"));
        assert!(!map.contains_key("ROSTER_DRY_RUN"));
    }
}
