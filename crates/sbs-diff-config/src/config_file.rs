use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".sbs-diff.toml";

/// Locations searched for a config file, in order:
/// 1. `.sbs-diff.toml` in the current working directory
/// 2. `~/.sbs-diff.toml`
/// 3. `config.toml` in the platform config directory
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = get_home_config_path() {
        candidates.push(home);
    }
    if let Some(global) = crate::paths::app_config_path() {
        candidates.push(global);
    }
    candidates
}

/// Load the first config file found.
///
/// Returns the path and content, None if no candidate is readable.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    for path in config_file_candidates() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            log::debug!("Loaded config from {}", path.display());
            return Some((path, content));
        }
    }
    None
}

/// Returns ~/.sbs-diff.toml if HOME is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cwd_is_searched_first() {
        let candidates = config_file_candidates();
        assert_eq!(candidates.first(), Some(&PathBuf::from(CONFIG_FILE)));
    }
}
