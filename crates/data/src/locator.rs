//! Event log discovery across candidate locations.
//!
//! The log is usually written by the simulation into a `results/` directory,
//! and the analysis may be launched from the project root, from a tools
//! subdirectory, or from the results directory itself. The default log name
//! is looked up in each search directory in order. A name chosen by the user
//! is tried as given first.

use std::path::{Path, PathBuf};

use regime_recovery_core::DataConfig;

use crate::error::{DataError, Result};

/// Whether the bare file name is tried before the search directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Only `dir/name` for each search directory.
    DirsOnly,
    /// `name` as given, then `dir/name` for each search directory.
    AsGivenFirst,
}

impl SearchOrder {
    #[must_use]
    pub fn for_config(config: &DataConfig) -> Self {
        if config.uses_default_file() {
            Self::DirsOnly
        } else {
            Self::AsGivenFirst
        }
    }
}

/// Returns every path the locator would try for `file`, in order.
///
/// `.` and empty search directories resolve to the bare name.
#[must_use]
pub fn candidate_paths(file: &str, search_dirs: &[String], order: SearchOrder) -> Vec<PathBuf> {
    if Path::new(file).is_absolute() {
        return vec![PathBuf::from(file)];
    }

    let mut candidates = Vec::with_capacity(search_dirs.len() + 1);
    if order == SearchOrder::AsGivenFirst {
        candidates.push(PathBuf::from(file));
    }

    for dir in search_dirs {
        let candidate = match dir.as_str() {
            "" | "." => PathBuf::from(file),
            _ => Path::new(dir).join(file),
        };
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    candidates
}

/// Resolves `file` to the first existing candidate path.
///
/// # Errors
///
/// Returns [`DataError::NotFound`] listing every tried path when none exist.
pub fn resolve_log_path(file: &str, search_dirs: &[String], order: SearchOrder) -> Result<PathBuf> {
    let tried = candidate_paths(file, search_dirs, order);

    match tried.iter().find(|p| p.is_file()) {
        Some(path) => {
            tracing::info!("Using event log at {}", path.display());
            Ok(path.clone())
        }
        None => Err(DataError::NotFound {
            file: file.to_string(),
            tried,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn dirs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    // ============================================================
    // Candidate ordering
    // ============================================================

    #[test]
    fn default_log_searches_results_dirs_before_working_dir() {
        let config = DataConfig::default();
        let order = SearchOrder::for_config(&config);

        assert_eq!(order, SearchOrder::DirsOnly);
        assert_eq!(
            candidate_paths(&config.file, &config.search_dirs, order),
            vec![
                PathBuf::from("results/game_analysis.csv"),
                PathBuf::from("../results/game_analysis.csv"),
                PathBuf::from("game_analysis.csv"),
            ]
        );
    }

    #[test]
    fn chosen_file_is_tried_as_given_first() {
        let config = DataConfig {
            file: "log.csv".to_string(),
            ..DataConfig::default()
        };
        let order = SearchOrder::for_config(&config);

        assert_eq!(order, SearchOrder::AsGivenFirst);
        assert_eq!(
            candidate_paths(&config.file, &config.search_dirs, order),
            vec![
                PathBuf::from("log.csv"),
                PathBuf::from("results/log.csv"),
                PathBuf::from("../results/log.csv"),
            ]
        );
    }

    #[test]
    fn duplicate_candidates_are_skipped() {
        let candidates = candidate_paths(
            "log.csv",
            &dirs(&["", ".", "results", "results"]),
            SearchOrder::AsGivenFirst,
        );
        assert_eq!(
            candidates,
            vec![PathBuf::from("log.csv"), PathBuf::from("results/log.csv")]
        );
    }

    #[test]
    fn absolute_path_has_single_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("log.csv");
        let file = file.to_str().unwrap();

        for order in [SearchOrder::DirsOnly, SearchOrder::AsGivenFirst] {
            assert_eq!(
                candidate_paths(file, &dirs(&["results"]), order),
                vec![PathBuf::from(file)]
            );
        }
    }

    // ============================================================
    // Resolution
    // ============================================================

    #[test]
    fn results_copy_wins_over_working_dir_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let results = tmp.path().join("results");
        fs::create_dir_all(&results).unwrap();
        fs::write(results.join("game_analysis.csv"), "Step,Reward\n").unwrap();
        fs::write(tmp.path().join("game_analysis.csv"), "Step,Reward\n").unwrap();

        let search = vec![
            results.to_string_lossy().into_owned(),
            tmp.path().join("missing").to_string_lossy().into_owned(),
            tmp.path().to_string_lossy().into_owned(),
        ];
        let resolved =
            resolve_log_path("game_analysis.csv", &search, SearchOrder::DirsOnly).unwrap();

        assert_eq!(resolved, results.join("game_analysis.csv"));
    }

    #[test]
    fn resolves_first_existing_search_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(second.join("log.csv"), "Step,Reward\n").unwrap();

        let search = vec![
            first.to_string_lossy().into_owned(),
            second.to_string_lossy().into_owned(),
        ];
        let resolved = resolve_log_path("log.csv", &search, SearchOrder::AsGivenFirst).unwrap();

        assert_eq!(resolved, second.join("log.csv"));
    }

    #[test]
    fn not_found_lists_every_tried_path() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nowhere");
        let search = vec![missing.to_string_lossy().into_owned(), ".".to_string()];

        let err =
            resolve_log_path("absent_log_file.csv", &search, SearchOrder::AsGivenFirst).unwrap_err();
        match &err {
            DataError::NotFound { file, tried } => {
                assert_eq!(file, "absent_log_file.csv");
                assert_eq!(
                    tried,
                    &vec![
                        PathBuf::from("absent_log_file.csv"),
                        missing.join("absent_log_file.csv"),
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("absent_log_file.csv not found"));
    }

    #[test]
    fn directories_are_not_resolved_as_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("log.csv")).unwrap();
        let search = vec![tmp.path().to_string_lossy().into_owned()];

        assert!(resolve_log_path("log.csv", &search, SearchOrder::DirsOnly).is_err());
    }
}
