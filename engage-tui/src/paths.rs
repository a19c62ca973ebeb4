//! Where the console keeps its files.
//!
//! Platform directories come from `directories`; `ENGAGE_HOME` puts
//! everything under one folder instead.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Overrides the platform directories when set.
pub const HOME_VAR: &str = "ENGAGE_HOME";

const LATEST_LOG: &str = "latest.log";
const KEEP_LOGS: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data: PathBuf,
    logs: PathBuf,
}

impl AppPaths {
    /// `ENGAGE_HOME` if set, else the platform directories, else a folder in
    /// the working directory.
    pub fn resolve() -> Self {
        if let Ok(home) = std::env::var(HOME_VAR) {
            if !home.trim().is_empty() {
                return Self::in_dir(home.trim());
            }
        }
        match ProjectDirs::from("com", "engage", "engage-console") {
            // Linux: ~/.local/share/engage-console and ~/.cache/engage-console
            Some(dirs) => Self {
                data: dirs.data_dir().to_path_buf(),
                logs: dirs.cache_dir().join("logs"),
            },
            None => Self::in_dir(".engage-console"),
        }
    }

    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data: root.join("data"),
            logs: root.join("logs"),
        }
    }

    pub fn settings_db(&self) -> PathBuf {
        self.data.join("settings.db")
    }

    pub fn log_dir(&self) -> &Path {
        &self.logs
    }

    pub fn latest_log(&self) -> PathBuf {
        self.logs.join(LATEST_LOG)
    }

    pub fn create_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.data)?;
        fs::create_dir_all(&self.logs)
    }

    /// Archive the previous run's log, prune old archives and open a fresh
    /// `latest.log`.
    pub fn start_log(&self) -> io::Result<File> {
        fs::create_dir_all(&self.logs)?;
        archive_latest(&self.logs)?;
        prune_archives(&self.logs, KEEP_LOGS);
        File::create(self.latest_log())
    }
}

fn archive_latest(dir: &Path) -> io::Result<()> {
    let latest = dir.join(LATEST_LOG);
    if !latest.exists() {
        return Ok(());
    }
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
    fs::rename(&latest, dir.join(format!("{stamp}.log")))
}

/// Delete all but the newest `keep` archived logs. Returns how many went.
fn prune_archives(dir: &Path, keep: usize) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    let mut archives: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .collect();
    // Archive names are timestamps, so name order is age order
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    archives
        .iter()
        .take(excess)
        .filter(|path| fs::remove_file(path).is_ok())
        .count()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn log_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".log"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_in_dir_layout() {
        let paths = AppPaths::in_dir("/tmp/engage");
        assert_eq!(paths.settings_db(), PathBuf::from("/tmp/engage/data/settings.db"));
        assert_eq!(paths.latest_log(), PathBuf::from("/tmp/engage/logs/latest.log"));
    }

    #[test]
    fn test_start_log_archives_previous_run() {
        let root = tempdir().unwrap();
        let paths = AppPaths::in_dir(root.path());
        paths.create_dirs().unwrap();
        fs::write(paths.latest_log(), "previous run").unwrap();

        paths.start_log().unwrap();

        let names = log_names(paths.log_dir());
        assert_eq!(names.len(), 2);
        assert!(names.contains(&LATEST_LOG.to_string()));
        assert_eq!(fs::read_to_string(paths.latest_log()).unwrap(), "");
    }

    #[test]
    fn test_prune_keeps_newest_archives() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path();
        for day in 1..=5 {
            fs::write(dir.join(format!("2024010{day}_000000.000.log")), "x").unwrap();
        }
        fs::write(dir.join(LATEST_LOG), "current").unwrap();
        fs::write(dir.join("notes.txt"), "not a log").unwrap();

        assert_eq!(prune_archives(dir, 2), 3);

        assert_eq!(
            log_names(dir),
            vec!["20240104_000000.000.log", "20240105_000000.000.log", "latest.log"]
        );
        assert!(dir.join("notes.txt").exists());
    }
}
