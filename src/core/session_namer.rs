use crate::errors::AppError;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Computes the next unused session number by scanning the working root.
///
/// The filesystem is the authority: every call rescans, so sessions added or
/// removed by hand between calls are taken into account. Two concurrent
/// processes can still race the scan-then-create sequence; a single process
/// cannot.
pub struct SessionNamer {
    working_root: PathBuf,
}

impl SessionNamer {
    pub fn new(working_root: impl Into<PathBuf>) -> Self {
        SessionNamer {
            working_root: working_root.into(),
        }
    }

    /// Highest `<base_name>_<N>` directory number plus one, or 1 when no
    /// numbered directory exists. Entries whose suffix is not an integer are
    /// skipped, as are plain files.
    pub fn next_session_number(&self, base_name: &str) -> Result<u32, AppError> {
        let prefix = format!("{}_", base_name);
        let mut highest: Option<u32> = None;

        for entry in fs::read_dir(&self.working_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let Some(suffix) = name.strip_prefix(&prefix) else {
                continue;
            };
            match suffix.parse::<u32>() {
                Ok(n) => highest = Some(highest.map_or(n, |h| h.max(n))),
                Err(_) => debug!("Skipping malformed session directory name '{}'", name),
            }
        }

        Ok(highest.map_or(1, |h| h.saturating_add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn make_dirs(root: &Path, names: &[&str]) {
        for name in names {
            fs::create_dir(root.join(name)).unwrap();
        }
    }

    #[test]
    fn empty_root_starts_at_one() {
        let dir = tempfile::tempdir().unwrap();
        let namer = SessionNamer::new(dir.path());
        assert_eq!(namer.next_session_number("dataset").unwrap(), 1);
    }

    #[test]
    fn returns_max_plus_one() {
        let dir = tempfile::tempdir().unwrap();
        make_dirs(dir.path(), &["dataset_1", "dataset_3", "dataset_7"]);
        let namer = SessionNamer::new(dir.path());
        assert_eq!(namer.next_session_number("dataset").unwrap(), 8);
    }

    #[test]
    fn malformed_names_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        make_dirs(
            dir.path(),
            &["dataset_abc", "dataset_", "dataset2", "other_5", "dataset_4"],
        );
        let namer = SessionNamer::new(dir.path());
        assert_eq!(namer.next_session_number("dataset").unwrap(), 5);
    }

    #[test]
    fn plain_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dataset_9"), b"not a directory").unwrap();
        make_dirs(dir.path(), &["dataset_2"]);
        let namer = SessionNamer::new(dir.path());
        assert_eq!(namer.next_session_number("dataset").unwrap(), 3);
    }

    #[test]
    fn rescans_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let namer = SessionNamer::new(dir.path());
        assert_eq!(namer.next_session_number("dataset").unwrap(), 1);
        make_dirs(dir.path(), &["dataset_5"]);
        assert_eq!(namer.next_session_number("dataset").unwrap(), 6);
    }
}
