use crate::submission::StudentSubmission;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default location of the single persisted slot.
pub fn default_path() -> PathBuf {
    home_dir().join(".autoavaluacio").join("submissions.json")
}

/// Where exported CSV artifacts land.
pub fn export_dir() -> PathBuf {
    home_dir()
}

fn read_slot(path: &Path) -> Result<Vec<StudentSubmission>, String> {
    let data = fs::read(path).map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    serde_json::from_slice(&data)
        .map_err(|err| format!("failed to parse {}: {err}", path.display()))
}

/// The persisted, append-only list of submissions. Loaded once at startup and
/// rewritten wholesale after every mutation; the in-memory list and the slot
/// stay in sync after each operation.
pub struct SubmissionStore {
    path: PathBuf,
    submissions: Vec<StudentSubmission>,
}

impl SubmissionStore {
    /// Opens the slot at `path`. A missing slot is an empty store; a slot that
    /// fails to parse is recovered as empty and reported as a warning, never
    /// as a hard error.
    pub fn open(path: PathBuf) -> (Self, Option<String>) {
        if !path.exists() {
            return (
                Self {
                    path,
                    submissions: Vec::new(),
                },
                None,
            );
        }

        match read_slot(&path) {
            Ok(submissions) => (Self { path, submissions }, None),
            Err(warning) => (
                Self {
                    path,
                    submissions: Vec::new(),
                },
                Some(warning),
            ),
        }
    }

    pub fn submissions(&self) -> &[StudentSubmission] {
        &self.submissions
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    /// Appends one record and persists the full updated list before returning.
    pub fn append(&mut self, submission: StudentSubmission) -> io::Result<()> {
        self.submissions.push(submission);
        self.persist()
    }

    /// Empties the store and removes the slot file entirely.
    pub fn clear(&mut self) -> io::Result<()> {
        self.submissions.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn persist(&self) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let bytes = serde_json::to_vec_pretty(&self.submissions)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
        let tmp_path = self.path.with_extension("json.tmp");

        fs::write(&tmp_path, bytes)?;
        match fs::rename(&tmp_path, &self.path) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                if self.path.exists() {
                    fs::remove_file(&self.path)?;
                    fs::rename(&tmp_path, &self.path)?;
                    Ok(())
                } else {
                    Err(rename_err)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SubmissionStore;
    use crate::submission::{AnswerValue, StudentResponse, StudentSubmission};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_slot(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "autoavaluacio_store_{prefix}_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }

    fn sample_submission(name: &str) -> StudentSubmission {
        StudentSubmission::new(
            name.to_string(),
            vec![
                StudentResponse {
                    question_id: "q1".to_string(),
                    value: AnswerValue::Rating(3),
                },
                StudentResponse {
                    question_id: "q8".to_string(),
                    value: AnswerValue::text("Dibuixar"),
                },
            ],
        )
    }

    #[test]
    fn missing_slot_opens_empty_without_warning() {
        let path = temp_slot("missing");
        let (store, warning) = SubmissionStore::open(path);
        assert!(store.is_empty());
        assert!(warning.is_none());
    }

    #[test]
    fn append_then_reopen_round_trips_every_field() {
        let path = temp_slot("roundtrip");
        let (mut store, _) = SubmissionStore::open(path.clone());
        store
            .append(sample_submission("Maria"))
            .expect("append should persist");
        store
            .append(sample_submission("Pau"))
            .expect("append should persist");
        let originals = store.submissions().to_vec();

        let (reopened, warning) = SubmissionStore::open(path.clone());
        assert!(warning.is_none());
        assert_eq!(reopened.submissions(), originals.as_slice());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_slot_recovers_as_empty_with_warning() {
        let path = temp_slot("malformed");
        fs::write(&path, "{ not json").expect("fixture should write");

        let (store, warning) = SubmissionStore::open(path.clone());
        assert!(store.is_empty());
        assert!(warning.expect("warning expected").contains("failed to parse"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn clear_empties_the_store_and_removes_the_slot() {
        let path = temp_slot("clear");
        let (mut store, _) = SubmissionStore::open(path.clone());
        store
            .append(sample_submission("Maria"))
            .expect("append should persist");
        assert!(path.exists());

        store.clear().expect("clear should succeed");
        assert!(store.is_empty());
        assert!(!path.exists());

        let (reopened, warning) = SubmissionStore::open(path);
        assert!(reopened.is_empty());
        assert!(warning.is_none());
    }

    #[test]
    fn clear_on_a_never_persisted_store_is_a_no_op() {
        let path = temp_slot("clear_fresh");
        let (mut store, _) = SubmissionStore::open(path);
        store.clear().expect("clear without a slot should succeed");
        assert!(store.is_empty());
    }
}
