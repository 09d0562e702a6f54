mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use super::domain::{BusinessPlan, PlanId};
use super::ranking::rank;

pub use markdown::{render_plan_markdown, render_summary_report};

const TITLE_CHARS: usize = 50;

/// Storage abstraction so the service can run against files or memory.
pub trait PlanRepository: Send + Sync {
    fn save(&self, plan: &BusinessPlan) -> Result<(), StorageError>;
    /// Every stored plan, newest first.
    fn load_all(&self) -> Result<Vec<BusinessPlan>, StorageError>;

    fn fetch(&self, id: &PlanId) -> Result<Option<BusinessPlan>, StorageError> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|plan| &plan.id == id))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize plan: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Paths written for one saved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPlan {
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
}

/// Directory-backed store writing each plan as pretty JSON plus a Markdown rendering.
#[derive(Debug, Clone)]
pub struct FilePlanStore {
    root: PathBuf,
    json_dir: PathBuf,
    markdown_dir: PathBuf,
}

impl FilePlanStore {
    /// Open (creating if needed) `root/json` and `root/markdown`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        let json_dir = root.join("json");
        let markdown_dir = root.join("markdown");
        for dir in [&json_dir, &markdown_dir] {
            fs::create_dir_all(dir).map_err(|source| StorageError::io(dir, source))?;
        }
        Ok(Self {
            root,
            json_dir,
            markdown_dir,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn save_files(&self, plan: &BusinessPlan) -> Result<SavedPlan, StorageError> {
        let stem = file_stem(plan);
        let json_path = self.json_dir.join(format!("{stem}.json"));
        let markdown_path = self.markdown_dir.join(format!("{stem}.md"));

        let json = serde_json::to_string_pretty(plan)?;
        fs::write(&json_path, json).map_err(|source| StorageError::io(&json_path, source))?;
        fs::write(&markdown_path, render_plan_markdown(plan))
            .map_err(|source| StorageError::io(&markdown_path, source))?;

        debug!(plan_id = %plan.id, path = %json_path.display(), "plan saved");
        Ok(SavedPlan {
            json_path,
            markdown_path,
        })
    }

    pub fn latest(&self, count: usize) -> Result<Vec<BusinessPlan>, StorageError> {
        let mut plans = self.load_all()?;
        plans.truncate(count);
        Ok(plans)
    }

    pub fn best(&self, count: usize) -> Result<Vec<BusinessPlan>, StorageError> {
        let mut plans = rank(self.load_all()?);
        plans.truncate(count);
        Ok(plans)
    }

    pub fn summary_report(&self) -> Result<String, StorageError> {
        Ok(render_summary_report(&self.load_all()?, Utc::now()))
    }

    /// Write the summary report to `root/summary_<timestamp>.md`.
    pub fn save_summary_report(&self) -> Result<PathBuf, StorageError> {
        let report = self.summary_report()?;
        let path = self
            .root
            .join(format!("summary_{}.md", Utc::now().format("%Y%m%d_%H%M%S")));
        fs::write(&path, report).map_err(|source| StorageError::io(&path, source))?;
        Ok(path)
    }

    fn read_plan(path: &Path) -> Result<BusinessPlan, StorageError> {
        let raw = fs::read_to_string(path).map_err(|source| StorageError::io(path, source))?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl PlanRepository for FilePlanStore {
    fn save(&self, plan: &BusinessPlan) -> Result<(), StorageError> {
        self.save_files(plan).map(|_| ())
    }

    fn load_all(&self) -> Result<Vec<BusinessPlan>, StorageError> {
        let entries = fs::read_dir(&self.json_dir)
            .map_err(|source| StorageError::io(&self.json_dir, source))?;

        let mut plans = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(error) => {
                    warn!(%error, "skipping unreadable directory entry");
                    continue;
                }
            };
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_plan(&path) {
                Ok(plan) => plans.push(plan),
                Err(error) => warn!(%error, path = %path.display(), "skipping unreadable plan"),
            }
        }

        plans.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(plans)
    }
}

/// `<YYYYMMDD_HHMMSS>_<overall score>_<title>` with path separators replaced.
fn file_stem(plan: &BusinessPlan) -> String {
    let title: String = plan
        .title
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '-' } else { ch })
        .take(TITLE_CHARS)
        .collect();
    format!(
        "{}_{:.0}_{}",
        plan.created_at.format("%Y%m%d_%H%M%S"),
        plan.overall_score,
        title
    )
}
