use std::path::{Path, PathBuf};

pub const DATA_FOLDER: &str = "data";
pub const REPORTS_FOLDER: &str = "reports";
pub const PARAMETERS_FILE: &str = "parameters.yaml";
pub const DETECTIONS_FILE: &str = "Mines.csv";
pub const TELEMETRY_FILE: &str = "EstimatedState.csv";
pub const NUMBER_CACHE_FILE: &str = "number_cache.json";

/// Folder layout of one tasking element's area and task under a top directory.
#[derive(Debug, Clone)]
pub struct MissionLayout {
    root: PathBuf,
    data: PathBuf,
    reports: PathBuf,
}

impl MissionLayout {
    pub fn new<P: AsRef<Path>>(root: P, element: &str, area: &str, task: &str) -> Self {
        let root = root.as_ref().to_path_buf();
        let data = root
            .join(DATA_FOLDER)
            .join(element)
            .join(area)
            .join(task)
            .join(DATA_FOLDER);
        let reports = root.join(REPORTS_FOLDER).join(element).join(area).join(task);
        Self {
            root,
            data,
            reports,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> &Path {
        &self.data
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports
    }

    pub fn parameters(&self) -> PathBuf {
        self.data.join(PARAMETERS_FILE)
    }

    pub fn detections(&self) -> PathBuf {
        self.data.join(DETECTIONS_FILE)
    }

    pub fn telemetry(&self) -> PathBuf {
        self.data.join(TELEMETRY_FILE)
    }

    pub fn number_cache(&self) -> PathBuf {
        self.root.join(NUMBER_CACHE_FILE)
    }
}
