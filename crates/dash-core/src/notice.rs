//! User-facing status messages

use std::fmt;

/// Warning shown by views that need a dataset
pub const NO_DATASET: &str = "Please upload a dataset first.";

/// Warning shown by the report view when nothing is loaded
pub const NO_DATASET_FOR_REPORT: &str = "Please upload and analyze a dataset first.";

/// Warning shown in place of numeric-only content
pub const NO_NUMERIC_COLUMNS: &str = "No numeric columns available.";

/// Warning shown when a chart needs a non-numeric column
pub const NO_CATEGORICAL_COLUMNS: &str = "No categorical columns available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// A message rendered as a colored banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.level, self.message)
    }
}
