use crate::profile::Platform;
use std::fmt;

/// Stored for an optional text step left blank.
pub const NO_INPUT_PROVIDED: &str = "No input provided";
/// Stored for an upload step submitted without a file.
pub const NO_FILE_UPLOADED: &str = "No file uploaded";

/// A file picked on an upload step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileHandle {
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Size rounded to the nearest KiB.
    #[must_use]
    pub const fn size_kb(&self) -> u64 {
        self.size_bytes.saturating_add(512) / 1024
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadValue {
    NotProvided,
    File(FileHandle),
}

impl fmt::Display for UploadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotProvided => f.write_str(NO_FILE_UPLOADED),
            Self::File(file) => f.write_str(&file.name),
        }
    }
}

/// The recorded result of one completed step. Never changed once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEntry {
    Input { label: String, value: String },
    Upload { label: String, value: UploadValue },
}

impl ProgressEntry {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Input { label, .. } | Self::Upload { label, .. } => label,
        }
    }

    /// The value as shown in the progress list.
    #[must_use]
    pub fn value_text(&self) -> String {
        match self {
            Self::Input { value, .. } => value.clone(),
            Self::Upload { value, .. } => value.to_string(),
        }
    }

    /// Platform and handle for entries that should get a profile card.
    #[must_use]
    pub fn social_handle(&self) -> Option<(Platform, &str)> {
        match self {
            Self::Input { label, value } if value != NO_INPUT_PROVIDED => {
                Platform::from_label(label).map(|platform| (platform, value.as_str()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ProgressEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input { label, value } => write!(f, "{label}: {value}"),
            Self::Upload {
                label,
                value: UploadValue::File(file),
            } => write!(
                f,
                "{label}: {} Size: {} KB Type: {}",
                file.name,
                file.size_kb(),
                file.mime_type
            ),
            Self::Upload { label, value } => write!(f, "{label}: {value}"),
        }
    }
}
