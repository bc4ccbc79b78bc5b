//! Orchestrator state for one viewed file.
//!
//! A [`Session`] owns everything that changes while a user works with a file:
//! the service file id, the displayed sections, and the field category with
//! its preset list. Sessions are plain values, so any number of them can run
//! side by side.
//!
//! Every response that carries metadata replaces the displayed sections as a
//! whole. Sessions do not order concurrent saves: whichever fetch completes
//! last is what stays on screen.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::client::{MetadataService, SubmitOutcome};
use crate::error::{MetaviewError, Result};
use crate::flatten::flatten_with_stats;
use crate::model::{FieldCategory, FileInfo, MetadataDocument, ToolSection};
use crate::search::{count_visible, filter_sections, FilteredSection};
use crate::util::atomic_write;
use crate::validate::FieldInput;

/// State for one file being inspected and edited.
#[derive(Debug)]
pub struct Session<S> {
    service: S,
    file_id: Option<String>,
    document: MetadataDocument,
    file_info: Option<FileInfo>,
    sections: Vec<ToolSection>,
    category: FieldCategory,
    presets: Vec<String>,
}

impl<S: MetadataService> Session<S> {
    /// Create an empty session over `service`.
    pub fn new(service: S) -> Self {
        Self {
            service,
            file_id: None,
            document: MetadataDocument::new(),
            file_info: None,
            sections: Vec::new(),
            category: FieldCategory::default(),
            presets: builtin_presets(FieldCategory::default()),
        }
    }

    /// The service this session talks to.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Id of the current file, if one has been uploaded or opened.
    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    /// The currently displayed document.
    pub fn document(&self) -> &MetadataDocument {
        &self.document
    }

    /// Basic file information from the current document.
    pub fn file_info(&self) -> Option<&FileInfo> {
        self.file_info.as_ref()
    }

    /// Currently displayed sections.
    pub fn sections(&self) -> &[ToolSection] {
        &self.sections
    }

    /// Selected field category.
    pub fn category(&self) -> FieldCategory {
        self.category
    }

    /// Preset names for the selected category.
    pub fn presets(&self) -> &[String] {
        &self.presets
    }

    /// Sections narrowed to rows matching `query`.
    pub fn visible(&self, query: &str) -> Vec<FilteredSection<'_>> {
        filter_sections(&self.sections, query)
    }

    /// Number of rows matching `query`.
    pub fn visible_count(&self, query: &str) -> usize {
        count_visible(&self.sections, query)
    }

    /// Display a document that did not come from the service.
    ///
    /// Clears the file id, so later edits fail with `NoFileSelected`.
    pub fn show_document(&mut self, document: MetadataDocument) {
        self.file_id = None;
        self.replace_document(document);
    }

    /// Upload a local file and display its metadata.
    pub async fn upload(&mut self, path: &Path) -> Result<&[ToolSection]> {
        let response = self.service.upload(path).await?;
        info!(file_id = %response.file_id, "File uploaded");
        self.file_id = Some(response.file_id);
        self.replace_document(response.metadata);
        Ok(&self.sections)
    }

    /// Select a stored file without fetching its metadata.
    pub fn select(&mut self, file_id: impl Into<String>) {
        self.reset();
        self.file_id = Some(file_id.into());
    }

    /// Select an already-stored file and display its metadata.
    pub async fn open(&mut self, file_id: impl Into<String>) -> Result<&[ToolSection]> {
        let file_id = file_id.into();
        let document = self.service.fetch_metadata(&file_id).await?;
        self.file_id = Some(file_id);
        self.replace_document(document);
        Ok(&self.sections)
    }

    /// Re-fetch metadata for the current file.
    pub async fn refresh(&mut self) -> Result<&[ToolSection]> {
        let file_id = self.require_file_id()?.to_string();
        let document = self.service.fetch_metadata(&file_id).await?;
        self.replace_document(document);
        Ok(&self.sections)
    }

    /// Validate and submit a new field, then re-fetch and redisplay.
    ///
    /// Validation happens before anything else, so an invalid entry never
    /// reaches the file-id check or the network.
    pub async fn add_field(&mut self, input: &FieldInput) -> Result<SubmitOutcome> {
        let entry = input.validate()?;
        let file_id = self.require_file_id()?.to_string();

        let outcome = self.service.submit_field(&file_id, &entry).await?;
        info!(%file_id, key = %entry.key, "Field saved");

        let document = self.service.fetch_metadata(&file_id).await?;
        self.replace_document(document);
        Ok(outcome)
    }

    /// Select a category and load its presets.
    ///
    /// `Custom` has no presets. If the service cannot be reached the
    /// built-in list for the category is used instead.
    pub async fn load_presets(&mut self, category: FieldCategory) -> Result<&[String]> {
        self.category = category;

        self.presets = if category.is_custom() {
            Vec::new()
        } else {
            match self.service.supported_fields(category).await {
                Ok(fields) => fields,
                Err(e) => {
                    warn!(%category, error = %e, "Falling back to built-in presets");
                    builtin_presets(category)
                }
            }
        };

        Ok(&self.presets)
    }

    /// Download the current file to `dest`.
    ///
    /// When `dest` is a directory the file keeps its service name.
    pub async fn download_to(&self, dest: &Path) -> Result<PathBuf> {
        let file_id = self.require_file_id()?;
        let bytes = self.service.download(file_id).await?;

        let target = if dest.is_dir() {
            dest.join(crate::util::local_file_name(file_id))
        } else {
            dest.to_path_buf()
        };
        atomic_write(&target, &bytes)?;

        info!(path = %target.display(), size = bytes.len(), "File downloaded");
        Ok(target)
    }

    /// Delete the current file from the service and reset the session.
    pub async fn delete(&mut self) -> Result<String> {
        let file_id = self.require_file_id()?.to_string();
        let message = self.service.delete(&file_id).await?;
        info!(%file_id, "File deleted");
        self.reset();
        Ok(message)
    }

    /// Forget the current file and everything displayed for it.
    pub fn reset(&mut self) {
        self.file_id = None;
        self.document = MetadataDocument::new();
        self.file_info = None;
        self.sections.clear();
    }

    fn require_file_id(&self) -> Result<&str> {
        self.file_id.as_deref().ok_or(MetaviewError::NoFileSelected)
    }

    fn replace_document(&mut self, document: MetadataDocument) {
        let (sections, stats) = flatten_with_stats(&document);
        debug!(
            tools = stats.tools_seen,
            sections = stats.sections,
            rows = stats.rows,
            errors = stats.errors,
            "Document replaced"
        );
        self.file_info = document.file_info();
        self.document = document;
        self.sections = sections;
    }
}

fn builtin_presets(category: FieldCategory) -> Vec<String> {
    category
        .builtin_presets()
        .iter()
        .map(|p| (*p).to_string())
        .collect()
}
