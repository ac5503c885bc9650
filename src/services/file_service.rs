//! File service for CV uploads, CV deletion, and reading email attachments.

use actix_multipart::Multipart;
use futures::StreamExt;
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::CONFIG;
use crate::constants::{
    CODE_FILE_UPLOAD_FAILED, CODE_INTERNAL_ERROR, CODE_INVALID_PATH, CODE_NOT_FOUND,
    ERR_ATTACHMENT_MISSING, ERR_FAILED_PROCESS_UPLOAD, ERR_FAILED_READ_FILE, ERR_FAILED_SAVE_FILE,
    ERR_INVALID_ATTACHMENT_PATH, ERR_NO_CV_FILE,
};
use crate::errors::ApiError;
use crate::services::EmailAttachment;
use crate::validators::{is_safe_relative_path, validate_cv_content_type, validate_cv_size};

/// Public URL prefix under which uploads are referenced in task documents.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Service for file operations (upload, deletion, attachment loading).
pub struct FileService {
    data_dir: PathBuf,
    cv_file_prefix: String,
}

impl FileService {
    /// Create a new FileService using the data directory from config.
    pub fn new() -> Self {
        Self::with_data_dir(CONFIG.data_dir.clone(), &CONFIG.cv_file_prefix)
    }

    /// Create a new FileService rooted at a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf, cv_file_prefix: &str) -> Self {
        Self {
            data_dir,
            cv_file_prefix: cv_file_prefix.to_string(),
        }
    }

    fn upload_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Map a public path such as `/uploads/cv.pdf` onto the data directory.
    pub fn resolve_public_path(&self, public_path: &str) -> Result<PathBuf, ApiError> {
        if !is_safe_relative_path(public_path) {
            return Err(ApiError::bad_request(
                CODE_INVALID_PATH,
                ERR_INVALID_ATTACHMENT_PATH,
            ));
        }
        Ok(self.data_dir.join(public_path.trim_start_matches('/')))
    }

    /// Save a CV file for a task from a multipart upload.
    ///
    /// Reads the `cv` field, validates type and size, and stores it as
    /// `uploads/<prefix>_cv_<task_id>.<ext>`. The file is streamed to a
    /// temporary name and renamed into place once complete, so a rejected
    /// upload never clobbers the task's current CV.
    ///
    /// Returns the public path (e.g. "/uploads/applicant_cv_42.pdf").
    pub async fn save_cv(&self, task_id: &str, payload: &mut Multipart) -> Result<String, ApiError> {
        while let Some(item) = payload.next().await {
            let mut field = item.map_err(|e| {
                warn!("Failed to process multipart field: {}", e);
                ApiError::bad_request(CODE_FILE_UPLOAD_FAILED, ERR_FAILED_PROCESS_UPLOAD)
            })?;

            let field_name = field
                .content_disposition()
                .and_then(|cd| cd.get_name())
                .unwrap_or("");

            if field_name != "cv" {
                continue;
            }

            let content_type = field.content_type().map(|ct| ct.to_string());
            let extension = validate_cv_content_type(content_type.as_deref())?;
            let filename = format!("{}_cv_{}.{}", self.cv_file_prefix, task_id, extension);

            let upload_dir = self.upload_dir();
            std::fs::create_dir_all(&upload_dir).map_err(|e| {
                warn!("Failed to create upload directory: {}", e);
                ApiError::internal(CODE_INTERNAL_ERROR, ERR_FAILED_SAVE_FILE)
            })?;

            let filepath = upload_dir.join(&filename);
            let partial = upload_dir.join(format!("{}.part", filename));

            let mut file = std::fs::File::create(&partial).map_err(|e| {
                warn!("Failed to create file: {}", e);
                ApiError::internal(CODE_INTERNAL_ERROR, ERR_FAILED_SAVE_FILE)
            })?;

            let mut total_size: usize = 0;

            while let Some(chunk) = field.next().await {
                let data = match chunk {
                    Ok(data) => data,
                    Err(e) => {
                        warn!("Failed to read chunk: {}", e);
                        let _ = std::fs::remove_file(&partial);
                        return Err(ApiError::bad_request(
                            CODE_FILE_UPLOAD_FAILED,
                            ERR_FAILED_READ_FILE,
                        ));
                    }
                };

                total_size += data.len();
                if let Err(e) = validate_cv_size(total_size) {
                    let _ = std::fs::remove_file(&partial);
                    return Err(e);
                }

                if let Err(e) = file.write_all(&data) {
                    warn!("Failed to write file: {}", e);
                    let _ = std::fs::remove_file(&partial);
                    return Err(ApiError::internal(CODE_INTERNAL_ERROR, ERR_FAILED_SAVE_FILE));
                }
            }

            drop(file);
            std::fs::rename(&partial, &filepath).map_err(|e| {
                warn!("Failed to move upload into place: {}", e);
                let _ = std::fs::remove_file(&partial);
                ApiError::internal(CODE_INTERNAL_ERROR, ERR_FAILED_SAVE_FILE)
            })?;

            info!("Stored CV for task {} ({} bytes)", task_id, total_size);
            return Ok(format!("{}{}", UPLOADS_PREFIX, filename));
        }

        Err(ApiError::bad_request(CODE_FILE_UPLOAD_FAILED, ERR_NO_CV_FILE))
    }

    /// Delete a file from the upload directory.
    ///
    /// The file_path should be in the format "/uploads/filename.ext".
    /// Silently ignores paths outside the upload directory and missing files.
    pub fn delete_file(&self, file_path: &str) {
        if !file_path.starts_with(UPLOADS_PREFIX) {
            return;
        }
        if let Ok(filepath) = self.resolve_public_path(file_path) {
            if filepath.exists() {
                if let Err(e) = std::fs::remove_file(&filepath) {
                    warn!("Failed to delete {}: {}", filepath.display(), e);
                }
            }
        }
    }

    /// Load a file referenced by a public or data-relative path as an attachment.
    pub fn read_attachment(&self, name: &str, path: &str) -> Result<EmailAttachment, ApiError> {
        let filepath = self.resolve_public_path(path)?;
        let bytes = std::fs::read(&filepath).map_err(|e| {
            warn!("Failed to read attachment {}: {}", filepath.display(), e);
            ApiError::not_found(CODE_NOT_FOUND, format!("{}: {}", ERR_ATTACHMENT_MISSING, path))
        })?;

        Ok(EmailAttachment {
            filename: name.to_string(),
            content_type: content_type_for(&filepath).to_string(),
            bytes,
        })
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

/// MIME type guessed from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
