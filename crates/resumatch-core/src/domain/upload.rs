use std::path::Path;

use mime::Mime;

use crate::error::ApiError;

/// Largest resume file accepted for upload (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const DOC_MIME: &str = "application/msword";

/// File extensions accepted for upload, with the content type sent for each.
pub const ALLOWED_EXTENSIONS: [(&str, &str); 3] = [
    ("pdf", "application/pdf"),
    ("doc", DOC_MIME),
    ("docx", DOCX_MIME),
];

/// A resume file that passed client-side checks.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Mime,
    pub size: u64,
}

impl UploadFile {
    /// Check a candidate file by name and size before sending it anywhere.
    pub fn validate(path: &Path, size: u64) -> Result<Self, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::validation("Please select a file to upload."))?;

        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(content_type_for)
            .ok_or_else(|| ApiError::validation("Invalid file type. Only PDF, DOC, DOCX allowed."))?;

        if size > MAX_UPLOAD_BYTES {
            return Err(ApiError::validation(format!(
                "File size exceeds {} MB.",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        Ok(Self {
            file_name: file_name.to_string(),
            content_type,
            size,
        })
    }
}

fn content_type_for(extension: &str) -> Option<Mime> {
    let extension = extension.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .find(|(allowed, _)| *allowed == extension)
        .and_then(|(_, content_type)| content_type.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_allowed_extension_has_a_content_type() {
        for (extension, content_type) in ALLOWED_EXTENSIONS {
            let name = format!("resume.{extension}");
            let file = UploadFile::validate(Path::new(&name), 10).unwrap();
            assert_eq!(file.content_type.essence_str(), content_type);
        }
    }

    #[test]
    fn test_accepts_resume_formats() {
        let pdf = UploadFile::validate(Path::new("/tmp/cv.PDF"), 1024).unwrap();
        assert_eq!(pdf.content_type, mime::APPLICATION_PDF);
        assert_eq!(pdf.file_name, "cv.PDF");

        let docx = UploadFile::validate(Path::new("cv.docx"), 1024).unwrap();
        assert_eq!(docx.content_type.essence_str(), DOCX_MIME);

        let doc = UploadFile::validate(Path::new("cv.doc"), 1024).unwrap();
        assert_eq!(doc.content_type.essence_str(), DOC_MIME);
    }

    #[test]
    fn test_rejects_other_types() {
        let err = UploadFile::validate(Path::new("photo.png"), 10).unwrap_err();
        assert_eq!(err.message(), "Invalid file type. Only PDF, DOC, DOCX allowed.");

        assert!(UploadFile::validate(Path::new("README"), 10).is_err());
    }

    #[test]
    fn test_rejects_oversized_files() {
        let err = UploadFile::validate(Path::new("cv.pdf"), MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert_eq!(err.message(), "File size exceeds 5 MB.");

        assert!(UploadFile::validate(Path::new("cv.pdf"), MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_rejects_missing_file_name() {
        let err = UploadFile::validate(Path::new(""), 0).unwrap_err();
        assert_eq!(err.message(), "Please select a file to upload.");
    }
}
