//! Admin bulk upload of the member spreadsheet.

use crate::api::client::UploadFile;
use crate::api::models::UploadSummary;
use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct AdminUpload {
    file: Option<UploadFile>,
    pub uploading: bool,
    pub message: String,
    pub error: String,
}

impl AdminUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.file_name.as_str())
    }

    /// Only `.xlsx` workbooks are kept; anything else clears the selection.
    pub fn select(&mut self, file: UploadFile) -> bool {
        self.message.clear();
        if file.file_name.ends_with(".xlsx") {
            self.file = Some(file);
            self.error.clear();
            true
        } else {
            self.file = None;
            self.error = "Please select a valid .xlsx file".to_string();
            false
        }
    }

    pub fn start(&mut self) -> Option<UploadFile> {
        if self.uploading {
            return None;
        }
        let Some(file) = self.file.clone() else {
            self.error = "Please select a file to upload".to_string();
            return None;
        };
        self.uploading = true;
        self.error.clear();
        self.message.clear();
        Some(file)
    }

    pub fn finish(&mut self, result: Result<UploadSummary, ApiError>) {
        self.uploading = false;
        match result {
            Ok(summary) => {
                self.file = None;
                self.message = summary_message(&summary);
            }
            Err(e) => {
                log::error!("excel upload failed: {}", e);
                self.error = e.message_or("Failed to upload file");
            }
        }
    }
}

pub fn summary_message(s: &UploadSummary) -> String {
    format!(
        "Upload completed successfully! Created {} new records, preserved {} existing records. Total records in database: {}",
        s.records_created, s.records_skipped, s.total_database_records
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook() -> UploadFile {
        UploadFile { file_name: "book1.xlsx".into(), bytes: vec![1, 2, 3] }
    }

    #[test]
    fn rejects_other_formats() {
        let mut upload = AdminUpload::new();
        assert!(!upload.select(UploadFile { file_name: "book1.csv".into(), bytes: vec![] }));
        assert_eq!(upload.error, "Please select a valid .xlsx file");
        assert!(upload.file_name().is_none());
    }

    #[test]
    fn nothing_selected() {
        let mut upload = AdminUpload::new();
        assert!(upload.start().is_none());
        assert_eq!(upload.error, "Please select a file to upload");
    }

    #[test]
    fn success_reports_counts() {
        let mut upload = AdminUpload::new();
        upload.select(workbook());
        assert!(upload.start().is_some());
        assert!(upload.start().is_none());
        upload.finish(Ok(UploadSummary {
            records_created: 12,
            records_skipped: 3,
            total_database_records: 240,
            message: String::new(),
        }));
        assert_eq!(
            upload.message,
            "Upload completed successfully! Created 12 new records, preserved 3 existing records. Total records in database: 240"
        );
        assert!(upload.file_name().is_none());
    }

    #[test]
    fn failure_prefers_server_error() {
        let mut upload = AdminUpload::new();
        upload.select(workbook());
        upload.start();
        upload.finish(Err(ApiError::Status { status: 400, message: "Sheet is empty".into() }));
        assert_eq!(upload.error, "Sheet is empty");
        assert_eq!(upload.file_name(), Some("book1.xlsx"));
    }
}
