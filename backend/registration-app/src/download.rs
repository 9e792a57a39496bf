use std::path::{Path, PathBuf};

use common_utils::errors::CustomResult;
use domain_types::errors::DownloadError;
use error_stack::ResultExt;
use interfaces::device::FileDownloader;
use merchant_registration::utils::qr_code::decode_data_url;

/// Saves downloads as files in a local directory.
#[derive(Debug, Clone)]
pub struct FilesystemDownloader {
    output_dir: PathBuf,
}

impl FilesystemDownloader {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Target path of `file_name`; path separators in the name never leave the output directory.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        let file_name = file_name.replace(['/', '\\'], "_");
        let file_name = if matches!(file_name.trim(), "" | "." | "..") {
            "download".to_string()
        } else {
            file_name
        };
        self.output_dir.join(file_name)
    }
}

#[async_trait::async_trait]
impl FileDownloader for FilesystemDownloader {
    #[tracing::instrument(skip(self, data_url))]
    async fn download(&self, file_name: &str, data_url: &str) -> CustomResult<(), DownloadError> {
        let bytes = decode_data_url(data_url).change_context(DownloadError::InvalidDataUrl)?;
        let path = self.path_for(file_name);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .change_context(DownloadError::WriteFailed)
            .attach_printable_lazy(|| format!("directory: {}", self.output_dir.display()))?;
        tokio::fs::write(&path, bytes)
            .await
            .change_context(DownloadError::WriteFailed)
            .attach_printable_lazy(|| format!("path: {}", path.display()))?;

        tracing::info!(path = %path.display(), "file saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use merchant_registration::utils::qr_code::QrImage;

    use super::*;

    #[test]
    fn test_path_separators_are_replaced() {
        let downloader = FilesystemDownloader::new("/tmp/qr");
        assert_eq!(
            downloader.path_for("Cafe/X_qr.png"),
            PathBuf::from("/tmp/qr/Cafe_X_qr.png")
        );
        assert_eq!(
            downloader.path_for("..\\..\\etc_qr.png"),
            PathBuf::from("/tmp/qr/.._.._etc_qr.png")
        );
        assert_eq!(downloader.path_for(".."), PathBuf::from("/tmp/qr/download"));
    }

    #[tokio::test]
    async fn test_download_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("qr-codes");
        let downloader = FilesystemDownloader::new(&output_dir);
        let qr_image = QrImage::new_from_data("upi://pay?pa=cafe@upi".to_string()).unwrap();

        downloader
            .download("Cafe X_qr.png", &qr_image.data)
            .await
            .unwrap();

        let written = std::fs::read(output_dir.join("Cafe X_qr.png")).unwrap();
        assert_eq!(written, decode_data_url(&qr_image.data).unwrap());
        assert!(written.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn test_download_rejects_foreign_data() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = FilesystemDownloader::new(dir.path());

        let error = downloader
            .download("Cafe X_qr.png", "https://qr.example.com/MC001")
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &DownloadError::InvalidDataUrl);
        assert!(!dir.path().join("Cafe X_qr.png").exists());
    }
}
