//! QR code rendering for merchant payment links
//!
//! A link is encoded at the highest error correction level, framed by a
//! one-module white margin and scaled to a fixed square PNG, which is handed
//! around as a base64 data url.

use base64::Engine;
use common_utils::consts::{QR_IMAGE_DATA_SOURCE_STRING, QR_IMAGE_SIZE, QR_MARGIN_MODULES};
use error_stack::{report, ResultExt};
use image::{imageops, DynamicImage, ImageBuffer, ImageFormat, Luma};

pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

const WHITE: Luma<u8> = Luma([255]);

/// QR code image with base64 encoded data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    pub data: String,
}

impl QrImage {
    pub fn new_from_data(data: String) -> Result<Self, error_stack::Report<QrCodeError>> {
        let qr_code =
            qrcode::QrCode::with_error_correction_level(data.as_bytes(), qrcode::EcLevel::H)
                .change_context(QrCodeError::FailedToCreateQrCode)?;

        let modules = qr_code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .module_dimensions(1, 1)
            .build();

        let (width, height) = modules.dimensions();
        let mut framed = ImageBuffer::from_pixel(
            width + 2 * QR_MARGIN_MODULES,
            height + 2 * QR_MARGIN_MODULES,
            WHITE,
        );
        imageops::overlay(
            &mut framed,
            &modules,
            i64::from(QR_MARGIN_MODULES),
            i64::from(QR_MARGIN_MODULES),
        );

        // nearest neighbour keeps module edges sharp
        let scaled = imageops::resize(
            &framed,
            QR_IMAGE_SIZE,
            QR_IMAGE_SIZE,
            imageops::FilterType::Nearest,
        );

        let mut image_bytes = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(scaled)
            .write_to(&mut image_bytes, ImageFormat::Png)
            .change_context(QrCodeError::FailedToEncodeImage)?;

        let image_data_source = format!(
            "{},{}",
            QR_IMAGE_DATA_SOURCE_STRING,
            BASE64_ENGINE.encode(image_bytes.get_ref())
        );
        Ok(Self {
            data: image_data_source,
        })
    }
}

/// PNG bytes behind a `data:image/png;base64,` url.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, error_stack::Report<QrCodeError>> {
    let encoded = data_url
        .strip_prefix(QR_IMAGE_DATA_SOURCE_STRING)
        .and_then(|rest| rest.strip_prefix(','))
        .ok_or_else(|| report!(QrCodeError::InvalidDataUrl))?;

    BASE64_ENGINE
        .decode(encoded)
        .change_context(QrCodeError::InvalidDataUrl)
}

/// Errors for Qr code handling
#[derive(Debug, thiserror::Error)]
pub enum QrCodeError {
    /// Failed to encode data into Qr code
    #[error("Failed to create Qr code")]
    FailedToCreateQrCode,
    /// Failed to write the Qr code as PNG
    #[error("Failed to encode Qr code image")]
    FailedToEncodeImage,
    /// The rendering task did not finish
    #[error("Qr code rendering was interrupted")]
    RenderingInterrupted,
    #[error("Not a base64 PNG data url")]
    InvalidDataUrl,
}
