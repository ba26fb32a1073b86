//! Handler for QR code image generation.

use axum::extract::Query;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use qrcode::{Color, QrCode};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

/// Pixels per QR module.
const MODULE_SCALE: u32 = 8;
/// Quiet zone width in modules, as the QR standard requires.
const QUIET_ZONE_MODULES: u32 = 4;

#[derive(Debug, Deserialize)]
pub struct QrParams {
    pub url: Option<String>,
}

/// Renders a QR code PNG for the given text.
///
/// # Endpoint
///
/// `GET /qr?url=https://short.example/abc`
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing or empty, and
/// 500 Internal Server Error if the payload cannot be encoded.
pub async fn qr_handler(Query(params): Query<QrParams>) -> Result<Response, AppError> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Missing url parameter", json!({})))?;

    let png = render_qr_png(&url)?;

    let mut response = (StatusCode::OK, png).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    Ok(response)
}

/// Encodes `data` as a grayscale QR PNG with a quiet zone border.
fn render_qr_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| {
        AppError::internal("Failed to generate QR code", json!({ "reason": e.to_string() }))
    })?;

    let modules = code.width() as u32;
    let size = (modules + 2 * QUIET_ZONE_MODULES) * MODULE_SCALE;
    let mut pixels = vec![0xFFu8; (size as usize) * (size as usize)];

    for y in 0..modules {
        for x in 0..modules {
            if code[(x as usize, y as usize)] != Color::Dark {
                continue;
            }
            let px = (x + QUIET_ZONE_MODULES) * MODULE_SCALE;
            let py = (y + QUIET_ZONE_MODULES) * MODULE_SCALE;
            for dy in 0..MODULE_SCALE {
                let row = ((py + dy) * size + px) as usize;
                pixels[row..row + MODULE_SCALE as usize].fill(0x00);
            }
        }
    }

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&pixels, size, size, ExtendedColorType::L8)
        .map_err(|e| {
            AppError::internal("Failed to encode QR image", json!({ "reason": e.to_string() }))
        })?;

    Ok(out)
}
