use crate::foundation::error::{QrStreamError, QrStreamResult};

/// Error-correction level used for every symbol this crate produces.
pub const ERROR_CORRECTION: qrcode::EcLevel = qrcode::EcLevel::L;

/// Encode `text` into a QR symbol at [`ERROR_CORRECTION`], choosing the smallest version that
/// fits.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn encode_text(text: &str) -> QrStreamResult<qrcode::QrCode> {
    let code = qrcode::QrCode::with_error_correction_level(text.as_bytes(), ERROR_CORRECTION)
        .map_err(|e| QrStreamError::encoding(format!("cannot encode text as QR code: {e}")))?;
    tracing::debug!(modules = code.width(), "encoded symbol");
    Ok(code)
}

#[cfg(test)]
#[path = "../../tests/unit/symbol/encode.rs"]
mod tests;
