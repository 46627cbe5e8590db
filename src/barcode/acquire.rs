//! The three barcode input modes. All of them converge on the same
//! downstream contract: one non-empty digit string handed to the catalog.
//!
//! The platform decoder and the camera are external collaborators behind
//! the `SymbolDecoder` and `FrameSource` traits; this module owns mode
//! selection, the live frame loop, cancellation, and device release.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::symbology::{self, Symbology, SymbologyError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub text: String,
    pub symbology: Symbology,
}

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("Barcode is required")]
    EmptyInput,
    #[error("Could not detect a barcode in the uploaded image.")]
    NoSymbolInImage,
    #[error("decoded symbol failed verification: {0}")]
    BadSymbol(#[from] SymbologyError),
    #[error("camera access failed: {0}")]
    Device(String),
    #[error("scan cancelled")]
    Cancelled,
    #[error("camera stream ended without a decode")]
    StreamEnded,
}

/// One decode attempt over one image. `None` means no symbol was present,
/// which is not an error for the live loop.
pub trait SymbolDecoder: Send + Sync {
    fn decode(&self, image: &[u8], symbologies: &[Symbology]) -> Option<DecodedSymbol>;
}

/// A camera stream. `release` must stop the underlying device and is
/// idempotent; dropping the acquisition guard calls it on every exit path.
#[async_trait]
pub trait FrameSource: Send {
    async fn next_frame(&mut self) -> Result<Option<Bytes>, AcquireError>;
    fn release(&mut self);
}

struct StreamGuard<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

/// Manual entry: trimmed and non-empty, nothing more.
pub fn manual_entry(input: &str) -> Result<String, AcquireError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AcquireError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

/// Image upload: a single decode attempt; failure to find a symbol is an
/// error and there is no retry. A decode that fails check-digit
/// verification is also an error here.
pub fn decode_image(decoder: &dyn SymbolDecoder, image: &[u8]) -> Result<DecodedSymbol, AcquireError> {
    match decoder.decode(image, &symbology::ALL) {
        Some(symbol) => {
            symbology::verify(&symbol.text)?;
            Ok(symbol)
        }
        None => Err(AcquireError::NoSymbolInImage),
    }
}

/// Live decode: try every frame until one verifies, the stream ends, the
/// token is cancelled, or the device fails. Frames without a symbol, and
/// decodes that fail verification, are silently skipped. The camera is
/// released whichever way this returns.
pub async fn live_decode<S: FrameSource>(
    source: S,
    decoder: &dyn SymbolDecoder,
    cancel: &CancellationToken,
) -> Result<DecodedSymbol, AcquireError> {
    let mut guard = StreamGuard { source };
    loop {
        let frame = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("live decode cancelled");
                return Err(AcquireError::Cancelled);
            }
            frame = guard.source.next_frame() => frame?,
        };
        let Some(frame) = frame else {
            return Err(AcquireError::StreamEnded);
        };
        if let Some(symbol) = decoder.decode(&frame, &symbology::ALL) {
            if symbology::verify(&symbol.text).is_ok() {
                info!(barcode = %symbol.text, symbology = ?symbol.symbology, "live decode succeeded");
                return Ok(symbol);
            }
            debug!(text = %symbol.text, "discarding decode that failed verification");
        }
    }
}
