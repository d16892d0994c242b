//! Image decode check
//!
//! A file is considered intact when a general-purpose decoder can read all of
//! its pixels. The decoded buffer is dropped straight away; only success or
//! failure matters.

use image::{ImageReader, Limits};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::DecodeError;

/// Something that can try to decode a file as an image.
///
/// Any error marks the file as invalid. Closures implement this too, which
/// lets tests substitute a stub for the real decoder.
pub trait Decode {
    fn decode(&self, path: &Path) -> Result<(), DecodeError>;
}

impl<F> Decode for F
where
    F: Fn(&Path) -> Result<(), DecodeError>,
{
    fn decode(&self, path: &Path) -> Result<(), DecodeError> {
        self(path)
    }
}

/// Decoder backed by the `image` crate (JPEG, PNG, TIFF and the other
/// formats it enables by default)
///
/// No allocation or dimension caps apply unless set with
/// [`ImageCrateDecoder::with_limits`]: a large image that decodes is intact.
#[derive(Debug, Clone)]
pub struct ImageCrateDecoder {
    limits: Limits,
}

impl ImageCrateDecoder {
    pub fn new() -> Self {
        Self::with_limits(Limits::no_limits())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

impl Default for ImageCrateDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decode for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> Result<(), DecodeError> {
        isolate_panics(|| decode_image(path, &self.limits))
    }
}

/// Run `decode`, turning a panic into [`DecodeError::Panicked`].
///
/// Decoders fed hostile bytes have been known to panic; this keeps that
/// contained to the one file.
pub fn isolate_panics<F>(decode: F) -> Result<(), DecodeError>
where
    F: FnOnce() -> Result<(), DecodeError>,
{
    match panic::catch_unwind(AssertUnwindSafe(decode)) {
        Ok(outcome) => outcome,
        Err(payload) => Err(DecodeError::Panicked(panic_message(&*payload))),
    }
}

fn decode_image(path: &Path, limits: &Limits) -> Result<(), DecodeError> {
    // The reader (and its file handle) lives only for this call
    let mut reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.limits(limits.clone());
    let _pixels = reader.decode()?;
    Ok(())
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
