use std::sync::Arc;

use crate::foundation::error::{CaseforgeError, CaseforgeResult};

/// Minimum accepted natural width for an uploaded image.
pub const MIN_UPLOAD_WIDTH: u32 = 300;
/// Minimum accepted natural height for an uploaded image.
pub const MIN_UPLOAD_HEIGHT: u32 = 500;
/// Uploads larger than this on either axis get downsampled.
pub const DOWNSAMPLE_THRESHOLD: u32 = 2000;
/// Bounding box that oversized uploads are downsampled into.
pub const DOWNSAMPLE_BOUND: u32 = 1500;

/// Decoded raster in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> CaseforgeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CaseforgeError::asset_decode(format!("decode image from memory: {e}")))?;
    Ok(prepared_from_dynamic(dyn_img))
}

/// Decode an uploaded image, enforcing the upload validation contract.
///
/// Assets below the natural-pixel floor are rejected with
/// [`CaseforgeError::ResolutionTooLow`] before any state is constructed from
/// them. Assets above [`DOWNSAMPLE_THRESHOLD`] on either axis are downsampled
/// into a [`DOWNSAMPLE_BOUND`] box, preserving aspect ratio; this is a
/// resource-economy measure and does not change pipeline semantics.
pub fn prepare_upload(bytes: &[u8]) -> CaseforgeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CaseforgeError::asset_decode(format!("decode upload: {e}")))?;
    let (width, height) = (dyn_img.width(), dyn_img.height());

    if width < MIN_UPLOAD_WIDTH || height < MIN_UPLOAD_HEIGHT {
        return Err(CaseforgeError::ResolutionTooLow {
            width,
            height,
            min_width: MIN_UPLOAD_WIDTH,
            min_height: MIN_UPLOAD_HEIGHT,
        });
    }

    let dyn_img = if width > DOWNSAMPLE_THRESHOLD || height > DOWNSAMPLE_THRESHOLD {
        tracing::debug!(width, height, bound = DOWNSAMPLE_BOUND, "downsampling upload");
        dyn_img.resize(
            DOWNSAMPLE_BOUND,
            DOWNSAMPLE_BOUND,
            image::imageops::FilterType::Lanczos3,
        )
    } else {
        dyn_img
    };

    Ok(prepared_from_dynamic(dyn_img))
}

fn prepared_from_dynamic(dyn_img: image::DynamicImage) -> PreparedImage {
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
