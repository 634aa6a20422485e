use image::{ImageFormat, RgbaImage};

use crate::error::{SkinFetchError, SkinFetchResult};

const PNG_HEADER: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Cheap check that the downloaded bytes start with the PNG magic, done
/// before handing them to the decoder.
#[must_use]
pub fn has_png_header(data: &[u8]) -> bool {
    data.starts_with(&PNG_HEADER)
}

pub fn decode_skin(data: &[u8]) -> SkinFetchResult<RgbaImage> {
    if !has_png_header(data) {
        return Err(SkinFetchError::InvalidPngHeader);
    }

    Ok(image::load_from_memory_with_format(data, ImageFormat::Png)?.into_rgba8())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, Rgba};

    use super::*;

    #[test]
    fn png_bytes_round_trip_through_the_decoder() {
        let image = RgbaImage::from_pixel(64, 32, Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        assert!(has_png_header(&bytes));

        let decoded = decode_skin(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn non_png_bytes_are_rejected_before_decoding() {
        assert!(!has_png_header(b"<html>"));
        assert!(matches!(
            decode_skin(b"<html>"),
            Err(SkinFetchError::InvalidPngHeader)
        ));
    }
}
