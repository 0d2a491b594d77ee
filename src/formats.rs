use crate::{data_url, Dimensions};

/// Probes the intrinsic dimensions of an image passed as a data URL.
///
/// Dispatches on the MIME type. Unsupported types (and anything that is not
/// a data URL) return `None`.
pub fn dimensions(image: &str) -> Option<Dimensions> {
    match data_url::mime_type(image)? {
        data_url::PNG => crate::png::dimensions(&data_url::decode(image).ok()?),
        #[cfg(feature = "svg")]
        data_url::SVG => {
            let data = data_url::decode(image).ok()?;
            crate::svg::dimensions(std::str::from_utf8(&data).ok()?)
        }
        _ => None,
    }
}
