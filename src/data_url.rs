//! Helpers for the `data:<mime>;base64,<payload>` URL scheme the editor uses
//! to hand images around.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// MIME type of PNG images.
pub const PNG: &str = "image/png";
/// MIME type of SVG images.
pub const SVG: &str = "image/svg+xml";

/// The MIME type of a data URL, or `None` if the string is not one.
pub fn mime_type(data_url: &str) -> Option<&str> {
    let rest = data_url.strip_prefix("data:")?;
    let end = rest.find([';', ','])?;
    Some(&rest[..end])
}

/// Decodes the base64 payload of a data URL.
pub fn decode(data_url: &str) -> Result<Vec<u8>> {
    let payload = data_url
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .ok_or(Error::InvalidSource("missing base64 payload"))?;
    Ok(BASE64.decode(payload)?)
}

/// Builds a data URL from a MIME type and raw bytes.
pub fn encode(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(data))
}

/// The file extension conventionally used for a supported MIME type.
pub fn mime_to_format(mime: &str) -> Option<&'static str> {
    match mime {
        PNG => Some("png"),
        SVG => Some("svg"),
        _ => None,
    }
}

/// The MIME type for a supported file extension.
pub fn format_to_mime(format: &str) -> Option<&'static str> {
    match format {
        "png" => Some(PNG),
        "svg" => Some(SVG),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mime_types() {
        assert_eq!(mime_type("data:image/png;base64,AAAA"), Some(PNG));
        assert_eq!(mime_type("data:image/svg+xml;base64,PHN2Zy8+"), Some(SVG));
        assert_eq!(mime_type("data:,plain"), Some(""));
        assert_eq!(mime_type("https://example.com/image.png"), None);
    }

    #[test]
    fn round_trips_bytes() {
        let url = encode(PNG, &[1, 2, 3, 255]);
        assert_eq!(url, "data:image/png;base64,AQID/w==");
        assert_eq!(decode(&url).unwrap(), vec![1, 2, 3, 255]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(decode("data:image/png,rawpayload"), Err(Error::InvalidSource(_))));
        assert!(matches!(decode("data:image/png;base64,@@@@"), Err(Error::Base64(_))));
    }

    #[test]
    fn maps_formats() {
        assert_eq!(mime_to_format(PNG), Some("png"));
        assert_eq!(format_to_mime("svg"), Some(SVG));
        assert_eq!(mime_to_format("image/gif"), None);
        assert_eq!(format_to_mime("gif"), None);
    }
}
