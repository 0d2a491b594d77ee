//! A library for stashing a note editor's session metadata inside PNG images.
//!
//! When the editor exports an annotated image it serializes the session to
//! JSON and embeds it in a `tEXt` chunk, so the exported file doubles as its
//! own save file: any viewer shows the flattened image, while the editor
//! recovers the full session from the same bytes.
//!
//! Everything operates on in-memory buffers (or their base64 data URL
//! encoding) and returns freshly allocated results; no function mutates its
//! input. The chunk layer is written by hand because byte-exact placement
//! matters: `pHYs` must directly follow `IHDR`, the session `tEXt` chunk sits
//! directly before `IEND`, and all other bytes (pixel data included) must
//! survive verbatim. See the [`png`] module for the wire format.
//!
//! The high level API lives in [`session`]:
//!
//! ```
//! use pngstash::session;
//!
//! // Non-PNG input passes through untouched.
//! let svg = "data:image/svg+xml;base64,PHN2Zy8+";
//! assert_eq!(session::write(svg, &Default::default()), svg);
//! assert!(!session::has(svg));
//! ```

pub mod data_url;
mod error;
mod formats;
pub mod png;
pub mod session;
#[cfg(feature = "svg")]
pub mod svg;
mod utils;

pub use error::{Error, Result};
pub use formats::dimensions;
pub use session::Session;

/// Intrinsic image dimensions in pixels.
///
/// SVG sizes may be fractional, so both probes report `f64` (the PNG path
/// widens its 32 bit header fields losslessly).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}
