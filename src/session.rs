//! The editor session envelope.
//!
//! When an editing session is exported, the editor state and configuration
//! are serialized to JSON and stashed verbatim in a `tEXt` chunk under the
//! reserved [`KEYWORD`], directly before `IEND`. The result stays an ordinary
//! PNG for every other consumer; reopening it in the editor recovers the full
//! session from the same bytes.

use crate::{data_url, error::Result, png};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The reserved `tEXt` keyword under which sessions are stashed.
pub const KEYWORD: &str = "pngstash-editor";

/// The embedded metadata envelope: editor state plus editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Editor document state (annotation objects, history).
    #[serde(default)]
    pub state: Value,
    /// Editor configuration active when the image was exported.
    #[serde(default)]
    pub config: Value,
}

/// Stashes `session` inside a PNG data URL.
///
/// Non-PNG input is returned unchanged, and so is the input on any internal
/// failure (which is logged): embedding must never corrupt the image the
/// user is trying to save.
pub fn write(image: &str, session: &Session) -> String {
    if data_url::mime_type(image) != Some(data_url::PNG) {
        return image.to_string();
    }
    match try_write(image, session) {
        Ok(written) => written,
        Err(err) => {
            error!("failed to stash session: {}", err);
            image.to_string()
        }
    }
}

fn try_write(image: &str, session: &Session) -> Result<String> {
    let data = data_url::decode(image)?;
    let text = serde_json::to_string(session)?;
    let data = png::insert_text(&data, KEYWORD, &text)?;
    Ok(data_url::encode(data_url::PNG, &data))
}

/// Recovers the session stashed in a PNG data URL, if there is one.
///
/// Returns `None` for non-PNG input, images without a stashed session, and
/// envelopes that no longer parse as JSON (logged, never propagated).
pub fn read(image: &str) -> Option<Session> {
    if data_url::mime_type(image) != Some(data_url::PNG) {
        return None;
    }
    let data = data_url::decode(image).ok()?;
    let text = png::read_text(&data, KEYWORD)?;
    match serde_json::from_str(&text) {
        Ok(session) => Some(session),
        Err(err) => {
            warn!("stashed session is not valid JSON: {}", err);
            None
        }
    }
}

/// Whether a PNG data URL carries a stashed session. Any failure is `false`.
pub fn has(image: &str) -> bool {
    if data_url::mime_type(image) != Some(data_url::PNG) {
        return false;
    }
    match data_url::decode(image) {
        Ok(data) => png::read_text(&data, KEYWORD).is_some(),
        Err(_) => false,
    }
}
