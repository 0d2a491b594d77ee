//! # Portable Network Graphics
//!
//! PNG data is stored in chunks. Each chunk is structured as follows:
//!
//! - 4 byte big endian number describing the length of the data within.
//! - 4 byte ASCII identifier for the chunk type.
//! - The chunk data itself.
//! - A big endian CRC-32 checksum of the chunk type and data.
//!
//! A file starts with an 8 byte signature followed by an `IHDR` chunk
//! carrying the image dimensions, and ends with an `IEND` chunk. Keyworded
//! text metadata lives in `tEXt` chunks, whose data is a keyword, a NUL
//! separator, and the text. Physical pixel density lives in a `pHYs` chunk
//! placed directly after `IHDR`.
//!
//! Pngstash stores the editor session in a `tEXt` chunk placed directly
//! before `IEND`. The compressed (`zTXt`) and international (`iTXt`) text
//! variants are recognized for keyword replacement but never written or
//! decoded: uncompressed `tEXt` trades file size for universal decoder
//! compatibility.
//!
//! ## Relevant Links
//!
//! - [Wikipedia article for PNG](https://en.wikipedia.org/wiki/Portable_Network_Graphics)
//! - [The PNG specification](https://www.w3.org/TR/png-3/)

use crate::{
    error::{Error, Result},
    utils::{read_u32_be, splice},
    Dimensions,
};
use log::warn;
use std::borrow::Cow;

/// The 8 byte signature every PNG file starts with.
pub const MAGIC: &[u8] = b"\x89PNG\x0D\x0A\x1A\x0A";

const HEADER_CHUNK: &[u8; 4] = b"IHDR";
const END_CHUNK: &[u8; 4] = b"IEND";
const TEXT_CHUNK: &[u8; 4] = b"tEXt";
const COMPRESSED_TEXT_CHUNK: &[u8; 4] = b"zTXt";
const UNICODE_TEXT_CHUNK: &[u8; 4] = b"iTXt";
const DENSITY_CHUNK: &[u8; 4] = b"pHYs";

const INCHES_PER_METER: f64 = 39.3701;

const CRC: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// Checks that `data` starts with the PNG signature.
pub fn check_signature(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}

/// The PNG CRC-32 of a chunk, computed over the type and data.
pub fn crc32(kind: &[u8; 4], data: &[u8]) -> u32 {
    let mut digest = CRC.digest();
    digest.update(kind);
    digest.update(data);
    digest.finalize()
}

/// A chunk descriptor borrowing its data from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<'a> {
    /// Byte offset of the chunk's length field.
    pub start: usize,
    /// The 4 byte ASCII chunk type.
    pub kind: [u8; 4],
    /// The chunk data, without framing.
    pub data: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Framed length: length field + type + data + CRC.
    pub fn total_len(&self) -> usize {
        self.data.len() + 12
    }

    /// Offset of the first byte after this chunk.
    pub fn end(&self) -> usize {
        self.start + self.total_len()
    }

    fn is_text(&self) -> bool {
        matches!(&self.kind, TEXT_CHUNK | COMPRESSED_TEXT_CHUNK | UNICODE_TEXT_CHUNK)
    }

    /// For text chunks, the data bytes before the first NUL separator.
    pub fn keyword(&self) -> Option<&'a [u8]> {
        if !self.is_text() {
            return None;
        }
        Some(match self.data.iter().position(|&byte| byte == 0) {
            Some(nul) => &self.data[..nul],
            None => self.data,
        })
    }
}

/// Lazily walks the chunk stream of `data`, starting after the signature.
///
/// A buffer without the signature iterates as empty. A chunk whose declared
/// length overruns the buffer stops iteration; everything before it is still
/// yielded.
pub fn chunks(data: &[u8]) -> Chunks<'_> {
    let offset = if check_signature(data) { MAGIC.len() } else { data.len() };
    Chunks { data, offset }
}

/// Iterator returned by [`chunks`].
pub struct Chunks<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        if self.offset + 12 > self.data.len() {
            return None;
        }
        let length = read_u32_be(self.data, self.offset) as usize;
        if length > self.data.len() - self.offset - 12 {
            // Truncated chunk, treat the rest of the buffer as garbage
            return None;
        }
        let mut kind = [0; 4];
        kind.copy_from_slice(&self.data[self.offset + 4..self.offset + 8]);
        let chunk = Chunk {
            start: self.offset,
            kind,
            data: &self.data[self.offset + 8..self.offset + 8 + length],
        };
        self.offset += chunk.total_len();
        Some(chunk)
    }
}

// Frames `payload` as a chunk: length, type, payload, CRC.
fn build_chunk(kind: &[u8; 4], payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() as u64 >= u32::MAX as u64 {
        return Err(Error::ChunkSizeOverflow);
    }
    let mut chunk = Vec::with_capacity(payload.len() + 12);
    chunk.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    chunk.extend_from_slice(kind);
    chunk.extend_from_slice(payload);
    chunk.extend_from_slice(&crc32(kind, payload).to_be_bytes());
    Ok(chunk)
}

// Rebuilds the buffer without the chunks matching `remove`. Surviving chunks
// keep their original order, so IHDR stays first and IEND stays last.
fn remove_chunks<'a>(data: &'a [u8], remove: impl Fn(&Chunk) -> bool) -> Cow<'a, [u8]> {
    let (keep, drop): (Vec<_>, Vec<_>) = chunks(data).partition(|chunk| !remove(chunk));
    if drop.is_empty() {
        return Cow::Borrowed(data);
    }
    let length = MAGIC.len() + keep.iter().map(Chunk::total_len).sum::<usize>();
    let mut out = Vec::with_capacity(length);
    out.extend_from_slice(MAGIC);
    for chunk in keep {
        out.extend_from_slice(&data[chunk.start..chunk.end()]);
    }
    Cow::Owned(out)
}

/// Returns `data` with every text chunk matching `keyword` removed.
///
/// If nothing matches (or the buffer is not a PNG) the input is returned
/// as-is, without allocating.
pub fn remove_text<'a>(data: &'a [u8], keyword: &str) -> Cow<'a, [u8]> {
    remove_chunks(data, |chunk| chunk.keyword() == Some(keyword.as_bytes()))
}

/// Reads the text stored under `keyword` in an uncompressed `tEXt` chunk.
///
/// `zTXt` and `iTXt` chunks are never decoded. Returns `None` for non-PNG
/// input, an absent keyword, or text that is not valid UTF-8.
pub fn read_text(data: &[u8], keyword: &str) -> Option<String> {
    chunks(data)
        .filter(|chunk| &chunk.kind == TEXT_CHUNK)
        .find(|chunk| chunk.keyword() == Some(keyword.as_bytes()))
        .and_then(|chunk| {
            let nul = chunk.data.iter().position(|&byte| byte == 0)?;
            String::from_utf8(chunk.data[nul + 1..].to_vec()).ok()
        })
}

/// Stores `text` under `keyword` in a `tEXt` chunk directly before `IEND`.
///
/// Any existing text chunk with the same keyword is removed first, so at most
/// one chunk per keyword survives and repeated calls replace the value. All
/// other bytes (pixel data included) are preserved verbatim.
pub fn insert_text(data: &[u8], keyword: &str, text: &str) -> Result<Vec<u8>> {
    if !check_signature(data) {
        return Err(Error::InvalidSource("missing png signature"));
    }
    let cleaned = remove_text(data, keyword);
    let end = chunks(&cleaned)
        .find(|chunk| &chunk.kind == END_CHUNK)
        .ok_or(Error::InvalidSource("IEND chunk not found"))?;
    let mut payload = Vec::with_capacity(keyword.len() + 1 + text.len());
    payload.extend_from_slice(keyword.as_bytes());
    payload.push(0);
    payload.extend_from_slice(text.as_bytes());
    let chunk = build_chunk(TEXT_CHUNK, &payload)?;
    Ok(splice(&cleaned, end.start, &chunk))
}

/// Records `dpi` in a `pHYs` chunk directly after `IHDR`.
///
/// Existing `pHYs` chunks are removed first, so repeated calls replace the
/// density instead of accumulating duplicates.
pub fn insert_phys(data: &[u8], dpi: f64) -> Result<Vec<u8>> {
    if !check_signature(data) {
        return Err(Error::InvalidSource("missing png signature"));
    }
    let cleaned = remove_chunks(data, |chunk| &chunk.kind == DENSITY_CHUNK);
    let header = chunks(&cleaned)
        .find(|chunk| &chunk.kind == HEADER_CHUNK)
        .ok_or(Error::InvalidSource("IHDR chunk not found"))?;
    let ppm = ((dpi * INCHES_PER_METER).round() as u32).to_be_bytes();
    let mut payload = [0; 9];
    payload[..4].copy_from_slice(&ppm);
    payload[4..8].copy_from_slice(&ppm);
    payload[8] = 1; // unit: meters
    let chunk = build_chunk(DENSITY_CHUNK, &payload)?;
    Ok(splice(&cleaned, header.end(), &chunk))
}

/// Reads the image dimensions out of the IHDR chunk, without decoding.
pub fn dimensions(data: &[u8]) -> Option<Dimensions> {
    if !check_signature(data) {
        warn!("not a png");
        return None;
    }
    if data.len() < 24 {
        warn!("png data too short");
        return None;
    }
    if &data[12..16] != &HEADER_CHUNK[..] {
        warn!("first chunk is not IHDR");
        return None;
    }
    Some(Dimensions {
        width: read_u32_be(data, 16) as f64,
        height: read_u32_be(data, 20) as f64,
    })
}

// A structurally valid PNG (the IDAT payload is filler, nothing here decodes
// pixel data).
#[cfg(test)]
pub(crate) fn sample(width: u32, height: u32) -> Vec<u8> {
    let mut header = Vec::with_capacity(13);
    header.extend_from_slice(&width.to_be_bytes());
    header.extend_from_slice(&height.to_be_bytes());
    header.extend_from_slice(&[8, 6, 0, 0, 0]); // 8 bit RGBA, no interlace
    let mut png = MAGIC.to_vec();
    png.extend(build_chunk(HEADER_CHUNK, &header).unwrap());
    png.extend(build_chunk(b"IDAT", &[0; 16]).unwrap());
    png.extend(build_chunk(END_CHUNK, &[]).unwrap());
    png
}
