//! # Scalable Vector Graphics
//!
//! SVG is XML, so the intrinsic size is declared rather than encoded: the
//! root `svg` element may carry `width`/`height` attributes (bare numbers or
//! `px` suffixed lengths), a `viewBox` whose third and fourth components give
//! the size, or both.
//!
//! Only dimension probing is implemented, rendering is out of scope.
//!
//! ## Relevant Links
//!
//! - [SVG coordinate systems and units](https://www.w3.org/TR/SVG2/coords.html)

use crate::Dimensions;
use quick_xml::{events::Event, Reader};

/// Extracts the intrinsic dimensions of an SVG document.
///
/// Explicit `width`/`height` attributes win; a missing or unit-bearing one
/// falls back to the `viewBox` size. Returns `None` unless both dimensions
/// resolve to positive numbers.
pub fn dimensions(text: &str) -> Option<Dimensions> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if element.local_name().as_ref() != b"svg" {
                    return None;
                }
                let mut width = None;
                let mut height = None;
                let mut view_box = None;
                for attribute in element.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attribute.value);
                    match attribute.key.local_name().as_ref() {
                        b"width" => width = parse_length(&value),
                        b"height" => height = parse_length(&value),
                        b"viewBox" => view_box = parse_view_box(&value),
                        _ => {}
                    }
                }
                let width = width.or(view_box.map(|(w, _)| w))?;
                let height = height.or(view_box.map(|(_, h)| h))?;
                return (width > 0.0 && height > 0.0).then_some(Dimensions { width, height });
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {} // prolog, comments, whitespace
        }
    }
}

// Accepts a bare number or a `px` suffixed one. Anything else (`%`, `em`,
// `pt`) has no usable pixel value and falls through to the viewBox.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &value[number.len()..];
    if !suffix.is_empty() && !suffix.eq_ignore_ascii_case("px") {
        return None;
    }
    let length: f64 = number.trim_end().parse().ok()?;
    length.is_finite().then_some(length)
}

// viewBox is `min-x min-y width height`; only the last two matter here.
fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let mut parts = value.split_whitespace().map(str::parse::<f64>);
    parts.next()?.ok()?;
    parts.next()?.ok()?;
    let width = parts.next()?.ok()?;
    let height = parts.next()?.ok()?;
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(svg: &str) -> Option<(f64, f64)> {
        dimensions(svg).map(|d| (d.width, d.height))
    }

    #[test]
    fn explicit_attributes() {
        assert_eq!(probe(r#"<svg width="100" height="50"></svg>"#), Some((100.0, 50.0)));
        assert_eq!(probe(r#"<svg width="12.5px" height="8PX"/>"#), Some((12.5, 8.0)));
    }

    #[test]
    fn view_box_fallback() {
        assert_eq!(probe(r#"<svg viewBox="0 0 120 80"></svg>"#), Some((120.0, 80.0)));
        assert_eq!(probe(r#"<svg width="640" viewBox="0 0 120 80"/>"#), Some((640.0, 80.0)));
        // Percentages have no intrinsic pixel value, the viewBox wins.
        assert_eq!(
            probe(r#"<svg width="100%" height="100%" viewBox="0 0 3 4"/>"#),
            Some((3.0, 4.0))
        );
    }

    #[test]
    fn rejects_unusable_documents() {
        assert_eq!(probe("<svg></svg>"), None);
        assert_eq!(probe(r#"<svg width="0" height="5"/>"#), None);
        assert_eq!(probe(r#"<svg width="4em" height="5em"/>"#), None);
        assert_eq!(probe(r#"<html width="3" height="4"></html>"#), None);
        assert_eq!(probe("not xml at all"), None);
        assert_eq!(probe(r#"<svg viewBox="0 0 banana 80"/>"#), None);
    }

    #[test]
    fn prolog_and_comments_are_skipped() {
        let doc = r#"<?xml version="1.0"?><!-- exported --><svg viewBox="0 0 10 20"/>"#;
        assert_eq!(probe(doc), Some((10.0, 20.0)));
    }
}
