use once_cell::sync::Lazy;
use regex::Regex;

use crate::FileKind;

static PDF_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="([^"]+\.pdf)""#).expect("valid pdf href pattern"));

static ZIP_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="([^"]+\.zip)""#).expect("valid zip href pattern"));

fn href_pattern(kind: FileKind) -> &'static Regex {
    match kind {
        FileKind::Pdf => &*PDF_HREF_RE,
        FileKind::Zip => &*ZIP_HREF_RE,
    }
}

/// Every double-quoted `href` value ending in the kind's extension, in
/// document order and including duplicates.
///
/// The match is a plain pattern scan over the raw text, so single-quoted or
/// unquoted attributes are not seen.
pub fn extract_links(text: &str, kind: FileKind) -> Vec<String> {
    href_pattern(kind)
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_pdf_links(text: &str) -> Vec<String> {
    extract_links(text, FileKind::Pdf)
}

pub fn extract_zip_links(text: &str) -> Vec<String> {
    extract_links(text, FileKind::Zip)
}
