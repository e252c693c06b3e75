use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("valid non-alphanumeric pattern"));

/// Substrings left behind by flattening `.zip` / `.pdf` that carry no meaning in a name.
const NOISE_SUBSTRINGS: [&str; 2] = ["_zip", "_pdf"];

/// Lowercase, filesystem-safe filename for the last path segment of `url`.
///
/// The result only ever contains `[a-z0-9_]` plus the original extension, and
/// is a pure function of the input: the skip-if-present check relies on the
/// same URL always mapping to the same name. Distinct URLs may collide when
/// they differ only in punctuation or in the stripped noise substrings.
pub fn sanitized_filename(url: &str) -> String {
    let extension = path_extension(url);
    let base = base_name(url);

    let mut safe = NON_ALNUM_RUN.replace_all(base, "_").into_owned();
    for noise in NOISE_SUBSTRINGS {
        safe = safe.replace(noise, "");
    }
    if let Some(rest) = safe.strip_prefix('_') {
        safe = rest.to_string();
    }
    if path_extension(&safe) != extension {
        safe.push_str(extension);
    }
    safe.to_lowercase()
}

/// Extension of the last path segment including the dot, or `""`.
pub fn path_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) => &path[segment_start + dot..],
        None => "",
    }
}

/// Last non-empty path segment; trailing slashes are ignored.
fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
