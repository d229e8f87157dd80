use serde::Serialize;

/// File extensions accepted into the gallery (matched case-insensitively)
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "mp4", "mov"];

/// Extensions rendered as `<video>` rather than `<img>`
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

/// A single gallery entry, recomputed from the storage listing per request
#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub filename: String,
    pub description: String,
    pub media_type: MediaType,
    pub url: String,
}

/// Lowercased extension of a filename, if any
pub fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether a filename carries one of the allowed media extensions
pub fn is_allowed_extension(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

pub fn media_type_for(filename: &str) -> MediaType {
    match extension_of(filename) {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaType::Video,
        _ => MediaType::Image,
    }
}

/// Human-readable description derived from the filename stem
pub fn description_for(filename: &str) -> String {
    let stem = filename.rsplit_once('.').map(|(s, _)| s).unwrap_or(filename);
    stem.replace(['_', '-'], " ")
}

/// Reduce an uploaded filename to a safe storage path segment.
///
/// Path separators are dropped, everything outside a conservative character
/// set is replaced with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match_is_case_insensitive() {
        assert!(is_allowed_extension("photo.jpg"));
        assert!(is_allowed_extension("photo.JPG"));
        assert!(is_allowed_extension("clip.Mp4"));
    }

    #[test]
    fn test_disallowed_extensions_rejected() {
        assert!(!is_allowed_extension("notes.txt"));
        assert!(!is_allowed_extension("archive.tar.gz"));
        assert!(!is_allowed_extension("no_extension"));
        assert!(!is_allowed_extension(".env"));
    }

    #[test]
    fn test_media_type_by_extension() {
        assert_eq!(media_type_for("a.jpg"), MediaType::Image);
        assert_eq!(media_type_for("a.MOV"), MediaType::Video);
        assert_eq!(media_type_for("a.mp4"), MediaType::Video);
    }

    #[test]
    fn test_description_from_stem() {
        assert_eq!(description_for("golden_gate-dusk.jpg"), "golden gate dusk");
        assert_eq!(description_for("sunset.jpg"), "sunset");
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("dir\\photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("my photo!.jpg"), "my_photo_.jpg");
    }
}
