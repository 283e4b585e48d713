//! Image resolution and encoding: reference string → base64 payload.
//!
//! ## Why basename-only lookup?
//!
//! Image references come from the dataset file, which is untrusted input. A
//! reference like `"../../etc/passwd"` or an absolute path must never read
//! outside the configured image directory, so only the final path component
//! of a reference is ever joined onto the store. This is a security
//! invariant, not a convenience; absolute references are treated the same
//! way (opaque string, basename extracted).
//!
//! Encoding is a straight byte pass-through: the file's content is base64
//! encoded with the standard alphabet, no line wrapping, no re-compression.
//! Decoding the payload reproduces the original file exactly.

use crate::error::{Mcq2TsvError, RowWarning};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolve an image reference to a path inside `base_dir`.
///
/// Only the reference's final path component is used; directory segments and
/// absolute prefixes are discarded. Returns `None` when the sanitized path
/// does not exist — the caller decides the diagnostic.
pub fn resolve_image_path(reference: &str, base_dir: &Path) -> Option<PathBuf> {
    let name = Path::new(reference).file_name()?;
    let path = base_dir.join(name);
    path.exists().then_some(path)
}

/// Read a file and encode its full content with standard base64.
pub fn encode_image_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let b64 = STANDARD.encode(&bytes);
    debug!("encoded {} → {} bytes base64", path.display(), b64.len());
    Ok(b64)
}

/// Resolve and encode every reference, joining the survivors with `;`.
///
/// A reference that does not resolve (or whose file disappears between the
/// existence check and the read) contributes nothing to the row: it is
/// logged, recorded as a [`RowWarning`], and skipped. Duplicated references
/// are encoded once per occurrence.
pub fn encode_images(refs: &[String], base_dir: &Path) -> (String, Vec<RowWarning>) {
    let mut payloads = Vec::with_capacity(refs.len());
    let mut warnings = Vec::new();

    for reference in refs {
        let looked_up = resolve_image_path(reference, base_dir);
        let encoded = looked_up.as_deref().and_then(|p| encode_image_file(p).ok());
        match encoded {
            Some(b64) => payloads.push(b64),
            None => {
                let path = looked_up.unwrap_or_else(|| {
                    let name = Path::new(reference).file_name().unwrap_or_default();
                    base_dir.join(name)
                });
                warn!("image not found: '{}' (looked up {})", reference, path.display());
                warnings.push(RowWarning::MissingImage {
                    reference: reference.clone(),
                    path,
                });
            }
        }
    }

    (payloads.join(";"), warnings)
}

/// Re-encode an image as a size-bounded base64 JPEG.
///
/// Not used by the conversion pipeline (rows carry the original bytes
/// untouched); kept for callers preparing payloads for APIs with upload
/// limits. Alpha and paletted images are flattened to RGB first, since JPEG
/// has no alpha channel. `target_size` bounds the longest edge, preserving
/// aspect ratio; `None` re-encodes at the original dimensions.
pub fn encode_thumbnail(path: &Path, target_size: Option<u32>) -> Result<String, Mcq2TsvError> {
    let img = image::open(path).map_err(|e| Mcq2TsvError::ThumbnailFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let img = match target_size {
        Some(edge) if edge > 0 => img.thumbnail(edge, edge),
        _ => img,
    };

    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .map_err(|e| Mcq2TsvError::ThumbnailFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    Ok(STANDARD.encode(&buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(files: &[(&str, &[u8])]) -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        for (name, bytes) in files {
            std::fs::write(dir.path().join(name), bytes).expect("write fixture");
        }
        dir
    }

    // ── Path resolution ──────────────────────────────────────────────────

    #[test]
    fn plain_reference_resolves() {
        let dir = store_with(&[("q1.png", b"fake")]);
        let path = resolve_image_path("q1.png", dir.path()).expect("resolves");
        assert_eq!(path, dir.path().join("q1.png"));
    }

    #[test]
    fn traversal_reference_is_confined_to_the_store() {
        let dir = store_with(&[("passwd", b"store copy")]);
        // The parent segments are discarded: the lookup lands on the store's
        // own "passwd", never on /etc/passwd.
        let path = resolve_image_path("../../etc/passwd", dir.path()).expect("resolves");
        assert_eq!(path, dir.path().join("passwd"));
    }

    #[test]
    fn traversal_reference_to_absent_file_is_not_found() {
        let dir = store_with(&[]);
        assert!(resolve_image_path("../../etc/passwd", dir.path()).is_none());
    }

    #[test]
    fn absolute_reference_uses_basename_only() {
        let dir = store_with(&[("shadow.png", b"x")]);
        let path = resolve_image_path("/etc/images/shadow.png", dir.path()).expect("resolves");
        assert_eq!(path, dir.path().join("shadow.png"));
    }

    #[test]
    fn empty_and_directory_references_are_not_found() {
        let dir = store_with(&[("a.png", b"x")]);
        assert!(resolve_image_path("", dir.path()).is_none());
        assert!(resolve_image_path("..", dir.path()).is_none());
    }

    // ── Encoding ─────────────────────────────────────────────────────────

    #[test]
    fn base64_round_trips_the_original_bytes() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let dir = store_with(&[("blob.bin", &bytes[..])]);
        let b64 = encode_image_file(&dir.path().join("blob.bin")).expect("encode");
        assert_eq!(STANDARD.decode(&b64).expect("valid base64"), bytes);
    }

    #[test]
    fn missing_image_is_skipped_with_one_warning() {
        let dir = store_with(&[("first.png", b"one")]);
        let refs = vec!["first.png".to_string(), "absent.png".to_string()];
        let (joined, warnings) = encode_images(&refs, dir.path());

        assert_eq!(joined, STANDARD.encode(b"one"));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            RowWarning::MissingImage { reference, .. } if reference == "absent.png"
        ));
    }

    #[test]
    fn duplicate_references_are_encoded_once_per_occurrence() {
        let dir = store_with(&[("a.png", b"aa")]);
        let refs = vec!["a.png".to_string(), "a.png".to_string()];
        let (joined, warnings) = encode_images(&refs, dir.path());

        let one = STANDARD.encode(b"aa");
        assert_eq!(joined, format!("{one};{one}"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn no_refs_yield_empty_string() {
        let dir = store_with(&[]);
        let (joined, warnings) = encode_images(&[], dir.path());
        assert_eq!(joined, "");
        assert!(warnings.is_empty());
    }

    // ── Thumbnail helper ─────────────────────────────────────────────────

    #[test]
    fn thumbnail_bounds_the_longest_edge() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("wide.png");
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            64,
            16,
            image::Rgba([255, 0, 0, 255]),
        ));
        img.save(&path).expect("save fixture");

        let b64 = encode_thumbnail(&path, Some(32)).expect("thumbnail");
        let jpeg = STANDARD.decode(&b64).expect("valid base64");
        let decoded = image::load_from_memory(&jpeg).expect("valid jpeg");
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 8);
    }

    #[test]
    fn thumbnail_of_missing_file_fails() {
        let dir = TempDir::new().expect("tempdir");
        let err = encode_thumbnail(&dir.path().join("nope.png"), None).unwrap_err();
        assert!(matches!(err, Mcq2TsvError::ThumbnailFailed { .. }));
    }
}
