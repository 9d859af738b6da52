//! Key-path conventions
//!
//! Originals live under `<prefix>/original/<file>`; thumbnails are written to
//! `<prefix>/thumbnails/<label>/<file>` in the same bucket.
//! Example: `rocks/5/original/abc.jpg` -> `rocks/5/thumbnails/medium/abc.jpg`

use super::sizes::SizeClass;

/// Path segment marking an upload as an original
pub const ORIGINAL_SEGMENT: &str = "/original/";

/// Whether the key follows the input convention
pub fn is_original_key(key: &str) -> bool {
    key.contains(ORIGINAL_SEGMENT)
}

/// Destination key for one size class
///
/// Only the first `/original/` is replaced. Returns `None` for keys outside the
/// input convention.
pub fn thumbnail_key(original_key: &str, size: &SizeClass) -> Option<String> {
    if !is_original_key(original_key) {
        return None;
    }

    let replacement = format!("/thumbnails/{}/", size.label);
    Some(original_key.replacen(ORIGINAL_SEGMENT, &replacement, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::thumbnail::sizes::SIZE_CLASSES;

    #[test]
    fn test_thumbnail_keys_for_every_size() {
        let keys: Vec<String> = SIZE_CLASSES
            .iter()
            .filter_map(|size| thumbnail_key("rocks/5/original/abc.jpg", size))
            .collect();

        assert_eq!(
            keys,
            vec![
                "rocks/5/thumbnails/small/abc.jpg",
                "rocks/5/thumbnails/medium/abc.jpg",
                "rocks/5/thumbnails/large/abc.jpg",
            ]
        );
    }

    #[test]
    fn test_only_first_occurrence_is_replaced() {
        let key = thumbnail_key("a/original/b/original/c.png", &SIZE_CLASSES[0]).unwrap();
        assert_eq!(key, "a/thumbnails/small/b/original/c.png");
    }

    #[test]
    fn test_keys_outside_convention() {
        assert!(!is_original_key("photos/thumbnails/small/x.jpg"));
        assert!(!is_original_key("original/x.jpg"));
        assert!(!is_original_key("photos/originals/x.jpg"));
        assert!(thumbnail_key("uploads/x.jpg", &SIZE_CLASSES[1]).is_none());
    }

    #[test]
    fn test_rest_of_key_is_untouched() {
        let key = thumbnail_key("a+b/original/My%20Photo.JPG", &SIZE_CLASSES[2]).unwrap();
        assert_eq!(key, "a+b/thumbnails/large/My%20Photo.JPG");
    }
}
