//! Slug and id utilities
//!
//! Condition ids are slugs of the condition's original name, deduplicated
//! with a numeric suffix, so renames never change an id. Host document ids
//! are random 16-character alphanumerics in the host's own id style.

use rand::Rng;

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, thiserror::Error)]
pub enum IdGenerationError {
    #[error("failed to generate a unique id after {iterations} attempts")]
    Exhausted { iterations: usize },
}

/// Lowercase a name and collapse every non-alphanumeric run to a single hyphen
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Generate a stable id from a name, deduplicating against existing ids.
///
/// The bare slug is used when free. Otherwise the id gets a numeric suffix
/// one past the highest suffix already taken: existing ids `["prone",
/// "prone1"]` and name `"Prone"` yield `"prone2"`. A name with no
/// alphanumerics falls back to a placeholder slug, so ids are never empty
/// or purely numeric.
pub fn generate_unique_slug_id<S: AsRef<str>>(name: &str, existing_ids: &[S]) -> String {
    let mut slug = slugify(name);
    if slug.is_empty() {
        slug = "condition".to_string();
    }
    let mut bare_taken = false;
    let mut max_suffix: u64 = 0;

    for id in existing_ids {
        let id = id.as_ref();
        if id == slug {
            bare_taken = true;
        } else if let Some(rest) = id.strip_prefix(slug.as_str()) {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(n) = rest.parse::<u64>() {
                    max_suffix = max_suffix.max(n);
                }
            }
        }
    }

    if !bare_taken {
        return slug;
    }
    format!("{slug}{}", max_suffix + 1)
}

/// Random host-style document id, retrying on collision against `existing_ids`
pub fn create_id<S: AsRef<str>>(
    existing_ids: &[S],
    length: usize,
    iterations: usize,
) -> Result<String, IdGenerationError> {
    let mut rng = rand::thread_rng();

    for _ in 0..iterations {
        let id: String = (0..length)
            .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
            .collect();
        if !existing_ids.iter().any(|e| e.as_ref() == id) {
            return Ok(id);
        }
    }
    Err(IdGenerationError::Exhausted { iterations })
}

/// Uppercase the first character, leaving the rest untouched
pub fn to_title_case(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive a display name from the filename of a path, extension stripped
pub fn name_from_file_path(path: &str) -> Option<String> {
    let file = path.rsplit(['/', '\\']).next()?;
    let filename = match file.rfind('.') {
        Some(0) | None => file,
        Some(idx) => &file[..idx],
    };
    if filename.is_empty() {
        return None;
    }
    Some(to_title_case(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_punctuation_and_case() {
        assert_eq!(slugify("Prone"), "prone");
        assert_eq!(slugify("Heavily  Encumbered!"), "heavily-encumbered");
        assert_eq!(slugify("Flat-Footed"), "flat-footed");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn test_unique_slug_uses_bare_slug_when_free() {
        let existing = ["blinded".to_string(), "prone1".to_string()];
        assert_eq!(generate_unique_slug_id("Prone", &existing), "prone");
    }

    #[test]
    fn test_unique_slug_increments_past_highest_suffix() {
        assert_eq!(generate_unique_slug_id("Prone", &["prone"]), "prone1");
        assert_eq!(generate_unique_slug_id("Prone", &["prone", "prone1"]), "prone2");
        assert_eq!(
            generate_unique_slug_id("Prone", &["prone", "prone7", "prone2"]),
            "prone8"
        );
    }

    #[test]
    fn test_unique_slug_falls_back_for_unsluggable_names() {
        assert_eq!(generate_unique_slug_id::<&str>("!!!", &[]), "condition");
        assert_eq!(
            generate_unique_slug_id("???", &["condition"]),
            "condition1"
        );
        assert_eq!(
            generate_unique_slug_id("!!!", &["condition", "condition3"]),
            "condition4"
        );
    }

    #[test]
    fn test_unique_slug_ignores_unrelated_ids() {
        let existing = ["pronounced", "prone-ish"];
        assert_eq!(generate_unique_slug_id("Prone", &existing), "prone");
    }

    #[test]
    fn test_create_id_has_requested_shape() {
        let id = create_id::<&str>(&[], 16, 10).unwrap();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_create_id_exhausts_when_space_is_taken() {
        // Single-character ids over a fully enumerated charset must collide
        let taken: Vec<String> = (b'a'..=b'z')
            .chain(b'A'..=b'Z')
            .chain(b'0'..=b'9')
            .map(|b| (b as char).to_string())
            .collect();
        let err = create_id(&taken, 1, 50).unwrap_err();
        assert!(matches!(err, IdGenerationError::Exhausted { iterations: 50 }));
    }

    #[test]
    fn test_name_from_file_path() {
        assert_eq!(
            name_from_file_path("icons/svg/blind.svg").as_deref(),
            Some("Blind")
        );
        assert_eq!(
            name_from_file_path("C:\\maps\\prone.webp").as_deref(),
            Some("Prone")
        );
        assert_eq!(name_from_file_path(""), None);
    }
}
