use std::collections::HashSet;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use slug::slugify;

/// Turns a title into its URL-safe base form. Falls back to `fallback`
/// when nothing survives normalization (e.g. a title made of punctuation).
pub fn normalize(title: &str, fallback: &str) -> String {
    let base = slugify(title);
    if base.is_empty() {
        fallback.to_string()
    } else {
        base
    }
}

/// First of `base`, `base-1`, `base-2`, ... that is not in `taken`.
pub fn next_free(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    let mut counter = 1u64;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Cuts a slug to at most `max_len` bytes without leaving a trailing hyphen.
pub fn truncate(slug: &str, max_len: usize) -> String {
    if slug.len() <= max_len {
        return slug.to_string();
    }
    // slugify output is ASCII, so any byte index is a char boundary
    slug[..max_len].trim_end_matches('-').to_string()
}

/// Assigns a slug for a new record of entity `E` whose slug lives in `column`.
///
/// Reads the persisted slugs sharing the base prefix once and picks the first
/// free suffix. Nothing is reserved: two concurrent inserts of the same title
/// can pick the same slug, and the loser fails on the unique index.
pub async fn unique_slug<E, C>(
    db: &C,
    column: E::Column,
    title: &str,
    fallback: &str,
    max_len: usize,
) -> Result<String, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut base = truncate(&normalize(title, fallback), max_len);

    loop {
        let taken: Vec<String> = E::find()
            .select_only()
            .column(column)
            .filter(column.starts_with(&base))
            .into_tuple()
            .all(db)
            .await?;

        let slug = next_free(&base, &taken.into_iter().collect());
        if slug.len() <= max_len || base.len() <= 1 {
            return Ok(slug);
        }
        // The suffix pushed it past the limit: shorten the base and look again
        let overflow = slug.len() - max_len;
        base = truncate(&base, base.len().saturating_sub(overflow).max(1));
    }
}

/// Lowercase kebab-case: what an explicitly supplied slug must look like.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_lowercases_and_hyphenates() {
        assert_eq!(normalize("Hello World", "post"), "hello-world");
        assert_eq!(normalize("  Rust   & Axum!  ", "post"), "rust-axum");
    }

    #[test]
    fn normalize_transliterates_non_ascii() {
        assert_eq!(normalize("Café Déjà Vu", "post"), "cafe-deja-vu");
    }

    #[test]
    fn normalize_falls_back_when_nothing_survives() {
        assert_eq!(normalize("!!!", "post"), "post");
        assert_eq!(normalize("", "category"), "category");
    }

    #[test]
    fn free_base_is_used_as_is() {
        assert_eq!(next_free("hello-world", &set(&["other"])), "hello-world");
    }

    #[test]
    fn collisions_get_first_free_suffix() {
        assert_eq!(next_free("hello-world", &set(&["hello-world"])), "hello-world-1");
        assert_eq!(
            next_free("hello-world", &set(&["hello-world", "hello-world-1", "hello-world-2"])),
            "hello-world-3"
        );
    }

    #[test]
    fn gaps_in_suffixes_are_reused() {
        assert_eq!(
            next_free("trip", &set(&["trip", "trip-2", "trip-3"])),
            "trip-1"
        );
    }

    #[test]
    fn truncate_drops_trailing_hyphen() {
        assert_eq!(truncate("abc-def", 4), "abc");
        assert_eq!(truncate("abc", 64), "abc");
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("my-first-post-2"));
        assert!(!is_valid_slug("My-Post"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug(""));
    }
}
