//! Component type label normalization
//!
//! Generated layouts name components loosely ("Carousel", "pricing-section",
//! "Image gallery"). The content model names them `<Name>Section`.

/// Model name for the plain "Section" component
pub const GENERIC_SECTION_MODEL: &str = "GenericSection";

const SECTION_SUFFIX: &str = "Section";

/// Best-effort model name candidate for a component type label
///
/// Title-cases the label into a bare identifier, maps plain "Section" to
/// [`GENERIC_SECTION_MODEL`] and appends the `Section` suffix where missing.
/// The candidate may still match no model; callers try the raw label first.
pub fn normalize_type_label(label: &str) -> String {
    let identifier: String = split_words(label)
        .iter()
        .map(|word| upper_first(word))
        .collect();

    if identifier == SECTION_SUFFIX {
        GENERIC_SECTION_MODEL.to_string()
    } else if identifier.ends_with(SECTION_SUFFIX) {
        identifier
    } else {
        identifier + SECTION_SUFFIX
    }
}

/// Split a label into words at separators and case/digit boundaries
///
/// `"featuredItems"` → `featured Items`, `"HTMLBlock"` → `HTML Block`,
/// `"recent_posts-2"` → `recent posts 2`.
fn split_words(label: &str) -> Vec<String> {
    let chars: Vec<char> = label.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || prev.is_alphabetic() != c.is_alphabetic()
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generic_section() {
        assert_eq!(normalize_type_label("Section"), "GenericSection");
        assert_eq!(normalize_type_label("section"), "GenericSection");
        assert_eq!(normalize_type_label(" section "), "GenericSection");
    }

    #[test]
    fn test_suffix_kept_or_appended() {
        assert_eq!(normalize_type_label("pricing-section"), "PricingSection");
        assert_eq!(normalize_type_label("Carousel"), "CarouselSection");
        assert_eq!(normalize_type_label("CarouselSection"), "CarouselSection");
        assert_eq!(normalize_type_label("Recent posts"), "RecentPostsSection");
        assert_eq!(normalize_type_label("image_gallery"), "ImageGallerySection");
        assert_eq!(
            normalize_type_label("featuredItemsSection"),
            "FeaturedItemsSection"
        );
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("featuredItems"), vec!["featured", "Items"]);
        assert_eq!(split_words("HTMLBlock"), vec!["HTML", "Block"]);
        assert_eq!(split_words("recent_posts-2"), vec!["recent", "posts", "2"]);
        assert!(split_words(" -_ ").is_empty());
    }

    proptest! {
        #[test]
        fn normalized_labels_are_bare_section_identifiers(label in "[a-zA-Z][a-zA-Z0-9 _-]{0,23}") {
            let normalized = normalize_type_label(&label);
            prop_assert!(normalized.ends_with(SECTION_SUFFIX));
            prop_assert!(normalized.chars().all(char::is_alphanumeric));
        }

        #[test]
        fn normalization_is_idempotent(label in "[a-zA-Z][a-zA-Z0-9 _-]{0,23}") {
            let once = normalize_type_label(&label);
            prop_assert_eq!(normalize_type_label(&once), once);
        }
    }
}
