//! # Field Labels
//!
//! Turns machine field names (`instance_id`, `jdbc-url`, `disk.size_gb`)
//! into the human-readable titles shown in generated schemas.

/// Components that render as fixed acronyms. Matched case-insensitively
/// against whole components only.
const ACRONYMS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("uri", "URI"),
    ("url", "URL"),
    ("gb", "GB"),
    ("jdbc", "JDBC"),
];

/// Convert a field name into a display label.
///
/// The name is split on any run of whitespace, `-`, `_` or `.`. Known
/// acronyms are substituted; every other component gets its first
/// character upper-cased with the rest left alone. Components are joined
/// with a single space.
///
/// ```
/// use bvar_core::field_name_to_label;
///
/// assert_eq!(field_name_to_label("instance-id"), "Instance ID");
/// assert_eq!(field_name_to_label("jdbc_url"), "JDBC URL");
/// assert_eq!(field_name_to_label(""), "");
/// ```
pub fn field_name_to_label(field_name: &str) -> String {
    field_name
        .split(is_separator)
        .filter(|component| !component.is_empty())
        .map(label_component)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | '.')
}

fn label_component(component: &str) -> String {
    if let Some((_, acronym)) = ACRONYMS
        .iter()
        .find(|(word, _)| component.eq_ignore_ascii_case(word))
    {
        return (*acronym).to_string();
    }

    let mut chars = component.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_with_acronym() {
        assert_eq!(field_name_to_label("instance-id"), "Instance ID");
    }

    #[test]
    fn all_acronyms() {
        assert_eq!(field_name_to_label("jdbc_url"), "JDBC URL");
        assert_eq!(field_name_to_label("bucket.uri"), "Bucket URI");
        assert_eq!(field_name_to_label("disk_size_gb"), "Disk Size GB");
    }

    #[test]
    fn empty_input() {
        assert_eq!(field_name_to_label(""), "");
    }

    #[test]
    fn only_separators() {
        assert_eq!(field_name_to_label("-_. \t"), "");
    }

    #[test]
    fn runs_of_separators_collapse() {
        assert_eq!(field_name_to_label("__max--nodes.."), "Max Nodes");
    }

    #[test]
    fn rest_of_component_is_untouched() {
        assert_eq!(field_name_to_label("maxIOPS"), "MaxIOPS");
        assert_eq!(field_name_to_label("tier_SSD"), "Tier SSD");
    }

    #[test]
    fn acronym_match_is_case_insensitive() {
        assert_eq!(field_name_to_label("Instance_Id"), "Instance ID");
        assert_eq!(field_name_to_label("JDBC-Url"), "JDBC URL");
    }

    #[test]
    fn acronym_match_is_whole_component() {
        assert_eq!(field_name_to_label("identity"), "Identity");
        assert_eq!(field_name_to_label("gbps"), "Gbps");
        assert_eq!(field_name_to_label("urls"), "Urls");
    }

    #[test]
    fn non_ascii_first_character() {
        assert_eq!(field_name_to_label("ébène"), "Ébène");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Labels never contain separator characters other than single spaces.
        #[test]
        fn label_has_no_separators(name in "[a-zA-Z0-9_. -]{0,40}") {
            let label = field_name_to_label(&name);
            prop_assert!(!label.contains('-'));
            prop_assert!(!label.contains('_'));
            prop_assert!(!label.contains('.'));
            prop_assert!(!label.contains("  "));
            prop_assert!(!label.starts_with(' '));
            prop_assert!(!label.ends_with(' '));
        }

        /// Labelling is deterministic.
        #[test]
        fn label_is_deterministic(name in "\\PC{0,40}") {
            prop_assert_eq!(field_name_to_label(&name), field_name_to_label(&name));
        }

        /// The number of words equals the number of non-empty components.
        #[test]
        fn label_word_count_matches_components(name in "[a-z_]{0,40}") {
            let components = name.split('_').filter(|c| !c.is_empty()).count();
            let label = field_name_to_label(&name);
            let words = label.split(' ').filter(|w| !w.is_empty()).count();
            prop_assert_eq!(words, components);
        }
    }
}
