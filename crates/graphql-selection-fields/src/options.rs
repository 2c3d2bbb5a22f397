/// Settings for [`crate::Flattener`]. Deserializable so hosts can embed it in their own configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlattenOptions {
    pub key: FieldKey,
    pub inline_fragments: InlineFragments,
}

impl FlattenOptions {
    pub fn with_key(self, key: FieldKey) -> Self {
        FlattenOptions { key, ..self }
    }

    pub fn with_inline_fragments(self, inline_fragments: InlineFragments) -> Self {
        FlattenOptions {
            inline_fragments,
            ..self
        }
    }
}

/// What a field is keyed by in the flattened map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    /// The schema field name, ignoring aliases.
    #[default]
    Name,
    /// The alias when there is one, the field name otherwise.
    ResponseKey,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineFragments {
    #[default]
    Skip,
    Expand,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_table() {
        let options: FlattenOptions = toml::from_str("").unwrap();
        assert_eq!(options, FlattenOptions::default());
        assert_eq!(options.key, FieldKey::Name);
        assert_eq!(options.inline_fragments, InlineFragments::Skip);
    }

    #[test]
    fn all_settings() {
        let options: FlattenOptions = toml::from_str(indoc::indoc! {r#"
            key = "response_key"
            inline_fragments = "expand"
        "#})
        .unwrap();

        assert_eq!(
            options,
            FlattenOptions::default()
                .with_key(FieldKey::ResponseKey)
                .with_inline_fragments(InlineFragments::Expand)
        );
    }

    #[test]
    fn unknown_setting() {
        let error = toml::from_str::<FlattenOptions>("depth = 3").unwrap_err();
        assert!(error.to_string().contains("unknown field `depth`"), "{error}");
    }

    #[test]
    fn invalid_inline_fragment_mode() {
        let error = toml::from_str::<FlattenOptions>(r#"inline_fragments = "merge""#).unwrap_err();
        assert!(error.to_string().contains("unknown variant `merge`"), "{error}");
    }
}
