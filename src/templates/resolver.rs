use std::collections::BTreeMap;
use thiserror::Error;

/// Alias every table must define
pub const DEFAULT_TEMPLATE: &str = "default";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template alias table has no 'default' entry")]
    MissingDefault,
}

/// Maps template aliases to template identifiers.
///
/// Built once from configuration and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    aliases: BTreeMap<String, String>,
}

impl TemplateResolver {
    pub fn new(aliases: BTreeMap<String, String>) -> Result<Self, TemplateError> {
        if !aliases.contains_key(DEFAULT_TEMPLATE) {
            return Err(TemplateError::MissingDefault);
        }
        Ok(Self { aliases })
    }

    /// Template identifier for `alias`.
    ///
    /// No alias (or an empty one) selects the default template, a known alias
    /// its mapped template, and anything else is taken as a template
    /// identifier as-is.
    pub fn resolve<'a>(&'a self, alias: Option<&'a str>) -> &'a str {
        match alias.filter(|alias| !alias.is_empty()) {
            None => self.default_template(),
            Some(alias) => self.aliases.get(alias).map_or(alias, String::as_str),
        }
    }

    pub fn default_template(&self) -> &str {
        self.aliases
            .get(DEFAULT_TEMPLATE)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> TemplateResolver {
        TemplateResolver::new(
            [
                ("thumb".to_string(), "templates/thumb.html".to_string()),
                ("default".to_string(), "templates/full.html".to_string()),
            ]
            .into(),
        )
        .unwrap()
    }

    #[test]
    fn test_no_alias_uses_default() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(None), "templates/full.html");
        assert_eq!(resolver.resolve(Some("")), "templates/full.html");
        assert_eq!(resolver.resolve(None), resolver.resolve(Some("default")));
    }

    #[test]
    fn test_known_alias() {
        assert_eq!(resolver().resolve(Some("thumb")), "templates/thumb.html");
    }

    #[test]
    fn test_unknown_alias_passes_through() {
        let resolver = resolver();
        assert_eq!(resolver.resolve(Some("unknown_alias")), "unknown_alias");
        assert_eq!(
            resolver.resolve(Some("templates/custom.html")),
            "templates/custom.html"
        );
    }

    #[test]
    fn test_missing_default_rejected() {
        let result = TemplateResolver::new(
            [("thumb".to_string(), "templates/thumb.html".to_string())].into(),
        );
        assert!(matches!(result, Err(TemplateError::MissingDefault)));
    }
}
