use std::collections::HashMap;

use sayboard_bridge::source::{SelectOption, SourceMeta, SourcePayload};

/// Provider metadata shared by every record form.
///
/// Built once from the sources endpoint. An empty catalog is a valid state:
/// it means the sources could not be loaded, and every lookup then reports an
/// unknown source.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    by_name: HashMap<String, SourceMeta>,
    options: Vec<SelectOption>,
    loaded: bool,
}

impl SourceCatalog {
    /// Splits each payload into its name and the remaining metadata.
    ///
    /// Later duplicates overwrite earlier ones in the mapping, while the
    /// selection list keeps one entry per payload in input order.
    pub fn from_payloads(payloads: Vec<SourcePayload>) -> Self {
        let mut by_name = HashMap::with_capacity(payloads.len());
        let mut options = Vec::with_capacity(payloads.len());

        for SourcePayload { name, meta } in payloads {
            options.push(SelectOption::same(name.clone()));
            if by_name.insert(name.clone(), meta).is_some() {
                log::warn!("Source {name:?} is listed more than once, keeping the last entry");
            }
        }

        Self {
            by_name,
            options,
            loaded: true,
        }
    }

    /// Whether a successful load has populated the catalog.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, name: &str) -> Option<&SourceMeta> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Selection list of source names, in server order.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Name of the first listed source, used as the default for new records.
    pub fn first_name(&self) -> Option<&str> {
        self.options.first().map(|option| option.value.as_str())
    }

    /// Voices of `name`, empty for unknown sources.
    pub fn voices(&self, name: &str) -> &[String] {
        self.get(name)
            .map(|meta| meta.voices.as_slice())
            .unwrap_or_default()
    }

    /// Emotions of `name`, empty for unknown sources and sources without
    /// emotion support.
    pub fn emotions(&self, name: &str) -> &[String] {
        self.get(name)
            .map(SourceMeta::emotions)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn payloads(raw: &str) -> Vec<SourcePayload> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn single_source_scenario() {
        let catalog = SourceCatalog::from_payloads(payloads(
            r#"[{"name": "yandex", "id": 1, "voices": ["alyss"], "emote": null}]"#,
        ));

        let stored = serde_json::to_value(catalog.get("yandex").unwrap()).unwrap();
        assert_eq!(
            stored,
            serde_json::json!({"id": 1, "voices": ["alyss"], "emote": null})
        );
        assert_eq!(
            catalog.options(),
            [SelectOption {
                text: "yandex".to_owned(),
                value: "yandex".to_owned(),
            }]
        );
    }

    #[test]
    fn stored_metadata_never_contains_name() {
        let catalog = SourceCatalog::from_payloads(payloads(
            r#"[
                {"name": "yandex", "id": 1, "voices": ["alyss", "jane"], "emote": ["good", "evil"]},
                {"name": "crt", "id": 2, "voices": ["oksana"], "emote": null, "region": "ru"}
            ]"#,
        ));

        for option in catalog.options() {
            let stored = serde_json::to_value(catalog.get(&option.value).unwrap()).unwrap();
            assert!(stored.get("name").is_none());
        }
        assert_eq!(catalog.options().len(), 2);
    }

    #[test]
    fn duplicates_overwrite_but_stay_listed() {
        let catalog = SourceCatalog::from_payloads(payloads(
            r#"[
                {"name": "crt", "id": 2, "voices": ["old"], "emote": null},
                {"name": "crt", "id": 3, "voices": ["new"], "emote": null}
            ]"#,
        ));

        assert_eq!(catalog.options().len(), 2);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("crt").unwrap().id, 3);
        assert_eq!(catalog.voices("crt"), ["new".to_owned()]);
    }

    #[test]
    fn empty_catalog_knows_nothing() {
        let catalog = SourceCatalog::default();

        assert!(!catalog.is_loaded());
        assert!(catalog.get("yandex").is_none());
        assert!(catalog.voices("yandex").is_empty());
        assert!(catalog.emotions("yandex").is_empty());
        assert_eq!(catalog.first_name(), None);
    }
}
