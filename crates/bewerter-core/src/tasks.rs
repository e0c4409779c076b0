//! Catalog of exam task variants.
//!
//! The catalog is built once at startup and read-only afterwards. The two
//! built-in variants can be extended or overridden from a YAML file.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Whether a variant quotes opinions (`Aussagen`) or press headlines (`Schlagzeilen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Aussagen,
    Schlagzeilen,
}

impl SourceKind {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Aussagen => "Aussagen",
            Self::Schlagzeilen => "Schlagzeilen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskVariant {
    pub id: String,
    pub title: String,
    pub kind: SourceKind,
    /// Statements or headlines, quoted verbatim in the prompt.
    pub sources: Vec<String>,
    /// Discussion points, numbered in the prompt.
    pub punkte: Vec<String>,
}

impl TaskVariant {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::new("task variant with empty id"));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::new(format!(
                "task variant '{}' has no title",
                self.id
            )));
        }
        if self.sources.is_empty() {
            return Err(ConfigError::new(format!(
                "task variant '{}' has no {}",
                self.id,
                self.kind.heading()
            )));
        }
        if self.punkte.is_empty() {
            return Err(ConfigError::new(format!(
                "task variant '{}' has no punkte",
                self.id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TaskFile {
    variants: Vec<TaskVariant>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    variants: BTreeMap<String, TaskVariant>,
}

impl TaskCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog with the two reference variants "A" and "B".
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(TaskVariant {
            id: "A".to_string(),
            title: "Kind und Beruf".to_string(),
            kind: SourceKind::Aussagen,
            sources: vec![
                "Job und Kind geht nicht. Immer mehr Frauen leiden unter der Doppelbelastung und dem großen Druck.".to_string(),
                "Ich bin für mehr Fortbildung und Berufskurse während der Babypause: Nur so bleibt man auf dem Laufenden.".to_string(),
                "Für den Wiedereinstieg ins Berufsleben brauchen Mütter und Väter bessere Chancen und flexible Arbeitszeiten.".to_string(),
            ],
            punkte: vec![
                "Wie denken Sie über diese Äußerungen?".to_string(),
                "Begründen Sie Ihre persönliche Meinung.".to_string(),
                "Beschreiben Sie eigene Erfahrungen (oder Erfahrungen von Freunden) zum Thema.".to_string(),
                "Wie ist die Situation von berufstätigen Eltern in Ihrem Land?".to_string(),
            ],
        });
        catalog.insert(TaskVariant {
            id: "B".to_string(),
            title: "Zusammenleben – ja oder nein?".to_string(),
            kind: SourceKind::Schlagzeilen,
            sources: vec![
                "Die traditionelle Familie verliert an Wert: Eine Umfrage unter jungen Leuten zeigt, dass viele nicht mehr heiraten möchten, sondern in einer offenen Beziehung leben wollen.".to_string(),
                "Scheidungsrate steigt: Immer mehr verheiratete Paare trennen sich. Warum funktioniert das Modell Ehe nicht mehr?".to_string(),
                "GLÜCKLICHE SINGLES: Junge Leute immer mehr auf dem Ego-Trip: Allein leben ist schöner und einfacher!".to_string(),
            ],
            punkte: vec![
                "Wie denken Sie über diese Schlagzeilen?".to_string(),
                "Begründen Sie Ihre persönliche Meinung.".to_string(),
                "Beschreiben Sie eigene Erfahrungen (oder Erfahrungen von Freunden) zum Thema.".to_string(),
                "Wie ist die Situation in Ihrem Land?".to_string(),
            ],
        });
        catalog
    }

    /// Insert or replace a variant by id.
    pub fn insert(&mut self, variant: TaskVariant) -> Option<TaskVariant> {
        self.variants.insert(variant.id.clone(), variant)
    }

    /// Merge variants from a YAML file of the form `variants: [...]`.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!(
                "failed to read task file {}: {}",
                path.display(),
                e
            ))
        })?;
        self.extend_from_yaml(&raw)
    }

    pub fn extend_from_yaml(&mut self, raw: &str) -> Result<usize, ConfigError> {
        let file: TaskFile = serde_yaml::from_str(raw)
            .map_err(|e| ConfigError::new(format!("failed to parse task YAML: {}", e)))?;
        for variant in &file.variants {
            variant.validate()?;
        }
        let count = file.variants.len();
        for variant in file.variants {
            tracing::debug!(variant = %variant.id, "loaded task variant");
            self.insert(variant);
        }
        Ok(count)
    }

    pub fn get(&self, id: &str) -> Option<&TaskVariant> {
        self.variants.get(id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.variants.keys().map(String::as_str).collect()
    }

    /// Public listing: an object keyed by variant id, with the sources under
    /// `aussagen` or `schlagzeilen`.
    pub fn listing(&self) -> BTreeMap<&str, VariantListing<'_>> {
        self.variants
            .iter()
            .map(|(id, v)| (id.as_str(), VariantListing::from(v)))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct VariantListing<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aussagen: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schlagzeilen: Option<&'a [String]>,
    pub punkte: &'a [String],
}

impl<'a> From<&'a TaskVariant> for VariantListing<'a> {
    fn from(v: &'a TaskVariant) -> Self {
        let sources = Some(v.sources.as_slice());
        let (aussagen, schlagzeilen) = match v.kind {
            SourceKind::Aussagen => (sources, None),
            SourceKind::Schlagzeilen => (None, sources),
        };
        Self {
            title: &v.title,
            aussagen,
            schlagzeilen,
            punkte: &v.punkte,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_a_and_b() {
        let catalog = TaskCatalog::builtin();
        assert_eq!(catalog.ids(), vec!["A", "B"]);
        let a = catalog.get("A").unwrap();
        assert_eq!(a.kind, SourceKind::Aussagen);
        assert_eq!(a.sources.len(), 3);
        assert_eq!(a.punkte.len(), 4);
        assert_eq!(
            catalog.get("B").unwrap().title,
            "Zusammenleben – ja oder nein?"
        );
    }

    #[test]
    fn lookup_miss_is_none() {
        assert!(TaskCatalog::builtin().get("C").is_none());
        assert!(TaskCatalog::builtin().get("a").is_none());
    }

    #[test]
    fn yaml_adds_and_overrides_variants() {
        let mut catalog = TaskCatalog::builtin();
        let added = catalog
            .extend_from_yaml(
                r#"
variants:
  - id: C
    title: Homeoffice
    kind: aussagen
    sources: ["Zu Hause arbeitet man besser."]
    punkte: ["Was meinen Sie?"]
  - id: A
    title: Neu
    kind: schlagzeilen
    sources: ["X"]
    punkte: ["Y"]
"#,
            )
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(catalog.ids(), vec!["A", "B", "C"]);
        assert_eq!(catalog.get("A").unwrap().title, "Neu");
    }

    #[test]
    fn yaml_variant_without_punkte_is_rejected() {
        let mut catalog = TaskCatalog::builtin();
        let err = catalog
            .extend_from_yaml(
                "variants:\n  - id: C\n    title: T\n    kind: aussagen\n    sources: [x]\n    punkte: []\n",
            )
            .unwrap_err();
        assert!(err.to_string().contains("no punkte"));
        assert!(catalog.get("C").is_none());
    }

    #[test]
    fn listing_is_keyed_by_id_with_source_heading() {
        let listing = serde_json::to_value(TaskCatalog::builtin().listing()).unwrap();
        assert_eq!(listing["A"]["title"], "Kind und Beruf");
        assert_eq!(listing["A"]["aussagen"].as_array().unwrap().len(), 3);
        assert!(listing["A"].get("schlagzeilen").is_none());
        assert_eq!(listing["B"]["schlagzeilen"].as_array().unwrap().len(), 3);
        assert!(listing["B"].get("aussagen").is_none());
        assert_eq!(listing["B"]["punkte"][3], "Wie ist die Situation in Ihrem Land?");
    }
}
