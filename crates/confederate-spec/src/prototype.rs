//! Prototype fragments and the registry that resolves them.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::element::Element;
use crate::error::PrototypeError;

/// Flat attribute and section data carried by a prototype or a project entry.
///
/// Merging is last-writer-wins for scalar attributes and append for sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FragmentData {
    attributes: IndexMap<String, String>,
    sections: IndexMap<String, Vec<Element>>,
}

impl FragmentData {
    /// Create empty fragment data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a scalar attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder: append an entry to a section.
    pub fn with_section_entry(mut self, section: impl Into<String>, entry: Element) -> Self {
        self.append_section(section, [entry]);
        self
    }

    /// Set a scalar attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Append entries to a section, creating it if needed.
    pub fn append_section<I>(&mut self, section: impl Into<String>, entries: I)
    where
        I: IntoIterator<Item = Element>,
    {
        self.sections.entry(section.into()).or_default().extend(entries);
    }

    /// Merge `other` over `self`.
    pub fn merge(&mut self, other: &FragmentData) {
        for (name, value) in &other.attributes {
            self.attributes.insert(name.clone(), value.clone());
        }
        for (section, entries) in &other.sections {
            self.append_section(section.clone(), entries.iter().cloned());
        }
    }

    /// Consuming form of [`merge`](Self::merge).
    pub fn merged(mut self, other: &FragmentData) -> Self {
        self.merge(other);
        self
    }

    /// Scalar attributes.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// List-valued sections.
    pub fn sections(&self) -> &IndexMap<String, Vec<Element>> {
        &self.sections
    }

    /// Entries of one section; empty when the section is absent.
    pub fn section(&self, name: &str) -> &[Element] {
        self.sections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn into_parts(self) -> (IndexMap<String, String>, IndexMap<String, Vec<Element>>) {
        (self.attributes, self.sections)
    }
}

/// A named, immutable prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeFragment {
    name: String,
    data: FragmentData,
}

impl PrototypeFragment {
    /// Prototype name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prototype data.
    pub fn data(&self) -> &FragmentData {
        &self.data
    }
}

/// Stores named prototype fragments and resolves ordered references into merged data.
#[derive(Debug, Clone, Default)]
pub struct PrototypeRegistry {
    fragments: IndexMap<String, PrototypeFragment>,
}

impl PrototypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fragment under `name`. Names are never overwritten.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        data: FragmentData,
    ) -> Result<(), PrototypeError> {
        let name = name.into();
        if self.fragments.contains_key(&name) {
            return Err(PrototypeError::Duplicate { name });
        }

        debug!(prototype = %name, "registered prototype");
        self.fragments
            .insert(name.clone(), PrototypeFragment { name, data });
        Ok(())
    }

    /// Merge the named fragments in order. Any unknown name fails the whole resolution.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<FragmentData, PrototypeError> {
        let mut merged = FragmentData::new();

        for name in names {
            let name = name.as_ref();
            let fragment = self.get(name).ok_or_else(|| PrototypeError::Unknown {
                name: name.to_string(),
            })?;
            merged.merge(&fragment.data);
        }

        Ok(merged)
    }

    /// Look up a fragment by name.
    pub fn get(&self, name: &str) -> Option<&PrototypeFragment> {
        self.fragments.get(name)
    }

    /// Whether a fragment with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments.keys().map(String::as_str)
    }

    /// Number of registered fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn copy(source: &str) -> Element {
        Element::new("template").with_attribute("source", source)
    }

    #[test]
    fn test_register_and_resolve_single() {
        let mut registry = PrototypeRegistry::new();
        registry
            .register("base", FragmentData::new().with_attribute("language", "java"))
            .unwrap();

        let resolved = registry.resolve(&["base"]).unwrap();
        assert_eq!(resolved.attributes()["language"], "java");
        assert!(registry.contains("base"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = PrototypeRegistry::new();
        registry
            .register("base", FragmentData::new().with_attribute("language", "java"))
            .unwrap();

        let err = registry
            .register("base", FragmentData::new().with_attribute("language", "c"))
            .unwrap_err();
        assert_eq!(
            err,
            PrototypeError::Duplicate {
                name: "base".to_string()
            }
        );

        // The original fragment survives.
        assert_eq!(
            registry.get("base").unwrap().data().attributes()["language"],
            "java"
        );
    }

    #[test]
    fn test_unknown_prototype_fails_without_partial_merge() {
        let mut registry = PrototypeRegistry::new();
        registry.register("a", FragmentData::new()).unwrap();

        let err = registry.resolve(&["a", "ghost", "a"]).unwrap_err();
        assert_eq!(
            err,
            PrototypeError::Unknown {
                name: "ghost".to_string()
            }
        );
        assert_eq!(err.to_string(), "missing prototype: ghost");
    }

    #[test]
    fn test_resolve_empty_list() {
        let registry = PrototypeRegistry::new();
        let names: [&str; 0] = [];
        assert_eq!(registry.resolve(&names).unwrap(), FragmentData::new());
    }

    #[test]
    fn test_sections_accumulate_in_declaration_order() {
        let mut registry = PrototypeRegistry::new();
        registry
            .register(
                "a",
                FragmentData::new()
                    .with_section_entry("constituents", copy("a1"))
                    .with_section_entry("constituents", copy("a2")),
            )
            .unwrap();
        registry
            .register(
                "b",
                FragmentData::new().with_section_entry("constituents", copy("b1")),
            )
            .unwrap();

        let resolved = registry.resolve(&["a", "b"]).unwrap();
        let sources: Vec<_> = resolved
            .section("constituents")
            .iter()
            .filter_map(|e| e.attribute("source"))
            .collect();
        assert_eq!(sources, vec!["a1", "a2", "b1"]);
        assert!(resolved.section("missing").is_empty());
    }

    #[test]
    fn test_names_follow_registration_order() {
        let mut registry = PrototypeRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(name, FragmentData::new()).unwrap();
        }
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    fn scalars() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-d]", "[a-z0-9]{0,4}"), 0..6)
    }

    fn fragment(pairs: &[(String, String)]) -> FragmentData {
        pairs
            .iter()
            .fold(FragmentData::new(), |data, (k, v)| data.with_attribute(k, v))
    }

    proptest! {
        /// Resolving [A, B] then applying explicit attributes equals folding A, B, explicit by hand.
        #[test]
        fn test_scalar_merge_is_last_writer_wins(
            a in scalars(),
            b in scalars(),
            explicit in scalars(),
        ) {
            let mut registry = PrototypeRegistry::new();
            registry.register("a", fragment(&a)).unwrap();
            registry.register("b", fragment(&b)).unwrap();

            let resolved = registry.resolve(&["a", "b"]).unwrap().merged(&fragment(&explicit));

            let stepwise = registry
                .resolve(&["a"])
                .unwrap()
                .merged(&fragment(&b))
                .merged(&fragment(&explicit));
            prop_assert_eq!(resolved.attributes(), stepwise.attributes());

            for key in ["a", "b", "c", "d"] {
                let expected = explicit.iter().rev().find(|(k, _)| k == key)
                    .or_else(|| b.iter().rev().find(|(k, _)| k == key))
                    .or_else(|| a.iter().rev().find(|(k, _)| k == key))
                    .map(|(_, v)| v.as_str());
                prop_assert_eq!(resolved.attributes().get(key).map(String::as_str), expected);
            }
        }

        /// Constituent lists of [A, B] are A's entries followed by B's.
        #[test]
        fn test_sections_concatenate(
            a in prop::collection::vec("[a-z]{1,6}", 0..5),
            b in prop::collection::vec("[a-z]{1,6}", 0..5),
        ) {
            let build = |sources: &[String]| sources.iter().fold(FragmentData::new(), |data, s| {
                data.with_section_entry("constituents", copy(s))
            });

            let mut registry = PrototypeRegistry::new();
            registry.register("a", build(&a)).unwrap();
            registry.register("b", build(&b)).unwrap();

            let resolved = registry.resolve(&["a", "b"]).unwrap();
            let sources: Vec<String> = resolved
                .section("constituents")
                .iter()
                .filter_map(|e| e.attribute("source").map(str::to_string))
                .collect();

            let expected: Vec<String> = a.iter().chain(b.iter()).cloned().collect();
            prop_assert_eq!(sources, expected);
        }
    }
}
