use super::components::{Component, SolventComponent};
use super::protein::ProteinComponent;
use std::collections::BTreeMap;

/// An assembled set of named molecular components ready for simulation.
///
/// Component keys follow the conventions of the benchmark workflow:
/// `"protein"`, `"solvent"`, `"ligand"`, and single-letter keys for
/// cofactors. Keys are held in a `BTreeMap` so iteration order, and with it
/// the engine input staging, is deterministic.
///
/// A system is constructed fresh for every benchmark entry and owned only for
/// the duration of one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChemicalSystem {
    components: BTreeMap<String, Component>,
}

impl ChemicalSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a component under the given key, replacing any previous
    /// component with the same key.
    pub fn insert(&mut self, key: &str, component: Component) {
        self.components.insert(key.to_string(), component);
    }

    pub fn get(&self, key: &str) -> Option<&Component> {
        self.components.get(key)
    }

    /// Component keys in deterministic (sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The protein component, if one was assembled.
    pub fn protein(&self) -> Option<&ProteinComponent> {
        match self.components.get("protein") {
            Some(Component::Protein(p)) => Some(p),
            _ => None,
        }
    }

    /// The solvent component, if one was assembled.
    pub fn solvent(&self) -> Option<&SolventComponent> {
        match self.components.get("solvent") {
            Some(Component::Solvent(s)) => Some(s),
            _ => None,
        }
    }

    /// Small-molecule components (ligand and cofactors) with their keys, in
    /// deterministic order.
    pub fn small_molecules(&self) -> impl Iterator<Item = (&str, &super::components::SmallMoleculeComponent)> {
        self.components.iter().filter_map(|(k, v)| match v {
            Component::SmallMolecule(m) => Some((k.as_str(), m)),
            _ => None,
        })
    }

    /// Total number of explicit atoms across all components.
    pub fn total_atom_count(&self) -> usize {
        self.components.values().map(|c| c.atom_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::components::SmallMoleculeComponent;
    use crate::core::models::molecule::Molecule;

    fn system_with_ligand_and_cofactor() -> ChemicalSystem {
        let mut system = ChemicalSystem::new();
        system.insert("solvent", Component::Solvent(SolventComponent::default()));
        system.insert("protein", Component::Protein(ProteinComponent::default()));
        system.insert(
            "ligand",
            Component::SmallMolecule(SmallMoleculeComponent::new(Molecule::new("lig"))),
        );
        system.insert(
            "a",
            Component::SmallMolecule(SmallMoleculeComponent::new(Molecule::new("cofactor"))),
        );
        system
    }

    #[test]
    fn keys_iterate_in_sorted_order() {
        let system = system_with_ligand_and_cofactor();
        let keys: Vec<&str> = system.keys().collect();
        assert_eq!(keys, vec!["a", "ligand", "protein", "solvent"]);
    }

    #[test]
    fn typed_accessors_find_their_components() {
        let system = system_with_ligand_and_cofactor();
        assert!(system.protein().is_some());
        assert!(system.solvent().is_some());
        let molecules: Vec<&str> = system.small_molecules().map(|(k, _)| k).collect();
        assert_eq!(molecules, vec!["a", "ligand"]);
    }

    #[test]
    fn insert_replaces_existing_component() {
        let mut system = system_with_ligand_and_cofactor();
        let mut replacement = SolventComponent::default();
        replacement.water_model = "tip4pew".to_string();
        system.insert("solvent", Component::Solvent(replacement));
        assert_eq!(system.len(), 4);
        assert_eq!(system.solvent().unwrap().water_model, "tip4pew");
    }

    #[test]
    fn empty_system_reports_empty() {
        let system = ChemicalSystem::new();
        assert!(system.is_empty());
        assert_eq!(system.total_atom_count(), 0);
    }
}
