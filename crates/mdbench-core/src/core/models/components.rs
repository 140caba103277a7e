use super::molecule::Molecule;
use super::protein::ProteinComponent;
use serde::{Deserialize, Serialize};

/// Description of the aqueous environment the engine should build around the
/// solutes.
///
/// This component carries no coordinates; solvation is performed by the
/// external engine from this description. The defaults give a neutralized
/// TIP3P box at physiological salt concentration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolventComponent {
    /// Water model the engine should use.
    pub water_model: String,
    /// Positive counter-ion species.
    pub positive_ion: String,
    /// Negative counter-ion species.
    pub negative_ion: String,
    /// Whether the engine should neutralize the net system charge.
    pub neutralize: bool,
    /// Salt concentration in mol/L.
    pub ion_concentration: f64,
}

impl Default for SolventComponent {
    fn default() -> Self {
        Self {
            water_model: "tip3p".to_string(),
            positive_ion: "Na+".to_string(),
            negative_ion: "Cl-".to_string(),
            neutralize: true,
            ion_concentration: 0.15,
        }
    }
}

/// A small molecule participating in the simulation: a ligand or a cofactor.
#[derive(Debug, Clone, PartialEq)]
pub struct SmallMoleculeComponent {
    pub molecule: Molecule,
}

impl SmallMoleculeComponent {
    pub fn new(molecule: Molecule) -> Self {
        Self { molecule }
    }

    pub fn name(&self) -> &str {
        &self.molecule.name
    }
}

/// One named component of a chemical system.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Protein(ProteinComponent),
    Solvent(SolventComponent),
    SmallMolecule(SmallMoleculeComponent),
}

impl Component {
    /// Number of explicit atoms this component contributes. Solvent counts as
    /// zero; its atoms only exist after the engine builds the box.
    pub fn atom_count(&self) -> usize {
        match self {
            Component::Protein(p) => p.atom_count(),
            Component::Solvent(_) => 0,
            Component::SmallMolecule(m) => m.molecule.atom_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_solvent_is_neutralized_tip3p() {
        let solvent = SolventComponent::default();
        assert_eq!(solvent.water_model, "tip3p");
        assert_eq!(solvent.positive_ion, "Na+");
        assert_eq!(solvent.negative_ion, "Cl-");
        assert!(solvent.neutralize);
        assert_eq!(solvent.ion_concentration, 0.15);
    }

    #[test]
    fn solvent_component_contributes_no_explicit_atoms() {
        let component = Component::Solvent(SolventComponent::default());
        assert_eq!(component.atom_count(), 0);
    }

    #[test]
    fn small_molecule_component_exposes_molecule_name() {
        let component = SmallMoleculeComponent::new(Molecule::new("benzene"));
        assert_eq!(component.name(), "benzene");
    }
}
