use super::atom::{Atom, Bond};

/// A small molecule: a named collection of atoms and the bonds between them.
///
/// This is the in-memory form of one SDF record or one embedded molblock, and
/// is the payload of ligand and cofactor components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    /// The molecule title from the source file; may be empty.
    pub name: String,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Number of non-hydrogen atoms.
    pub fn heavy_atom_count(&self) -> usize {
        self.atoms
            .iter()
            .filter(|a| !a.element.is_hydrogen())
            .count()
    }

    /// Net formal charge over all atoms.
    pub fn net_charge(&self) -> i32 {
        self.atoms.iter().map(|a| a.formal_charge as i32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::BondOrder;
    use crate::core::models::element::Element;
    use nalgebra::Point3;

    fn methanol() -> Molecule {
        let c = Element::from_symbol("C").unwrap();
        let o = Element::from_symbol("O").unwrap();
        let h = Element::from_symbol("H").unwrap();
        let mut mol = Molecule::new("methanol");
        mol.atoms = vec![
            Atom::new(1, c, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(2, o, Point3::new(1.4, 0.0, 0.0)),
            Atom::new(3, h, Point3::new(1.8, 0.9, 0.0)),
        ];
        mol.bonds = vec![
            Bond::new(0, 1, BondOrder::Single),
            Bond::new(1, 2, BondOrder::Single),
        ];
        mol
    }

    #[test]
    fn counts_reflect_contents() {
        let mol = methanol();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.heavy_atom_count(), 2);
    }

    #[test]
    fn net_charge_sums_formal_charges() {
        let mut mol = methanol();
        assert_eq!(mol.net_charge(), 0);
        mol.atoms[1].formal_charge = -1;
        assert_eq!(mol.net_charge(), -1);
    }
}
