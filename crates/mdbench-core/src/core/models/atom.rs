use super::element::Element;
use nalgebra::Point3;

/// Represents a single atom with its identity and coordinates.
///
/// This struct carries everything the benchmark needs to stage an atom into
/// the engine's input files: its serial number from the source file, its name,
/// its element, its position, and any formal charge assigned by the source
/// format. No force-field state lives here; parameterization belongs to the
/// external engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number as read from the source file (1-based in PDB/SDF).
    pub serial: usize,
    /// The atom name (e.g., "CA", "N1"); empty for SDF atoms, which are
    /// identified by element and index.
    pub name: String,
    /// The chemical element.
    pub element: Element,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
}

impl Atom {
    /// Creates a new `Atom` with no name and zero formal charge.
    ///
    /// # Arguments
    ///
    /// * `serial` - Serial number from the source file.
    /// * `element` - The chemical element.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(serial: usize, element: Element, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: String::new(),
            element,
            position,
            formal_charge: 0,
        }
    }

    /// Creates a new named `Atom`, as read from a PDB record.
    pub fn named(serial: usize, name: &str, element: Element, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element,
            position,
            formal_charge: 0,
        }
    }
}

/// Bond order between two atoms, following the V2000 molfile encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Decodes a V2000 bond-type code (1-4). Unknown codes default to single.
    pub fn from_mol_code(code: u8) -> Self {
        match code {
            2 => BondOrder::Double,
            3 => BondOrder::Triple,
            4 => BondOrder::Aromatic,
            _ => BondOrder::Single,
        }
    }

    /// Encodes the bond order back to its V2000 code.
    pub fn to_mol_code(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 4,
        }
    }
}

/// A bond between two atoms, stored as indices into the owning molecule's
/// atom list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }
}
