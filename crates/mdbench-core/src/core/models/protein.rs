use super::atom::Atom;

/// A residue within a protein chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    /// Residue sequence number from the source file.
    pub number: isize,
    /// Three-letter residue name (e.g., "ALA", "HOH").
    pub name: String,
    /// PDB insertion code, if any.
    pub insertion_code: Option<char>,
    pub atoms: Vec<Atom>,
}

/// A chain of residues, keyed by its one-character chain identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: char,
    pub residues: Vec<Residue>,
}

/// A protein structure as read from a PDB file.
///
/// Everything in the file's first model is kept, hetero records included,
/// since downstream solvation and parameterization are the engine's concern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProteinComponent {
    /// A display name for the structure, typically the source file stem.
    pub name: String,
    pub chains: Vec<Chain>,
}

impl ProteinComponent {
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residues.len()).sum()
    }

    pub fn atom_count(&self) -> usize {
        self.chains
            .iter()
            .flat_map(|c| &c.residues)
            .map(|r| r.atoms.len())
            .sum()
    }

    /// Iterates over all atoms in file order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.chains
            .iter()
            .flat_map(|c| &c.residues)
            .flat_map(|r| &r.atoms)
    }
}

/// Incremental builder used by the PDB reader.
///
/// Atoms arrive in file order; the builder opens a new chain or residue
/// whenever the identifying fields change, mirroring how the records are laid
/// out on disk.
#[derive(Debug, Default)]
pub struct ProteinBuilder {
    name: String,
    chains: Vec<Chain>,
}

impl ProteinBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            chains: Vec::new(),
        }
    }

    pub fn start_chain(&mut self, id: char) {
        self.chains.push(Chain {
            id,
            residues: Vec::new(),
        });
    }

    pub fn start_residue(&mut self, number: isize, name: &str, insertion_code: Option<char>) {
        if self.chains.is_empty() {
            self.start_chain('A');
        }
        let chain = self.chains.last_mut().unwrap();
        chain.residues.push(Residue {
            number,
            name: name.to_string(),
            insertion_code,
            atoms: Vec::new(),
        });
    }

    pub fn add_atom(&mut self, atom: Atom) {
        if self.chains.is_empty() {
            self.start_chain('A');
        }
        let chain = self.chains.last_mut().unwrap();
        if chain.residues.is_empty() {
            chain.residues.push(Residue {
                number: 0,
                name: "UNK".to_string(),
                insertion_code: None,
                atoms: Vec::new(),
            });
        }
        chain.residues.last_mut().unwrap().atoms.push(atom);
    }

    pub fn current_chain_id(&self) -> Option<char> {
        self.chains.last().map(|c| c.id)
    }

    pub fn build(self) -> ProteinComponent {
        ProteinComponent {
            name: self.name,
            chains: self.chains,
        }
    }
}
