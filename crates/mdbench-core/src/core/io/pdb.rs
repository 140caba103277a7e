use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::protein::{ProteinBuilder, ProteinComponent};
use nalgebra::Point3;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
    #[error("Unknown element for atom '{name}' (element field: '{element}')")]
    UnknownElement { name: String, element: String },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Deduces the element from a PDB atom name when columns 77-78 are absent.
///
/// Two-letter candidates (leading digits stripped) are tried first so "CL1"
/// resolves to chlorine, then the single leading letter so "CA" in a protein
/// residue stays carbon only when the two-letter lookup fails.
fn element_from_atom_name(name: &str) -> Option<Element> {
    let stripped: String = name.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if stripped.is_empty() {
        return None;
    }
    if stripped.len() >= 2 {
        if let Some(element) = Element::from_symbol(&stripped[..2]) {
            // Calcium and cadmium never appear as protein atom names, but
            // "CA"/"CD" carbons do; prefer the single-letter reading there.
            if !matches!(element.symbol, "Ca" | "Cd" | "Ce" | "Co" | "Cs" | "Nd" | "Ne" | "Ni" | "Os" | "Hg" | "Ho") {
                return Some(element);
            }
        }
    }
    Element::from_symbol(&stripped[..1])
}

pub struct PdbFile;

impl PdbFile {
    /// Reads a protein structure from PDB-format text.
    ///
    /// Only the first model of a multi-model file is kept. ATOM and HETATM
    /// records are both retained; alternate locations other than ' ' or 'A'
    /// are skipped. The element is taken from columns 77-78 when present and
    /// deduced from the atom name otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed records, duplicate atom serials, an
    /// unresolvable element, or a file with no coordinate records.
    pub fn read_from(
        reader: &mut impl BufRead,
        name: &str,
    ) -> Result<ProteinComponent, PdbError> {
        let mut builder = ProteinBuilder::new(name);
        let mut seen_serials = HashSet::new();

        let mut in_first_model = true;
        let mut model_seen = false;
        let mut current_chain_id = '\0';
        let mut current_residue: Option<(isize, String, Option<char>)> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "MODEL" => {
                    if model_seen {
                        break;
                    }
                    model_seen = true;
                }
                "ENDMDL" => {
                    in_first_model = false;
                }
                "ATOM" | "HETATM" if in_first_model => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let alt_loc = line.chars().nth(16).unwrap_or(' ');
                    if alt_loc != ' ' && alt_loc != 'A' {
                        continue;
                    }

                    let serial_str = slice_and_trim(&line, 6, 11);
                    let name_str = slice_and_trim(&line, 12, 16);
                    let res_name_str = slice_and_trim(&line, 17, 20);
                    let chain_id = line.chars().nth(21).unwrap_or(' ');
                    let res_seq_str = slice_and_trim(&line, 22, 26);
                    let insertion_code = match line.chars().nth(26) {
                        Some(' ') | None => None,
                        Some(c) => Some(c),
                    };
                    let x_str = slice_and_trim(&line, 30, 38);
                    let y_str = slice_and_trim(&line, 38, 46);
                    let z_str = slice_and_trim(&line, 46, 54);
                    let element_str = slice_and_trim(&line, 76, 78);

                    if name_str.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let serial: usize = serial_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "7-11".into(),
                            value: serial_str.into(),
                        },
                    })?;
                    if !seen_serials.insert(serial) {
                        return Err(PdbError::Inconsistency(format!(
                            "Duplicate atom serial: {}",
                            serial
                        )));
                    }
                    let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "23-26".into(),
                            value: res_seq_str.into(),
                        },
                    })?;
                    let x: f64 = x_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidFloat {
                            columns: "31-38".into(),
                            value: x_str.into(),
                        },
                    })?;
                    let y: f64 = y_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidFloat {
                            columns: "39-46".into(),
                            value: y_str.into(),
                        },
                    })?;
                    let z: f64 = z_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidFloat {
                            columns: "47-54".into(),
                            value: z_str.into(),
                        },
                    })?;

                    let element = if element_str.is_empty() {
                        element_from_atom_name(name_str)
                    } else {
                        Element::from_symbol(element_str)
                    }
                    .ok_or_else(|| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::UnknownElement {
                            name: name_str.into(),
                            element: element_str.into(),
                        },
                    })?;

                    if chain_id != current_chain_id {
                        builder.start_chain(chain_id);
                        current_chain_id = chain_id;
                        current_residue = None;
                    }
                    let residue_key = (res_seq, res_name_str.to_string(), insertion_code);
                    if current_residue.as_ref() != Some(&residue_key) {
                        builder.start_residue(res_seq, res_name_str, insertion_code);
                        current_residue = Some(residue_key);
                    }

                    builder.add_atom(Atom::named(
                        serial,
                        name_str,
                        element,
                        Point3::new(x, y, z),
                    ));
                }
                "TER" => {
                    // Chain break; the next coordinate record reopens a chain.
                    current_chain_id = '\0';
                    current_residue = None;
                }
                "END" => break,
                _ => {}
            }
        }

        if seen_serials.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        Ok(builder.build())
    }

    /// Reads a protein structure from a file path, naming it after the file
    /// stem.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ProteinComponent, PdbError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, &name)
    }

    /// Writes a minimal PDB rendition of the structure, used to stage engine
    /// inputs. Standard residues become ATOM records, everything else HETATM,
    /// with a TER after each chain.
    pub fn write_to(
        protein: &ProteinComponent,
        writer: &mut impl Write,
    ) -> Result<(), PdbError> {
        for chain in &protein.chains {
            for residue in &chain.residues {
                let record_type = if is_standard_residue(&residue.name) {
                    "ATOM"
                } else {
                    "HETATM"
                };
                for atom in &residue.atoms {
                    let name_field = if atom.name.len() < 4 && atom.element.symbol.len() == 1 {
                        format!(" {:<3}", atom.name)
                    } else {
                        format!("{:<4}", atom.name)
                    };
                    writeln!(
                        writer,
                        "{:<6}{:>5} {:<4}{:1}{:<3} {:1}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
                        record_type,
                        atom.serial,
                        name_field,
                        ' ',
                        residue.name,
                        chain.id,
                        residue.number,
                        residue.insertion_code.unwrap_or(' '),
                        atom.position.x,
                        atom.position.y,
                        atom.position.z,
                        1.00,
                        0.00,
                        atom.element.symbol.to_ascii_uppercase(),
                    )?;
                }
            }
            writeln!(writer, "TER")?;
        }
        writeln!(writer, "END")?;
        Ok(())
    }

    /// Writes the structure to a file path via [`PdbFile::write_to`].
    pub fn write_to_path<P: AsRef<Path>>(
        protein: &ProteinComponent,
        path: P,
    ) -> Result<(), PdbError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(protein, &mut writer)
    }
}

const STANDARD_RESIDUES: [&str; 20] = [
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE", "LEU", "LYS", "MET",
    "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
];

fn is_standard_residue(name: &str) -> bool {
    STANDARD_RESIDUES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_RESIDUE_PDB: &str = "\
HEADER    TEST STRUCTURE
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  C   ALA A   1      10.924   6.962  -4.129  1.00  0.00           C
ATOM      4  N   GLY A   2       9.920   6.400  -3.463  1.00  0.00           N
ATOM      5  CA  GLY A   2       9.123   7.103  -2.462  1.00  0.00           C
TER
HETATM    6  O   HOH B 101       2.000   3.000   4.000  1.00  0.00           O
END
";

    fn read(text: &str) -> Result<ProteinComponent, PdbError> {
        let mut cursor = Cursor::new(text.as_bytes());
        PdbFile::read_from(&mut cursor, "test")
    }

    #[test]
    fn reads_chains_residues_and_atoms() {
        let protein = read(TWO_RESIDUE_PDB).unwrap();
        assert_eq!(protein.chain_count(), 2);
        assert_eq!(protein.residue_count(), 3);
        assert_eq!(protein.atom_count(), 6);

        let ala = &protein.chains[0].residues[0];
        assert_eq!(ala.name, "ALA");
        assert_eq!(ala.number, 1);
        assert_eq!(ala.atoms[1].name, "CA");
        assert_eq!(ala.atoms[1].element.symbol, "C");
        assert!((ala.atoms[1].position.x - 11.639).abs() < 1e-9);

        let water = &protein.chains[1].residues[0];
        assert_eq!(water.name, "HOH");
        assert_eq!(water.number, 101);
    }

    #[test]
    fn deduces_element_from_atom_name_when_columns_are_absent() {
        let text = "\
ATOM      1  CA  ALA A   1      11.639   6.071  -5.147  1.00  0.00
ATOM      2 CL1  LIG A   2       0.000   0.000   0.000  1.00  0.00
END
";
        let protein = read(text).unwrap();
        let atoms: Vec<&Atom> = protein.atoms().collect();
        assert_eq!(atoms[0].element.symbol, "C");
        assert_eq!(atoms[1].element.symbol, "Cl");
    }

    #[test]
    fn keeps_only_the_first_model() {
        let text = "\
MODEL        1
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  ALA A   1       9.000   9.000   9.000  1.00  0.00           C
ENDMDL
END
";
        let protein = read(text).unwrap();
        assert_eq!(protein.atom_count(), 1);
        assert!((protein.atoms().next().unwrap().position.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn skips_secondary_alternate_locations() {
        let text = "\
ATOM      1  CA AALA A   1       1.000   2.000   3.000  0.50  0.00           C
ATOM      2  CA BALA A   1       1.100   2.100   3.100  0.50  0.00           C
END
";
        let protein = read(text).unwrap();
        assert_eq!(protein.atom_count(), 1);
        assert_eq!(protein.atoms().next().unwrap().serial, 1);
    }

    #[test]
    fn rejects_duplicate_serials() {
        let text = "\
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C
ATOM      1  CB  ALA A   1       2.000   2.000   3.000  1.00  0.00           C
END
";
        let result = read(text);
        assert!(matches!(result, Err(PdbError::Inconsistency(_))));
    }

    #[test]
    fn rejects_short_coordinate_records() {
        let result = read("ATOM      1  CA  ALA A   1       1.000\nEND\n");
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::LineTooShort,
                ..
            })
        ));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        let text = "\
ATOM      1  CA  ALA A   1      xx.xxx   6.071  -5.147  1.00  0.00           C
END
";
        let result = read(text);
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { .. },
                ..
            })
        ));
    }

    #[test]
    fn rejects_files_without_coordinate_records() {
        let result = read("HEADER    EMPTY\nEND\n");
        assert!(matches!(result, Err(PdbError::MissingRecord(_))));
    }

    #[test]
    fn written_structure_reads_back_identically_shaped() {
        let protein = read(TWO_RESIDUE_PDB).unwrap();
        let mut buffer = Vec::new();
        PdbFile::write_to(&protein, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("HETATM"));
        let mut cursor = Cursor::new(text.as_bytes());
        let reread = PdbFile::read_from(&mut cursor, "test").unwrap();
        assert_eq!(reread.chain_count(), protein.chain_count());
        assert_eq!(reread.residue_count(), protein.residue_count());
        assert_eq!(reread.atom_count(), protein.atom_count());
    }

    #[test]
    fn read_from_path_names_protein_after_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2xyz.pdb");
        std::fs::write(&path, TWO_RESIDUE_PDB).unwrap();
        let protein = PdbFile::read_from_path(&path).unwrap();
        assert_eq!(protein.name, "2xyz");
    }
}
