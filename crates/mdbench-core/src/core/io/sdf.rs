use crate::core::models::atom::{Atom, Bond, BondOrder};
use crate::core::models::element::Element;
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: SdfParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum SdfParseErrorKind {
    #[error("Invalid integer format in field '{field}' (value: '{value}')")]
    InvalidInt { field: String, value: String },
    #[error("Invalid float format in field '{field}' (value: '{value}')")]
    InvalidFloat { field: String, value: String },
    #[error("Counts line does not declare a V2000 connection table")]
    NotV2000,
    #[error("Unexpected end of record (expected {expected})")]
    TruncatedRecord { expected: &'static str },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("Bond references atom {index} outside the atom block (atom count: {atom_count})")]
    BondIndexOutOfRange { index: usize, atom_count: usize },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

/// Decodes the counts-line charge code (old-style, superseded by `M  CHG`).
fn charge_from_code(code: i32) -> i8 {
    match code {
        1 => 3,
        2 => 2,
        3 => 1,
        5 => -1,
        6 => -2,
        7 => -3,
        _ => 0,
    }
}

struct NumberedLines<R> {
    lines: io::Lines<R>,
    current: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            current: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>, io::Error> {
        match self.lines.next() {
            Some(line) => {
                self.current += 1;
                Ok(Some((self.current, line?)))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<(usize, String), SdfError> {
        self.next_line()?.ok_or(SdfError::Parse {
            line: self.current + 1,
            kind: SdfParseErrorKind::TruncatedRecord { expected },
        })
    }
}

pub struct SdfFile;

impl SdfFile {
    /// Reads every V2000 record from an SDF stream.
    ///
    /// Hydrogens are retained as written; the benchmark never strips them.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed counts/atom/bond lines, non-V2000
    /// connection tables, unknown element symbols, out-of-range bond indices,
    /// or a stream containing no records at all.
    pub fn read_all(reader: &mut impl BufRead) -> Result<Vec<Molecule>, SdfError> {
        let mut lines = NumberedLines::new(reader);
        let mut molecules = Vec::new();

        loop {
            // Skip blank padding between records, stop cleanly at EOF.
            let title = loop {
                match lines.next_line()? {
                    Some((_, line)) => {
                        if molecules.is_empty() || !line.trim().is_empty() {
                            break line;
                        }
                    }
                    None => {
                        if molecules.is_empty() {
                            return Err(SdfError::MissingRecord("molfile records".into()));
                        }
                        return Ok(molecules);
                    }
                }
            };

            lines.expect_line("program line")?;
            lines.expect_line("comment line")?;
            let (counts_num, counts) = lines.expect_line("counts line")?;

            if !counts.contains("V2000") {
                return Err(SdfError::Parse {
                    line: counts_num,
                    kind: SdfParseErrorKind::NotV2000,
                });
            }
            let natoms_str = slice_and_trim(&counts, 0, 3);
            let nbonds_str = slice_and_trim(&counts, 3, 6);
            let natoms: usize = natoms_str.parse().map_err(|_| SdfError::Parse {
                line: counts_num,
                kind: SdfParseErrorKind::InvalidInt {
                    field: "atom count".into(),
                    value: natoms_str.into(),
                },
            })?;
            let nbonds: usize = nbonds_str.parse().map_err(|_| SdfError::Parse {
                line: counts_num,
                kind: SdfParseErrorKind::InvalidInt {
                    field: "bond count".into(),
                    value: nbonds_str.into(),
                },
            })?;

            let mut molecule = Molecule::new(title.trim());

            for i in 0..natoms {
                let (line_num, line) = lines.expect_line("atom block line")?;
                let x_str = slice_and_trim(&line, 0, 10);
                let y_str = slice_and_trim(&line, 10, 20);
                let z_str = slice_and_trim(&line, 20, 30);
                let symbol = slice_and_trim(&line, 31, 34);
                let charge_str = slice_and_trim(&line, 36, 39);

                let parse_coord = |s: &str, field: &str| -> Result<f64, SdfError> {
                    s.parse().map_err(|_| SdfError::Parse {
                        line: line_num,
                        kind: SdfParseErrorKind::InvalidFloat {
                            field: field.to_string(),
                            value: s.to_string(),
                        },
                    })
                };
                let x = parse_coord(x_str, "x")?;
                let y = parse_coord(y_str, "y")?;
                let z = parse_coord(z_str, "z")?;

                let element =
                    Element::from_symbol(symbol).ok_or_else(|| SdfError::Parse {
                        line: line_num,
                        kind: SdfParseErrorKind::UnknownElement {
                            symbol: symbol.to_string(),
                        },
                    })?;
                let charge_code: i32 = charge_str.parse().unwrap_or(0);

                let mut atom = Atom::new(i + 1, element, Point3::new(x, y, z));
                atom.formal_charge = charge_from_code(charge_code);
                molecule.atoms.push(atom);
            }

            for _ in 0..nbonds {
                let (line_num, line) = lines.expect_line("bond block line")?;
                let a1_str = slice_and_trim(&line, 0, 3);
                let a2_str = slice_and_trim(&line, 3, 6);
                let order_str = slice_and_trim(&line, 6, 9);

                let parse_index = |s: &str, field: &str| -> Result<usize, SdfError> {
                    s.parse().map_err(|_| SdfError::Parse {
                        line: line_num,
                        kind: SdfParseErrorKind::InvalidInt {
                            field: field.to_string(),
                            value: s.to_string(),
                        },
                    })
                };
                let a1 = parse_index(a1_str, "bond atom 1")?;
                let a2 = parse_index(a2_str, "bond atom 2")?;
                for index in [a1, a2] {
                    if index == 0 || index > natoms {
                        return Err(SdfError::Parse {
                            line: line_num,
                            kind: SdfParseErrorKind::BondIndexOutOfRange {
                                index,
                                atom_count: natoms,
                            },
                        });
                    }
                }
                let order = BondOrder::from_mol_code(order_str.parse().unwrap_or(1));
                molecule.bonds.push(Bond::new(a1 - 1, a2 - 1, order));
            }

            // Property block: `M  CHG` overrides any counts-line charges.
            loop {
                let (_, line) = lines.expect_line("property block or M  END")?;
                if line.starts_with("M  END") {
                    break;
                }
                if line.starts_with("M  CHG") {
                    for atom in &mut molecule.atoms {
                        atom.formal_charge = 0;
                    }
                    let fields: Vec<&str> = line[6..].split_whitespace().collect();
                    for pair in fields.get(1..).unwrap_or(&[]).chunks(2) {
                        if let [idx_str, chg_str] = pair {
                            let idx: usize = idx_str.parse().unwrap_or(0);
                            let chg: i8 = chg_str.parse().unwrap_or(0);
                            if idx >= 1 && idx <= molecule.atoms.len() {
                                molecule.atoms[idx - 1].formal_charge = chg;
                            }
                        }
                    }
                }
            }

            // Data items run to the record delimiter or EOF.
            loop {
                match lines.next_line()? {
                    Some((_, line)) if line.starts_with("$$$$") => break,
                    Some(_) => {}
                    None => {
                        molecules.push(molecule);
                        return Ok(molecules);
                    }
                }
            }

            molecules.push(molecule);
        }
    }

    /// Reads all molecules from an SDF file on disk.
    pub fn read_all_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Molecule>, SdfError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_all(&mut reader)
    }

    /// Parses a single embedded molblock (one V2000 record without the
    /// trailing `$$$$`), as found in atom-mapping files.
    pub fn read_molblock(text: &str) -> Result<Molecule, SdfError> {
        let mut cursor = io::Cursor::new(text.as_bytes());
        let mut molecules = Self::read_all(&mut cursor)?;
        Ok(molecules.remove(0))
    }

    /// Writes one molecule as a V2000 molblock followed by the `$$$$` record
    /// delimiter, the staging format the engine consumes.
    pub fn write_record(molecule: &Molecule, writer: &mut impl Write) -> Result<(), SdfError> {
        writeln!(writer, "{}", molecule.name)?;
        writeln!(writer, "  mdbench")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
            molecule.atom_count(),
            molecule.bond_count()
        )?;
        for atom in &molecule.atoms {
            writeln!(
                writer,
                "{:>10.4}{:>10.4}{:>10.4} {:<3} 0  0  0  0  0  0  0  0  0  0  0  0",
                atom.position.x, atom.position.y, atom.position.z, atom.element.symbol
            )?;
        }
        for bond in &molecule.bonds {
            writeln!(
                writer,
                "{:>3}{:>3}{:>3}  0",
                bond.atom1 + 1,
                bond.atom2 + 1,
                bond.order.to_mol_code()
            )?;
        }
        let charged: Vec<(usize, i8)> = molecule
            .atoms
            .iter()
            .enumerate()
            .filter(|(_, a)| a.formal_charge != 0)
            .map(|(i, a)| (i + 1, a.formal_charge))
            .collect();
        if !charged.is_empty() {
            write!(writer, "M  CHG{:>3}", charged.len())?;
            for (idx, chg) in charged {
                write!(writer, "{:>4}{:>4}", idx, chg)?;
            }
            writeln!(writer)?;
        }
        writeln!(writer, "M  END")?;
        writeln!(writer, "$$$$")?;
        Ok(())
    }
}
