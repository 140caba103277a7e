use phf::phf_map;

/// Identity of a chemical element.
///
/// Elements are interned in a static table covering the species that occur in
/// biomolecular systems (organic elements, halogens, common counter-ions and
/// metal cofactor centers). Lookups by symbol are case-normalizing, so the
/// upper-cased element columns found in some PDB files resolve correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    /// Canonical element symbol (e.g., "C", "Na", "Fe").
    pub symbol: &'static str,
    /// Atomic number.
    pub atomic_number: u8,
}

static ELEMENTS: phf::Map<&'static str, Element> = phf_map! {
    "H" => Element { symbol: "H", atomic_number: 1 },
    "B" => Element { symbol: "B", atomic_number: 5 },
    "C" => Element { symbol: "C", atomic_number: 6 },
    "N" => Element { symbol: "N", atomic_number: 7 },
    "O" => Element { symbol: "O", atomic_number: 8 },
    "F" => Element { symbol: "F", atomic_number: 9 },
    "Na" => Element { symbol: "Na", atomic_number: 11 },
    "Mg" => Element { symbol: "Mg", atomic_number: 12 },
    "P" => Element { symbol: "P", atomic_number: 15 },
    "S" => Element { symbol: "S", atomic_number: 16 },
    "Cl" => Element { symbol: "Cl", atomic_number: 17 },
    "K" => Element { symbol: "K", atomic_number: 19 },
    "Ca" => Element { symbol: "Ca", atomic_number: 20 },
    "Mn" => Element { symbol: "Mn", atomic_number: 25 },
    "Fe" => Element { symbol: "Fe", atomic_number: 26 },
    "Co" => Element { symbol: "Co", atomic_number: 27 },
    "Ni" => Element { symbol: "Ni", atomic_number: 28 },
    "Cu" => Element { symbol: "Cu", atomic_number: 29 },
    "Zn" => Element { symbol: "Zn", atomic_number: 30 },
    "Se" => Element { symbol: "Se", atomic_number: 34 },
    "Br" => Element { symbol: "Br", atomic_number: 35 },
    "Mo" => Element { symbol: "Mo", atomic_number: 42 },
    "I" => Element { symbol: "I", atomic_number: 53 },
};

impl Element {
    /// Looks up an element by symbol, normalizing case ("FE" resolves to Fe).
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol, in any case.
    ///
    /// # Return
    ///
    /// Returns the interned element, or `None` if the symbol is unknown.
    pub fn from_symbol(symbol: &str) -> Option<Element> {
        let trimmed = symbol.trim();
        if trimmed.is_empty() || trimmed.len() > 2 {
            return None;
        }
        let mut normalized = String::with_capacity(2);
        let mut chars = trimmed.chars();
        if let Some(first) = chars.next() {
            normalized.push(first.to_ascii_uppercase());
        }
        for c in chars {
            normalized.push(c.to_ascii_lowercase());
        }
        ELEMENTS.get(normalized.as_str()).copied()
    }

    /// Whether the element is hydrogen. Used when counting heavy atoms.
    pub fn is_hydrogen(&self) -> bool {
        self.atomic_number == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_symbol_resolves_organic_elements() {
        assert_eq!(Element::from_symbol("C").unwrap().atomic_number, 6);
        assert_eq!(Element::from_symbol("N").unwrap().atomic_number, 7);
        assert_eq!(Element::from_symbol("O").unwrap().atomic_number, 8);
        assert_eq!(Element::from_symbol("S").unwrap().atomic_number, 16);
    }

    #[test]
    fn from_symbol_normalizes_case() {
        assert_eq!(Element::from_symbol("FE").unwrap().symbol, "Fe");
        assert_eq!(Element::from_symbol("cl").unwrap().symbol, "Cl");
        assert_eq!(Element::from_symbol("zN").unwrap().symbol, "Zn");
    }

    #[test]
    fn from_symbol_trims_whitespace() {
        assert_eq!(Element::from_symbol(" C ").unwrap().symbol, "C");
    }

    #[test]
    fn from_symbol_rejects_unknown_symbols() {
        assert!(Element::from_symbol("Xx").is_none());
        assert!(Element::from_symbol("").is_none());
        assert!(Element::from_symbol("CA2").is_none());
    }

    #[test]
    fn is_hydrogen_distinguishes_hydrogen() {
        assert!(Element::from_symbol("H").unwrap().is_hydrogen());
        assert!(!Element::from_symbol("C").unwrap().is_hydrogen());
    }
}
