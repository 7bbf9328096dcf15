//! The fixed list of threatened Brazilian species queried by default.

/// A species to look up, by scientific and common name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesQuery {
    /// Name sent upstream (e.g. "Panthera onca").
    pub scientific_name: &'static str,
    /// Name reported in the output records (e.g. "Onça-pintada").
    pub common_name: &'static str,
}

impl SpeciesQuery {
    pub const fn new(scientific_name: &'static str, common_name: &'static str) -> Self {
        Self {
            scientific_name,
            common_name,
        }
    }
}

/// Species reported by the fixed occurrence endpoint, in output order.
pub const FIXED_SPECIES: &[SpeciesQuery] = &[
    SpeciesQuery::new("Panthera onca", "Onça-pintada"),
    SpeciesQuery::new("Leontopithecus rosalia", "Mico-leão-dourado"),
    SpeciesQuery::new("Chelonia mydas", "Tartaruga-Marinha"),
];

/// Country code every fixed-species lookup is constrained to.
pub const FIXED_SPECIES_COUNTRY: &str = "BR";

/// Result cap for each fixed-species lookup.
pub const FIXED_SPECIES_LIMIT: u32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_species_order() {
        let names: Vec<_> = FIXED_SPECIES.iter().map(|s| s.scientific_name).collect();
        assert_eq!(
            names,
            ["Panthera onca", "Leontopithecus rosalia", "Chelonia mydas"]
        );
    }
}
