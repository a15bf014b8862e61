use std::collections::HashMap;

/// Nominal masses in GeV for long-lived particles whose generator-level mass
/// is stored with reduced precision.
const DEFAULT_MASSES: &[(i32, f64)] = &[
    (11, 0.00051099894),
    (-11, 0.00051099894),
    (12, 0.0),
    (13, 1.0565837),
    (-13, 1.0565837),
    (14, 0.0),
    (15, 1.77686),
    (-15, 1.77686),
    (16, 0.0),
    (22, 0.0),
    (111, 0.134977),
    (-111, 0.134977),
    (211, 0.13957),
    (-211, 0.13957),
    (311, 0.497611),
    (-311, 0.497611),
    (321, 0.493677),
    (-321, 0.493677),
    (411, 1.8695),
    (-411, 1.8695),
    (421, 1.86483),
    (-421, 1.86483),
];

#[derive(Debug, Clone)]
pub struct MassTable {
    masses: HashMap<i32, f64>,
}

impl Default for MassTable {
    fn default() -> Self {
        Self {
            masses: DEFAULT_MASSES.iter().copied().collect(),
        }
    }
}

impl MassTable {
    /// Adds or replaces entries, e.g. from the `[masses]` config table.
    pub fn with_overrides(mut self, overrides: &HashMap<i32, f64>) -> Self {
        self.masses.extend(overrides.iter().map(|(&k, &v)| (k, v)));
        self
    }

    pub fn get(&self, pdg_id: i32) -> Option<f64> {
        self.masses.get(&pdg_id).copied()
    }

    /// Table mass if known, otherwise the record's own value.
    pub fn mass_or(&self, pdg_id: i32, fallback: f64) -> f64 {
        self.get(pdg_id).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_fallback() {
        let table = MassTable::default();
        assert_eq!(table.get(211), Some(0.13957));
        assert_eq!(table.get(-11), Some(0.00051099894));
        assert_eq!(table.get(511), None);
        assert_eq!(table.mass_or(511, 5.279), 5.279);
        assert_eq!(table.mass_or(13, 0.0), 1.0565837);
    }

    #[test]
    fn test_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(511, 5.27966);
        overrides.insert(211, 0.1396);
        let table = MassTable::default().with_overrides(&overrides);
        assert_eq!(table.get(511), Some(5.27966));
        assert_eq!(table.get(211), Some(0.1396));
        assert_eq!(table.get(13), Some(1.0565837));
    }
}
