use crate::error::{GenealogyError, Result};
use serde::Deserialize;

/// Mother index marking a particle without a parent.
pub const NO_MOTHER: i32 = -1;

/// Raw column layout of one event, as it appears in the input files.
///
/// Field aliases accept the NanoAOD branch names so dumps can be fed in
/// without renaming.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RawRecord {
    /// Event number; `EventReader` numbers records without one by position.
    #[serde(default, alias = "evt")]
    pub event: Option<u64>,
    #[serde(alias = "GenPart_pdgId")]
    pub pdg_id: Vec<i32>,
    #[serde(alias = "GenPart_genPartIdxMother")]
    pub mother_idx: Vec<i32>,
    #[serde(default, alias = "GenPart_statusFlags")]
    pub status_flags: Vec<i32>,
    #[serde(default, alias = "GenPart_pt")]
    pub pt: Vec<f32>,
    #[serde(default, alias = "GenPart_eta")]
    pub eta: Vec<f32>,
    #[serde(default, alias = "GenPart_phi")]
    pub phi: Vec<f32>,
    #[serde(default, alias = "GenPart_mass")]
    pub mass: Vec<f32>,
    #[serde(default, alias = "GenPart_status")]
    pub status: Vec<i32>,
}

/// One event's generator-level particle list.
///
/// All columns have the same length and every mother index is either
/// [`NO_MOTHER`] or a valid position. Optional columns missing from the input
/// are zero-filled.
#[derive(Debug, Clone)]
pub struct GeneratorRecord {
    event: u64,
    pdg_id: Vec<i32>,
    mother_idx: Vec<i32>,
    status_flags: Vec<i32>,
    pt: Vec<f32>,
    eta: Vec<f32>,
    phi: Vec<f32>,
    mass: Vec<f32>,
    status: Vec<i32>,
}

impl TryFrom<RawRecord> for GeneratorRecord {
    type Error = GenealogyError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let len = raw.pdg_id.len();

        fn column<T: Default + Clone>(
            name: &'static str,
            values: Vec<T>,
            len: usize,
        ) -> Result<Vec<T>> {
            match values.len() {
                0 => Ok(vec![T::default(); len]),
                n if n == len => Ok(values),
                found => Err(GenealogyError::LengthMismatch {
                    column: name,
                    expected: len,
                    found,
                }),
            }
        }

        if raw.mother_idx.len() != len {
            return Err(GenealogyError::LengthMismatch {
                column: "mother_idx",
                expected: len,
                found: raw.mother_idx.len(),
            });
        }

        for (index, &mother) in raw.mother_idx.iter().enumerate() {
            if mother != NO_MOTHER && (mother < 0 || mother as usize >= len) {
                return Err(GenealogyError::ParentOutOfRange { index, mother, len });
            }
        }

        Ok(GeneratorRecord {
            event: raw.event.unwrap_or(0),
            status_flags: column("status_flags", raw.status_flags, len)?,
            pt: column("pt", raw.pt, len)?,
            eta: column("eta", raw.eta, len)?,
            phi: column("phi", raw.phi, len)?,
            mass: column("mass", raw.mass, len)?,
            status: column("status", raw.status, len)?,
            pdg_id: raw.pdg_id,
            mother_idx: raw.mother_idx,
        })
    }
}

impl GeneratorRecord {
    /// Builds a record from the two columns the genealogy needs; kinematics
    /// are zeroed.
    pub fn from_genealogy(event: u64, pdg_id: Vec<i32>, mother_idx: Vec<i32>) -> Result<Self> {
        RawRecord {
            event: Some(event),
            pdg_id,
            mother_idx,
            ..Default::default()
        }
        .try_into()
    }

    pub fn event(&self) -> u64 {
        self.event
    }

    pub fn len(&self) -> usize {
        self.pdg_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pdg_id.is_empty()
    }

    pub fn pdg_id(&self, index: usize) -> i32 {
        self.pdg_id[index]
    }

    pub fn mother_idx(&self, index: usize) -> i32 {
        self.mother_idx[index]
    }

    /// Mother as a position, `None` for roots.
    pub fn mother(&self, index: usize) -> Option<usize> {
        match self.mother_idx[index] {
            NO_MOTHER => None,
            m => Some(m as usize),
        }
    }

    pub fn is_root(&self, index: usize) -> bool {
        self.mother_idx[index] == NO_MOTHER
    }

    pub fn status_flags(&self, index: usize) -> i32 {
        self.status_flags[index]
    }

    pub fn status(&self, index: usize) -> i32 {
        self.status[index]
    }

    pub fn pt(&self, index: usize) -> f32 {
        self.pt[index]
    }

    pub fn eta(&self, index: usize) -> f32 {
        self.eta[index]
    }

    pub fn phi(&self, index: usize) -> f32 {
        self.phi[index]
    }

    pub fn mass(&self, index: usize) -> f32 {
        self.mass[index]
    }

    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| self.is_root(i))
    }

    /// True when every particle sits after its mother, which the children
    /// scan relies on.
    pub fn is_ordered(&self) -> bool {
        (0..self.len()).all(|i| self.mother(i).map_or(true, |m| m <= i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_are_zero_filled() {
        let record = GeneratorRecord::from_genealogy(7, vec![25, 5], vec![-1, 0]).unwrap();
        assert_eq!(record.event(), 7);
        assert_eq!(record.len(), 2);
        assert_eq!(record.pt(1), 0.0);
        assert_eq!(record.status_flags(0), 0);
        assert_eq!(record.mother(1), Some(0));
        assert_eq!(record.mother(0), None);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let raw = RawRecord {
            pdg_id: vec![25, 5],
            mother_idx: vec![-1, 0],
            pt: vec![1.0],
            ..Default::default()
        };
        match GeneratorRecord::try_from(raw) {
            Err(GenealogyError::LengthMismatch { column, expected, found }) => {
                assert_eq!(column, "pt");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_mother_out_of_range_is_rejected() {
        let err = GeneratorRecord::from_genealogy(0, vec![25, 5], vec![-1, 4]).unwrap_err();
        assert!(matches!(
            err,
            GenealogyError::ParentOutOfRange { index: 1, mother: 4, len: 2 }
        ));
        let err = GeneratorRecord::from_genealogy(0, vec![25], vec![-3]).unwrap_err();
        assert!(matches!(err, GenealogyError::ParentOutOfRange { .. }));
    }

    #[test]
    fn test_is_ordered() {
        let ordered = GeneratorRecord::from_genealogy(0, vec![1, 2, 3], vec![-1, 0, 1]).unwrap();
        assert!(ordered.is_ordered());
        let unordered = GeneratorRecord::from_genealogy(0, vec![1, 2, 3], vec![2, -1, 1]).unwrap();
        assert!(!unordered.is_ordered());
        assert_eq!(unordered.roots().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_nanoaod_field_names() {
        let json = r#"{"evt": 3, "GenPart_pdgId": [25, 5], "GenPart_genPartIdxMother": [-1, 0],
                       "GenPart_pt": [120.5, 40.0]}"#;
        let raw: RawRecord = serde_json::from_str(json).unwrap();
        let record = GeneratorRecord::try_from(raw).unwrap();
        assert_eq!(record.event(), 3);
        assert_eq!(record.pt(0), 120.5);
    }
}
