//! Enumerated parameters: the wire carries the index, people use the label.

use crate::error::{Result, UnitsError};

/// A fixed, ordered label table for one enumerated parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumTable {
    name: &'static str,
    labels: &'static [&'static str],
}

/// Compressor ratio.
pub const COMP_RATIOS: EnumTable = EnumTable::new(
    "ratio",
    &[
        "1.1", "1.3", "1.5", "2.0", "2.5", "3.0", "4.0", "5.0", "7.0", "10", "20", "100",
    ],
);

/// Numeric value of each entry of [`COMP_RATIOS`].
pub const COMP_RATIO_VALUES: [f64; 12] = [
    1.1, 1.3, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 7.0, 10.0, 20.0, 100.0,
];

/// EQ band type.
pub const EQ_TYPES: EnumTable =
    EnumTable::new("eq type", &["lcut", "lshv", "peq", "veq", "hshv", "hcut"]);

/// Gate mode.
pub const GATE_MODES: EnumTable =
    EnumTable::new("gate mode", &["exp2", "exp3", "exp4", "gate", "duck"]);

impl EnumTable {
    pub const fn new(name: &'static str, labels: &'static [&'static str]) -> Self {
        Self { name, labels }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for a wire index.
    pub fn label(&self, index: i32) -> Result<&'static str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.labels.get(i).copied())
            .ok_or(UnitsError::IndexOutOfRange {
                table: self.name,
                index,
                len: self.labels.len(),
            })
    }

    /// Wire index for a label (case-insensitive).
    pub fn index(&self, label: &str) -> Result<i32> {
        self.labels
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label))
            .map(|i| i as i32)
            .ok_or_else(|| UnitsError::UnknownLabel {
                table: self.name,
                label: label.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_threaded_unchanged() {
        assert_eq!(COMP_RATIOS.len(), 12);
        assert_eq!(COMP_RATIOS.label(0).unwrap(), "1.1");
        assert_eq!(COMP_RATIOS.label(11).unwrap(), "100");
        assert_eq!(EQ_TYPES.labels(), &["lcut", "lshv", "peq", "veq", "hshv", "hcut"]);
        assert_eq!(GATE_MODES.labels(), &["exp2", "exp3", "exp4", "gate", "duck"]);
    }

    #[test]
    fn ratio_values_follow_labels() {
        for (i, value) in COMP_RATIO_VALUES.iter().enumerate() {
            let label: f64 = COMP_RATIOS.label(i as i32).unwrap().parse().unwrap();
            assert_eq!(label, *value);
        }
    }

    #[test]
    fn index_lookup() {
        assert_eq!(EQ_TYPES.index("peq").unwrap(), 2);
        assert_eq!(GATE_MODES.index("DUCK").unwrap(), 4);
        assert_eq!(
            EQ_TYPES.index("notch"),
            Err(UnitsError::UnknownLabel {
                table: "eq type",
                label: "notch".to_string()
            })
        );
    }

    #[test]
    fn label_out_of_range() {
        assert_eq!(
            GATE_MODES.label(5),
            Err(UnitsError::IndexOutOfRange {
                table: "gate mode",
                index: 5,
                len: 5
            })
        );
        assert!(GATE_MODES.label(-1).is_err());
    }
}
