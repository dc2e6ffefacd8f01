//! The in-memory health record set analysed by the dashboard.
//!
//! Records are stored column-wise. The label column is optional so a set
//! without it can be represented and reported instead of trained on.

/// Name of the numeric age column.
pub const AGE_COLUMN: &str = "Age";
/// Name of the categorical smoking column.
pub const SMOKING_COLUMN: &str = "Smoking";
/// Name of the binary label column.
pub const LABEL_COLUMN: &str = "Asthma";

/// Smoking status category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Smoking {
    Yes,
    No,
}

impl Smoking {
    pub fn as_str(self) -> &'static str {
        match self {
            Smoking::Yes => "Yes",
            Smoking::No => "No",
        }
    }
}

/// One row of the record set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub age: u32,
    pub smoking: Smoking,
    /// Binary label, `0` or `1`.
    pub asthma: u8,
}

/// Column-oriented collection of records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSet {
    age: Vec<u32>,
    smoking: Vec<Smoking>,
    asthma: Option<Vec<u8>>,
}

impl RecordSet {
    /// Build a record set from rows; labels other than `0` are stored as `1`.
    pub fn from_records(rows: &[Record]) -> Self {
        Self {
            age: rows.iter().map(|row| row.age).collect(),
            smoking: rows.iter().map(|row| row.smoking).collect(),
            asthma: Some(rows.iter().map(|row| u8::from(row.asthma != 0)).collect()),
        }
    }

    /// Return the same records with the label column removed.
    pub fn without_label(mut self) -> Self {
        self.asthma = None;
        self
    }

    pub fn len(&self) -> usize {
        self.age.len()
    }

    pub fn is_empty(&self) -> bool {
        self.age.is_empty()
    }

    pub fn ages(&self) -> &[u32] {
        &self.age
    }

    pub fn smoking(&self) -> &[Smoking] {
        &self.smoking
    }

    /// Label column, if present.
    pub fn asthma(&self) -> Option<&[u8]> {
        self.asthma.as_deref()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names = vec![AGE_COLUMN, SMOKING_COLUMN];
        if self.asthma.is_some() {
            names.push(LABEL_COLUMN);
        }
        names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names().contains(&name)
    }

    /// Iterate rows; `None` when the label column is missing.
    pub fn rows(&self) -> Option<impl Iterator<Item = Record> + '_> {
        let asthma = self.asthma.as_ref()?;
        Some(
            self.age
                .iter()
                .zip(&self.smoking)
                .zip(asthma)
                .map(|((&age, &smoking), &asthma)| Record {
                    age,
                    smoking,
                    asthma,
                }),
        )
    }
}

/// The fixed five-row sample every analysis runs on.
pub fn sample_records() -> RecordSet {
    RecordSet::from_records(&[
        Record {
            age: 25,
            smoking: Smoking::No,
            asthma: 0,
        },
        Record {
            age: 30,
            smoking: Smoking::Yes,
            asthma: 1,
        },
        Record {
            age: 35,
            smoking: Smoking::No,
            asthma: 0,
        },
        Record {
            age: 40,
            smoking: Smoking::Yes,
            asthma: 1,
        },
        Record {
            age: 45,
            smoking: Smoking::No,
            asthma: 0,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_five_complete_rows() {
        let records = sample_records();
        assert_eq!(records.len(), 5);
        assert_eq!(records.column_names(), vec!["Age", "Smoking", "Asthma"]);
        assert_eq!(records.ages(), &[25, 30, 35, 40, 45]);
        assert_eq!(records.asthma(), Some(&[0, 1, 0, 1, 0][..]));
        let rows: Vec<Record> = records.rows().unwrap().collect();
        assert_eq!(rows[1].smoking, Smoking::Yes);
        assert!(rows.iter().all(|row| row.asthma <= 1));
    }

    #[test]
    fn empty_set_reports_empty() {
        assert!(RecordSet::from_records(&[]).is_empty());
        assert!(!sample_records().is_empty());
    }

    #[test]
    fn dropping_label_hides_column_and_rows() {
        let records = sample_records().without_label();
        assert!(!records.has_column(LABEL_COLUMN));
        assert!(records.has_column(SMOKING_COLUMN));
        assert!(records.rows().is_none());
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn nonzero_labels_collapse_to_one() {
        let records = RecordSet::from_records(&[Record {
            age: 50,
            smoking: Smoking::Yes,
            asthma: 7,
        }]);
        assert_eq!(records.asthma(), Some(&[1][..]));
    }
}
