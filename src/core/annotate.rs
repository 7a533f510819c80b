use crate::domain::model::{ReportField, VariantRecord, NOT_AVAILABLE};

/// Column header for the mutation-count column, optionally carrying the
/// number of samples in the in-house database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedLabel {
    base: String,
    total: Option<i64>,
}

impl DerivedLabel {
    pub fn unannotated() -> Self {
        Self {
            base: ReportField::InDbNoMutInd.source_name().to_string(),
            total: None,
        }
    }

    pub fn with_total(total: i64) -> Self {
        Self {
            total: Some(total),
            ..Self::unannotated()
        }
    }

    pub fn total(&self) -> Option<i64> {
        self.total
    }

    pub fn label(&self) -> String {
        match self.total {
            Some(total) => format!("{} ({})", self.base, total),
            None => self.base.clone(),
        }
    }
}

/// Finds the sample total from the first record carrying an integer count.
pub struct CountAnnotator {
    count_field: ReportField,
}

impl Default for CountAnnotator {
    fn default() -> Self {
        Self {
            count_field: ReportField::InDbNoTotal,
        }
    }
}

impl CountAnnotator {
    pub fn new(count_field: ReportField) -> Self {
        Self { count_field }
    }

    pub fn annotate<'a, I>(&self, records: I) -> DerivedLabel
    where
        I: IntoIterator<Item = &'a VariantRecord>,
    {
        let name = self.count_field.source_name();
        for (i, record) in records.into_iter().enumerate() {
            let raw = record.get(name).unwrap_or(NOT_AVAILABLE);
            match raw.trim().parse::<i64>() {
                Ok(total) => {
                    tracing::debug!("Sample total {} taken from record {}", total, i + 1);
                    return DerivedLabel::with_total(total);
                }
                Err(_) => continue,
            }
        }
        tracing::debug!("No record has an integer '{}', keeping default label", name);
        DerivedLabel::unannotated()
    }
}
