use crate::domain::model::{Frequency, ReportField, ReportRow};
use std::cmp::Ordering;

/// Orders rows by gene, then consequence, then a population frequency.
#[derive(Debug, Clone, Copy)]
pub struct Sorter {
    frequency_field: ReportField,
}

impl Default for Sorter {
    fn default() -> Self {
        Self {
            frequency_field: ReportField::ExacTot,
        }
    }
}

impl Sorter {
    pub fn new(frequency_field: ReportField) -> Self {
        Self { frequency_field }
    }

    fn frequency<'a>(&self, row: &'a ReportRow) -> &'a Frequency {
        static MISSING: Frequency = Frequency::NotAvailable;
        row.frequency(self.frequency_field).unwrap_or(&MISSING)
    }

    pub fn compare(&self, a: &ReportRow, b: &ReportRow) -> Ordering {
        a.get(ReportField::Gene)
            .cmp(b.get(ReportField::Gene))
            .then_with(|| a.get(ReportField::Consequence).cmp(b.get(ReportField::Consequence)))
            .then_with(|| self.frequency(a).sort_cmp(self.frequency(b)))
    }

    /// Stable: rows with equal keys keep their input order.
    pub fn sort(&self, rows: &mut [ReportRow]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }
}
