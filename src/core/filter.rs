use crate::domain::model::{FilterCriterion, Frequency, ReportField, ReportRow};

/// Separates common variants from the rare ones worth interpreting.
#[derive(Debug, Clone)]
pub struct FrequencyFilter {
    criteria: Vec<FilterCriterion>,
}

impl Default for FrequencyFilter {
    fn default() -> Self {
        Self::new(vec![
            FilterCriterion::new(ReportField::InDbAlleleFreq, 0.05),
            FilterCriterion::new(ReportField::ExacTot, 0.01),
            FilterCriterion::new(ReportField::ThousandGenomes, 0.01),
        ])
    }
}

impl FrequencyFilter {
    pub fn new(criteria: Vec<FilterCriterion>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[FilterCriterion] {
        &self.criteria
    }

    fn exceeds(row: &ReportRow, criterion: &FilterCriterion) -> bool {
        match row.frequency(criterion.field) {
            Some(Frequency::Value(value)) => *value > criterion.threshold,
            Some(Frequency::NotAvailable) => false,
            Some(Frequency::Unparsed(raw)) => {
                tracing::debug!(
                    "Value {:?} is not a number for criterion {}",
                    raw,
                    criterion.field
                );
                false
            }
            None => {
                tracing::debug!("{} is not a frequency column, criterion ignored", criterion.field);
                false
            }
        }
    }

    /// True when the row exceeds any configured threshold.
    pub fn is_common(&self, row: &ReportRow) -> bool {
        // Every criterion is evaluated so each unparsable value gets logged.
        self.criteria
            .iter()
            .fold(false, |common, criterion| Self::exceeds(row, criterion) | common)
    }

    /// Rows that are rare across every frequency source, order preserved.
    pub fn rare(&self, rows: &[ReportRow]) -> Vec<ReportRow> {
        rows.iter()
            .filter(|row| !self.is_common(row))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ReportError;

    fn row_with(values: &[(ReportField, &str)]) -> ReportRow {
        let mut cells = vec!["N/A".to_string(); ReportField::ALL.len()];
        for (field, value) in values {
            cells[field.index()] = value.to_string();
        }
        ReportRow::try_from_fields(|field| Ok::<_, ReportError>(cells[field.index()].clone())).unwrap()
    }

    #[test]
    fn test_value_above_threshold_is_common() {
        let filter = FrequencyFilter::default();
        let row = row_with(&[(ReportField::InDbAlleleFreq, "0.06")]);
        assert!(filter.is_common(&row));
        assert!(filter.rare(&[row]).is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let filter = FrequencyFilter::default();
        let row = row_with(&[(ReportField::ExacTot, "0.01")]);
        assert!(!filter.is_common(&row));
    }

    #[test]
    fn test_not_available_is_rare() {
        let filter = FrequencyFilter::default();
        let row = row_with(&[]);
        assert!(!filter.is_common(&row));
        assert_eq!(filter.rare(&[row]).len(), 1);
    }

    #[test]
    fn test_garbage_does_not_pass() {
        let filter = FrequencyFilter::default();
        let row = row_with(&[
            (ReportField::InDbAlleleFreq, "high"),
            (ReportField::ExacTot, ""),
            (ReportField::ThousandGenomes, "0.5%"),
        ]);
        assert!(!filter.is_common(&row));
    }

    #[test]
    fn test_any_single_criterion_suffices() {
        let filter = FrequencyFilter::default();
        let row = row_with(&[
            (ReportField::InDbAlleleFreq, "0.0"),
            (ReportField::ExacTot, "garbage"),
            (ReportField::ThousandGenomes, "0.2"),
        ]);
        assert!(filter.is_common(&row));
    }

    #[test]
    fn test_rare_keeps_order() {
        let filter = FrequencyFilter::new(vec![FilterCriterion::new(ReportField::ExacTot, 0.1)]);
        let rows = vec![
            row_with(&[(ReportField::Gene, "A"), (ReportField::ExacTot, "0.01")]),
            row_with(&[(ReportField::Gene, "B"), (ReportField::ExacTot, "0.5")]),
            row_with(&[(ReportField::Gene, "C"), (ReportField::ExacTot, "0.02")]),
        ];
        let genes: Vec<String> = filter
            .rare(&rows)
            .iter()
            .map(|r| r.get(ReportField::Gene).to_string())
            .collect();
        assert_eq!(genes, vec!["A", "C"]);
    }
}
