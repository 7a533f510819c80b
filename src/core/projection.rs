use crate::core::annotate::DerivedLabel;
use crate::core::classify::IntronProximityClassifier;
use crate::domain::model::{ReportField, ReportRow, VariantRecord};
use crate::utils::error::{ReportError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Which columns a report has, what they are called, and which are left for
/// manual entry.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    renames: BTreeMap<ReportField, String>,
    blanked: BTreeSet<ReportField>,
    classification: ReportField,
}

impl FieldSpec {
    pub fn standard(label: &DerivedLabel) -> Self {
        let mut renames = BTreeMap::new();
        renames.insert(ReportField::InDbNoMutInd, label.label());

        let blanked = [
            ReportField::Igv,
            ReportField::AcmgCriteria,
            ReportField::Class,
            ReportField::ResultComment,
            ReportField::ControlComment,
            ReportField::VariantAssessment,
        ]
        .into_iter()
        .collect();

        Self {
            renames,
            blanked,
            classification: ReportField::Class,
        }
    }

    pub fn display_name(&self, field: ReportField) -> &str {
        self.renames
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.source_name())
    }

    /// Display names in [`ReportField::ALL`] order.
    pub fn header(&self) -> Vec<String> {
        ReportField::ALL
            .iter()
            .map(|f| self.display_name(*f).to_string())
            .collect()
    }

    pub fn is_blanked(&self, field: ReportField) -> bool {
        self.blanked.contains(&field)
    }

    pub fn classification_field(&self) -> ReportField {
        self.classification
    }
}

/// Turns raw records into report rows.
pub struct FieldProjector {
    spec: FieldSpec,
    classifier: IntronProximityClassifier,
    marker: String,
}

impl FieldProjector {
    pub fn new(spec: FieldSpec, classifier: IntronProximityClassifier, marker: impl Into<String>) -> Self {
        Self {
            spec,
            classifier,
            marker: marker.into(),
        }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// `record_number` is 1-based and only used in error messages.
    pub fn project(&self, record: &VariantRecord, record_number: usize) -> Result<ReportRow> {
        let lookup = |name: &str| {
            record.get(name).ok_or_else(|| ReportError::MissingField {
                field: name.to_string(),
                record: record_number,
            })
        };

        ReportRow::try_from_fields(|field| -> Result<String> {
            if field == self.spec.classification_field() {
                let hgvsc = lookup(ReportField::HgvsC.source_name())?;
                Ok(if self.classifier.is_deep_intronic(hgvsc) {
                    self.marker.clone()
                } else {
                    String::new()
                })
            } else if self.spec.is_blanked(field) {
                Ok(String::new())
            } else {
                Ok(lookup(field.source_name())?.to_string())
            }
        })
    }

    pub fn project_all(&self, records: &[VariantRecord]) -> Result<Vec<ReportRow>> {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| self.project(record, i + 1))
            .collect()
    }
}
