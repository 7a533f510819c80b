use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sentinel used by the annotation step for values it could not look up.
pub const NOT_AVAILABLE: &str = "N/A";

/// One raw annotated variant-transcript combination.
///
/// Fields keep the order they had in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantRecord {
    fields: Vec<(String, String)>,
}

impl VariantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an existing value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariantRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = VariantRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

macro_rules! report_fields {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// The report columns, declared in output order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ReportField {
            $($variant),+
        }

        impl ReportField {
            pub const ALL: &'static [ReportField] = &[$(ReportField::$variant),+];

            /// Key of this column in a [`VariantRecord`].
            pub fn source_name(self) -> &'static str {
                match self {
                    $(ReportField::$variant => $name),+
                }
            }
        }
    };
}

report_fields! {
    Chr => "CHR",
    Pos => "POS",
    Ref => "REF",
    Alt => "ALT",
    Gene => "Gene",
    Inheritance => "Inheritance",
    HgvsC => "HGVSc",
    HgvsP => "HGVSp",
    Consequence => "Consequence",
    Igv => "IGV",
    AcmgCriteria => "ACMG kriterier",
    Class => "Klasse",
    ResultComment => "Resultatvurdering kommentar",
    ControlComment => "Kontroll kommentar",
    VariantAssessment => "Variantvurdering",
    Genotype => "Genotype",
    ExacUrl => "ExAC_URL",
    HgmdUrl => "HGMD_URL",
    AlamutColumn => "AlamutColumn",
    InDbAlleleFreq => "inDB_alleleFreq",
    InDbNoMutInd => "inDB_noMutInd",
    InDbIndications => "inDB_indications",
    SangerVerify => "sanger_verify",
    VcfFilter => "VCF_FILTER",
    VcfQual => "VCF_QUAL",
    VcfAlleleDepth => "VCF_AD_AlleleDepth",
    VcfDepth => "VCF_DP_depth",
    ExacTot => "ExAC_TOT",
    ExacNfe => "ExAC_NFE",
    ExacFin => "ExAC_FIN",
    ExacAfr => "ExAC_AFR",
    ExacAmr => "ExAC_AMR",
    ExacEas => "ExAC_EAS",
    ExacSas => "ExAC_SAS",
    ExacOth => "ExAC_OTH",
    ThousandGenomes => "1000g",
    InDbGenotypeFreq => "inDB_genotypeFreq",
    InDbNoTotal => "inDB_noTotal",
    InDbFilter => "inDB_filter",
    DbSnp => "dbSNP",
    RepeatMasker => "repeatMasker",
}

impl ReportField {
    /// Position of this column in a [`ReportRow`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Population-frequency columns get a normalized [`Frequency`] on every row.
    pub fn is_frequency(self) -> bool {
        matches!(
            self,
            ReportField::InDbAlleleFreq
                | ReportField::ExacTot
                | ReportField::ExacNfe
                | ReportField::ExacFin
                | ReportField::ExacAfr
                | ReportField::ExacAmr
                | ReportField::ExacEas
                | ReportField::ExacSas
                | ReportField::ExacOth
                | ReportField::ThousandGenomes
                | ReportField::InDbGenotypeFreq
        )
    }

    pub fn frequency_fields() -> impl Iterator<Item = ReportField> {
        ReportField::ALL.iter().copied().filter(|f| f.is_frequency())
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}

impl FromStr for ReportField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportField::ALL
            .iter()
            .copied()
            .find(|f| f.source_name() == s)
            .ok_or_else(|| format!("unknown report field '{}'", s))
    }
}

/// A population-frequency cell after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Frequency {
    Value(f64),
    NotAvailable,
    Unparsed(String),
}

impl Frequency {
    pub fn parse(raw: &str) -> Self {
        if raw == NOT_AVAILABLE {
            return Frequency::NotAvailable;
        }
        match raw.trim().parse::<f64>() {
            Ok(value) => Frequency::Value(value),
            Err(_) => Frequency::Unparsed(raw.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Frequency::Value(_) => 0,
            Frequency::NotAvailable => 1,
            Frequency::Unparsed(_) => 2,
        }
    }

    /// Numbers ascending, then `N/A`, then other text in lexical order.
    pub fn sort_cmp(&self, other: &Frequency) -> Ordering {
        match (self, other) {
            (Frequency::Value(a), Frequency::Value(b)) => a.total_cmp(b),
            (Frequency::Unparsed(a), Frequency::Unparsed(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// A report line: one value per [`ReportField`], in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    values: Vec<String>,
    frequencies: Vec<(ReportField, Frequency)>,
}

impl ReportRow {
    /// Builds a row by asking `cell` for each column in [`ReportField::ALL`]
    /// order. Stops at the first error.
    pub fn try_from_fields<E>(
        mut cell: impl FnMut(ReportField) -> Result<String, E>,
    ) -> Result<Self, E> {
        let values = ReportField::ALL
            .iter()
            .map(|&field| cell(field))
            .collect::<Result<Vec<_>, E>>()?;
        let frequencies = ReportField::frequency_fields()
            .map(|field| (field, Frequency::parse(&values[field.index()])))
            .collect();
        Ok(Self {
            values,
            frequencies,
        })
    }

    pub fn get(&self, field: ReportField) -> &str {
        &self.values[field.index()]
    }

    /// Normalized value of a population-frequency column, `None` for other columns.
    pub fn frequency(&self, field: ReportField) -> Option<&Frequency> {
        self.frequencies
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, freq)| freq)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// Rows that exceed a threshold are "common" and left out of the filtered set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriterion {
    pub field: ReportField,
    pub threshold: f64,
}

impl FilterCriterion {
    pub fn new(field: ReportField, threshold: f64) -> Self {
        Self { field, threshold }
    }
}

/// Result of the transform step, handed to the emitters.
#[derive(Debug, Clone)]
pub struct ReportSets {
    pub header: Vec<String>,
    pub all: Vec<ReportRow>,
    pub filtered: Vec<ReportRow>,
    pub count_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table_order() {
        assert_eq!(ReportField::ALL.len(), 41);
        assert_eq!(ReportField::ALL[0], ReportField::Chr);
        assert_eq!(ReportField::ALL[40], ReportField::RepeatMasker);
        for (i, field) in ReportField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_field_from_source_name() {
        assert_eq!("1000g".parse::<ReportField>(), Ok(ReportField::ThousandGenomes));
        assert_eq!("Klasse".parse::<ReportField>(), Ok(ReportField::Class));
        assert!("klasse".parse::<ReportField>().is_err());
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("0.06"), Frequency::Value(0.06));
        assert_eq!(Frequency::parse(" 1e-3 "), Frequency::Value(0.001));
        assert_eq!(Frequency::parse("N/A"), Frequency::NotAvailable);
        assert_eq!(
            Frequency::parse("abc"),
            Frequency::Unparsed("abc".to_string())
        );
        assert_eq!(Frequency::parse(""), Frequency::Unparsed(String::new()));
    }

    #[test]
    fn test_frequency_sort_places_text_after_numbers() {
        let mut values = vec![
            Frequency::Unparsed("x".to_string()),
            Frequency::NotAvailable,
            Frequency::Value(0.5),
            Frequency::Unparsed("a".to_string()),
            Frequency::Value(0.01),
        ];
        values.sort_by(Frequency::sort_cmp);
        assert_eq!(
            values,
            vec![
                Frequency::Value(0.01),
                Frequency::Value(0.5),
                Frequency::NotAvailable,
                Frequency::Unparsed("a".to_string()),
                Frequency::Unparsed("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_variant_record_keeps_insertion_order() {
        let mut record: VariantRecord = [("b", "1"), ("a", "2")].into_iter().collect();
        record.insert("b", "3");
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(record.get("b"), Some("3"));
        assert_eq!(record.get("c"), None);
    }

    #[test]
    fn test_row_has_one_value_per_field() {
        let row = ReportRow::try_from_fields(|field| Ok::<_, String>(field.source_name().to_string()))
            .unwrap();
        assert_eq!(row.values().count(), ReportField::ALL.len());
        assert_eq!(row.get(ReportField::Gene), "Gene");
        assert_eq!(row.frequency(ReportField::ExacTot), Some(&Frequency::Unparsed("ExAC_TOT".to_string())));

        let row = ReportRow::try_from_fields(|_| Ok::<_, String>("N/A".to_string())).unwrap();
        assert_eq!(row.frequency(ReportField::ExacTot), Some(&Frequency::NotAvailable));
        assert_eq!(row.frequency(ReportField::Gene), None);
    }
}
