use crate::domain::model::ReportRow;
use crate::domain::ports::{SpreadsheetReport, SpreadsheetWriter};
use crate::utils::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Columns left of the split stay visible while scrolling sideways.
const FROZEN_COLUMNS: usize = 6;

pub const ALL_SHEET: &str = "All variants";
pub const FILTERED_SHEET: &str = "Filtered variants";
pub const VERSION_SHEET: &str = "Version";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

/// Spreadsheet column letters: 0 -> A, 25 -> Z, 26 -> AA.
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

fn as_number(value: &str) -> Option<f64> {
    if value.is_empty() || value != value.trim() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

struct Sheet {
    name: &'static str,
    selected: bool,
    frozen_rows: Option<usize>,
    rows: usize,
    data: String,
}

impl Sheet {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            selected: false,
            frozen_rows: None,
            rows: 0,
            data: String::new(),
        }
    }

    fn push_row<'a>(&mut self, cells: impl IntoIterator<Item = &'a str>) {
        self.rows += 1;
        let r = self.rows;
        self.data.push_str(&format!(r#"<row r="{}">"#, r));
        for (col, value) in cells.into_iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{}", column_name(col), r);
            match as_number(value) {
                Some(_) => {
                    self.data
                        .push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value));
                }
                None => self.data.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    cell_ref,
                    escape(value)
                )),
            }
        }
        self.data.push_str("</row>");
    }

    fn push_table(&mut self, header: &[String], rows: &[ReportRow]) {
        self.push_row(header.iter().map(String::as_str));
        self.frozen_rows = Some(self.rows);
        for row in rows {
            self.push_row(row.values());
        }
    }

    fn to_xml(&self) -> String {
        let selected = if self.selected { r#" tabSelected="1""# } else { "" };
        let pane = match self.frozen_rows {
            Some(rows) => format!(
                r#"<pane xSplit="{cols}" ySplit="{rows}" topLeftCell="{cell}" activePane="bottomRight" state="frozen"/>"#,
                cols = FROZEN_COLUMNS,
                rows = rows,
                cell = format!("{}{}", column_name(FROZEN_COLUMNS), rows + 1),
            ),
            None => String::new(),
        };
        format!(
            r#"{XML_DECL}<worksheet xmlns="{MAIN_NS}"><sheetViews><sheetView workbookViewId="0"{selected}>{pane}</sheetView></sheetViews><sheetData>{data}</sheetData></worksheet>"#,
            data = self.data
        )
    }
}

/// Writes an unstyled `.xlsx` workbook: all variants, filtered variants and
/// a version sheet.
#[derive(Debug, Clone, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    fn sheets(report: &SpreadsheetReport<'_>) -> Vec<Sheet> {
        let mut all = Sheet::new(ALL_SHEET);
        all.push_table(report.header, report.all);

        let mut filtered = Sheet::new(FILTERED_SHEET);
        filtered.selected = true;
        if let Some(label) = report.header_label {
            filtered.push_row([label]);
        }
        filtered.push_table(report.header, report.filtered);

        let mut version = Sheet::new(VERSION_SHEET);
        let generated = chrono::Utc::now().to_rfc3339();
        let all_count = report.all.len().to_string();
        let filtered_count = report.filtered.len().to_string();
        version.push_row(["Generator", env!("CARGO_PKG_NAME")]);
        version.push_row(["Version", env!("CARGO_PKG_VERSION")]);
        version.push_row(["Generated", generated.as_str()]);
        version.push_row([ALL_SHEET, all_count.as_str()]);
        version.push_row([FILTERED_SHEET, filtered_count.as_str()]);

        vec![all, filtered, version]
    }

    fn workbook_xml(sheets: &[Sheet]) -> String {
        let active = sheets.iter().position(|s| s.selected).unwrap_or(0);
        let entries: String = sheets
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    escape(s.name),
                    i + 1,
                    i + 1
                )
            })
            .collect();
        format!(
            r#"{XML_DECL}<workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><bookViews><workbookView activeTab="{active}"/></bookViews><sheets>{entries}</sheets></workbook>"#
        )
    }

    fn workbook_rels_xml(sheets: &[Sheet]) -> String {
        let entries: String = (1..=sheets.len())
            .map(|i| {
                format!(
                    r#"<Relationship Id="rId{i}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{i}.xml"/>"#
                )
            })
            .collect();
        format!(r#"{XML_DECL}<Relationships xmlns="{PKG_REL_NS}">{entries}</Relationships>"#)
    }

    fn root_rels_xml() -> String {
        format!(
            r#"{XML_DECL}<Relationships xmlns="{PKG_REL_NS}"><Relationship Id="rId1" Type="{REL_NS}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#
        )
    }

    fn content_types_xml(sheets: &[Sheet]) -> String {
        let overrides: String = (1..=sheets.len())
            .map(|i| {
                format!(
                    r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
                )
            })
            .collect();
        format!(
            r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{overrides}</Types>"#
        )
    }

    pub fn write_to<W: Write + std::io::Seek>(&self, writer: W, report: &SpreadsheetReport<'_>) -> Result<W> {
        let sheets = Self::sheets(report);
        let options = SimpleFileOptions::default;
        let mut zip = ZipWriter::new(writer);

        zip.start_file("[Content_Types].xml", options())?;
        zip.write_all(Self::content_types_xml(&sheets).as_bytes())?;
        zip.start_file("_rels/.rels", options())?;
        zip.write_all(Self::root_rels_xml().as_bytes())?;
        zip.start_file("xl/workbook.xml", options())?;
        zip.write_all(Self::workbook_xml(&sheets).as_bytes())?;
        zip.start_file("xl/_rels/workbook.xml.rels", options())?;
        zip.write_all(Self::workbook_rels_xml(&sheets).as_bytes())?;
        for (i, sheet) in sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options())?;
            zip.write_all(sheet.to_xml().as_bytes())?;
        }

        Ok(zip.finish()?)
    }
}

impl SpreadsheetWriter for XlsxWriter {
    fn write(&self, path: &Path, report: &SpreadsheetReport<'_>) -> Result<()> {
        tracing::debug!(
            "Writing workbook {} ({} all, {} filtered)",
            path.display(),
            report.all.len(),
            report.filtered.len()
        );
        let mut file = self.write_to(File::create(path)?, report)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ReportField;
    use crate::utils::error::ReportError;
    use std::io::{Cursor, Read};

    fn row(gene: &str) -> ReportRow {
        let mut cells = vec![String::new(); ReportField::ALL.len()];
        cells[ReportField::Chr.index()] = "13".to_string();
        cells[ReportField::Gene.index()] = gene.to_string();
        ReportRow::try_from_fields(|field| Ok::<_, ReportError>(cells[field.index()].clone())).unwrap()
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(6), "G");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(40), "AO");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
        assert_eq!(escape("x\u{1}y"), "xy");
    }

    #[test]
    fn test_workbook_layout() {
        let header = vec!["CHR".to_string(), "Gene".to_string()];
        let all = vec![row("BRCA<2>"), row("TP53")];
        let filtered = vec![row("TP53")];
        let report = SpreadsheetReport {
            header: &header,
            all: &all,
            filtered: &filtered,
            header_label: Some("Exome"),
        };
        let bytes = XlsxWriter
            .write_to(Cursor::new(Vec::new()), &report)
            .unwrap()
            .into_inner();

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="All variants" sheetId="1" r:id="rId1"/>"#));
        assert!(workbook.contains(r#"activeTab="1""#));

        let all_sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(all_sheet.contains(r#"<c r="A2"><v>13</v></c>"#));
        assert!(all_sheet.contains("BRCA&lt;2&gt;"));
        assert!(all_sheet.contains(r#"ySplit="1" topLeftCell="G2""#));

        let filtered_sheet = read_part(&bytes, "xl/worksheets/sheet2.xml");
        assert!(filtered_sheet.contains(r#"tabSelected="1""#));
        assert!(filtered_sheet.contains(">Exome<"));
        assert!(filtered_sheet.contains(r#"ySplit="2""#));
        assert_eq!(filtered_sheet.matches("<row ").count(), 3);

        let version_sheet = read_part(&bytes, "xl/worksheets/sheet3.xml");
        assert!(version_sheet.contains(env!("CARGO_PKG_VERSION")));
    }
}
