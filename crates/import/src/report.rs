use gemgrade_core::Field;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::error::ImportError;
use crate::refine::RefinedRow;

/// Write refined rows as CSV: `id` followed by the seven field labels.
pub fn write_csv<W: Write>(out: W, rows: &[RefinedRow]) -> Result<(), ImportError> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["id"];
    header.extend(Field::ALL.iter().map(|f| f.label()));
    writer.write_record(&header)?;

    for row in rows {
        let mut line = vec![row.id.as_str()];
        line.extend(row.record.iter().map(|(_, v)| v));
        writer.write_record(&line)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write refined rows as a pretty JSON array of `{id, record}`.
pub fn write_json<W: Write>(out: W, rows: &[RefinedRow]) -> Result<(), ImportError> {
    serde_json::to_writer_pretty(out, rows)?;
    Ok(())
}

/// How many rows had each field determined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub blank_records: usize,
    pub determined: BTreeMap<Field, usize>,
}

impl BatchSummary {
    pub fn from_rows(rows: &[RefinedRow]) -> Self {
        let mut summary = BatchSummary {
            rows: rows.len(),
            determined: Field::ALL.iter().map(|f| (*f, 0)).collect(),
            ..Default::default()
        };
        for row in rows {
            if row.record.is_blank() {
                summary.blank_records += 1;
            }
            for (field, value) in row.record.iter() {
                if !value.is_empty() {
                    *summary.determined.entry(field).or_default() += 1;
                }
            }
        }
        summary
    }

    pub fn determined(&self, field: Field) -> usize {
        self.determined.get(&field).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemgrade_core::GradingRecord;

    fn refined(id: &str, result: &str, color: &str) -> RefinedRow {
        RefinedRow {
            id: id.into(),
            record: GradingRecord {
                result: result.into(),
                color: color.into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn csv_has_label_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[refined("A1", "E-", "F")]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,Result,Color,Blue UV,Brown,Yellow UV,Type,Fancy Yellow"
        );
        assert_eq!(lines.next().unwrap(), "A1,E-,F,,,,,");
        assert!(lines.next().is_none());
    }

    #[test]
    fn json_nests_record_labels() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[refined("7", "??", "")]).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v[0]["id"], "7");
        assert_eq!(v[0]["record"]["Result"], "??");
    }

    #[test]
    fn summary_counts() {
        let rows = vec![
            refined("1", "E", "F"),
            refined("2", "", ""),
            refined("3", "??", ""),
        ];
        let s = BatchSummary::from_rows(&rows);
        assert_eq!(s.rows, 3);
        assert_eq!(s.blank_records, 1);
        assert_eq!(s.determined(Field::Result), 2);
        assert_eq!(s.determined(Field::Color), 1);
        assert_eq!(s.determined(Field::Type), 0);
    }
}
