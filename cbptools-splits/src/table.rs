use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use cbptools_core::models::Locus;
use cbptools_core::utils::get_dynamic_reader;

use crate::consts::{N_FOLDS, SPLITS_HEADER};
use crate::errors::{Result, SplitsError};
use crate::folds::{FoldAssignment, FoldLabel};
use crate::group::RegionGroup;

#[derive(Debug, Clone, PartialEq)]
pub struct SplitsRow {
    pub locus: Locus,
    pub assignment: FoldAssignment,
}

impl SplitsRow {
    pub fn as_string(&self) -> String {
        let labels: Vec<String> = self
            .assignment
            .labels
            .iter()
            .map(|l| l.to_string())
            .collect();
        format!("{}\t{}\t{}", self.locus.chr, self.locus.pos, labels.join("\t"))
    }
}

/// Count of regions per label in one fold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldSummary {
    pub train: usize,
    pub valid: usize,
    pub test: usize,
}

///
/// One row per region, with that region's label in every fold.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitsTable {
    pub rows: Vec<SplitsRow>,
}

impl SplitsTable {
    ///
    /// Expand ranked groups back into per-locus rows. Groups are emitted in the order
    /// given, loci in their in-group order.
    ///
    pub fn build(groups: &[RegionGroup], assignments: &[FoldAssignment]) -> Self {
        let rows = groups
            .iter()
            .zip(assignments.iter())
            .flat_map(|(group, assignment)| {
                group.loci.iter().map(move |locus| SplitsRow {
                    locus: locus.clone(),
                    assignment: *assignment,
                })
            })
            .collect();

        SplitsTable { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_tsv(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", SPLITS_HEADER.join("\t"))?;
        for row in &self.rows {
            writeln!(writer, "{}", row.as_string())?;
        }
        writer.flush()?;

        Ok(())
    }

    ///
    /// Read a splits table back from disk. The header line is required.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let path_str = path.display().to_string();
        let parse_error = |line: usize, reason: String| SplitsError::TableParseError {
            path: path_str.clone(),
            line,
            reason,
        };

        let mut lines = reader.lines();
        match lines.next() {
            Some(header) => {
                let header = header?;
                let expected = SPLITS_HEADER.join("\t");
                if header.trim_end() != expected {
                    return Err(parse_error(1, format!("expected header {:?}", expected)));
                }
            }
            None => return Err(parse_error(1, String::from("missing header"))),
        }

        let mut rows = Vec::new();
        for (i, line) in lines.enumerate() {
            let line_no = i + 2;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != SPLITS_HEADER.len() {
                return Err(parse_error(
                    line_no,
                    format!(
                        "expected {} columns, found {}",
                        SPLITS_HEADER.len(),
                        fields.len()
                    ),
                ));
            }

            let pos = fields[1]
                .parse::<u64>()
                .map_err(|_| parse_error(line_no, format!("invalid position {:?}", fields[1])))?;

            let mut labels = [FoldLabel::Train; N_FOLDS];
            for (fold, field) in fields[2..].iter().enumerate() {
                labels[fold] = FoldLabel::from_str(field)?;
            }

            rows.push(SplitsRow {
                locus: Locus::new(fields[0], pos),
                assignment: FoldAssignment { labels },
            });
        }

        Ok(SplitsTable { rows })
    }

    ///
    /// Number of train, valid and test regions in each fold.
    ///
    pub fn fold_summary(&self) -> [FoldSummary; N_FOLDS] {
        let mut summary = [FoldSummary::default(); N_FOLDS];
        for row in &self.rows {
            for (fold, label) in row.assignment.labels.iter().enumerate() {
                match label {
                    FoldLabel::Train => summary[fold].train += 1,
                    FoldLabel::Valid => summary[fold].valid += 1,
                    FoldLabel::Test => summary[fold].test += 1,
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn table() -> SplitsTable {
        let groups = vec![
            RegionGroup {
                loci: vec![Locus::new("chr2", 700), Locus::new("chr2", 900)],
            },
            RegionGroup {
                loci: vec![Locus::new("chr1", 100)],
            },
        ];
        let assignments = vec![
            FoldAssignment::held_out(3, FoldLabel::Valid),
            FoldAssignment::held_out(0, FoldLabel::Test),
        ];
        SplitsTable::build(&groups, &assignments)
    }

    #[rstest]
    fn test_build_expands_groups_in_order(table: SplitsTable) {
        let loci: Vec<Locus> = table.rows.iter().map(|r| r.locus.clone()).collect();
        assert_eq!(
            loci,
            vec![
                Locus::new("chr2", 700),
                Locus::new("chr2", 900),
                Locus::new("chr1", 100)
            ]
        );
        assert_eq!(table.rows[0].assignment, table.rows[1].assignment);
    }

    #[rstest]
    fn test_row_as_string(table: SplitsTable) {
        assert_eq!(
            table.rows[2].as_string(),
            "chr1\t100\ttest\ttrain\ttrain\ttrain\ttrain"
        );
    }

    #[rstest]
    fn test_write_and_read_back(table: SplitsTable) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.splits.tsv");

        table.write_tsv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let first = contents.lines().next().unwrap();
        assert_eq!(first, "chr\tpos\tfold0\tfold1\tfold2\tfold3\tfold4");
        assert_eq!(contents.lines().count(), 4);

        let read = SplitsTable::from_file(&path).unwrap();
        assert_eq!(read, table);
    }

    #[rstest]
    fn test_fold_summary(table: SplitsTable) {
        let summary = table.fold_summary();

        assert_eq!(
            summary[0],
            FoldSummary {
                train: 2,
                valid: 0,
                test: 1
            }
        );
        assert_eq!(
            summary[3],
            FoldSummary {
                train: 1,
                valid: 2,
                test: 0
            }
        );
        assert_eq!(
            summary[1],
            FoldSummary {
                train: 3,
                valid: 0,
                test: 0
            }
        );
    }

    #[rstest]
    #[case("chr\tpos\tfold0\tfold1\tfold2\tfold3\tfold4\nchr1\tx\ttrain\ttrain\ttrain\ttrain\tvalid\n")]
    #[case("chr\tpos\tfold0\tfold1\tfold2\tfold3\tfold4\nchr1\t5\ttrain\ttrain\n")]
    #[case("chr\tpos\tfold0\nchr1\t5\ttrain\n")]
    #[case("chr\tpos\tfold0\tfold1\tfold2\tfold3\tfold4\nchr1\t5\ttrain\ttrain\ttrain\ttrain\tholdout\n")]
    fn test_from_file_rejects_malformed(#[case] contents: &str) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("bad.splits.tsv");
        std::fs::write(&path, contents).unwrap();

        assert!(SplitsTable::from_file(&path).is_err());
    }

    #[rstest]
    fn test_from_file_reports_line_number() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("bad.splits.tsv");
        std::fs::write(
            &path,
            "chr\tpos\tfold0\tfold1\tfold2\tfold3\tfold4\nchr1\t5\ttrain\ttrain\ttrain\ttrain\tvalid\nchr1\t-1\ttrain\ttrain\ttrain\ttrain\tvalid\n",
        )
        .unwrap();

        let result = SplitsTable::from_file(&path);
        assert!(matches!(
            result,
            Err(SplitsError::TableParseError { line: 3, .. })
        ));
    }
}
