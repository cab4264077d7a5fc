use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::consts::NARROWPEAK_COLUMNS;
use crate::errors::RegionSetError;
use crate::models::{Locus, Region};
use crate::utils::{get_dynamic_reader, is_header_line};

///
/// RegionSet struct, the in-memory representation of a narrowPeak file.
/// Regions are kept in file order.
///
#[derive(Clone, Debug)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub path: Option<PathBuf>,
}

pub struct RegionSetIterator<'a> {
    region_set: &'a RegionSet,
    index: usize,
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    field: &'static str,
    path: &Path,
    line: usize,
) -> Result<T, RegionSetError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| RegionSetError::FieldParseError {
            path: path.display().to_string(),
            line,
            field,
            value: value.to_string(),
        })
}

impl TryFrom<&Path> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Create a new [RegionSet] from a narrowPeak file.
    ///
    /// The file must have exactly ten tab-separated columns:
    /// `chr start end name score strand signalValue pValue qValue summit`.
    ///
    /// # Arguments:
    /// - value: path to the narrowPeak file on disk (optionally gzipped).
    fn try_from(value: &Path) -> Result<Self, RegionSetError> {
        let path = value;
        if !path.is_file() {
            return Err(RegionSetError::FileReadError(path.display().to_string()));
        }

        let reader = get_dynamic_reader(path)?;
        let mut regions: Vec<Region> = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if line.trim().is_empty() || is_header_line(&line) {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() != NARROWPEAK_COLUMNS {
                return Err(RegionSetError::ColumnCount {
                    path: path.display().to_string(),
                    line: line_number,
                    expected: NARROWPEAK_COLUMNS,
                    found: parts.len(),
                });
            }

            let start: u32 = parse_field(parts[1], "start", path, line_number)?;
            let end: u32 = parse_field(parts[2], "end", path, line_number)?;
            let summit: u32 = parse_field(parts[9], "summit", path, line_number)?;

            regions.push(Region {
                chr: parts[0].to_owned(),
                start,
                end,
                summit,
            });
        }

        if regions.is_empty() {
            return Err(RegionSetError::EmptyRegionSet(path.display().to_string()));
        }

        Ok(RegionSet {
            regions,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self, RegionSetError> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: String) -> Result<Self, RegionSetError> {
        RegionSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> Result<Self, RegionSetError> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            path: None,
        }
    }
}

impl<'a> Iterator for RegionSetIterator<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.region_set.regions.len() {
            let region = &self.region_set.regions[self.index];
            self.index += 1;
            Some(region)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = RegionSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        RegionSetIterator {
            region_set: self,
            index: 0,
        }
    }
}

impl RegionSet {
    ///
    /// Summit positions of every region, in file order
    ///
    pub fn loci(&self) -> Vec<Locus> {
        self.regions.iter().map(|r| r.locus()).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/regionset")
            .join(file_name)
    }

    #[rstest]
    fn test_open_narrowpeak() {
        let region_set = RegionSet::try_from(get_test_path("peaks.narrowPeak")).unwrap();

        assert_eq!(region_set.len(), 6);
        assert_eq!(region_set.regions[0].chr, "chr1");
        assert_eq!(region_set.regions[0].start, 1000);
        assert_eq!(region_set.regions[0].summit, 250);
        assert_eq!(region_set.loci()[0], Locus::new("chr1", 1250));
    }

    #[rstest]
    fn test_open_gzipped_narrowpeak() {
        let plain = RegionSet::try_from(get_test_path("peaks.narrowPeak")).unwrap();
        let gzipped = RegionSet::try_from(get_test_path("peaks.narrowPeak.gz")).unwrap();

        assert_eq!(plain.regions, gzipped.regions);
    }

    #[rstest]
    fn test_wrong_column_count_fails() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("bad.narrowPeak");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "chr1\t10\t20\t.\t0\t.\t0\t0\t0\t5").unwrap();
        writeln!(file, "chr1\t30\t40\t.\t0\t.\t0\t0\t0").unwrap();

        let result = RegionSet::try_from(path.as_path());
        match result {
            Err(RegionSetError::ColumnCount {
                line,
                expected,
                found,
                ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 10);
                assert_eq!(found, 9);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    #[case("chr1\tabc\t20\t.\t0\t.\t0\t0\t0\t5", "start")]
    #[case("chr1\t10\t2x\t.\t0\t.\t0\t0\t0\t5", "end")]
    #[case("chr1\t10\t20\t.\t0\t.\t0\t0\t0\t-1", "summit")]
    fn test_non_numeric_field_fails(#[case] line: &str, #[case] expected_field: &str) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("bad.narrowPeak");
        std::fs::write(&path, format!("{}\n", line)).unwrap();

        match RegionSet::try_from(path.as_path()) {
            Err(RegionSetError::FieldParseError { field, line, .. }) => {
                assert_eq!(field, expected_field);
                assert_eq!(line, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    fn test_empty_file_fails() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("empty.narrowPeak");
        std::fs::write(&path, "# only a comment\n").unwrap();

        assert!(matches!(
            RegionSet::try_from(path.as_path()),
            Err(RegionSetError::EmptyRegionSet(_))
        ));
    }

    #[rstest]
    fn test_missing_file_fails() {
        assert!(matches!(
            RegionSet::try_from("does/not/exist.narrowPeak"),
            Err(RegionSetError::FileReadError(_))
        ));
    }

    #[rstest]
    fn test_iterate_region_set() {
        let region_set = RegionSet::try_from(get_test_path("peaks.narrowPeak")).unwrap();
        assert_eq!(region_set.into_iter().count(), region_set.len());
    }
}
