use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::consts::SNP_COLUMNS;
use crate::errors::RegionSetError;
use crate::models::SnpRecord;
use crate::utils::get_dynamic_reader;

///
/// The variants listed in a SNP file: `CHR POS0 REF ALT [META_DATA]`, no header.
///
/// Variant ids (`CHR_POS0_REF_ALT`) are unique within a set.
///
#[derive(Clone, Debug)]
pub struct SnpSet {
    pub snps: Vec<SnpRecord>,
    pub path: Option<PathBuf>,
}

impl SnpSet {
    ///
    /// Build a set from records, rejecting duplicate ids.
    ///
    pub fn new(snps: Vec<SnpRecord>) -> Result<Self, RegionSetError> {
        let mut seen = HashSet::with_capacity(snps.len());
        for (i, snp) in snps.iter().enumerate() {
            if !seen.insert(snp.id()) {
                return Err(RegionSetError::DuplicateVariant {
                    path: String::from("<memory>"),
                    line: i + 1,
                    id: snp.id(),
                });
            }
        }
        Ok(SnpSet { snps, path: None })
    }

    pub fn len(&self) -> usize {
        self.snps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SnpRecord> {
        self.snps.iter()
    }
}

impl TryFrom<&Path> for SnpSet {
    type Error = RegionSetError;

    fn try_from(value: &Path) -> Result<Self, RegionSetError> {
        let path = value;
        if !path.is_file() {
            return Err(RegionSetError::FileReadError(path.display().to_string()));
        }

        let reader = get_dynamic_reader(path)?;

        let mut snps: Vec<SnpRecord> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = line_index + 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < SNP_COLUMNS - 1 || parts.len() > SNP_COLUMNS {
                return Err(RegionSetError::ColumnCount {
                    path: path.display().to_string(),
                    line: line_number,
                    expected: SNP_COLUMNS,
                    found: parts.len(),
                });
            }

            let pos0: u64 =
                parts[1]
                    .trim()
                    .parse()
                    .map_err(|_| RegionSetError::FieldParseError {
                        path: path.display().to_string(),
                        line: line_number,
                        field: "POS0",
                        value: parts[1].to_string(),
                    })?;

            let snp = SnpRecord {
                chr: parts[0].to_string(),
                pos0,
                ref_allele: parts[2].trim().to_string(),
                alt_allele: parts[3].trim().to_string(),
                meta_data: parts.get(4).map(|s| s.to_string()).unwrap_or_default(),
            };

            let id = snp.id();
            if seen.contains(&id) {
                return Err(RegionSetError::DuplicateVariant {
                    path: path.display().to_string(),
                    line: line_number,
                    id,
                });
            }
            seen.insert(id);
            snps.push(snp);
        }

        if snps.is_empty() {
            return Err(RegionSetError::EmptyRegionSet(path.display().to_string()));
        }

        Ok(SnpSet {
            snps,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for SnpSet {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self, RegionSetError> {
        SnpSet::try_from(Path::new(value))
    }
}

impl<'a> IntoIterator for &'a SnpSet {
    type Item = &'a SnpRecord;
    type IntoIter = std::slice::Iter<'a, SnpRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.snps.iter()
    }
}
