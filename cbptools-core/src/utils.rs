use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::errors::BoundsError;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> std::io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Lines that carry no records in bed-like files: `#` comments and UCSC `track`/`browser` lines.
pub fn is_header_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

///
/// Read a two column `name<ws>length` file into a map. Works for `.chrom.sizes`
/// files as well as FASTA `.fai` indexes, whose first two columns are the same.
///
pub fn get_chrom_sizes<T: AsRef<Path>>(path: T) -> Result<HashMap<String, u64>> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)
        .with_context(|| format!("Failed to open chrom sizes file: {:?}", path))?;

    let mut chrom_sizes: HashMap<String, u64> = HashMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Error reading line {} of {:?}", index + 1, path))?;
        if line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(name), Some(size)) = (parts.next(), parts.next()) else {
            anyhow::bail!(
                "Invalid chrom sizes line {} in {:?}: {:?}",
                index + 1,
                path,
                line
            );
        };

        let size = size.parse::<u64>().with_context(|| {
            format!("Error parsing chromosome length {:?} in {:?}", size, path)
        })?;

        chrom_sizes.insert(name.to_string(), size);
    }

    Ok(chrom_sizes)
}

///
/// Validate that `[start, end)` lies inside a chromosome of length `chrom_len`,
/// returning the coordinates as unsigned offsets.
///
pub fn check_bounds(
    chrom: &str,
    start: i64,
    end: i64,
    chrom_len: u64,
) -> Result<(u64, u64), BoundsError> {
    if start < 0 || end < start || end as u64 > chrom_len {
        return Err(BoundsError::OutOfBounds {
            chrom: chrom.to_string(),
            start,
            end,
            chrom_len,
        });
    }
    Ok((start as u64, end as u64))
}
