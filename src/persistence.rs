// File: src/persistence.rs
use crate::core::charset::Charset;
use crate::core::frequency::{FrequencyProfile, FrequencyTable};
use crate::core::mapping::SubstitutionMap;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The serializable state of a workbench session: the alphabet in use and
/// whatever mapping has been built or recovered so far.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub charset: Charset,
    pub mapping: SubstitutionMap,
}

/// Saves session state atomically: serialize into a temp file next to the
/// target, then persist over it.
pub fn save_session(state: &SessionState, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, state)?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn load_session(path: &Path) -> Result<SessionState> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}

/// Writes a map file with every charset symbol and an empty value, ready to
/// be filled in by hand.
pub fn write_blank_map(charset: &Charset, path: &Path) -> Result<()> {
    let mapping = SubstitutionMap::blank();
    write_mapping(charset, &mapping, path)
}

/// Writes a mapping in the `<cipher>:<plain>` line format, one line per
/// charset symbol in charset order; unmapped symbols get an empty value so
/// the file re-reads as the same partial map. Atomic like `save_session`.
pub fn write_mapping(charset: &Charset, mapping: &SubstitutionMap, path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    for sym in charset.iter() {
        match mapping.get(sym) {
            Some(image) => writeln!(writer, "{}:{}", sym, image)?,
            None => writeln!(writer, "{}:", sym)?,
        }
    }
    writer.flush()?;
    drop(writer);
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Reads a map file. Deliberately lenient: lines without a separator and
/// lines with an empty value ("no mapping yet") are skipped, so a blank map
/// reads back as an empty mapping.
pub fn read_mapping(path: &Path) -> Result<SubstitutionMap> {
    let source = fs::read_to_string(path)?;
    let mut mapping = SubstitutionMap::blank();
    for raw in source.lines() {
        let line = raw.trim_end();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (Some(cipher), Some(plain)) = (key.chars().next(), value.chars().next()) else {
            continue;
        };
        mapping.set(cipher, plain);
    }
    Ok(mapping)
}

/// Loads a reference frequency table from a `<symbol>:<probability>` file.
pub fn load_frequency_file(path: &Path) -> Result<FrequencyTable> {
    let source = fs::read_to_string(path)?;
    FrequencyProfile::load_reference(&source)
}
