//! Pulsar catalog parsing for ATNF-style semicolon tables
//!
//! Row 0 is a header. Each data row is decoded against a fixed column
//! layout; a row that fails to decode is reported and skipped, the rest of
//! the catalog stays usable.

use csv::{ReaderBuilder, StringRecord, Trim};
use pulsar_core::coordinates::{sexagesimal_to_cartesian, CartesianPosition, Sexagesimal};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CatalogError, CatalogResult};

/// Column layout of the ATNF export
pub mod columns {
    pub const NAME: usize = 1;
    pub const RIGHT_ASCENSION: usize = 2;
    pub const DECLINATION: usize = 3;
    pub const FREQUENCY: usize = 8;
    pub const DISTANCE: usize = 10;
    pub const SURFACE_FIELD: usize = 13;

    /// Rows with fewer columns cannot be decoded
    pub const MIN_COLUMNS: usize = SURFACE_FIELD + 1;
}

/// ATNF marker for a value that is not in the database
const MISSING_VALUE: &str = "*";

/// One decoded catalog row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub name: String,
    /// Line of the source text this record came from (1-based)
    pub line: u64,
    /// Right ascension [h:m:s]
    pub right_ascension: Sexagesimal,
    /// Declination [d:m:s]
    pub declination: Sexagesimal,
    /// Rotation frequency [Hz], 0 if unknown
    pub f0: f64,
    /// Distance to Earth [kpc], 0 if unknown
    pub distance_kpc: f64,
    /// Surface magnetic field [G], 0 if unknown
    pub bsurf: f64,
    /// Random Euler angles [deg] drawn at ingestion
    pub rotation_euler_deg: [f64; 3],
}

impl SourceRecord {
    /// Records without a known distance are parsed but never placed
    pub fn is_placed(&self) -> bool {
        self.distance_kpc > 0.0
    }

    /// Self-rotation axis: the normalized Euler vector, +Z if degenerate
    pub fn rotation_axis(&self) -> [f64; 3] {
        let [x, y, z] = self.rotation_euler_deg;
        let norm = (x * x + y * y + z * z).sqrt();
        if norm > 0.0 && norm.is_finite() {
            [x / norm, y / norm, z / norm]
        } else {
            [0.0, 0.0, 1.0]
        }
    }

    /// Position in world units, None when the distance is unknown
    pub fn to_cartesian(&self, world_units_per_kpc: f64) -> Option<CartesianPosition> {
        if !self.is_placed() {
            return None;
        }
        Some(sexagesimal_to_cartesian(
            &self.right_ascension,
            &self.declination,
            self.distance_kpc * world_units_per_kpc,
        ))
    }
}

/// Decoded catalog plus the rows that were rejected
#[derive(Debug, Default)]
pub struct PulsarCatalog {
    records: Vec<SourceRecord>,
    rejected: Vec<CatalogError>,
}

impl PulsarCatalog {
    /// Parse catalog text with a fresh parser
    pub fn parse<R: Rng>(text: &str, rng: &mut R) -> CatalogResult<Self> {
        CatalogParser::new().parse(text, rng)
    }

    /// Read and parse a catalog file
    pub fn load_from_path<R: Rng>(path: &Path, rng: &mut R) -> CatalogResult<Self> {
        tracing::info!("Loading pulsar catalog from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, rng)
    }

    /// Create from existing records
    pub fn from_records(records: Vec<SourceRecord>) -> Self {
        Self { records, rejected: Vec::new() }
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &SourceRecord> { self.records.iter() }
    pub fn records(&self) -> &[SourceRecord] { &self.records }

    /// Records with a known distance
    pub fn placed(&self) -> impl Iterator<Item = &SourceRecord> {
        self.records.iter().filter(|r| r.is_placed())
    }

    pub fn unplaced_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_placed()).count()
    }

    /// Rows that failed to decode
    pub fn rejected(&self) -> &[CatalogError] {
        &self.rejected
    }
}

/// Fixed-schema decoder for semicolon-delimited catalogs
#[derive(Clone, Debug)]
pub struct CatalogParser {
    delimiter: u8,
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl CatalogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every data row; fails only if no row survives
    pub fn parse<R: Rng>(&self, text: &str, rng: &mut R) -> CatalogResult<PulsarCatalog> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut catalog = PulsarCatalog::default();

        for result in reader.records() {
            let decoded = match result {
                Ok(row) if row.iter().all(str::is_empty) => continue,
                Ok(row) => decode_row(&row, rng),
                Err(err) => {
                    let line = err.position().map(|p| p.line()).unwrap_or(0);
                    Err(CatalogError::malformed(line, 0, err.to_string()))
                }
            };

            match decoded {
                Ok(record) => catalog.records.push(record),
                Err(err) => {
                    tracing::warn!("Skipping row: {}", err);
                    catalog.rejected.push(err);
                }
            }
        }

        if catalog.records.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        tracing::info!(
            "Parsed {} pulsars ({} without distance, {} rows rejected)",
            catalog.len(),
            catalog.unplaced_count(),
            catalog.rejected.len()
        );

        Ok(catalog)
    }
}

/// Decode one row against the fixed column layout
fn decode_row<R: Rng>(row: &StringRecord, rng: &mut R) -> CatalogResult<SourceRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    if row.len() < columns::MIN_COLUMNS {
        return Err(CatalogError::malformed(
            line,
            row.len(),
            format!("expected at least {} columns, found {}", columns::MIN_COLUMNS, row.len()),
        ));
    }
    let field = |column: usize| row.get(column).unwrap_or_default();

    let name = field(columns::NAME);
    if name.is_empty() {
        return Err(CatalogError::malformed(line, columns::NAME, "missing name"));
    }

    let sexagesimal = |column: usize| {
        Sexagesimal::parse(field(column))
            .map_err(|e| CatalogError::malformed(line, column, e.to_string()))
    };
    let right_ascension = sexagesimal(columns::RIGHT_ASCENSION)?;
    let declination = sexagesimal(columns::DECLINATION)?;

    let f0 = optional_number(field(columns::FREQUENCY), line, columns::FREQUENCY)?;
    let distance_kpc = optional_number(field(columns::DISTANCE), line, columns::DISTANCE)?;
    let bsurf = optional_number(field(columns::SURFACE_FIELD), line, columns::SURFACE_FIELD)?;

    let rotation_euler_deg = [
        rng.random_range(0.0..360.0),
        rng.random_range(0.0..360.0),
        rng.random_range(0.0..360.0),
    ];

    Ok(SourceRecord {
        name: name.to_string(),
        line,
        right_ascension,
        declination,
        f0,
        distance_kpc,
        bsurf,
        rotation_euler_deg,
    })
}

/// Empty or `*` means the value is not in the source and reads as 0
fn optional_number(text: &str, line: u64, column: usize) -> CatalogResult<f64> {
    if text.is_empty() || text == MISSING_VALUE {
        return Ok(0.0);
    }

    let value: f64 = text
        .parse()
        .map_err(|_| CatalogError::malformed(line, column, format!("'{}' is not a number", text)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::malformed(
            line,
            column,
            format!("'{}' is not a finite non-negative value", text),
        ));
    }

    Ok(value)
}
