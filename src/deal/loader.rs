//! Load deals and yearly SDE forecasts from disk
//!
//! A deal arrives as one JSON document matching the intake payload; an
//! explicit per-year SDE forecast can also be supplied as a two-column
//! CSV (`year,sde`).

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::Deal;
use crate::forecast::SdeForecast;
use crate::projection::DEFAULT_PROJECTION_YEARS;

/// Failure while reading deal input files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid deal JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid SDE CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw CSV row for a yearly SDE forecast
#[derive(Debug, serde::Deserialize)]
struct SdeRow {
    year: u32,
    sde: f64,
}

/// Load a deal from a JSON file
pub fn load_deal<P: AsRef<Path>>(path: P) -> Result<Deal, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let deal = load_deal_from_reader(file)?;
    info!(
        "loaded deal {} with {} funding sources",
        deal.name.as_deref().unwrap_or("(unnamed)"),
        deal.funding_sources.len()
    );
    Ok(deal)
}

/// Load a deal from any reader (e.g. a string buffer or request body)
pub fn load_deal_from_reader<R: Read>(reader: R) -> Result<Deal, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load an explicit per-year SDE forecast from a `year,sde` CSV file.
///
/// Rows land in their year slot over the standard horizon; missing years
/// stay at 0 and rows past the horizon are dropped.
pub fn load_yearly_sde<P: AsRef<Path>>(path: P) -> Result<SdeForecast, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_yearly_sde_from_reader(file)
}

/// Load a yearly SDE forecast from any reader
pub fn load_yearly_sde_from_reader<R: Read>(reader: R) -> Result<SdeForecast, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut yearly_amounts = vec![0.0; DEFAULT_PROJECTION_YEARS as usize];

    for result in csv_reader.deserialize() {
        let row: SdeRow = result?;
        if row.year >= 1 && row.year <= DEFAULT_PROJECTION_YEARS {
            yearly_amounts[(row.year - 1) as usize] = row.sde;
        }
    }

    Ok(SdeForecast::Yearly { yearly_amounts })
}
