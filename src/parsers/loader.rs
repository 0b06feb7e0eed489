use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    network::Network,
    parsers::{
        ParseError,
        records::{parse_connection_line, parse_device_line},
    },
    topology::ConnectionOutcome,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read line {line}: {source}")]
    Read { line: usize, source: std::io::Error },
}

/// A record that was skipped, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub line: usize,
    pub error: ParseError,
}

/// Outcome of loading one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Well-formed records handed to the network.
    pub accepted: usize,
    /// Well-formed connections the network refused because an endpoint is unknown.
    pub refused: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    fn skip(&mut self, network: &Network, line: usize, error: ParseError) {
        network
            .diagnostics()
            .warning(&format!("Skipping line {}: {}", line, error));
        self.skipped.push(SkippedRecord { line, error });
    }
}

/// Adds every device described by `reader` to the network. Malformed lines are skipped.
pub fn load_devices<R: BufRead>(
    reader: R,
    network: &mut Network,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| LoadError::Read { line: line_no, source })?;
        match parse_device_line(&line) {
            Ok(Some(device)) => {
                network.add_device(device);
                report.accepted += 1;
            }
            Ok(None) => {}
            Err(error) => report.skip(network, line_no, error),
        }
    }
    Ok(report)
}

/// Adds every connection described by `reader`. Both endpoints must already be loaded.
pub fn load_connections<R: BufRead>(
    reader: R,
    network: &mut Network,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| LoadError::Read { line: line_no, source })?;
        match parse_connection_line(&line) {
            Ok(Some((a, b))) => {
                report.accepted += 1;
                if let ConnectionOutcome::MissingEndpoint { .. } = network.add_connection(&a, &b) {
                    report.refused += 1;
                }
            }
            Ok(None) => {}
            Err(error) => report.skip(network, line_no, error),
        }
    }
    Ok(report)
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })
}

pub fn load_devices_file(path: &Path, network: &mut Network) -> Result<LoadReport, LoadError> {
    load_devices(open(path)?, network)
}

pub fn load_connections_file(path: &Path, network: &mut Network) -> Result<LoadReport, LoadError> {
    load_connections(open(path)?, network)
}
