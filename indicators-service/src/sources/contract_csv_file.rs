use std::{fs::File, io::Read, path::PathBuf};

use csv::StringRecord;
use kpi_client::domain::{normalize_zone, ContractRecord};

use crate::pipeline::PipelineError;
use crate::sources::{field, parse_optional_f64};

/// CSV source for contract records.
///
/// Expected header columns (by name, case-insensitive):
/// - zipcode
/// - contract_id
/// - client_type_id (integer)
/// - power_p1 (numeric; empty or unparseable values coerce to none and land
///   in the Unknown band)
/// - has_solar (0/1)
pub struct ContractCsvFileSource {
    path: PathBuf,
    separator: char,
}

impl ContractCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, separator: char) -> Self {
        Self {
            path: path.into(),
            separator,
        }
    }

    pub fn load(&self) -> Result<Vec<ContractRecord>, PipelineError> {
        let file = File::open(&self.path).map_err(|e| {
            PipelineError::Source(format!("failed to open {}: {e}", self.path.display()))
        })?;
        read_contracts(file, self.separator)
    }
}

fn read_contracts<R: Read>(reader: R, separator: char) -> Result<Vec<ContractRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(separator as u8)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| PipelineError::Source(format!("failed to read CSV headers: {e}")))?
        .clone();

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result
            .map_err(|e| PipelineError::Source(format!("failed to read CSV record: {e}")))?;
        out.push(record_to_contract(&record, &headers)?);
    }
    Ok(out)
}

fn record_to_contract(
    record: &StringRecord,
    headers: &StringRecord,
) -> Result<ContractRecord, PipelineError> {
    let zipcode = normalize_zone(field(record, headers, "zipcode")?);

    let contract_id = field(record, headers, "contract_id")?.trim().to_string();

    let client_type_str = field(record, headers, "client_type_id")?;
    let client_type_id: i64 = client_type_str.trim().parse().map_err(|e| {
        PipelineError::Source(format!("invalid client_type_id '{client_type_str}': {e}"))
    })?;

    let power_p1 = parse_optional_f64(field(record, headers, "power_p1")?);

    let solar_str = field(record, headers, "has_solar")?;
    let has_solar = match solar_str.trim() {
        "0" => false,
        "1" => true,
        other => {
            return Err(PipelineError::Source(format!(
                "invalid has_solar '{other}', expected 0 or 1"
            )))
        }
    };

    Ok(ContractRecord {
        zipcode,
        contract_id,
        client_type_id,
        power_p1,
        has_solar,
    })
}
