pub mod indicators;
pub mod join;
pub mod zone_filter;

use kpi_client::domain::{ContractRecord, PowerBand};

/// Residential contracts carry client type id 0 in the source extract. The
/// KPI tables cover residential customers only.
pub const RESIDENTIAL_CLIENT_TYPE: i64 = 0;

/// A contract with its power band attached. The band is computed once, right
/// after the zone filter, and never recomputed downstream.
#[derive(Debug, Clone)]
pub struct ClassifiedContract {
    pub record: ContractRecord,
    pub band: PowerBand,
}

pub fn attach_power_bands(contracts: Vec<ContractRecord>) -> Vec<ClassifiedContract> {
    contracts
        .into_iter()
        .map(|record| {
            let band = PowerBand::classify(record.power_p1);
            ClassifiedContract { record, band }
        })
        .collect()
}

pub fn retain_residential(contracts: Vec<ClassifiedContract>) -> Vec<ClassifiedContract> {
    contracts
        .into_iter()
        .filter(|c| c.record.client_type_id == RESIDENTIAL_CLIENT_TYPE)
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use kpi_client::domain::{ContractRecord, PowerBand, WeatherRecord};
    use time::Date;

    use super::ClassifiedContract;

    pub fn contract(zipcode: &str, id: &str, power_p1: Option<f64>, has_solar: bool) -> ContractRecord {
        ContractRecord {
            zipcode: zipcode.to_string(),
            contract_id: id.to_string(),
            client_type_id: 0,
            power_p1,
            has_solar,
        }
    }

    pub fn classified(
        zipcode: &str,
        id: &str,
        power_p1: Option<f64>,
        has_solar: bool,
    ) -> ClassifiedContract {
        let record = contract(zipcode, id, power_p1, has_solar);
        let band = PowerBand::classify(record.power_p1);
        ClassifiedContract { record, band }
    }

    pub fn weather(
        zipcode: &str,
        date: Option<Date>,
        temperature: Option<f64>,
        relative_humidity: Option<f64>,
    ) -> WeatherRecord {
        WeatherRecord {
            zipcode: zipcode.to_string(),
            date,
            temperature,
            relative_humidity,
        }
    }
}
