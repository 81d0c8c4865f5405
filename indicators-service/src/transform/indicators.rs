use std::collections::{HashMap, HashSet};

use kpi_client::domain::{IndicatorRow, PowerBand};

use super::join::JoinedRecord;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    zipcode: String,
    year: Option<i32>,
    month: Option<i32>,
    band: PowerBand,
}

#[derive(Debug, Default)]
struct GroupStats<'a> {
    max_temperature: Option<f64>,
    min_temperature: Option<f64>,
    humidity_sum: f64,
    humidity_count: u64,
    contract_ids: HashSet<&'a str>,
}

impl<'a> GroupStats<'a> {
    fn observe(&mut self, row: &JoinedRecord<'a>) {
        if let Some(t) = row.weather.temperature {
            self.max_temperature = Some(self.max_temperature.map_or(t, |m| m.max(t)));
            self.min_temperature = Some(self.min_temperature.map_or(t, |m| m.min(t)));
        }
        if let Some(rh) = row.weather.relative_humidity {
            self.humidity_sum += rh;
            self.humidity_count += 1;
        }
        if let Some(c) = row.contract {
            self.contract_ids.insert(c.record.contract_id.as_str());
        }
    }

    /// Arithmetic mean over every joined row carrying a humidity value,
    /// join duplicates included.
    fn mean_humidity(&self) -> Option<f64> {
        (self.humidity_count > 0).then(|| self.humidity_sum / self.humidity_count as f64)
    }
}

/// Build one KPI table for the requested solar status.
///
/// Rows with no contract match carry no solar flag and belong to neither
/// table. Weather dates that failed to parse group under a null year/month
/// key rather than raising. Measures with no observations in a group stay
/// null; `n` counts distinct contract identifiers.
pub fn indicators_table(joined: &[JoinedRecord<'_>], has_solar: bool) -> Vec<IndicatorRow> {
    let mut groups: HashMap<GroupKey, GroupStats> = HashMap::new();

    for row in joined {
        let Some(contract) = row.contract else {
            continue;
        };
        if contract.record.has_solar != has_solar {
            continue;
        }

        let key = GroupKey {
            zipcode: row.weather.zipcode.clone(),
            year: row.weather.date.map(|d| d.year()),
            month: row.weather.date.map(|d| i32::from(u8::from(d.month()))),
            band: contract.band,
        };
        groups.entry(key).or_default().observe(row);
    }

    let mut rows: Vec<IndicatorRow> = groups
        .into_iter()
        .map(|(key, stats)| IndicatorRow {
            zipcode: key.zipcode,
            year: key.year,
            month: key.month,
            power_category: key.band.to_string(),
            max_temperature: stats.max_temperature.map(two_decimals),
            min_temperature: stats.min_temperature.map(two_decimals),
            avg_relative_humidity: stats.mean_humidity().map(two_decimals),
            n: stats.contract_ids.len() as i64,
        })
        .collect();

    // No ordering is promised downstream; sorting keeps runs reproducible.
    rows.sort_by(|a, b| {
        (&a.zipcode, a.year, a.month, &a.power_category)
            .cmp(&(&b.zipcode, b.year, b.month, &b.power_category))
    });
    rows
}

/// The persisted measure columns are text with two-decimal fixed-point form.
fn two_decimals(v: f64) -> String {
    format!("{v:.2}")
}
