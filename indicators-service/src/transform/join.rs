use std::collections::HashMap;

use kpi_client::domain::WeatherRecord;

use super::ClassifiedContract;

/// One row of the weather-to-contract left join. A weather row with no
/// matching contract appears exactly once with `contract` absent.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRecord<'a> {
    pub weather: &'a WeatherRecord,
    pub contract: Option<&'a ClassifiedContract>,
}

/// Left outer hash-join on the normalized zone code: every weather row
/// appears once per matching contract, or once on its own when nothing
/// matches. Output order is unspecified beyond grouping by key; the
/// aggregator re-groups anyway.
pub fn left_join_weather<'a>(
    weather: &'a [WeatherRecord],
    contracts: &'a [ClassifiedContract],
) -> Vec<JoinedRecord<'a>> {
    let mut by_zone: HashMap<&str, Vec<&ClassifiedContract>> = HashMap::new();
    for c in contracts {
        by_zone.entry(c.record.zipcode.as_str()).or_default().push(c);
    }

    let mut out = Vec::new();
    for w in weather {
        match by_zone.get(w.zipcode.as_str()) {
            Some(matches) => out.extend(matches.iter().map(|&c| JoinedRecord {
                weather: w,
                contract: Some(c),
            })),
            None => out.push(JoinedRecord {
                weather: w,
                contract: None,
            }),
        }
    }
    out
}
