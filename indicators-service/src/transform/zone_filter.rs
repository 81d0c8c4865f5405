use std::collections::{HashMap, HashSet};

use kpi_client::domain::ContractRecord;

/// A zone must have strictly more contract rows than this to take part in
/// the KPI tables.
pub const MIN_CONTRACTS_PER_ZONE: usize = 10;

/// Zone codes whose contract count exceeds the threshold. One O(n) pass, no
/// side effects; both input datasets are restricted to this set before the
/// join so it can never introduce zones outside the contract universe.
pub fn eligible_zones(contracts: &[ContractRecord]) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for c in contracts {
        *counts.entry(c.zipcode.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, n)| *n > MIN_CONTRACTS_PER_ZONE)
        .map(|(zone, _)| zone.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_support::contract;

    #[test]
    fn threshold_is_strictly_greater_than_ten() {
        let mut contracts = Vec::new();
        for i in 0..11 {
            contracts.push(contract("aaaaa", &format!("A-{i}"), Some(2000.0), false));
        }
        for i in 0..10 {
            contracts.push(contract("bbbbb", &format!("B-{i}"), Some(2000.0), false));
        }

        let zones = eligible_zones(&contracts);
        assert!(zones.contains("aaaaa"));
        assert!(!zones.contains("bbbbb"));
        assert_eq!(zones.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_zones() {
        assert!(eligible_zones(&[]).is_empty());
    }
}
