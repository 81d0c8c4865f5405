use std::fmt;

/// Band boundaries for contracted power, in kW. Both bounds are inclusive on
/// the middle band.
pub const MIN_POWER_KW: f64 = 3000.0;
pub const MAX_POWER_KW: f64 = 5000.0;

/// One row of the contract extract. `power_p1` is `None` when the source
/// value was empty or unparseable; the band for such contracts is `Unknown`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractRecord {
    pub zipcode: String,
    pub contract_id: String,
    pub client_type_id: i64,
    pub power_p1: Option<f64>,
    pub has_solar: bool,
}

/// Contracted-power band. `Unknown` is a first-class grouping category, not
/// an error: a contract whose power could not be read still lands in exactly
/// one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerBand {
    Under,
    Between,
    Over,
    Unknown,
}

impl PowerBand {
    /// Total over every input: missing and non-finite power classifies as
    /// `Unknown` instead of falling through a comparison chain.
    pub fn classify(power_kw: Option<f64>) -> PowerBand {
        match power_kw {
            Some(v) if v.is_finite() => {
                if v < MIN_POWER_KW {
                    PowerBand::Under
                } else if v <= MAX_POWER_KW {
                    PowerBand::Between
                } else {
                    PowerBand::Over
                }
            }
            _ => PowerBand::Unknown,
        }
    }
}

impl fmt::Display for PowerBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // These labels are the persisted `power_category` values.
        match self {
            PowerBand::Under => write!(f, "Power under 3000 kW"),
            PowerBand::Between => write!(f, "Power between 3000 kW and 5000 kW"),
            PowerBand::Over => write!(f, "Power over 5000 kW"),
            PowerBand::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_boundary_inclusive_on_the_middle_band() {
        assert_eq!(PowerBand::classify(Some(2999.99)), PowerBand::Under);
        assert_eq!(PowerBand::classify(Some(3000.0)), PowerBand::Between);
        assert_eq!(PowerBand::classify(Some(4000.0)), PowerBand::Between);
        assert_eq!(PowerBand::classify(Some(5000.0)), PowerBand::Between);
        assert_eq!(PowerBand::classify(Some(5000.01)), PowerBand::Over);
    }

    #[test]
    fn classify_never_fails_on_missing_or_non_finite_power() {
        assert_eq!(PowerBand::classify(None), PowerBand::Unknown);
        assert_eq!(PowerBand::classify(Some(f64::NAN)), PowerBand::Unknown);
        assert_eq!(PowerBand::classify(Some(f64::INFINITY)), PowerBand::Unknown);
    }

    #[test]
    fn band_labels_match_the_persisted_categories() {
        assert_eq!(PowerBand::Under.to_string(), "Power under 3000 kW");
        assert_eq!(
            PowerBand::Between.to_string(),
            "Power between 3000 kW and 5000 kW"
        );
        assert_eq!(PowerBand::Over.to_string(), "Power over 5000 kW");
        assert_eq!(PowerBand::Unknown.to_string(), "Unknown");
    }
}
