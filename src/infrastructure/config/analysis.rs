//! Analysis parameter configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::analysis::AnalysisSettings;
use crate::domain::metrics::DEFAULT_LOW_INVENTORY_RATIO;
use crate::domain::peer::{DEFAULT_MAX_PEERS, DEFAULT_TOLERANCE};
use crate::domain::period::Period;
use crate::error::ConfigError;

/// Parameters of the peer comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Month whose revenue defines peers, as `YYYYMM`. Defaults to `202512`.
    #[serde(default = "default_reference_period")]
    pub reference_period: String,

    /// Relative revenue band around the target. Defaults to 0.2 (±20%).
    #[serde(default = "default_tolerance")]
    pub tolerance: Decimal,

    /// Peers kept after sorting by distance. Defaults to 5.
    #[serde(default = "default_max_peers")]
    pub max_peers: usize,

    /// A season is low on inventory below this fraction of the peer
    /// average. Defaults to 0.5.
    #[serde(default = "default_low_inventory_ratio")]
    pub low_inventory_ratio: Decimal,

    /// Fall back to substring matching of store names. Defaults to false.
    #[serde(default)]
    pub containment_fallback: bool,

    /// Brand whose competitor rank is reported. Defaults to `MLB`.
    #[serde(default = "default_own_brand")]
    pub own_brand: String,
}

fn default_reference_period() -> String {
    "202512".into()
}

fn default_tolerance() -> Decimal {
    DEFAULT_TOLERANCE
}

fn default_max_peers() -> usize {
    DEFAULT_MAX_PEERS
}

fn default_low_inventory_ratio() -> Decimal {
    DEFAULT_LOW_INVENTORY_RATIO
}

fn default_own_brand() -> String {
    "MLB".into()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reference_period: default_reference_period(),
            tolerance: default_tolerance(),
            max_peers: default_max_peers(),
            low_inventory_ratio: default_low_inventory_ratio(),
            containment_fallback: false,
            own_brand: default_own_brand(),
        }
    }
}

impl AnalysisConfig {
    /// Parsed reference period.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the token is not `YYYYMM`.
    pub fn period(&self) -> Result<Period, ConfigError> {
        Period::parse(&self.reference_period).map_err(|e| ConfigError::InvalidValue {
            field: "analysis.reference_period",
            reason: e.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an invalid period, a
    /// tolerance outside (0, 1), a ratio outside (0, 1], or a zero peer cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.period()?;
        if self.tolerance <= Decimal::ZERO || self.tolerance >= Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "analysis.tolerance",
                reason: "must be greater than 0 and less than 1".into(),
            });
        }
        if self.max_peers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_peers",
                reason: "must be at least 1".into(),
            });
        }
        if self.low_inventory_ratio <= Decimal::ZERO || self.low_inventory_ratio > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "analysis.low_inventory_ratio",
                reason: "must be greater than 0 and at most 1".into(),
            });
        }
        Ok(())
    }

    /// Settings for the analysis service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the period is invalid.
    pub fn to_settings(&self) -> Result<AnalysisSettings, ConfigError> {
        Ok(AnalysisSettings {
            reference_period: self.period()?,
            tolerance: self.tolerance,
            max_peers: self.max_peers,
            low_inventory_ratio: self.low_inventory_ratio,
            own_brand: self.own_brand.trim().to_string(),
        })
    }
}
