// crates/repweb-reputation/src/params.rs
//
// Tuning parameters for the trust graph, fixed for the lifetime of a graph.

use serde::{Deserialize, Serialize};

use repweb_core::RepwebError;

/// Configuration for reputation scoring and invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphParams {
    /// Per-degree decay factor, strictly between 0 and 1. Default: 0.5.
    pub flow_multiplier: f64,
    /// Maximum number of trust hops that influence a score. Default: 3.
    pub max_chain_length: u32,
}

impl GraphParams {
    /// Validate and build a parameter set.
    ///
    /// Rejects a decay factor outside the open interval (0, 1), including NaN,
    /// and a zero chain length.
    pub fn new(flow_multiplier: f64, max_chain_length: u32) -> Result<Self, RepwebError> {
        let params = Self {
            flow_multiplier,
            max_chain_length,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check an already constructed parameter set (e.g. one deserialized from config).
    pub fn validate(&self) -> Result<(), RepwebError> {
        if !(self.flow_multiplier > 0.0 && self.flow_multiplier < 1.0) {
            return Err(RepwebError::InvalidConfig(format!(
                "flow_multiplier must be in (0, 1), got {}",
                self.flow_multiplier
            )));
        }
        if self.max_chain_length == 0 {
            return Err(RepwebError::InvalidConfig(
                "max_chain_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            flow_multiplier: 0.5,
            max_chain_length: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GraphParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_flow_multiplier_bounds() {
        assert!(GraphParams::new(0.0, 3).is_err());
        assert!(GraphParams::new(1.0, 3).is_err());
        assert!(GraphParams::new(-0.2, 3).is_err());
        assert!(GraphParams::new(1.5, 3).is_err());
        assert!(GraphParams::new(f64::NAN, 3).is_err());
    }

    #[test]
    fn rejects_zero_chain_length() {
        let err = GraphParams::new(0.5, 0).unwrap_err();
        assert!(matches!(err, RepwebError::InvalidConfig(_)));
    }

    #[test]
    fn accepts_interior_values() {
        let params = GraphParams::new(0.01, 1).unwrap();
        assert_eq!(params.max_chain_length, 1);
        assert!(GraphParams::new(0.99, 50).is_ok());
    }
}
