//! Construction cost estimator
//!
//! Maps a land plot and build specification to a converted-area breakdown
//! and an estimated price. `estimate` is pure and total: it does not
//! validate its input, so degenerate dimensions flow through as zero,
//! negative or NaN areas. Use `estimate_checked` where input comes from
//! outside the process.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Basement area as a multiple of the plot area
const BASEMENT_COEFFICIENT: f64 = 1.5;

/// Estimator validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("{field} must be a positive number, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("quality tier '{tier}' is not offered with the '{package}' package")]
    UnsupportedCombination {
        package: ContractPackage,
        tier: QualityTier,
    },

    #[error("unknown {field}: '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

/// Foundation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FoundationType {
    #[default]
    Single,
    Pile,
}

impl FoundationType {
    pub fn coefficient(self) -> f64 {
        match self {
            Self::Single => 0.4,
            Self::Pile => 0.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Pile => "pile",
        }
    }
}

/// Roof construction
///
/// Unrecognized names map to `Tole`, the cheapest coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum RoofType {
    #[default]
    #[serde(rename = "tole")]
    Tole,
    #[serde(rename = "iron")]
    IronTruss,
    #[serde(rename = "concrete")]
    Concrete,
}

impl RoofType {
    pub fn coefficient(self) -> f64 {
        match self {
            Self::Tole => 0.3,
            Self::IronTruss => 0.7,
            Self::Concrete => 0.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tole => "tole",
            Self::IronTruss => "iron",
            Self::Concrete => "concrete",
        }
    }

    /// Lenient lookup used by deserialization
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "iron" | "iron_truss" | "irontruss" => Self::IronTruss,
            "concrete" => Self::Concrete,
            _ => Self::Tole,
        }
    }
}

impl<'de> Deserialize<'de> for RoofType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Contract scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContractPackage {
    /// Rough construction only
    #[serde(rename = "construction")]
    ConstructionOnly,
    /// Turnkey: construction plus finishing
    #[default]
    #[serde(rename = "full")]
    FullPackage,
}

impl ContractPackage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConstructionOnly => "construction",
            Self::FullPackage => "full",
        }
    }
}

/// Material quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    #[default]
    Average,
    Good,
    Premium,
}

impl QualityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Good => "good",
            Self::Premium => "premium",
        }
    }
}

macro_rules! impl_display_from_str {
    ($ty:ty, $field:literal, [$($name:literal => $variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = EstimateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(EstimateError::UnknownOption {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

impl_display_from_str!(FoundationType, "foundation type", [
    "single" => FoundationType::Single,
    "pile" => FoundationType::Pile,
]);
impl_display_from_str!(RoofType, "roof type", [
    "tole" => RoofType::Tole,
    "iron" => RoofType::IronTruss,
    "concrete" => RoofType::Concrete,
]);
impl_display_from_str!(ContractPackage, "contract package", [
    "construction" => ContractPackage::ConstructionOnly,
    "full" => ContractPackage::FullPackage,
]);
impl_display_from_str!(QualityTier, "quality tier", [
    "average" => QualityTier::Average,
    "good" => QualityTier::Good,
    "premium" => QualityTier::Premium,
]);

/// Price per square metre of converted area, in VND
///
/// `ConstructionOnly` has no distinct premium rate: Good and Premium share
/// 3,800,000.
pub fn unit_price(package: ContractPackage, tier: QualityTier) -> f64 {
    match (package, tier) {
        (ContractPackage::ConstructionOnly, QualityTier::Average) => 3_500_000.0,
        (ContractPackage::ConstructionOnly, QualityTier::Good) => 3_800_000.0,
        (ContractPackage::ConstructionOnly, QualityTier::Premium) => 3_800_000.0,
        (ContractPackage::FullPackage, QualityTier::Average) => 4_750_000.0,
        (ContractPackage::FullPackage, QualityTier::Good) => 5_500_000.0,
        (ContractPackage::FullPackage, QualityTier::Premium) => 6_500_000.0,
    }
}

/// Plot and build specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotSpec {
    /// Plot width in metres
    pub width: f64,
    /// Plot length in metres
    pub length: f64,
    /// Above-ground levels, ground floor included
    pub floors: u32,
    pub has_basement: bool,
    pub foundation_type: FoundationType,
    pub roof_type: RoofType,
    pub contract_package: ContractPackage,
    pub quality_tier: QualityTier,
}

impl Default for PlotSpec {
    fn default() -> Self {
        Self {
            width: 5.0,
            length: 20.0,
            floors: 2,
            has_basement: false,
            foundation_type: FoundationType::Single,
            roof_type: RoofType::Tole,
            contract_package: ContractPackage::FullPackage,
            quality_tier: QualityTier::Average,
        }
    }
}

impl PlotSpec {
    /// Reject inputs the pure estimator would silently pass through
    pub fn validate(&self) -> Result<(), EstimateError> {
        for (field, value) in [("width", self.width), ("length", self.length)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EstimateError::InvalidDimension { field, value });
            }
        }

        if self.contract_package == ContractPackage::ConstructionOnly
            && self.quality_tier == QualityTier::Premium
        {
            return Err(EstimateError::UnsupportedCombination {
                package: self.contract_package,
                tier: self.quality_tier,
            });
        }

        Ok(())
    }
}

/// Converted-area breakdown and price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaBreakdown {
    pub plot_area: f64,
    pub foundation_area: f64,
    pub floors_area: f64,
    pub basement_area: f64,
    pub roof_area: f64,
    pub total_converted_area: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Compute the area breakdown and total price for a plot
pub fn estimate(spec: &PlotSpec) -> AreaBreakdown {
    let plot_area = spec.width * spec.length;
    let foundation_area = plot_area * spec.foundation_type.coefficient();
    let floors_area = plot_area * f64::from(spec.floors);
    let basement_area = if spec.has_basement {
        plot_area * BASEMENT_COEFFICIENT
    } else {
        0.0
    };
    let roof_area = plot_area * spec.roof_type.coefficient();

    let total_converted_area = foundation_area + floors_area + basement_area + roof_area;
    let unit_price = unit_price(spec.contract_package, spec.quality_tier);

    AreaBreakdown {
        plot_area,
        foundation_area,
        floors_area,
        basement_area,
        roof_area,
        total_converted_area,
        unit_price,
        total_price: total_converted_area * unit_price,
    }
}

/// Validate, then estimate
pub fn estimate_checked(spec: &PlotSpec) -> Result<AreaBreakdown, EstimateError> {
    spec.validate()?;
    Ok(estimate(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs().max(1.0) * 1e-9;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn scenario_one() -> PlotSpec {
        PlotSpec {
            width: 5.0,
            length: 20.0,
            floors: 2,
            has_basement: false,
            foundation_type: FoundationType::Single,
            roof_type: RoofType::Tole,
            contract_package: ContractPackage::FullPackage,
            quality_tier: QualityTier::Average,
        }
    }

    #[test]
    fn test_estimate_townhouse_without_basement() {
        let result = estimate(&scenario_one());

        assert_close(result.plot_area, 100.0);
        assert_close(result.foundation_area, 40.0);
        assert_close(result.floors_area, 200.0);
        assert_eq!(result.basement_area, 0.0);
        assert_close(result.roof_area, 30.0);
        assert_close(result.total_converted_area, 270.0);
        assert_close(result.unit_price, 4_750_000.0);
        assert_close(result.total_price, 1_282_500_000.0);
    }

    #[test]
    fn test_estimate_with_basement() {
        let spec = PlotSpec {
            has_basement: true,
            ..scenario_one()
        };
        let result = estimate(&spec);

        assert_close(result.basement_area, 150.0);
        assert_close(result.total_converted_area, 420.0);
        assert_close(result.total_price, 1_995_000_000.0);
    }

    #[test]
    fn test_construction_only_good_and_premium_share_price() {
        let good = unit_price(ContractPackage::ConstructionOnly, QualityTier::Good);
        let premium = unit_price(ContractPackage::ConstructionOnly, QualityTier::Premium);
        assert_eq!(good, 3_800_000.0);
        assert_eq!(good, premium);

        let spec = PlotSpec {
            contract_package: ContractPackage::ConstructionOnly,
            quality_tier: QualityTier::Good,
            ..scenario_one()
        };
        assert_eq!(estimate(&spec).unit_price, 3_800_000.0);
    }

    #[test]
    fn test_price_table() {
        use ContractPackage::*;
        use QualityTier::*;

        assert_eq!(unit_price(ConstructionOnly, Average), 3_500_000.0);
        assert_eq!(unit_price(FullPackage, Average), 4_750_000.0);
        assert_eq!(unit_price(FullPackage, Good), 5_500_000.0);
        assert_eq!(unit_price(FullPackage, Premium), 6_500_000.0);
    }

    #[test]
    fn test_iron_truss_roof() {
        let base = estimate(&scenario_one());
        let spec = PlotSpec {
            roof_type: RoofType::IronTruss,
            ..scenario_one()
        };
        let result = estimate(&spec);

        assert_close(result.roof_area, 70.0);
        assert_eq!(result.foundation_area, base.foundation_area);
        assert_eq!(result.floors_area, base.floors_area);
        assert_close(result.total_converted_area, 310.0);
    }

    #[test]
    fn test_concrete_roof_and_pile_foundation() {
        let spec = PlotSpec {
            roof_type: RoofType::Concrete,
            foundation_type: FoundationType::Pile,
            ..scenario_one()
        };
        let result = estimate(&spec);

        assert_close(result.roof_area, 50.0);
        assert_close(result.foundation_area, 50.0);
    }

    #[test]
    fn test_extra_floor_adds_one_plot_area() {
        for floors in 0..6 {
            let lower = estimate(&PlotSpec {
                floors,
                ..scenario_one()
            });
            let upper = estimate(&PlotSpec {
                floors: floors + 1,
                ..scenario_one()
            });

            assert_close(upper.floors_area - lower.floors_area, lower.plot_area);
            assert_close(
                upper.total_price - lower.total_price,
                lower.plot_area * lower.unit_price,
            );
        }
    }

    #[test]
    fn test_total_dominates_each_component() {
        let dims = [(0.5, 3.0), (4.0, 16.5), (7.2, 25.0), (12.0, 30.0)];
        for (width, length) in dims {
            for roof_type in [RoofType::Tole, RoofType::IronTruss, RoofType::Concrete] {
                let result = estimate(&PlotSpec {
                    width,
                    length,
                    roof_type,
                    has_basement: true,
                    ..scenario_one()
                });

                assert_eq!(result.plot_area, width * length);
                let largest = result
                    .foundation_area
                    .max(result.floors_area)
                    .max(result.roof_area);
                assert!(result.total_converted_area >= largest);
            }
        }
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let spec = PlotSpec {
            width: 6.3,
            length: 17.9,
            floors: 4,
            has_basement: true,
            roof_type: RoofType::Concrete,
            ..scenario_one()
        };
        let first = estimate(&spec);
        for _ in 0..10 {
            assert_eq!(estimate(&spec), first);
        }
    }

    #[test]
    fn test_degenerate_dimensions_pass_through() {
        let result = estimate(&PlotSpec {
            width: 0.0,
            ..scenario_one()
        });
        assert_eq!(result.total_price, 0.0);

        let result = estimate(&PlotSpec {
            width: -5.0,
            ..scenario_one()
        });
        assert!(result.total_price < 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let spec = PlotSpec {
                width,
                ..scenario_one()
            };
            assert!(matches!(
                spec.validate(),
                Err(EstimateError::InvalidDimension { field: "width", .. })
            ));
        }

        let spec = PlotSpec {
            length: 0.0,
            ..scenario_one()
        };
        assert!(matches!(
            estimate_checked(&spec),
            Err(EstimateError::InvalidDimension { field: "length", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_premium_construction_only() {
        let spec = PlotSpec {
            contract_package: ContractPackage::ConstructionOnly,
            quality_tier: QualityTier::Premium,
            ..scenario_one()
        };
        let err = spec.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "quality tier 'premium' is not offered with the 'construction' package"
        );
    }

    #[test]
    fn test_estimate_checked_accepts_defaults() {
        let result = estimate_checked(&PlotSpec::default()).unwrap();
        assert_close(result.total_price, 1_282_500_000.0);
    }

    #[test]
    fn test_deserialize_plot_spec_with_defaults() {
        let spec: PlotSpec =
            serde_json::from_str(r#"{"width": 8, "hasBasement": true, "roofType": "iron"}"#)
                .unwrap();
        assert_eq!(spec.width, 8.0);
        assert_eq!(spec.length, 20.0);
        assert!(spec.has_basement);
        assert_eq!(spec.roof_type, RoofType::IronTruss);
        assert_eq!(spec.contract_package, ContractPackage::FullPackage);
    }

    #[test]
    fn test_unknown_roof_falls_back_to_tole() {
        let spec: PlotSpec = serde_json::from_str(r#"{"roofType": "thatch"}"#).unwrap();
        assert_eq!(spec.roof_type, RoofType::Tole);
        assert_close(estimate(&spec).roof_area, 30.0);
    }

    #[test]
    fn test_unknown_package_is_rejected() {
        let result: Result<PlotSpec, _> =
            serde_json::from_str(r#"{"contractPackage": "design"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Pile".parse::<FoundationType>().unwrap(), FoundationType::Pile);
        assert_eq!("iron".parse::<RoofType>().unwrap(), RoofType::IronTruss);
        assert_eq!(
            "construction".parse::<ContractPackage>().unwrap(),
            ContractPackage::ConstructionOnly
        );
        assert!(matches!(
            "gold".parse::<QualityTier>(),
            Err(EstimateError::UnknownOption { field: "quality tier", .. })
        ));
    }
}
