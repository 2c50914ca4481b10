/// End-to-end checks of the cost estimator through the public API
use homepro::estimator::{
    estimate, estimate_checked, unit_price, ContractPackage, EstimateError, FoundationType,
    PlotSpec, QualityTier, RoofType,
};
use homepro::format::format_vnd;

fn townhouse() -> PlotSpec {
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
fn test_townhouse_quote() {
    let result = estimate(&townhouse());

    assert_eq!(result.plot_area, 100.0);
    assert_eq!(result.total_converted_area, 270.0);
    assert_eq!(result.unit_price, 4_750_000.0);
    assert_eq!(format_vnd(result.total_price), "1.282.500.000 ₫");
}

#[test]
fn test_townhouse_with_basement_quote() {
    let spec = PlotSpec {
        has_basement: true,
        ..townhouse()
    };
    let result = estimate(&spec);

    assert_eq!(result.basement_area, 150.0);
    assert_eq!(result.total_converted_area, 420.0);
    assert_eq!(format_vnd(result.total_price), "1.995.000.000 ₫");
}

#[test]
fn test_every_package_and_tier_has_a_price() {
    let packages = [ContractPackage::ConstructionOnly, ContractPackage::FullPackage];
    let tiers = [QualityTier::Average, QualityTier::Good, QualityTier::Premium];

    for package in packages {
        let mut previous = 0.0;
        for tier in tiers {
            let price = unit_price(package, tier);
            assert!(price > 0.0);
            // Higher tiers never cost less
            assert!(price >= previous);
            previous = price;
        }
    }

    assert_eq!(
        unit_price(ContractPackage::ConstructionOnly, QualityTier::Good),
        unit_price(ContractPackage::ConstructionOnly, QualityTier::Premium)
    );
}

#[test]
fn test_full_package_always_costs_more() {
    for tier in [QualityTier::Average, QualityTier::Good, QualityTier::Premium] {
        assert!(
            unit_price(ContractPackage::FullPackage, tier)
                > unit_price(ContractPackage::ConstructionOnly, tier)
        );
    }
}

#[test]
fn test_checked_estimate_matches_pure_estimate() {
    let spec = PlotSpec {
        width: 7.5,
        length: 22.0,
        floors: 3,
        has_basement: true,
        roof_type: RoofType::Concrete,
        foundation_type: FoundationType::Pile,
        quality_tier: QualityTier::Good,
        ..townhouse()
    };

    assert_eq!(estimate_checked(&spec).unwrap(), estimate(&spec));
}

#[test]
fn test_ground_only_house_without_floors() {
    let spec = PlotSpec {
        floors: 0,
        ..townhouse()
    };
    let result = estimate_checked(&spec).unwrap();

    assert_eq!(result.floors_area, 0.0);
    assert_eq!(result.total_converted_area, 70.0);
}

#[test]
fn test_checked_estimate_rejects_negative_length() {
    let spec = PlotSpec {
        length: -3.0,
        ..townhouse()
    };
    assert_eq!(
        estimate_checked(&spec),
        Err(EstimateError::InvalidDimension {
            field: "length",
            value: -3.0
        })
    );
}

#[test]
fn test_spec_json_round_trip_uses_form_names() {
    let spec = PlotSpec {
        roof_type: RoofType::IronTruss,
        contract_package: ContractPackage::ConstructionOnly,
        ..townhouse()
    };
    let json = serde_json::to_value(spec).unwrap();

    assert_eq!(json["roofType"], "iron");
    assert_eq!(json["contractPackage"], "construction");
    assert_eq!(json["foundationType"], "single");
    assert_eq!(json["hasBasement"], false);
}
