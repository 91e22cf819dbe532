use approx::assert_relative_eq;
use sophorolipid_energy::models::bioprocess::{
    BalanceError, ChillerModel, DryerModel, ProcessConstants, SophorolipidBatch, equipment::codes,
    run,
};
use twine_core::Model;
use uom::si::energy::kilowatt_hour;

fn kwh(energy: uom::si::f64::Energy) -> f64 {
    energy.get::<kilowatt_hour>()
}

#[test]
fn reference_batch() {
    let results = run(&ProcessConstants::default()).unwrap();

    assert_relative_eq!(kwh(results.chiller.total_heat()), 45_625.282 / 3600.0, epsilon = 1e-9);
    assert_relative_eq!(kwh(results.chiller.electrical_energy()), 4.224_563, epsilon = 1e-6);
    assert_relative_eq!(kwh(results.dryer.electrical_energy), 33.340_958, epsilon = 1e-6);
    assert_relative_eq!(kwh(results.thermal.total()), 736.364_305, epsilon = 1e-5);
    assert_relative_eq!(kwh(results.losses.total()), 17.538_825, epsilon = 1e-5);
    assert_relative_eq!(
        results.electrical.specific_consumption_kwh_per_kg,
        57.520_987,
        epsilon = 1e-5
    );

    // The recipe data are not self-consistent; the run still completes and
    // reports the failures.
    assert!(!results.balance.balanced);
    assert_relative_eq!(results.balance.error(), 0.837_790, epsilon = 1e-5);
    let failed = results.validation.failed_checks();
    assert!(failed.contains(&"chiller.consistent".to_owned()));
    assert!(failed.contains(&"physical.balance_error_acceptable".to_owned()));
    assert!(failed.contains(&"mass_balance.mass_balance_coherent".to_owned()));
    assert!(results.validation.physical.specific_consumption_reasonable);
    assert!(results.validation.physical.energies_non_negative);
    assert!(results.validation.units.all_units_correct);
}

#[test]
fn electrical_total_is_table_plus_utilities() {
    let results = run(&ProcessConstants::default()).unwrap();

    let table: f64 = results
        .equipment
        .iter()
        .map(|(_, record)| record.energy_kwh())
        .sum();
    assert_eq!(results.electrical.equipment_kwh, table);
    assert_eq!(results.electrical.total_kwh, table + 3460.0);
    assert_eq!(
        results.metrics().get("electrical.total_kwh"),
        Some(results.electrical.total_kwh)
    );

    for (_, record) in results.equipment.iter() {
        assert_relative_eq!(
            record.energy_kwh(),
            record.average_power_kw() * record.hours(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn reconciled_chiller_charges_the_whole_process_load() {
    let results = run(&ProcessConstants::default()).unwrap();
    let r = &results.reconciliation;

    assert_relative_eq!(
        kwh(r.recalculated_energy),
        kwh(results.thermal.total()) / 3.0,
        epsilon = 1e-9
    );
    let tabulated = kwh(r.tabulated_energy);
    assert_relative_eq!(
        r.deviation(),
        (kwh(r.recalculated_energy) - tabulated).abs() / tabulated,
        epsilon = 1e-12
    );

    let ft = results.equipment.get(codes::CHILLER).unwrap();
    assert_relative_eq!(ft.energy_kwh(), kwh(r.recalculated_energy), epsilon = 1e-9);
    assert_relative_eq!(ft.hours(), 13.0, epsilon = 1e-12);
}

#[test]
fn boiler_replaces_the_electric_heater_with_steam() {
    let electric = run(&ProcessConstants::default()).unwrap();
    let boiler = run(&ProcessConstants {
        use_boiler: true,
        ..ProcessConstants::default()
    })
    .unwrap();

    assert!(electric.equipment.get(codes::ELECTRIC_HEATER).is_some());
    assert!(boiler.equipment.get(codes::ELECTRIC_HEATER).is_none());
    assert_eq!(kwh(electric.balance.inputs.steam), 0.0);

    assert_relative_eq!(
        kwh(boiler.balance.inputs.steam),
        kwh(boiler.thermal.sterilization_heating_duty()) / 0.85,
        epsilon = 1e-9
    );
    assert_relative_eq!(kwh(boiler.balance.inputs.steam), 117.341_031, epsilon = 1e-5);
    assert_relative_eq!(
        kwh(electric.electrical.total) - kwh(boiler.electrical.total),
        100.0,
        epsilon = 1e-9
    );
}

#[test]
fn chemical_energy_is_gated() {
    let without = run(&ProcessConstants::default()).unwrap();
    assert_eq!(kwh(without.chemical.input), 0.0);
    assert_eq!(kwh(without.chemical.output), 0.0);
    assert_eq!(kwh(without.chemical.net), 0.0);

    let with = run(&ProcessConstants {
        include_chemical_energy: true,
        ..ProcessConstants::default()
    })
    .unwrap();
    assert_relative_eq!(kwh(with.chemical.input), 2_473.599_444, epsilon = 1e-5);
    assert_relative_eq!(kwh(with.chemical.output), 702.888_889, epsilon = 1e-5);
    assert_relative_eq!(
        kwh(with.balance.inputs.total()),
        kwh(without.balance.inputs.total()) + kwh(with.chemical.input),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        kwh(with.balance.outputs.total()),
        kwh(without.balance.outputs.total()) + kwh(with.chemical.output),
        epsilon = 1e-6
    );
}

#[test]
fn alternative_models_change_only_their_own_duties() {
    let reference = run(&ProcessConstants::default()).unwrap();
    let alternative = run(&ProcessConstants {
        chiller_model: ChillerModel::Simple,
        dryer_model: DryerModel::WaterOnly,
        ..ProcessConstants::default()
    })
    .unwrap();

    assert_eq!(alternative.chiller.model(), ChillerModel::Simple);
    assert_eq!(alternative.dryer.model, DryerModel::WaterOnly);
    assert!(alternative.chiller.total_heat() < reference.chiller.total_heat());
    assert!(alternative.dryer.electrical_energy < reference.dryer.electrical_energy);

    // Stage loads do not depend on the chiller or dryer model.
    assert_relative_eq!(
        kwh(alternative.thermal.total()),
        kwh(reference.thermal.total()),
        epsilon = 1e-9
    );
}

#[test]
fn invalid_cop_aborts_the_run() {
    let mut constants = ProcessConstants::default();
    constants.chiller.cop = -3.0;

    let err = run(&constants).unwrap_err();
    assert!(matches!(
        err,
        BalanceError::InvalidParameter { ref parameter, .. } if parameter == "chiller.cop"
    ));
}

#[test]
fn json_recipe_overrides_defaults() {
    let constants = ProcessConstants::from_json_str(
        r#"{
            "use_boiler": true,
            "utilities": { "fixed_energy_kwh": 0.0 },
            "equipment": {
                "FT-101": { "name": "Chiller", "nominal_power_kw": 5.0, "average_power_kw": 2.0, "hours": 13.0 },
                "TDR-101": { "name": "Dryer", "nominal_power_kw": 6.0, "average_power_kw": 6.0, "hours": 12.0 },
                "FR-101": { "name": "Agitator", "nominal_power_kw": 3.0, "average_power_kw": 3.0, "hours": 168.0 },
                "BLW-101": { "name": "Blower", "nominal_power_kw": 1.0, "average_power_kw": 1.0, "hours": 168.0 },
                "PUMPS": { "name": "Pumps", "nominal_power_kw": 5.0, "average_power_kw": 5.0, "hours": 2.0 }
            }
        }"#,
    )
    .unwrap();
    let results = run(&constants).unwrap();

    assert_eq!(results.equipment.len(), 5);
    assert_relative_eq!(kwh(results.electrical.utilities), 0.0);
    assert_relative_eq!(
        kwh(results.electrical.total),
        504.0
            + 168.0
            + 10.0
            + kwh(results.dryer.electrical_energy)
            + kwh(results.reconciliation.recalculated_energy),
        epsilon = 1e-9
    );
}

#[test]
fn missing_dissipating_consumer_is_an_error() {
    let mut constants = ProcessConstants::default();
    constants.equipment = ProcessConstants::from_json_str(
        r#"{ "equipment": {
            "FT-101": { "name": "Chiller", "nominal_power_kw": 5.0, "average_power_kw": 2.0, "hours": 13.0 },
            "TDR-101": { "name": "Dryer", "nominal_power_kw": 6.0, "average_power_kw": 6.0, "hours": 12.0 }
        } }"#,
    )
    .unwrap()
    .equipment;

    assert_eq!(
        run(&constants).unwrap_err(),
        BalanceError::MissingEquipment {
            code: codes::AGITATOR.to_owned()
        }
    );
}

#[test]
fn model_adapter_matches_run() {
    let constants = ProcessConstants::default();
    let via_model = SophorolipidBatch.call(&constants).unwrap();
    let direct = run(&constants).unwrap();

    assert_eq!(via_model.metrics(), direct.metrics());
}

#[test]
fn metric_keys_are_stable() {
    let results = run(&ProcessConstants::default()).unwrap();
    let metrics = results.metrics();

    for key in [
        "chiller.phase_1.total_kwh",
        "chiller.electrical_kwh",
        "dryer.electrical_kwh",
        "thermal.sterilization.medium_heating_kwh",
        "thermal.fermentation.metabolic_kwh",
        "thermal.total_kwh",
        "losses.drying_kwh",
        "electrical.FT-101_kwh",
        "electrical.EH-101_kwh",
        "electrical.total_kwh",
        "balance.error",
        "validation.units.all_units_correct",
    ] {
        assert!(metrics.get(key).is_some(), "missing metric `{key}`");
    }
    assert!(metrics.energies().all(|(key, _)| key.ends_with("_kwh")));
}

#[test]
fn recipe_times_drive_heater_and_dryer_windows() {
    let results = run(
        &ProcessConstants::from_json_str(r#"{ "times": { "sterilization": 2.0, "drying": 10.0 } }"#)
            .unwrap(),
    )
    .unwrap();

    let heater = results.equipment.get(codes::ELECTRIC_HEATER).unwrap();
    assert_relative_eq!(heater.hours(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(heater.energy_kwh(), 200.0, epsilon = 1e-12);

    let dryer = results.equipment.get(codes::DRYER).unwrap();
    assert_relative_eq!(dryer.hours(), 10.0, epsilon = 1e-12);
}

#[test]
fn oversized_utilities_fail_the_specific_consumption_check() {
    let mut constants = ProcessConstants::default();
    constants.utilities.fixed_energy_kwh = 30_000.0;
    let results = run(&constants).unwrap();

    assert!(results.electrical.specific_consumption_kwh_per_kg > 250.0);
    assert!(
        results
            .validation
            .failed_checks()
            .contains(&"physical.specific_consumption_reasonable".to_owned())
    );
    assert_eq!(
        results
            .metrics()
            .get("validation.physical.specific_consumption_reasonable"),
        Some(0.0)
    );
}
