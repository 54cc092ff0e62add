use approx::assert_relative_eq;
use vented_box::prelude::*;
use vented_box::reference::{REFERENCE_FREQUENCY_HZ, REFERENCE_TUNING_HZ};

#[test]
fn tuning_is_close_to_bundled_value() {
    let fb = estimate_tuning(&reference_enclosure()).unwrap();
    assert!((fb - REFERENCE_TUNING_HZ).abs() / REFERENCE_TUNING_HZ < 0.01, "fb = {fb}");
}

#[test]
fn reference_point_is_finite_and_above_re() {
    let enclosure = reference_enclosure();
    let fb = estimate_tuning(&enclosure).unwrap();
    let p = solve(REFERENCE_FREQUENCY_HZ, &reference_driver(), &enclosure, fb);
    assert!(p.is_solved());
    assert!(p.zin.is_finite());
    assert!(p.zin.re >= reference_driver().re);
}

#[test]
fn display_units_do_not_change_results() {
    let driver = reference_driver();
    let si = reference_enclosure();
    let converted = EnclosureParameters {
        volume: to_si(100.0, "L", Dimension::Volume).unwrap(),
        port_area: to_si(7900.0, "mm^2", Dimension::Area).unwrap(),
        port_length: to_si(303.0, "mm", Dimension::Length).unwrap(),
        ..si
    };

    let fb_si = estimate_tuning(&si).unwrap();
    let fb_converted = estimate_tuning(&converted).unwrap();
    assert_relative_eq!(fb_si, fb_converted, max_relative = 1.0e-9);

    for f in [15.0, REFERENCE_FREQUENCY_HZ, 90.0] {
        let a = solve(f, &driver, &si, fb_si);
        let b = solve(f, &driver, &converted, fb_converted);
        assert_relative_eq!(a.zin.re, b.zin.re, max_relative = 1.0e-9);
        assert_relative_eq!(a.zin.im, b.zin.im, max_relative = 1.0e-9);
        assert_relative_eq!(a.port_velocity, b.port_velocity, max_relative = 1.0e-9);
        assert_relative_eq!(a.cone_excursion_mm, b.cone_excursion_mm, max_relative = 1.0e-9);
    }
}

#[test]
fn closed_form_and_mesh_agree_across_a_sweep() {
    let driver = reference_driver();
    let enclosure = reference_enclosure();
    let fb = estimate_tuning(&enclosure).unwrap();
    let acoustics = BoxAcoustics::new(&enclosure, fb).unwrap();

    for f in frequency_grid(1.0, 400.0, 7.0).unwrap() {
        let closed = solve_with(f, &driver, &enclosure, &acoustics).unwrap();
        let mesh = MeshSystem::assemble(angular_frequency(f), &driver, &acoustics)
            .and_then(|m| m.solve())
            .unwrap();
        let zin = mesh.input_impedance(driver.vg);
        assert!((zin - closed.zin).norm() <= 1.0e-9 * closed.zin.norm(), "at {f} Hz");
    }
}

#[test]
fn sweep_from_zero_keeps_dc_sentinel() {
    let result = run_sweep(
        0.0,
        50.0,
        1.0,
        &reference_driver(),
        &reference_enclosure(),
        CurveKind::Impedance,
    )
    .unwrap();
    assert!(result.values[0].is_infinite());
    assert!(result.values[1..].iter().all(|z| z.is_finite()));
    assert!(result.degenerate.is_empty());
}

#[test]
fn group_delay_is_finite_over_reference_sweep() {
    let result = run_sweep(
        5.0,
        200.0,
        0.5,
        &reference_driver(),
        &reference_enclosure(),
        CurveKind::GroupDelay,
    )
    .unwrap();
    assert_eq!(result.values.len(), result.frequencies.len());
    assert!(result.values.iter().all(|d| d.is_finite()));
}

#[test]
fn end_correction_changes_tuning_in_the_expected_direction() {
    let short = EnclosureParameters::new(0.1, 0.0079, 0.303, EndCorrection::BothFreeEnds, 1);
    let long = EnclosureParameters::new(0.1, 0.0079, 0.303, EndCorrection::ThreeCommonWalls, 1);
    assert!(estimate_tuning(&long).unwrap() < estimate_tuning(&short).unwrap());
}
