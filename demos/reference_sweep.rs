use vented_box::prelude::*;

fn main() -> Result<()> {
    let driver = reference_driver();
    let enclosure = reference_enclosure();

    let tuning = TuningEstimate::compute(&enclosure)?;
    println!(
        "fb = {:.3} Hz (A {:?}, B {:?})",
        tuning.fb_hz, tuning.formula_a_hz, tuning.formula_b_hz
    );

    // Impedance and excursion from 10 Hz to 100 Hz in 5 Hz steps.
    let impedance = run_sweep(10.0, 100.0, 5.0, &driver, &enclosure, CurveKind::Impedance)?;
    let excursion = run_sweep(10.0, 100.0, 5.0, &driver, &enclosure, CurveKind::ConeExcursion)?;

    println!("f(Hz), |Zin|(ohm), x(mm)");
    for ((f, z), x) in impedance.pairs().zip(excursion.values.iter()) {
        println!("{f:>6.1}, {z:>9.3}, {x:>7.3}");
    }
    Ok(())
}
