use std::io;

use em_dipole::prelude::*;

fn main() -> Result<(), EmDipoleError> {
    // Receiver 30 cm up the dipole axis, 1 mm cells, 100 ps steps.
    let config = SimulationConfig::new(
        "on_axis",
        100,
        1.0e-10,
        SpatialResolution::uniform(1.0e-3),
        ReceiverOffset::new(0.0, 0.0, 0.3),
    );
    let table = run_reference(&config)?;

    let (step, ez) = table.peak(FieldComponent::Ez).unwrap_or((0, 0.0));
    eprintln!("Ez peak {ez:.6e} V/m at {:.3e} s", step as f64 * table.dt());

    write_fields_csv(io::stdout().lock(), &table)?;
    Ok(())
}
