use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vented_box::circuits::{solve, BoxAcoustics};
use vented_box::config::{BoxConfig, SweepConfig};
use vented_box::params::{DriverParameters, EnclosureParameters, EndCorrection};
use vented_box::reference::{reference_driver, reference_enclosure};
use vented_box::sweep::{
    run_sweep, sweep_points, write_curve_csv, write_frequency_points_csv, CurveKind,
};
use vented_box::tuning::TuningEstimate;

#[derive(Debug, Parser)]
#[command(name = "vented-box", version, about = "Vented loudspeaker enclosure simulator")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the port tuning frequency.
    Tuning(Source),
    /// Solve the circuit at one frequency.
    Point {
        /// Analysis frequency in Hz.
        #[arg(short, long)]
        frequency: f64,
        #[command(flatten)]
        source: Source,
    },
    /// Sweep a frequency range and write a CSV curve.
    Sweep {
        #[command(flatten)]
        source: Source,
        /// Curve to extract (Impedance, Cone Excursion, Port Velocity, Group Delay).
        #[arg(long)]
        curve: Option<CurveKind>,
        /// First frequency in Hz.
        #[arg(long)]
        start: Option<f64>,
        /// Last frequency in Hz.
        #[arg(long)]
        stop: Option<f64>,
        /// Frequency step in Hz.
        #[arg(long)]
        step: Option<f64>,
        /// Write every solved field instead of a single curve.
        #[arg(long)]
        all_fields: bool,
        /// Output file (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the port end-correction factors.
    EndCorrections,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// TOML parameter file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Use the bundled reference driver and enclosure.
    #[arg(long)]
    reference: bool,
}

struct Inputs {
    driver: DriverParameters,
    enclosure: EnclosureParameters,
    sweep: SweepConfig,
}

impl Source {
    fn load(&self) -> Result<Inputs> {
        match &self.config {
            Some(path) => {
                let config = BoxConfig::load(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let (driver, enclosure) = config.parameters()?;
                Ok(Inputs {
                    driver,
                    enclosure,
                    sweep: config.sweep(),
                })
            }
            None => Ok(Inputs {
                driver: reference_driver(),
                enclosure: reference_enclosure(),
                sweep: SweepConfig::default(),
            }),
        }
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "vented_box=debug,info"
    } else {
        "vented_box=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Tuning(source) => print_tuning(&source.load()?),
        Command::Point { frequency, source } => print_point(frequency, &source.load()?),
        Command::Sweep {
            source,
            curve,
            start,
            stop,
            step,
            all_fields,
            output,
        } => {
            let inputs = source.load()?;
            let defaults = &inputs.sweep;
            let start = start.unwrap_or(defaults.start);
            let stop = stop.unwrap_or(defaults.stop);
            let step = step.unwrap_or(defaults.step);
            let curve = curve.unwrap_or(defaults.curve);

            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("creating {}", path.display()))?,
                )),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            if all_fields {
                let sweep = sweep_points(start, stop, step, &inputs.driver, &inputs.enclosure)?;
                write_frequency_points_csv(&mut out, &sweep.points)?;
            } else {
                let result = run_sweep(start, stop, step, &inputs.driver, &inputs.enclosure, curve)?;
                write_curve_csv(&mut out, &result)?;
            }
            out.flush()?;
            if let Some(path) = output {
                tracing::info!(path = %path.display(), "sweep written");
            }
            Ok(())
        }
        Command::EndCorrections => {
            for kind in EndCorrection::ALL {
                println!("{:<20} {:.3}", kind.label(), kind.factor());
            }
            println!("{:<20} {:.3}", "(other)", EndCorrection::DEFAULT_FACTOR);
            Ok(())
        }
    }
}

fn print_tuning(inputs: &Inputs) -> Result<()> {
    let estimate = TuningEstimate::compute(&inputs.enclosure)?;
    let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |hz| format!("{hz:.4} Hz"));
    println!("formula A: {}", show(estimate.formula_a_hz));
    println!("formula B: {}", show(estimate.formula_b_hz));
    println!("fb:        {:.4} Hz", estimate.fb_hz);

    let check = BoxAcoustics::new(&inputs.enclosure, estimate.fb_hz)?
        .port_mass_check(&inputs.enclosure);
    println!(
        "port mass: {:.4} kg/m^4 (tuned), {:.4} kg/m^4 (geometry)",
        check.tuned, check.geometric
    );
    Ok(())
}

fn print_point(frequency: f64, inputs: &Inputs) -> Result<()> {
    let fb = TuningEstimate::compute(&inputs.enclosure)?.fb_hz;
    let p = solve(frequency, &inputs.driver, &inputs.enclosure, fb);
    println!("frequency:      {:.4} Hz (fb {:.4} Hz)", p.frequency_hz, fb);
    println!("Zin:            {:.4} {:+.4}j ohm", p.zin.re, p.zin.im);
    println!("|Zin|:          {:.4} ohm", p.impedance_magnitude());
    println!("phase:          {:.4} deg", p.phase.to_degrees());
    println!("cone excursion: {:.4} mm", p.cone_excursion_mm);
    println!("port velocity:  {:.4} m/s", p.port_velocity);
    if let Some(term) = p.degenerate {
        println!("degenerate:     {term}");
    }
    Ok(())
}
