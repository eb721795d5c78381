mod running_average;
mod sensor_hub_control;

use std::io::{self, Write};
use std::thread::sleep;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use linux_embedded_hal::{Delay, I2CError, I2cdev};
use log::{error, info};
use thiserror::Error;

use lsm303dlhc::{
    AccelPrecision, Accelerometer, ConfigurePolicy, I2cBus, Magnetometer, OutputMode, Reading,
    WriteCheck,
};

use crate::running_average::RunningAverage;
use crate::sensor_hub_control::SensorHub;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Show {
    Accel,
    Mag,
    Both,
}

#[derive(Parser, Debug)]
#[command(name = "lsm303", about = "Stream LSM303DLHC readings and their running average")]
struct Cli {
    #[arg(long, default_value = "/dev/i2c-1", help = "I2C character device")]
    bus: String,
    #[arg(long, value_enum, default_value_t = OutputMode::PhysicalUnits)]
    output: OutputMode,
    #[arg(long, value_enum, default_value_t = AccelPrecision::Shifted12)]
    precision: AccelPrecision,
    #[arg(long, value_enum, default_value_t = Show::Mag, help = "Channel lines to print")]
    show: Show,
    #[arg(long, help = "Rewrite the configuration before every sample")]
    reconfigure: bool,
    #[arg(long, help = "Log failed configuration writes instead of aborting")]
    lenient_config: bool,
    #[arg(long, help = "Stop after this many samples")]
    samples: Option<u64>,
    #[arg(long, default_value_t = 0, help = "Pause between samples")]
    interval_ms: u64,
    #[arg(long, help = "Log both register maps before configuring")]
    dump_registers: bool,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("failed to open I2C bus {path}: {reason}")]
    Open { path: String, reason: String },
    #[error(transparent)]
    Sensor(#[from] lsm303dlhc::Error<I2CError>),
    #[error("failed to write sample: {0}")]
    Output(#[from] io::Error),
}

fn main() {
    let env = Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::init_from_env(env);

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let i2c = I2cdev::new(&cli.bus).map_err(|e| AppError::Open {
        path: cli.bus.clone(),
        reason: e.to_string(),
    })?;
    info!("Opened {}", cli.bus);

    let mut bus = I2cBus::new(i2c);
    let mut delay = Delay;

    let policy = if cli.reconfigure {
        ConfigurePolicy::EverySample
    } else {
        ConfigurePolicy::Once
    };
    let write_check = if cli.lenient_config {
        WriteCheck::Lenient
    } else {
        WriteCheck::Strict
    };

    let accel = Accelerometer::default()
        .with_output(cli.output)
        .with_precision(cli.precision)
        .with_policy(policy)
        .with_write_check(write_check);
    let mag = Magnetometer::default()
        .with_output(cli.output)
        .with_policy(policy)
        .with_write_check(write_check);
    let mut hub = SensorHub::new(accel, mag);

    if cli.dump_registers {
        hub.dump_registers(&mut bus)?;
    }
    hub.configure(&mut bus, &mut delay)?;

    let mut accel_avg = RunningAverage::new();
    let mut mag_avg = RunningAverage::new();

    let stderr = io::stderr();
    let mut out = stderr.lock();

    loop {
        let sample = hub.poll(&mut bus, &mut delay)?;
        accel_avg.push(&sample.accel.axes);
        mag_avg.push(&sample.mag.axes);

        if cli.show != Show::Mag {
            write_line(&mut out, "Accelerometer", &sample.accel, &accel_avg)?;
        }
        if cli.show != Show::Accel {
            write_line(&mut out, "Magnetometer", &sample.mag, &mag_avg)?;
        }

        if cli.samples.is_some_and(|limit| accel_avg.count() >= limit) {
            break;
        }
        if cli.interval_ms > 0 {
            sleep(Duration::from_millis(cli.interval_ms));
        }
    }

    info!("Stopped after {} samples", accel_avg.count());
    Ok(())
}

fn write_line<W: Write>(
    out: &mut W,
    label: &str,
    reading: &Reading,
    avg: &RunningAverage,
) -> io::Result<()> {
    let mean = avg.mean().unwrap_or_default();
    writeln!(
        out,
        "{} ({}): {:.6}, {:.6}, {:.6}, avg {:.6}, {:.6}, {:.6}",
        label,
        reading.unit,
        reading.axes.x,
        reading.axes.y,
        reading.axes.z,
        mean.x,
        mean.y,
        mean.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsm303dlhc::{RawAxes, ThreeAxes, Unit};

    #[test]
    fn test_write_line_format() {
        let reading = Reading {
            raw: RawAxes { x: 10, y: 20, z: 5 },
            axes: ThreeAxes { x: 0.5, y: -0.25, z: 1.0 },
            unit: Unit::Gauss,
        };
        let mut avg = RunningAverage::new();
        avg.push(&reading.axes);
        avg.push(&ThreeAxes { x: 1.5, y: 0.25, z: 0.0 });

        let mut out = Vec::new();
        write_line(&mut out, "Magnetometer", &reading, &avg).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Magnetometer (gauss): 0.500000, -0.250000, 1.000000, avg 1.000000, 0.000000, 0.500000\n"
        );
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["lsm303"]);
        assert_eq!(cli.bus, "/dev/i2c-1");
        assert_eq!(cli.output, OutputMode::PhysicalUnits);
        assert_eq!(cli.precision, AccelPrecision::Shifted12);
        assert_eq!(cli.show, Show::Mag);
        assert!(!cli.reconfigure);
        assert_eq!(cli.samples, None);
    }

    #[test]
    fn test_cli_value_names() {
        let cli = Cli::parse_from([
            "lsm303",
            "--output",
            "raw",
            "--precision",
            "full16",
            "--show",
            "both",
            "--samples",
            "10",
        ]);
        assert_eq!(cli.output, OutputMode::Raw);
        assert_eq!(cli.precision, AccelPrecision::Full16);
        assert_eq!(cli.show, Show::Both);
        assert_eq!(cli.samples, Some(10));
    }
}
