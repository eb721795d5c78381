#![cfg_attr(not(test), no_std)]

// clap derives expand to `::std` paths.
#[cfg(all(feature = "clap", not(test)))]
extern crate std;

pub mod bus;
pub mod configs;
pub mod registers;
pub mod types;

mod accel;
mod mag;

#[cfg(test)]
mod mock;

use core::fmt::{self, Debug, Display, Formatter};

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use registers::*;

pub use accel::Accelerometer;
pub use bus::{I2cBus, RegisterBus};
pub use configs::*;
pub use mag::Magnetometer;
pub use registers::{ACCEL_ADDRESS, MAG_ADDRESS};
pub use types::*;

#[derive(Debug)]
pub enum Error<E> {
    I2c(E),
    ConfigWrite { reg: u8, source: E },
    InvalidDevice,
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C transaction failed: {:?}", e),
            Error::ConfigWrite { reg, source } => {
                write!(f, "configuration write to {:#04x} failed: {:?}", reg, source)
            }
            Error::InvalidDevice => f.write_str("device identification mismatch"),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

/// The configure-then-read contract shared by both channels.
pub trait SensorChannel {
    fn configure<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<(), Error<B::Error>>
    where
        B: RegisterBus,
        D: DelayNs;

    fn read<B: RegisterBus>(&self, bus: &mut B) -> Result<Reading, Error<B::Error>>;

    fn needs_configure(&self) -> bool;

    /// Configure if the channel's policy asks for it, then read.
    fn sample<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<Reading, Error<B::Error>>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        if self.needs_configure() {
            self.configure(bus, delay)?;
        }
        self.read(bus)
    }
}

/// Applies a configuration table to the currently selected device.
pub fn apply_config<B, R>(
    bus: &mut B,
    config: &[RegConfig<R>],
    check: WriteCheck,
) -> Result<(), Error<B::Error>>
where
    B: RegisterBus,
    R: Register + NamedRegister + Copy,
{
    for entry in config {
        let addr = entry.reg.addr();
        match entry.op {
            RegOp::Write => {
                debug!("write_reg {:<21}({:#04X}) = {:#04x}", entry.reg.name(), addr, entry.value);
                if let Err(e) = bus.write_register(addr, entry.value) {
                    match check {
                        WriteCheck::Strict => {
                            return Err(Error::ConfigWrite { reg: addr, source: e })
                        }
                        WriteCheck::Lenient => {
                            warn!("write_reg {} ({:#04X}) failed: {:?}", entry.reg.name(), addr, e)
                        }
                    }
                }
            }
            RegOp::Read => {
                let data = bus.read_register(addr).map_err(Error::I2c)?;
                debug!("read_reg {:<21}({:#04X}) = {:#04x}", entry.reg.name(), addr, data);
            }
        }
    }
    Ok(())
}

/// Logs the current value of every register in `regs` on `device`.
pub fn dump_config<B, R>(bus: &mut B, device: u8, regs: &[R]) -> Result<(), Error<B::Error>>
where
    B: RegisterBus,
    R: NamedRegister + Copy,
{
    fn show(label: &str, reg: u8, val: Result<u8, impl Debug>) {
        match val {
            Ok(v) => debug!("{:<21}({:#04x}): 0x{:02X} ({:>3}) 0b{:08b}", label, reg, v, v, v),
            Err(e) => debug!("{:<16}: Error: {:?}", label, e),
        }
    }

    bus.select(device).map_err(Error::I2c)?;
    for reg in regs {
        let label = reg.name();
        let addr = reg.addr();
        show(label, addr, bus.read_register(addr));
    }

    Ok(())
}
