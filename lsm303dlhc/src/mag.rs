use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::configs::{CONFIG_MAG, MAG_GAIN, SETTLE_DELAY_MS};
use crate::registers::{MagReg, Register, MAG_ADDRESS, MAG_IDENTIFICATION};
use crate::{
    apply_config, ConfigurePolicy, Error, MagReading, OutputMode, RawAxes, Reading, RegisterBus,
    SensorChannel, Unit, WriteCheck,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

/// Output register pairs (high, low) in the order they sit on the device.
///
/// The register map puts Z between X and Y: 0x03/0x04 is X, 0x05/0x06 is Z and
/// 0x07/0x08 is Y. Reading the block as x, y, z swaps the Y and Z fields.
const MAG_AXIS_LAYOUT: [(MagReg, MagReg, Axis); 3] = [
    (MagReg::OutXHM, MagReg::OutXLM, Axis::X),
    (MagReg::OutZHM, MagReg::OutZLM, Axis::Z),
    (MagReg::OutYHM, MagReg::OutYLM, Axis::Y),
];

pub struct Magnetometer {
    address: u8,
    output: OutputMode,
    policy: ConfigurePolicy,
    write_check: WriteCheck,
    configured: bool,
}

impl Default for Magnetometer {
    fn default() -> Self {
        Self::new(MAG_ADDRESS)
    }
}

impl Magnetometer {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            output: OutputMode::default(),
            policy: ConfigurePolicy::default(),
            write_check: WriteCheck::default(),
            configured: false,
        }
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_policy(mut self, policy: ConfigurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_write_check(mut self, write_check: WriteCheck) -> Self {
        self.write_check = write_check;
        self
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn identify<B: RegisterBus>(&self, bus: &mut B) -> Result<[u8; 3], Error<B::Error>> {
        bus.select(self.address).map_err(Error::I2c)?;
        let mut id = [0u8; 3];
        for (byte, reg) in id.iter_mut().zip([MagReg::IraRegM, MagReg::IrbRegM, MagReg::IrcRegM]) {
            *byte = bus.read_register(reg.addr()).map_err(Error::I2c)?;
        }
        Ok(id)
    }

    pub fn verify_identity<B: RegisterBus>(&self, bus: &mut B) -> Result<(), Error<B::Error>> {
        let id = self.identify(bus)?;
        if id != MAG_IDENTIFICATION {
            warn!("unexpected magnetometer identification {:02X?}", id);
            return Err(Error::InvalidDevice);
        }
        Ok(())
    }

    /// Reads the six output registers in device order, one addressed byte at a time.
    pub fn read_raw<B: RegisterBus>(&self, bus: &mut B) -> Result<RawAxes, Error<B::Error>> {
        bus.select(self.address).map_err(Error::I2c)?;

        let mut bytes = [0u8; 6];
        for (i, (hi_reg, lo_reg, _)) in MAG_AXIS_LAYOUT.iter().enumerate() {
            bytes[2 * i] = bus.read_register(hi_reg.addr()).map_err(Error::I2c)?;
            bytes[2 * i + 1] = bus.read_register(lo_reg.addr()).map_err(Error::I2c)?;
        }
        trace!("mag data {:02X?}", bytes);

        let mut raw = RawAxes::default();
        for (i, (_, _, axis)) in MAG_AXIS_LAYOUT.iter().enumerate() {
            let value = i16::from_be_bytes([bytes[2 * i], bytes[2 * i + 1]]);
            match axis {
                Axis::X => raw.x = value,
                Axis::Y => raw.y = value,
                Axis::Z => raw.z = value,
            }
        }
        Ok(raw)
    }

    pub fn convert(&self, raw: RawAxes) -> MagReading {
        let mut axes = raw.to_axes();
        let unit = match self.output {
            OutputMode::Raw => Unit::Counts,
            OutputMode::PhysicalUnits => {
                axes.x /= MAG_GAIN.lsb_per_gauss_xy();
                axes.y /= MAG_GAIN.lsb_per_gauss_xy();
                axes.z /= MAG_GAIN.lsb_per_gauss_z();
                Unit::Gauss
            }
        };
        Reading { raw, axes, unit }
    }
}

impl SensorChannel for Magnetometer {
    fn configure<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<(), Error<B::Error>>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        debug!("configuring magnetometer at {:#04x}", self.address);
        bus.select(self.address).map_err(Error::I2c)?;
        apply_config(bus, CONFIG_MAG, self.write_check)?;
        delay.delay_ms(SETTLE_DELAY_MS);
        self.configured = true;
        Ok(())
    }

    fn read<B: RegisterBus>(&self, bus: &mut B) -> Result<MagReading, Error<B::Error>> {
        let raw = self.read_raw(bus)?;
        Ok(self.convert(raw))
    }

    fn needs_configure(&self) -> bool {
        !self.configured || self.policy == ConfigurePolicy::EverySample
    }
}
