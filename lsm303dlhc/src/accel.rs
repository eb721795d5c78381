use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::configs::{ACCEL_G_PER_LSB, CONFIG_ACCEL, GRAVITY_EARTH, SETTLE_DELAY_MS};
use crate::registers::{AccelReg, Register, ACCEL_ADDRESS};
use crate::{
    apply_config, AccelPrecision, AccelReading, ConfigurePolicy, Error, OutputMode, RawAxes,
    Reading, RegisterBus, SensorChannel, Unit, WriteCheck,
};

/// Output registers as (low, high) pairs in x, y, z order.
const ACCEL_AXIS_REGS: [(AccelReg, AccelReg); 3] = [
    (AccelReg::OutXLA, AccelReg::OutXHA),
    (AccelReg::OutYLA, AccelReg::OutYHA),
    (AccelReg::OutZLA, AccelReg::OutZHA),
];

pub struct Accelerometer {
    address: u8,
    output: OutputMode,
    precision: AccelPrecision,
    policy: ConfigurePolicy,
    write_check: WriteCheck,
    configured: bool,
}

impl Default for Accelerometer {
    fn default() -> Self {
        Self::new(ACCEL_ADDRESS)
    }
}

impl Accelerometer {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            output: OutputMode::default(),
            precision: AccelPrecision::default(),
            policy: ConfigurePolicy::default(),
            write_check: WriteCheck::default(),
            configured: false,
        }
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_precision(mut self, precision: AccelPrecision) -> Self {
        self.precision = precision;
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

    /// Reads the six output registers, one addressed byte at a time.
    pub fn read_raw<B: RegisterBus>(&self, bus: &mut B) -> Result<RawAxes, Error<B::Error>> {
        bus.select(self.address).map_err(Error::I2c)?;

        let mut bytes = [0u8; 6];
        for (i, (lo_reg, hi_reg)) in ACCEL_AXIS_REGS.iter().enumerate() {
            bytes[2 * i] = bus.read_register(lo_reg.addr()).map_err(Error::I2c)?;
            bytes[2 * i + 1] = bus.read_register(hi_reg.addr()).map_err(Error::I2c)?;
        }
        trace!("accel data {:02X?}", bytes);

        Ok(RawAxes {
            x: self.precision.decode(bytes[0], bytes[1]),
            y: self.precision.decode(bytes[2], bytes[3]),
            z: self.precision.decode(bytes[4], bytes[5]),
        })
    }

    pub fn convert(&self, raw: RawAxes) -> AccelReading {
        let mut axes = raw.to_axes();
        let unit = match self.output {
            OutputMode::Raw => Unit::Counts,
            OutputMode::PhysicalUnits => {
                axes.x *= ACCEL_G_PER_LSB * GRAVITY_EARTH;
                axes.y *= ACCEL_G_PER_LSB * GRAVITY_EARTH;
                axes.z *= ACCEL_G_PER_LSB * GRAVITY_EARTH;
                Unit::MetersPerSecondSquared
            }
        };
        Reading { raw, axes, unit }
    }
}

impl SensorChannel for Accelerometer {
    fn configure<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<(), Error<B::Error>>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        debug!("configuring accelerometer at {:#04x}", self.address);
        bus.select(self.address).map_err(Error::I2c)?;
        apply_config(bus, CONFIG_ACCEL, self.write_check)?;
        delay.delay_ms(SETTLE_DELAY_MS);
        self.configured = true;
        Ok(())
    }

    fn read<B: RegisterBus>(&self, bus: &mut B) -> Result<AccelReading, Error<B::Error>> {
        let raw = self.read_raw(bus)?;
        Ok(self.convert(raw))
    }

    fn needs_configure(&self) -> bool {
        !self.configured || self.policy == ConfigurePolicy::EverySample
    }
}
