use embedded_hal::delay::DelayNs;
use log::info;
use lsm303dlhc::registers::{ACCEL_REGS, MAG_REGS};
use lsm303dlhc::{
    dump_config, AccelReading, Accelerometer, Error, MagReading, Magnetometer, RegisterBus,
    SensorChannel,
};

#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub accel: AccelReading,
    pub mag: MagReading,
}

/// Both channels of the package, polled one after the other on a shared bus.
pub struct SensorHub {
    accel: Accelerometer,
    mag: Magnetometer,
}

impl SensorHub {
    pub fn new(accel: Accelerometer, mag: Magnetometer) -> Self {
        Self { accel, mag }
    }

    pub fn configure<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<(), Error<B::Error>>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        info!("Configuring accelerometer at {:#04x}", self.accel.address());
        self.accel.configure(bus, delay)?;
        info!("Configuring magnetometer at {:#04x}", self.mag.address());
        self.mag.verify_identity(bus)?;
        self.mag.configure(bus, delay)?;
        info!("LSM303DLHC config complete");
        Ok(())
    }

    /// One poll cycle. The accelerometer sequence finishes before the
    /// magnetometer is selected.
    pub fn poll<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<Sample, Error<B::Error>>
    where
        B: RegisterBus,
        D: DelayNs,
    {
        let accel = self.accel.sample(bus, delay)?;
        let mag = self.mag.sample(bus, delay)?;
        Ok(Sample { accel, mag })
    }

    pub fn dump_registers<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), Error<B::Error>> {
        info!("Dumping ACCEL_REGS config");
        dump_config(bus, self.accel.address(), ACCEL_REGS)?;
        info!("Dumping MAG_REGS config");
        dump_config(bus, self.mag.address(), MAG_REGS)?;
        Ok(())
    }
}
