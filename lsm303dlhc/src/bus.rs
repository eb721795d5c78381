use core::fmt::Debug;

use embedded_hal::i2c::{I2c, SevenBitAddress};

/// Register-addressed access to whichever device is currently selected.
///
/// Selection is bus state: it stays in effect for every following operation
/// until changed, so callers must select before each register sequence.
pub trait RegisterBus {
    type Error: Debug;

    fn select(&mut self, device: u8) -> Result<(), Self::Error>;
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error>;
    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error>;
}

/// `RegisterBus` over an `embedded-hal` I2C controller.
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C> I2cBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c, address: 0 }
    }

    pub fn i2c(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    pub fn selected(&self) -> SevenBitAddress {
        self.address
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterBus for I2cBus<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn select(&mut self, device: u8) -> Result<(), Self::Error> {
        self.address = device;
        Ok(())
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[reg, value])
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockI2c, Transaction};

    #[test]
    fn test_register_access_targets_selected_device() {
        let mut bus = I2cBus::new(MockI2c::new());
        bus.select(0x19).unwrap();
        bus.write_register(0x20, 0x27).unwrap();
        bus.select(0x1E).unwrap();
        bus.write_register(0x20, 0x11).unwrap();

        bus.select(0x19).unwrap();
        assert_eq!(bus.read_register(0x20).unwrap(), 0x27);
        assert_eq!(bus.selected(), 0x19);

        let log = bus.destroy().log;
        assert_eq!(
            log,
            vec![
                Transaction::Write { addr: 0x19, reg: 0x20, value: 0x27 },
                Transaction::Write { addr: 0x1E, reg: 0x20, value: 0x11 },
                Transaction::Read { addr: 0x19, reg: 0x20 },
            ]
        );
    }

    #[test]
    fn test_read_error_propagates() {
        let mut i2c = MockI2c::new();
        i2c.fail_read(0x1E, 0x03);
        let mut bus = I2cBus::new(i2c);
        bus.select(0x1E).unwrap();
        assert!(bus.read_register(0x03).is_err());
    }
}
