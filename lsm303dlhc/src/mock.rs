//! Mock I2C bus and delay for driver tests

use std::collections::BTreeMap;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

/// Register-level transaction, one per byte moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Write { addr: u8, reg: u8, value: u8 },
    Read { addr: u8, reg: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Emulates register-file devices behind an auto-incrementing register
/// pointer. Every byte access is logged; reads and writes can be made to
/// fail per device register.
#[derive(Debug, Default)]
pub struct MockI2c {
    registers: BTreeMap<(u8, u8), u8>,
    failing_reads: Vec<(u8, u8)>,
    failing_writes: Vec<(u8, u8)>,
    pub log: Vec<Transaction>,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, addr: u8, reg: u8, value: u8) {
        self.registers.insert((addr, reg), value);
    }

    pub fn set_block(&mut self, addr: u8, start: u8, values: &[u8]) {
        for (offset, value) in values.iter().enumerate() {
            self.set(addr, start + offset as u8, *value);
        }
    }

    pub fn get(&self, addr: u8, reg: u8) -> Option<u8> {
        self.registers.get(&(addr, reg)).copied()
    }

    pub fn fail_read(&mut self, addr: u8, reg: u8) {
        self.failing_reads.push((addr, reg));
    }

    pub fn fail_write(&mut self, addr: u8, reg: u8) {
        self.failing_writes.push((addr, reg));
    }

    pub fn reads(&self) -> Vec<(u8, u8)> {
        self.log
            .iter()
            .filter_map(|t| match *t {
                Transaction::Read { addr, reg } => Some((addr, reg)),
                Transaction::Write { .. } => None,
            })
            .collect()
    }

    pub fn writes(&self) -> Vec<(u8, u8, u8)> {
        self.log
            .iter()
            .filter_map(|t| match *t {
                Transaction::Write { addr, reg, value } => Some((addr, reg, value)),
                Transaction::Read { .. } => None,
            })
            .collect()
    }
}

impl ErrorType for MockI2c {
    type Error = MockError;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut pointer: Option<u8> = None;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let (&reg, values) = bytes.split_first().ok_or(MockError)?;
                    pointer = Some(reg);
                    for (offset, &value) in values.iter().enumerate() {
                        let reg = reg.wrapping_add(offset as u8);
                        if self.failing_writes.contains(&(address, reg)) {
                            return Err(MockError);
                        }
                        self.log.push(Transaction::Write { addr: address, reg, value });
                        self.registers.insert((address, reg), value);
                    }
                }
                Operation::Read(buffer) => {
                    let start = pointer.ok_or(MockError)?;
                    for (offset, byte) in buffer.iter_mut().enumerate() {
                        let reg = start.wrapping_add(offset as u8);
                        if self.failing_reads.contains(&(address, reg)) {
                            return Err(MockError);
                        }
                        self.log.push(Transaction::Read { addr: address, reg });
                        *byte = self.get(address, reg).unwrap_or(0);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Accumulates requested delay instead of sleeping.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_i2c_write_then_read_back() {
        let mut i2c = MockI2c::new();
        i2c.write(0x19, &[0x20, 0x27]).unwrap();

        let mut buf = [0u8];
        i2c.write_read(0x19, &[0x20], &mut buf).unwrap();
        assert_eq!(buf[0], 0x27);
        assert_eq!(
            i2c.log,
            vec![
                Transaction::Write { addr: 0x19, reg: 0x20, value: 0x27 },
                Transaction::Read { addr: 0x19, reg: 0x20 },
            ]
        );
    }

    #[test]
    fn test_mock_i2c_failing_read_leaves_buffer() {
        let mut i2c = MockI2c::new();
        i2c.set(0x19, 0x28, 0xAB);
        i2c.fail_read(0x19, 0x28);

        let mut buf = [0x55u8];
        assert_eq!(i2c.write_read(0x19, &[0x28], &mut buf), Err(MockError));
        assert_eq!(buf[0], 0x55);
        assert!(i2c.reads().is_empty());
    }

    #[test]
    fn test_mock_delay_accumulates() {
        let mut delay = MockDelay::default();
        delay.delay_ms(50);
        delay.delay_us(10);
        assert_eq!(delay.total_ns, 50_010_000);
    }
}
