use crate::registers::*;

/// Blocking wait after a configuration table is written, before the output
/// registers reflect it.
pub const SETTLE_DELAY_MS: u32 = 50;

/// Gain programmed by `CONFIG_MAG`; the gauss conversion is derived from it.
pub const MAG_GAIN: MagGain = MagGain::Gauss1_3;

/// Accelerometer resolution at ±2 g in normal mode.
pub const ACCEL_G_PER_LSB: f64 = 0.001;
pub const GRAVITY_EARTH: f64 = 9.81;

pub const CONFIG_ACCEL: &[RegConfig<AccelReg>] = &[
    RegConfig {
        op: RegOp::Write,
        reg: AccelReg::CtrlReg1A,
        value: (AccelOdr::Hz10 as u8) << ACCEL_ODR_LOC
            | CtrlReg1AFlags::XEN.bits()
            | CtrlReg1AFlags::YEN.bits()
            | CtrlReg1AFlags::ZEN.bits(), // 10Hz, normal power, all axes
    },
    RegConfig {
        op: RegOp::Write,
        reg: AccelReg::CtrlReg4A,
        value: (AccelBDU::Continuous as u8) << ACCEL_BDU_LOC
            | (AccelBLE::LittleEndian as u8) << ACCEL_BLE_LOC
            | (AccelFullScale::G2 as u8) << ACCEL_FS_LOC, // ±2g
    },
];

// The device powers up in sleep mode, so the mode register goes first.
pub const CONFIG_MAG: &[RegConfig<MagReg>] = &[
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::MrRegM,
        value: MagConvMode::Continuous as u8,
    },
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::CraRegM,
        value: (MagOdr::Hz15 as u8) << MAG_ODR_LOC, // temperature sensor off
    },
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::CrbRegM,
        value: (MAG_GAIN as u8) << MAG_GAIN_LOC, // ±1.3 gauss
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn writes<R: Register>(config: &[RegConfig<R>]) -> Vec<(u8, u8)> {
        config
            .iter()
            .filter(|entry| entry.op == RegOp::Write)
            .map(|entry| (entry.reg.addr(), entry.value))
            .collect()
    }

    #[test]
    fn test_accel_config_matches_register_map() {
        assert_eq!(writes(CONFIG_ACCEL), vec![(0x20, 0x27), (0x23, 0x00)]);
    }

    #[test]
    fn test_mag_config_matches_register_map() {
        assert_eq!(
            writes(CONFIG_MAG),
            vec![(0x02, 0x00), (0x00, 0x10), (0x01, 0x20)]
        );
    }

    #[test]
    fn test_mag_gain_sensitivity() {
        assert_eq!(MAG_GAIN.lsb_per_gauss_xy(), 1100.0);
        assert_eq!(MAG_GAIN.lsb_per_gauss_z(), 980.0);
    }
}
