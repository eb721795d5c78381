#![allow(unused_imports)]
use bitflags::bitflags;

macro_rules! registers {
    (
        $enum_name:ident, $slice_name:ident {
            $($name:ident = $val:expr),* $(,)?
        }
    ) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $enum_name {
            $($name = $val),*
        }

        pub const $slice_name: &[$enum_name] = &[
            $($enum_name::$name),*
        ];

        impl $enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($enum_name::$name => stringify!($name),)*
                }
            }
        }

        impl Register for $enum_name {
            fn addr(self) -> u8 {
                self as u8
            }
        }

        impl NamedRegister for $enum_name {
            fn name(&self) -> &'static str {
                self.name()
            }
        }

        impl From<$enum_name> for u8 {
            fn from(r: $enum_name) -> u8 {
                r as u8
            }
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegOp {
    Read,
    Write,
}

pub trait NamedRegister: Register {
    fn name(&self) -> &'static str;
}

pub trait Register: Copy {
    fn addr(self) -> u8;
}

#[derive(Clone, Copy, Debug)]
pub struct RegConfig<R: Register> {
    pub op: RegOp,
    pub reg: R,
    pub value: u8,
}

/// Bus address of the accelerometer die (SA0 tied high).
pub const ACCEL_ADDRESS: u8 = 0x19;
/// Bus address of the magnetometer die.
pub const MAG_ADDRESS: u8 = 0x1E;

registers! {
    AccelReg, ACCEL_REGS {
        CtrlReg1A = 0x20,
        CtrlReg2A = 0x21,
        CtrlReg3A = 0x22,
        CtrlReg4A = 0x23,
        CtrlReg5A = 0x24,
        CtrlReg6A = 0x25,
        ReferenceA = 0x26,
        StatusRegA = 0x27,
        OutXLA = 0x28,
        OutXHA = 0x29,
        OutYLA = 0x2A,
        OutYHA = 0x2B,
        OutZLA = 0x2C,
        OutZHA = 0x2D,
        FifoCtrlRegA = 0x2E,
        FifoSrcRegA = 0x2F,
        Int1CfgA = 0x30,
        Int1SrcA = 0x31,
        Int1ThsA = 0x32,
        Int1DurationA = 0x33,
    }
}

registers! {
    MagReg, MAG_REGS {
        CraRegM = 0x00,
        CrbRegM = 0x01,
        MrRegM = 0x02,
        OutXHM = 0x03,
        OutXLM = 0x04,
        OutZHM = 0x05,
        OutZLM = 0x06,
        OutYHM = 0x07,
        OutYLM = 0x08,
        SrRegM = 0x09,
        IraRegM = 0x0A,
        IrbRegM = 0x0B,
        IrcRegM = 0x0C,
        TempOutHM = 0x31,
        TempOutLM = 0x32,
    }
}

/* CTRL_REG1_A
 * B7   B6   B5   B4   B3   B2   B1   B0
 * ODR3 ODR2 ODR1 ODR0 LPEN ZEN  YEN  XEN
*/
bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CtrlReg1AFlags: u8 {
        const XEN  = 1 << 0;
        const YEN  = 1 << 1;
        const ZEN  = 1 << 2;
        const LPEN = 1 << 3;
    }
}

pub const ACCEL_ODR_LOC: u8 = 4;
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelOdr {
    PowerDown = 0,
    Hz1       = 1,
    Hz10      = 2,
    Hz25      = 3,
    Hz50      = 4,
    Hz100     = 5,
    Hz200     = 6,
    Hz400     = 7,
}

/* CTRL_REG4_A
 * B7   B6   B5   B4   B3   B2   B1   B0
 * BDU  BLE  FS1  FS0  HR   0    0    SIM
*/
bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CtrlReg4AFlags: u8 {
        const SIM = 1 << 0;
        const HR  = 1 << 3;
        const BLE = 1 << 6;
        const BDU = 1 << 7;
    }
}

pub const ACCEL_FS_LOC: u8 = 4;
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelFullScale {
    G2  = 0,
    G4  = 1,
    G8  = 2,
    G16 = 3,
}

pub const ACCEL_BLE_LOC: u8 = 6;
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelBLE {
    LittleEndian = 0,
    BigEndian    = 1,
}

pub const ACCEL_BDU_LOC: u8 = 7;
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelBDU {
    Continuous = 0,
    BlockMode  = 1,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StatusRegAFlags: u8 {
        const XDA   = 1 << 0;
        const YDA   = 1 << 1;
        const ZDA   = 1 << 2;
        const ZYXDA = 1 << 3;
        const XOR   = 1 << 4;
        const YOR   = 1 << 5;
        const ZOR   = 1 << 6;
        const ZYXOR = 1 << 7;
    }
}

/* CRA_REG_M
 * B7      B6   B5   B4   B3   B2   B1   B0
 * TEMP_EN 0    0    DO2  DO1  DO0  0    0
*/
pub const MAG_TEMP_EN_LOC: u8 = 7;
pub const MAG_ODR_LOC: u8 = 2;
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagOdr {
    Hz0_75 = 0,
    Hz1_5  = 1,
    Hz3    = 2,
    Hz7_5  = 3,
    Hz15   = 4,
    Hz30   = 5,
    Hz75   = 6,
    Hz220  = 7,
}

/* CRB_REG_M
 * B7   B6   B5   B4   B3   B2   B1   B0
 * GN2  GN1  GN0  0    0    0    0    0
*/
pub const MAG_GAIN_LOC: u8 = 5;
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagGain {
    Gauss1_3 = 1,
    Gauss1_9 = 2,
    Gauss2_5 = 3,
    Gauss4_0 = 4,
    Gauss4_7 = 5,
    Gauss5_6 = 6,
    Gauss8_1 = 7,
}

impl MagGain {
    /// X/Y sensitivity in LSB per gauss.
    pub const fn lsb_per_gauss_xy(self) -> f64 {
        match self {
            MagGain::Gauss1_3 => 1100.0,
            MagGain::Gauss1_9 => 855.0,
            MagGain::Gauss2_5 => 670.0,
            MagGain::Gauss4_0 => 450.0,
            MagGain::Gauss4_7 => 400.0,
            MagGain::Gauss5_6 => 330.0,
            MagGain::Gauss8_1 => 230.0,
        }
    }

    /// Z sensitivity in LSB per gauss; the Z sensor is less sensitive at every gain.
    pub const fn lsb_per_gauss_z(self) -> f64 {
        match self {
            MagGain::Gauss1_3 => 980.0,
            MagGain::Gauss1_9 => 760.0,
            MagGain::Gauss2_5 => 600.0,
            MagGain::Gauss4_0 => 400.0,
            MagGain::Gauss4_7 => 355.0,
            MagGain::Gauss5_6 => 295.0,
            MagGain::Gauss8_1 => 205.0,
        }
    }
}

/* MR_REG_M
 * B7   B6   B5   B4   B3   B2   B1   B0
 * 0    0    0    0    0    0    MD1  MD0
*/
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagConvMode {
    Continuous = 0,
    SingleConv = 1,
    Sleep      = 3,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SrRegMFlags: u8 {
        const DRDY = 1 << 0;
        const LOCK = 1 << 1;
    }
}

/// Contents of IRA/IRB/IRC_REG_M on a genuine part.
pub const MAG_IDENTIFICATION: [u8; 3] = *b"H43";
