//! Register access for the ADC10 peripheral.
//!
//! The driver never touches memory directly; it goes through [`RegisterBlock`], which
//! the per-chip definition supplies. [`Mmio`] is a volatile implementation for a
//! caller-provided [`RegisterMap`].

use core::ptr;

/// `ADC10CTL0` bit masks.
pub mod ctl0 {
    /// Start conversion
    pub const ADC10SC: u16 = 0x0001;
    /// Enable conversion. Locks the configuration while set.
    pub const ENC: u16 = 0x0002;
    /// Conversion complete interrupt flag
    pub const ADC10IFG: u16 = 0x0004;
    /// Interrupt enable
    pub const ADC10IE: u16 = 0x0008;
    /// Peripheral power
    pub const ADC10ON: u16 = 0x0010;
    /// Reference generator on
    pub const REFON: u16 = 0x0020;
    /// Reference generator voltage select; 2.5V when set, 1.5V otherwise.
    pub const REF2_5V: u16 = 0x0040;
    /// Multiple sample and conversion
    pub const MSC: u16 = 0x0080;
    /// Reference buffer burst mode
    pub const REFBURST: u16 = 0x0100;
    /// Reference output to the VREF+ pin
    pub const REFOUT: u16 = 0x0200;
    /// Reduced sampling rate (~50 ksps)
    pub const ADC10SR: u16 = 0x0400;

    pub const ADC10SHT_0: u16 = 0x0000;
    pub const ADC10SHT_1: u16 = 0x0800;
    pub const ADC10SHT_2: u16 = 0x1000;
    pub const ADC10SHT_3: u16 = 0x1800;
    pub const ADC10SHT_MASK: u16 = 0x1800;

    pub const SREF_0: u16 = 0x0000;
    pub const SREF_1: u16 = 0x2000;
    pub const SREF_2: u16 = 0x4000;
    pub const SREF_3: u16 = 0x6000;
    pub const SREF_4: u16 = 0x8000;
    pub const SREF_5: u16 = 0xA000;
    pub const SREF_6: u16 = 0xC000;
    pub const SREF_7: u16 = 0xE000;
    pub const SREF_MASK: u16 = 0xE000;

    /// Low-order bits managed by the conversion state machine and hardware, not
    /// by a configuration descriptor.
    pub const HW_OWNED: u16 = ADC10SC | ENC | ADC10IFG | ADC10IE;

    /// Bits the hardware only accepts writes to while `ENC` is clear.
    pub const LOCKED: u16 = !HW_OWNED;
}

/// `ADC10CTL1` bit masks.
pub mod ctl1 {
    /// Conversion in progress
    pub const ADC10BUSY: u16 = 0x0001;

    pub const CONSEQ_0: u16 = 0x0000;
    pub const CONSEQ_1: u16 = 0x0002;
    pub const CONSEQ_2: u16 = 0x0004;
    pub const CONSEQ_3: u16 = 0x0006;
    pub const CONSEQ_MASK: u16 = 0x0006;

    pub const ADC10SSEL_0: u16 = 0x0000;
    pub const ADC10SSEL_1: u16 = 0x0008;
    pub const ADC10SSEL_2: u16 = 0x0010;
    pub const ADC10SSEL_3: u16 = 0x0018;
    pub const ADC10SSEL_MASK: u16 = 0x0018;

    /// Clock divider field. Owned by the clock setup, not by this driver.
    pub const ADC10DIV_MASK: u16 = 0x00E0;

    /// Invert the sample-and-hold signal
    pub const ISSH: u16 = 0x0100;
    /// Left-justified (2s complement on some variants) result format
    pub const ADC10DF: u16 = 0x0200;

    pub const SHS_0: u16 = 0x0000;
    pub const SHS_1: u16 = 0x0400;
    pub const SHS_2: u16 = 0x0800;
    pub const SHS_3: u16 = 0x0C00;
    pub const SHS_MASK: u16 = 0x0C00;

    /// Input channel select field.
    pub const INCH_SHIFT: u16 = 12;
    pub const INCH_MASK: u16 = 0xF000;

    /// Bits the hardware only accepts writes to while `ENC` is clear.
    pub const LOCKED: u16 = !ADC10BUSY;
}

// The configuration words are composed by OR-ing whole fields, so they must not overlap
// each other or the bits owned elsewhere.
const _: () = {
    let primary = [
        ctl0::SREF_MASK,
        ctl0::ADC10SHT_MASK,
        ctl0::ADC10SR,
        ctl0::REFOUT,
        ctl0::REFBURST,
        ctl0::MSC,
        ctl0::REF2_5V,
        ctl0::REFON,
    ];
    let mut seen = ctl0::HW_OWNED | ctl0::ADC10ON;
    let mut i = 0;
    while i < primary.len() {
        assert!(seen & primary[i] == 0);
        seen |= primary[i];
        i += 1;
    }

    let secondary = [
        ctl1::SHS_MASK,
        ctl1::ADC10DF,
        ctl1::ISSH,
        ctl1::CONSEQ_MASK,
        ctl1::ADC10SSEL_MASK,
    ];
    let mut seen = ctl1::INCH_MASK | ctl1::ADC10DIV_MASK | ctl1::ADC10BUSY;
    let mut i = 0;
    while i < secondary.len() {
        assert!(seen & secondary[i] == 0);
        seen |= secondary[i];
        i += 1;
    }
};

/// The registers the driver reads or writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// `ADC10CTL0`: primary control word
    Ctl0 = 0,
    /// `ADC10CTL1`: secondary control word
    Ctl1 = 1,
    /// `ADC10MEM`: conversion result. Read-only.
    Mem = 2,
    /// `ADC10AE0`: analog enable for A0 - A7
    Ae0 = 3,
    /// `ADC10AE1`: analog enable for A12 - A15
    #[cfg(ae1)]
    Ae1 = 4,
}

/// Access to the ADC10 register set.
///
/// Values are 16 bits wide; the byte-wide enable registers are zero-extended on read
/// and truncated on write.
pub trait RegisterBlock {
    fn read(&self, reg: Reg) -> u16;

    /// Writes to `Reg::Mem` must be ignored; the result register is read-only.
    fn write(&mut self, reg: Reg, value: u16);

    /// Read, transform and write back a register.
    fn modify<F: FnOnce(u16) -> u16>(&mut self, reg: Reg, f: F) {
        let val = self.read(reg);
        self.write(reg, f(val));
    }
}

/// Addresses of the ADC10 registers on a given chip.
#[derive(Clone, Copy, Debug)]
pub struct RegisterMap {
    pub ctl0: usize,
    pub ctl1: usize,
    pub mem: usize,
    pub ae0: usize,
    #[cfg(ae1)]
    pub ae1: usize,
}

/// Memory-mapped register block, accessed with volatile reads and writes.
pub struct Mmio {
    map: RegisterMap,
}

impl Mmio {
    /// # Safety
    /// `map` must hold the addresses of this chip's ADC10 registers, and the returned value
    /// must be the only thing accessing them for as long as it lives.
    pub const unsafe fn new(map: RegisterMap) -> Self {
        Self { map }
    }

    fn addr(&self, reg: Reg) -> usize {
        match reg {
            Reg::Ctl0 => self.map.ctl0,
            Reg::Ctl1 => self.map.ctl1,
            Reg::Mem => self.map.mem,
            Reg::Ae0 => self.map.ae0,
            #[cfg(ae1)]
            Reg::Ae1 => self.map.ae1,
        }
    }

    fn is_byte_wide(reg: Reg) -> bool {
        !matches!(reg, Reg::Ctl0 | Reg::Ctl1 | Reg::Mem)
    }
}

impl RegisterBlock for Mmio {
    fn read(&self, reg: Reg) -> u16 {
        let addr = self.addr(reg);
        // NOTE(unsafe): Addresses were vouched for in `Mmio::new`.
        unsafe {
            if Self::is_byte_wide(reg) {
                ptr::read_volatile(addr as *const u8) as u16
            } else {
                ptr::read_volatile(addr as *const u16)
            }
        }
    }

    fn write(&mut self, reg: Reg, value: u16) {
        if reg == Reg::Mem {
            return;
        }
        let addr = self.addr(reg);
        unsafe {
            if Self::is_byte_wide(reg) {
                ptr::write_volatile(addr as *mut u8, value as u8)
            } else {
                ptr::write_volatile(addr as *mut u16, value)
            }
        }
    }
}
