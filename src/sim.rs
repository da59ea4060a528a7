//! A simulated ADC10 register file, for host tests.

use crate::regs::{Reg, RegisterBlock, ctl0, ctl1};

const REG_COUNT: usize = 5;

pub struct SimRegs {
    regs: [u16; REG_COUNT],
    /// Loaded into `ADC10MEM` when a conversion completes.
    pub result: u16,
    /// When false, conversions never complete.
    pub responsive: bool,
    pub conversions: u32,
    /// Every write, in order, as the value the register ended up holding.
    pub writes: Vec<(Reg, u16)>,
}

impl SimRegs {
    pub fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
            result: 0,
            responsive: true,
            conversions: 0,
            writes: Vec::new(),
        }
    }

    /// Reach into the hardware directly, bypassing the lock model.
    pub fn poke(&mut self, reg: Reg, value: u16) {
        self.regs[reg as usize] = value;
    }

    pub fn peek(&self, reg: Reg) -> u16 {
        self.regs[reg as usize]
    }

    fn locked(&self) -> bool {
        self.peek(Reg::Ctl0) & ctl0::ENC != 0
    }
}

impl RegisterBlock for SimRegs {
    fn read(&self, reg: Reg) -> u16 {
        self.peek(reg)
    }

    fn write(&mut self, reg: Reg, value: u16) {
        let prev = self.peek(reg);
        let mut val = match reg {
            Reg::Mem => prev,
            Reg::Ctl0 if self.locked() => (prev & ctl0::LOCKED) | (value & !ctl0::LOCKED),
            Reg::Ctl1 if self.locked() => prev,
            Reg::Ctl0 => value,
            Reg::Ctl1 => (prev & ctl1::ADC10BUSY) | (value & !ctl1::ADC10BUSY),
            // Byte-wide enable registers.
            _ => value & 0xFF,
        };
        if reg == Reg::Ctl0 {
            let go = ctl0::ADC10ON | ctl0::ENC | ctl0::ADC10SC;
            if val & ctl0::ADC10SC != 0 && self.responsive && val & go == go {
                val = (val & !ctl0::ADC10SC) | ctl0::ADC10IFG;
                self.regs[Reg::Mem as usize] = self.result;
                self.conversions += 1;
            }
        }
        self.regs[reg as usize] = val;
        self.writes.push((reg, val));
    }
}
