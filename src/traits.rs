// Traits used across the library. Could be used more generally than in this lib.

/// A busy delay counted in CPU clock cycles, eg `__delay_cycles` on MSP430.
///
/// Used for the fixed reference settling time before a conversion.
pub trait DelayCycles {
    fn delay_cycles(&mut self, cycles: u32);
}
