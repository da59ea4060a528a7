//! API for the ADC10 (10-bit Analog to Digital Converter)
//!
//! Configuration is described by an [`AdcConfig`], which resolves to the two control
//! words `ADC10CTL0` and `ADC10CTL1`. A [`Channel`] is enabled (connecting its pin) and
//! selected independently of the configuration. Conversions are software-started and
//! completion is polled; there is no interrupt or DMA path.
//!
//! ```ignore
//! const CFG: AdcConfig = AdcConfig {
//!     reference: Reference::VccVss,
//!     ..AdcConfig::DEFAULT
//! };
//!
//! let mut adc = Adc::new(regs);
//! adc.apply_config(&CFG);
//! let reading = adc.sample(Channel::A3, &mut delay);
//! ```

use core::convert::Infallible;

use cfg_if::cfg_if;

use crate::{
    error::{Error, Result},
    regs::{Reg, RegisterBlock, ctl0, ctl1},
    traits::DelayCycles,
};

/// Largest raw result of a right-aligned conversion.
pub const MAX_VALUE: u16 = (1 << 10) - 1;

/// CPU cycles to let the reference voltage settle before `Adc::sample` starts a conversion.
pub const SETTLE_CYCLES: u32 = 30;

/// Reference voltage selection, as VR+ / VR-. (SREFx)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Reference {
    /// VR+ = VCC, VR- = VSS
    VccVss = ctl0::SREF_0,
    /// VR+ = VREF+ (internal), VR- = VSS
    VrefPlusVss = ctl0::SREF_1,
    /// VR+ = VeREF+ (external), VR- = VSS
    VeRefPlusVss = ctl0::SREF_2,
    /// VR+ = buffered VeREF+, VR- = VSS
    BufferedVeRefPlusVss = ctl0::SREF_3,
    /// VR+ = VCC, VR- = VREF- / VeREF-
    VccVrefMinus = ctl0::SREF_4,
    /// VR+ = VREF+, VR- = VREF- / VeREF-
    VrefPlusVrefMinus = ctl0::SREF_5,
    /// VR+ = VeREF+, VR- = VREF- / VeREF-
    VeRefPlusVrefMinus = ctl0::SREF_6,
    /// VR+ = buffered VeREF+, VR- = VREF- / VeREF-
    BufferedVeRefPlusVrefMinus = ctl0::SREF_7,
}

/// Sample-and-hold time, in ADC10CLK cycles. (ADC10SHTx)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum SampleHold {
    Clk4 = ctl0::ADC10SHT_0,
    Clk8 = ctl0::ADC10SHT_1,
    Clk16 = ctl0::ADC10SHT_2,
    Clk64 = ctl0::ADC10SHT_3,
}

/// Maximum sampling rate the reference buffer is set up for. (ADC10SR)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum SampleRate {
    /// Up to ~200 ksps
    High = 0,
    /// Up to ~50 ksps, with lower reference buffer current.
    Low = ctl0::ADC10SR,
}

/// Whether the reference is output on the VREF+ pin. (REFOUT)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum RefOutput {
    Off = 0,
    On = ctl0::REFOUT,
}

/// Reference buffer power mode. (REFBURST)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum RefBuffer {
    AlwaysOn = 0,
    /// Buffer on only during sample-and-conversion.
    Burst = ctl0::REFBURST,
}

/// (MSC)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Repeat {
    /// Each conversion needs its own trigger.
    Single = 0,
    /// After the first trigger, further conversions follow automatically.
    Multiple = ctl0::MSC,
}

/// Internal reference generator voltage. (REF2_5V)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum VrefVoltage {
    V1_5 = 0,
    V2_5 = ctl0::REF2_5V,
}

/// Internal reference generator power. (REFON)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum VrefState {
    Off = 0,
    On = ctl0::REFON,
}

/// Sample-and-hold trigger source. (SHSx)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Trigger {
    /// The `ADC10SC` bit, ie `Adc::start`.
    Software = ctl1::SHS_0,
    Timer0AOut1 = ctl1::SHS_1,
    Timer0AOut0 = ctl1::SHS_2,
    Timer0AOut2 = ctl1::SHS_3,
}

/// ADC data register alignment. (ADC10DF)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Align {
    /// Right alignment of output data
    Right = 0,
    /// Left alignment of output data
    Left = ctl1::ADC10DF,
}

/// (ISSH)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum TriggerPolarity {
    Normal = 0,
    Inverted = ctl1::ISSH,
}

/// ADC10CLK source. (ADC10SSELx)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ClockSource {
    /// The peripheral's internal oscillator
    Adc10Osc = ctl1::ADC10SSEL_0,
    Aclk = ctl1::ADC10SSEL_1,
    Mclk = ctl1::ADC10SSEL_2,
    Smclk = ctl1::ADC10SSEL_3,
}

/// Conversion sequence mode. (CONSEQx)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConversionMode {
    SingleChannel = ctl1::CONSEQ_0,
    ChannelSequence = ctl1::CONSEQ_1,
    RepeatChannel = ctl1::CONSEQ_2,
    RepeatSequence = ctl1::CONSEQ_3,
}

/// A complete ADC10 configuration.
///
/// Every field has to be given, so an incomplete configuration is a compile error.
/// The control words are computed by `const fn`s; declare the configuration as a `const`
/// to resolve them at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    pub reference: Reference,
    pub sample_hold: SampleHold,
    pub sample_rate: SampleRate,
    pub ref_output: RefOutput,
    pub ref_buffer: RefBuffer,
    pub repeat: Repeat,
    pub vref_voltage: VrefVoltage,
    pub vref_state: VrefState,
    pub trigger: Trigger,
    pub align: Align,
    pub trigger_polarity: TriggerPolarity,
    pub clock: ClockSource,
    pub mode: ConversionMode,
}

impl AdcConfig {
    /// Single software-triggered conversions against the internal 2.5V reference, clocked
    /// from SMCLK.
    pub const DEFAULT: Self = Self {
        reference: Reference::VrefPlusVss,
        sample_hold: SampleHold::Clk16,
        sample_rate: SampleRate::Low,
        ref_output: RefOutput::Off,
        ref_buffer: RefBuffer::Burst,
        repeat: Repeat::Single,
        vref_voltage: VrefVoltage::V2_5,
        vref_state: VrefState::On,
        trigger: Trigger::Software,
        align: Align::Right,
        trigger_polarity: TriggerPolarity::Normal,
        clock: ClockSource::Smclk,
        mode: ConversionMode::SingleChannel,
    };

    /// The `ADC10CTL0` fields this configuration owns.
    pub const fn ctl0_bits(&self) -> u16 {
        self.reference as u16
            | self.sample_hold as u16
            | self.sample_rate as u16
            | self.ref_output as u16
            | self.ref_buffer as u16
            | self.repeat as u16
            | self.vref_voltage as u16
            | self.vref_state as u16
    }

    /// The `ADC10CTL1` fields this configuration owns.
    pub const fn ctl1_bits(&self) -> u16 {
        self.trigger as u16
            | self.align as u16
            | self.trigger_polarity as u16
            | self.mode as u16
            | self.clock as u16
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An ADC input. The discriminant is the `INCHx` select code.
///
/// Indices 8 - 11 are internal sources. 12 - 15 are pins on variants that have them, and
/// (VCC - VSS) / 2 otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    A0 = 0,
    A1 = 1,
    A2 = 2,
    A3 = 3,
    A4 = 4,
    A5 = 5,
    A6 = 6,
    A7 = 7,
    /// VeREF+
    VeRefPlus = 8,
    /// VREF- / VeREF-
    VrefMinus = 9,
    /// Internal temperature sensor
    Temperature = 10,
    /// (VCC - VSS) / 2
    VccHalf = 11,
    A12 = 12,
    A13 = 13,
    A14 = 14,
    A15 = 15,
}

impl Channel {
    /// VeREF- shares its select code with VREF-.
    pub const VE_REF_MINUS: Self = Self::VrefMinus;

    const ALL: [Self; 16] = [
        Self::A0,
        Self::A1,
        Self::A2,
        Self::A3,
        Self::A4,
        Self::A5,
        Self::A6,
        Self::A7,
        Self::VeRefPlus,
        Self::VrefMinus,
        Self::Temperature,
        Self::VccHalf,
        Self::A12,
        Self::A13,
        Self::A14,
        Self::A15,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::ALL.len() {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// This channel's `INCHx` field, in place in `ADC10CTL1`.
    pub const fn select_bits(self) -> u16 {
        (self as u16) << ctl1::INCH_SHIFT
    }

    /// The analog enable register and bit that connect this channel's pin.
    ///
    /// `None` for 8 - 11, which are never enabled, and for 12 - 15 on variants without
    /// `ADC10AE1`.
    pub const fn enable_bit(self) -> Option<(Reg, u8)> {
        let index = self.index();
        if index <= 7 {
            return Some((Reg::Ae0, index));
        }
        cfg_if! {
            if #[cfg(ae1)] {
                if index >= 12 {
                    return Some((Reg::Ae1, index - 8));
                }
            }
        }
        None
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Self::from_index(index).ok_or(Error::InvalidChannel(index))
    }
}

/// Convert a right-aligned reading to millivolts, given the reference voltage.
///
/// Readings above `MAX_VALUE`, eg left-aligned ones, are treated as full scale.
pub const fn to_millivolts(sample: u16, vref_mv: u16) -> u16 {
    let sample = if sample > MAX_VALUE { MAX_VALUE } else { sample };
    ((sample as u32 * vref_mv as u32) / MAX_VALUE as u32) as u16
}

/// Analog Digital Converter Peripheral
///
/// Owns the register block; there is no other state. Not safe to share with an
/// interrupt handler without external locking.
pub struct Adc<R> {
    /// ADC Register
    regs: R,
}

impl<R: RegisterBlock> Adc<R> {
    /// Take ownership of the peripheral. Does not write any register.
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Release the register block.
    pub fn free(self) -> R {
        self.regs
    }

    /// Unlock, then write both control words.
    ///
    /// The state bits of `ADC10CTL0`, and the channel select and clock divider fields of
    /// `ADC10CTL1`, are left as they are.
    pub fn apply_config(&mut self, cfg: &AdcConfig) {
        // Control word writes are ignored by the hardware while ENC is set.
        self.unlock();

        let ctl0_bits = cfg.ctl0_bits();
        let ctl1_bits = cfg.ctl1_bits();

        self.regs
            .modify(Reg::Ctl0, |r| (r & ctl0::HW_OWNED) | ctl0_bits);
        self.regs.modify(Reg::Ctl1, |r| {
            (r & (ctl1::INCH_MASK | ctl1::ADC10DIV_MASK)) | ctl1_bits
        });

        debug!(
            "ADC10 configured: CTL0 {=u16:#x}, CTL1 {=u16:#x}",
            ctl0_bits, ctl1_bits
        );
    }

    /// Connect a channel's pin to the converter, by setting its analog enable bit.
    ///
    /// Has no effect for channels without an enable bit; see [`Channel::enable_bit`].
    pub fn enable_channel(&mut self, channel: Channel) {
        match channel.enable_bit() {
            Some((reg, bit)) => self.regs.modify(reg, |r| r | (1 << bit)),
            None => trace!("ADC10: no analog enable bit for {}", channel),
        }
    }

    /// Route a channel to the converter. Enable bits of other channels are not touched.
    pub fn select_channel(&mut self, channel: Channel) {
        self.regs.modify(Reg::Ctl1, |r| {
            (r & !ctl1::INCH_MASK) | channel.select_bits()
        });
        trace!("ADC10: selected {}", channel);
    }

    /// The channel currently routed to the converter.
    pub fn selected_channel(&self) -> Channel {
        let index = (self.regs.read(Reg::Ctl1) & ctl1::INCH_MASK) >> ctl1::INCH_SHIFT;
        Channel::ALL[index as usize]
    }

    /// Allow configuration changes.
    pub fn unlock(&mut self) {
        self.regs.modify(Reg::Ctl0, |r| r & !ctl0::ENC);
    }

    /// Commit the configuration without starting a conversion.
    pub fn lock(&mut self) {
        self.regs.modify(Reg::Ctl0, |r| r | ctl0::ENC);
    }

    /// Power up, lock the configuration and start a conversion.
    ///
    /// Expects a configuration and channel to have been set up already.
    pub fn start(&mut self) {
        self.regs.modify(Reg::Ctl0, |r| r | ctl0::ADC10ON);
        self.regs
            .modify(Reg::Ctl0, |r| r | ctl0::ENC | ctl0::ADC10SC);
        trace!("ADC10: conversion started");
    }

    /// Check for a finished conversion once. If there is one, acknowledge it.
    pub fn try_wait(&mut self) -> nb::Result<(), Infallible> {
        if !self.conversion_complete() {
            return Err(nb::Error::WouldBlock);
        }
        self.regs.modify(Reg::Ctl0, |r| r & !ctl0::ADC10IFG);
        Ok(())
    }

    /// Block until the conversion finishes, and acknowledge it.
    ///
    /// Does not time out: if the peripheral never completes, this never returns.
    pub fn wait(&mut self) {
        let Ok(()) = nb::block!(self.try_wait());
    }

    /// Like `wait`, but gives up after `max_iters` polls of the completion flag.
    pub fn wait_timeout(&mut self, max_iters: u32) -> Result<()> {
        let mut i = 0;
        while !self.conversion_complete() {
            i += 1;
            if i >= max_iters {
                warn!("ADC10: no conversion result after {=u32} polls", max_iters);
                return Err(Error::RegisterUnchanged);
            }
        }
        self.regs.modify(Reg::Ctl0, |r| r & !ctl0::ADC10IFG);
        Ok(())
    }

    /// The raw conversion result. Only meaningful once `wait` has returned.
    pub fn read(&self) -> u16 {
        self.regs.read(Reg::Mem)
    }

    /// Power down the converter and the reference, leaving it unlocked.
    pub fn disable(&mut self) {
        // These bits are lock-protected.
        self.unlock();
        self.regs.modify(Reg::Ctl0, |r| {
            r & !(ctl0::REFOUT | ctl0::REFON | ctl0::ADC10ON | ctl0::ENC)
        });
        debug!("ADC10 disabled");
    }

    /// Take a single reading: enable and select the channel, let the reference settle,
    /// then convert and return the raw result.
    ///
    /// The converter and the channel's pin are left enabled afterwards, so repeated
    /// readings don't pay for power-up. Call `disable` to shut it down.
    pub fn sample<D: DelayCycles>(&mut self, channel: Channel, delay: &mut D) -> u16 {
        self.enable_channel(channel);
        self.unlock();
        self.select_channel(channel);
        delay.delay_cycles(SETTLE_CYCLES);

        self.start();
        self.wait();
        self.read()
    }

    /// The configuration is locked (ENC set).
    pub fn is_locked(&self) -> bool {
        self.regs.read(Reg::Ctl0) & ctl0::ENC != 0
    }

    /// A sample or conversion is in progress.
    pub fn is_busy(&self) -> bool {
        self.regs.read(Reg::Ctl1) & ctl1::ADC10BUSY != 0
    }

    /// A result is waiting to be acknowledged.
    pub fn conversion_complete(&self) -> bool {
        self.regs.read(Reg::Ctl0) & ctl0::ADC10IFG != 0
    }
}
