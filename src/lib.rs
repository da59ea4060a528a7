//! Register-level driver for the ADC10 peripheral on MSP430 microcontrollers.
//!
//! Select the chip with one of the variant features (eg `g2x53`, `f22x4`); it determines
//! whether the second analog enable register, `ADC10AE1`, is available. The register
//! addresses themselves are supplied by the caller through [`regs::RegisterBlock`].
//!
//! Enable the `defmt` feature for logging and `defmt::Format` impls.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod macros;

pub mod adc;
pub mod error;
pub mod regs;
pub mod traits;

#[cfg(test)]
mod sim;

pub use crate::{
    adc::{Adc, AdcConfig, Channel},
    error::{Error, Result},
};
