// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! PLL multiplier/divider selection.
//!
//! A PLL turns a reference frequency into the system oscillator frequency:
//!
//! ```text
//! Fosc = Fref * M / (N1 * N2)
//! Fcy  = Fosc / cycle_divider
//! ```
//!
//! N1 is the pre-divider feeding the phase detector, M the feedback
//! multiplier and N2 the post-divider. Every timing constant downstream
//! (tick period, phase lengths) is derived from the resulting instruction
//! cycle, so the selection happens once, in const evaluation, and an
//! unreachable target fails the build instead of running mistimed.

/// Hardware ranges of one PLL family.
#[derive(Debug, Clone, Copy)]
pub struct PllLimits {
    /// Inclusive range of the feedback multiplier M.
    pub m: (u16, u16),
    /// Inclusive range of the pre-divider N1.
    pub n1: (u8, u8),
    /// Every post-divider value N2 the hardware can produce, ascending.
    pub post_dividers: &'static [u8],
    /// Inclusive range of the phase detector input, Fref / N1.
    pub pfd_hz: (u32, u32),
    /// Inclusive range of the VCO, Fref * M / N1.
    pub vco_hz: (u32, u32),
    /// Highest permitted PLL output.
    pub max_fosc_hz: u32,
    /// Oscillator clocks per instruction cycle.
    pub cycle_divider: u8,
}

impl PllLimits {
    /// dsPIC33E FRC/primary oscillator PLL (PLLPRE, PLLFBD, PLLPOST).
    pub const DSPIC33E: Self = Self {
        m: (2, 513),
        n1: (2, 33),
        post_dividers: &[2, 4, 8],
        pfd_hz: (800_000, 8_000_000),
        vco_hz: (120_000_000, 340_000_000),
        max_fosc_hz: 140_000_000,
        cycle_divider: 2,
    };

    /// RP2040 PLL_SYS (REFDIV, FBDIV, POSTDIV1 * POSTDIV2).
    pub const RP2040: Self = Self {
        m: (16, 320),
        n1: (1, 63),
        post_dividers: &[
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 14, 15, 16, 18, 20, 21, 24, 25, 28, 30, 35, 36,
            42, 49,
        ],
        pfd_hz: (5_000_000, u32::MAX),
        vco_hz: (750_000_000, 1_600_000_000),
        max_fosc_hz: 133_000_000,
        cycle_divider: 1,
    };

    const fn allows_post_divider(&self, n2: u8) -> bool {
        let mut i = 0;
        while i < self.post_dividers.len() {
            if self.post_dividers[i] == n2 {
                return true;
            }
            i += 1;
        }
        false
    }
}

/// Errors from PLL selection or validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// No (M, N1, N2) combination stays inside the hardware limits.
    NoSolution,
    /// The closest reachable frequency misses the target by more than allowed.
    OutOfTolerance { error_hz: u32 },
    /// A hand-picked configuration violates the hardware limits.
    OutOfRange,
}

/// An applied PLL configuration. Immutable once the clock is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub reference_hz: u32,
    pub m: u16,
    pub n1: u8,
    pub n2: u8,
    /// Oscillator tuning steps. Frequency math uses the nominal reference.
    pub trim: i8,
    pub cycle_divider: u8,
}

impl ClockConfig {
    pub const fn new(reference_hz: u32, m: u16, n1: u8, n2: u8, cycle_divider: u8) -> Self {
        Self {
            reference_hz,
            m,
            n1,
            n2,
            trim: 0,
            cycle_divider,
        }
    }

    pub const fn with_trim(mut self, trim: i8) -> Self {
        self.trim = trim;
        self
    }

    /// Phase detector input, Fref / N1.
    pub const fn pfd_hz(&self) -> u32 {
        self.reference_hz / self.n1 as u32
    }

    /// Fits `u32` for any configuration that passes [`check`](Self::check).
    pub const fn vco_hz(&self) -> u32 {
        self.vco_hz_wide() as u32
    }

    /// Fits `u32` for any configuration that passes [`check`](Self::check).
    pub const fn fosc_hz(&self) -> u32 {
        self.fosc_hz_wide() as u32
    }

    const fn vco_hz_wide(&self) -> u64 {
        self.reference_hz as u64 * self.m as u64 / self.n1 as u64
    }

    const fn fosc_hz_wide(&self) -> u64 {
        let divisor = self.n1 as u64 * self.n2 as u64;
        self.reference_hz as u64 * self.m as u64 / divisor
    }

    pub const fn instruction_hz(&self) -> u32 {
        self.fosc_hz() / self.cycle_divider as u32
    }

    /// Duration of one instruction cycle, rounded to the nearest nanosecond.
    pub const fn instruction_cycle_ns(&self) -> u32 {
        let hz = self.instruction_hz() as u64;
        if hz == 0 {
            return 0;
        }
        ((1_000_000_000 + hz / 2) / hz) as u32
    }

    /// Splits N2 into two dividers in `1..=7`, larger first.
    pub const fn post_divider_pair(&self) -> Option<(u8, u8)> {
        let mut first = 7;
        while first >= 1 {
            if self.n2 % first == 0 {
                let second = self.n2 / first;
                if second >= 1 && second <= first {
                    return Some((first, second));
                }
            }
            first -= 1;
        }
        None
    }

    /// Validates a configuration against `limits`.
    pub const fn check(&self, limits: &PllLimits) -> Result<(), ClockError> {
        if self.m < limits.m.0 || self.m > limits.m.1 {
            return Err(ClockError::OutOfRange);
        }
        if self.n1 < limits.n1.0 || self.n1 > limits.n1.1 {
            return Err(ClockError::OutOfRange);
        }
        if !limits.allows_post_divider(self.n2) || self.cycle_divider != limits.cycle_divider {
            return Err(ClockError::OutOfRange);
        }
        if self.within_frequency_limits(limits) {
            Ok(())
        } else {
            Err(ClockError::OutOfRange)
        }
    }

    const fn within_frequency_limits(&self, limits: &PllLimits) -> bool {
        let pfd = self.pfd_hz();
        let vco = self.vco_hz_wide();
        pfd >= limits.pfd_hz.0
            && pfd <= limits.pfd_hz.1
            && vco >= limits.vco_hz.0 as u64
            && vco <= limits.vco_hz.1 as u64
            && self.fosc_hz_wide() <= limits.max_fosc_hz as u64
    }
}

/// Finds the (M, N1, N2) whose instruction clock is closest to
/// `target_instruction_hz`.
///
/// Ties prefer the smaller N1, then the higher VCO frequency. The best
/// candidate must land within `tolerance_ppm` of the target.
pub const fn solve(
    reference_hz: u32,
    target_instruction_hz: u32,
    limits: &PllLimits,
    tolerance_ppm: u32,
) -> Result<ClockConfig, ClockError> {
    let reference = reference_hz as u64;
    let target_fosc = target_instruction_hz as u64 * limits.cycle_divider as u64;
    if reference == 0 {
        return Err(ClockError::NoSolution);
    }

    let mut best: Option<ClockConfig> = None;
    let mut best_error = u64::MAX;

    let mut n1 = limits.n1.0;
    while n1 <= limits.n1.1 {
        let mut i = 0;
        while i < limits.post_dividers.len() {
            let n2 = limits.post_dividers[i];
            let divisor = n1 as u64 * n2 as u64;
            let m = (target_fosc * divisor + reference / 2) / reference;

            if m >= limits.m.0 as u64 && m <= limits.m.1 as u64 {
                let candidate =
                    ClockConfig::new(reference_hz, m as u16, n1, n2, limits.cycle_divider);
                if candidate.within_frequency_limits(limits) {
                    let error = candidate.fosc_hz_wide().abs_diff(target_fosc);
                    let better = match best {
                        None => true,
                        Some(current) => {
                            error < best_error
                                || (error == best_error
                                    && n1 == current.n1
                                    && candidate.vco_hz_wide() > current.vco_hz_wide())
                        }
                    };
                    if better {
                        best = Some(candidate);
                        best_error = error;
                    }
                }
            }
            i += 1;
        }

        if n1 == u8::MAX {
            break;
        }
        n1 += 1;
    }

    match best {
        None => Err(ClockError::NoSolution),
        Some(config) => {
            if best_error * 1_000_000 > target_fosc * tolerance_ppm as u64 {
                Err(ClockError::OutOfTolerance {
                    error_hz: best_error as u32,
                })
            } else {
                Ok(config)
            }
        }
    }
}
