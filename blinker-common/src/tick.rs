// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The 1 ms tick: timer period derivation and the tick signal.
//!
//! The hardware counter restarts from zero on every period match, so ticks
//! stay evenly spaced no matter how long the main loop takes to notice one.
//! The main loop learns about ticks through a single-slot SPSC queue: the
//! timer interrupt is the only producer, the main loop the only consumer,
//! and at most one tick is ever pending.

use core::sync::atomic::{AtomicU32, Ordering};
use heapless::spsc::{Consumer, Producer, Queue};

use crate::clock::ClockConfig;

/// Length of one tick.
pub const TICK_PERIOD_NS: u32 = 1_000_000;

/// Timer input clock prescaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescale {
    Div1,
    Div8,
    Div64,
    Div256,
}

impl Prescale {
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div8 => 8,
            Self::Div64 => 64,
            Self::Div256 => 256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// The tick is not a whole number of instruction cycles.
    InexactPeriod,
    /// No offered prescaler brings the period inside the counter width.
    PeriodOutOfRange,
}

/// Timer settings for a 1 ms period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickTimerConfig {
    pub prescale: Prescale,
    /// Counter steps per tick.
    pub period: u32,
}

impl TickTimerConfig {
    /// Derives the period from the instruction cycle of `clock`, trying
    /// `prescalers` in order.
    pub const fn derive(
        clock: &ClockConfig,
        counter_bits: u8,
        prescalers: &[Prescale],
    ) -> Result<Self, TickError> {
        let cycle_ns = clock.instruction_cycle_ns();
        if cycle_ns == 0 || TICK_PERIOD_NS % cycle_ns != 0 {
            return Err(TickError::InexactPeriod);
        }
        let cycles = TICK_PERIOD_NS / cycle_ns;
        let max_period = if counter_bits >= 32 {
            u32::MAX as u64 + 1
        } else {
            1u64 << counter_bits
        };

        let mut i = 0;
        while i < prescalers.len() {
            let prescale = prescalers[i];
            let divisor = prescale.divisor();
            if cycles % divisor == 0 && (cycles / divisor) as u64 <= max_period {
                return Ok(Self {
                    prescale,
                    period: cycles / divisor,
                });
            }
            i += 1;
        }
        Err(TickError::PeriodOutOfRange)
    }

    /// Value for a period/reload register whose counter runs `0..=reload`.
    pub const fn reload(&self) -> u32 {
        self.period - 1
    }
}

/// Hardware timer that produces the tick.
pub trait TickSource {
    /// Loads prescale and period and clears the counter. Leaves the timer stopped.
    fn configure(&mut self, config: &TickTimerConfig);
    /// Sets the enable bit; ticks start one period later.
    fn start(&mut self);
}

/// Configures `timer` for `config`, then enables it.
pub fn start_ticks<T: TickSource>(timer: &mut T, config: &TickTimerConfig) {
    timer.configure(config);
    timer.start();
}

/// One elapsed millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickEvent;

/// Storage for the tick signal. Split once into its two ends.
pub struct TickChannel {
    // Capacity is N - 1: one pending tick.
    queue: Queue<TickEvent, 2>,
    missed: AtomicU32,
}

impl TickChannel {
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            missed: AtomicU32::new(0),
        }
    }

    pub fn split(&mut self) -> (TickProducer<'_>, TickConsumer<'_>) {
        let (producer, consumer) = self.queue.split();
        let missed = &self.missed;
        (
            TickProducer {
                inner: producer,
                missed,
            },
            TickConsumer {
                inner: consumer,
                missed,
            },
        )
    }
}

impl Default for TickChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer-interrupt end of the tick signal.
pub struct TickProducer<'a> {
    inner: Producer<'a, TickEvent, 2>,
    missed: &'a AtomicU32,
}

impl TickProducer<'_> {
    /// Signals a tick. A tick that finds the previous one still pending is
    /// dropped and counted.
    pub fn raise(&mut self) -> Result<(), TickEvent> {
        self.inner.enqueue(TickEvent).inspect_err(|_| {
            // Single writer; load/store keeps this usable on cores without CAS.
            let missed = self.missed.load(Ordering::Relaxed);
            self.missed.store(missed.wrapping_add(1), Ordering::Relaxed);
        })
    }
}

/// Main-loop end of the tick signal.
pub struct TickConsumer<'a> {
    inner: Consumer<'a, TickEvent, 2>,
    missed: &'a AtomicU32,
}

impl TickConsumer<'_> {
    /// Takes the pending tick, clearing it.
    pub fn take(&mut self) -> Option<TickEvent> {
        self.inner.dequeue()
    }

    pub fn ready(&self) -> bool {
        self.inner.ready()
    }

    /// Ticks dropped since start-up.
    pub fn missed(&self) -> u32 {
        self.missed.load(Ordering::Relaxed)
    }
}
