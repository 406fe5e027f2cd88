// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! SysTick as the 1 ms tick source.
//!
//! SysTick reloads itself on wrap, so the period holds regardless of when
//! the exception is serviced.

use blinker_common::{TickSource, TickTimerConfig};
use cortex_m::peripheral::{syst::SystClkSource, SYST};

pub struct SysTickTimer {
    syst: SYST,
}

impl SysTickTimer {
    pub fn new(syst: SYST) -> Self {
        Self { syst }
    }
}

impl TickSource for SysTickTimer {
    fn configure(&mut self, config: &TickTimerConfig) {
        self.syst.disable_counter();
        self.syst.set_clock_source(SystClkSource::Core);
        self.syst.set_reload(config.reload());
        self.syst.clear_current();
        self.syst.enable_interrupt();
    }

    fn start(&mut self) {
        self.syst.enable_counter();
    }
}
