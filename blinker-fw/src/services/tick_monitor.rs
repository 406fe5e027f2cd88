// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Reports ticks the main loop failed to service in time.
//!
//! A tick raised while the previous one is still pending is lost and the
//! blink cycle stretches by one millisecond. The channel counts them; this
//! service makes them visible.

use crate::peripherals::Peripherals;
use blinker_common::{Service, ServiceContext};
use core::cell::Cell;

pub struct TickMonitorService {
    reported: Cell<u32>,
}

impl TickMonitorService {
    pub fn new() -> Self {
        Self {
            reported: Cell::new(0),
        }
    }
}

impl Service<Peripherals> for TickMonitorService {
    fn process(&self, ctx: &mut ServiceContext<Peripherals>) {
        let missed = ctx.peripherals.ticks.missed();
        let reported = self.reported.get();
        if missed != reported {
            defmt::warn!(
                "{} tick(s) missed, {} since start",
                missed.wrapping_sub(reported),
                missed
            );
            self.reported.set(missed);
        }
    }
}
