// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Button-triggered blink cycle.

use crate::peripherals::Peripherals;
use blinker_common::{CycleStateMachine, Service, ServiceContext};
use core::cell::Cell;

/// Samples the button and drives the LED, once per tick.
pub struct CycleService {
    machine: Cell<CycleStateMachine>,
}

impl CycleService {
    pub fn new() -> Self {
        Self {
            machine: Cell::new(CycleStateMachine::new()),
        }
    }
}

impl Service<Peripherals> for CycleService {
    fn process(&self, ctx: &mut ServiceContext<Peripherals>) {
        let peripherals = &mut *ctx.peripherals;
        let mut machine = self.machine.get();
        let result = machine.drive(&mut peripherals.button, &mut peripherals.led);
        self.machine.set(machine);
        let Ok(transition) = result;

        if transition.latched {
            defmt::println!("Button pressed, blink cycle started");
        }
        if transition.restarted {
            defmt::debug!("Cycle restart");
        }
        defmt::trace!("{} -> {}", transition, machine.state());
    }
}
