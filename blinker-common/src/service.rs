// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Per-tick services driven by the main loop.

use crate::tick::TickEvent;

/// Shared context passed to all services
pub struct ServiceContext<'a, P> {
    pub peripherals: &'a mut P,
    /// The tick being serviced. Services only run with one in hand.
    pub tick: TickEvent,
}

/// Trait for services that run once per tick
pub trait Service<P> {
    /// Process this service's logic
    /// Uses interior mutability (Cell/RefCell) for state changes
    fn process(&self, ctx: &mut ServiceContext<P>);
}

/// Runs every service, in order, for one tick.
pub fn run_tick<P>(services: &[&dyn Service<P>], peripherals: &mut P, tick: TickEvent) {
    let mut ctx = ServiceContext { peripherals, tick };
    for service in services {
        service.process(&mut ctx);
    }
}
