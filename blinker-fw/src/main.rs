// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Button-triggered LED blinker.
//!
//! Start-up brings the clock up first, then the pins, then the 1 ms tick.
//! After that the main loop sleeps until SysTick signals a tick and runs the
//! services once for it.

#![no_std]
#![no_main]

mod clocks;
mod config;
mod gpio;
mod peripherals;
mod services;
mod systick;

use core::cell::RefCell;
use core::sync::atomic::{AtomicU32, Ordering};

use blinker_common::{run_tick, start_ticks, ActiveLowButton, Service, TickChannel, TickProducer};
use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::scb::SystemHandler;
use cortex_m_rt::{entry, exception};
use defmt_rtt as _;
use panic_probe as _;
use rp2040_hal::pac;

use peripherals::Peripherals;
use services::{CycleService, TickMonitorService};
use systick::SysTickTimer;

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

/// Milliseconds since the tick started, for log timestamps only.
static UPTIME_MS: AtomicU32 = AtomicU32::new(0);

static TICK_PRODUCER: Mutex<RefCell<Option<TickProducer<'static>>>> =
    Mutex::new(RefCell::new(None));

defmt::timestamp!("{=u32:ms}", UPTIME_MS.load(Ordering::Relaxed));

#[entry]
fn main() -> ! {
    defmt::println!("Blinker v{} init", env!("BLINKER_VERSION"));

    let mut pac = defmt::unwrap!(pac::Peripherals::take());
    let mut core = defmt::unwrap!(pac::CorePeripherals::take());
    let hw = &config::HARDWARE;

    let _clocks = clocks::configure(
        &hw.clock,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
    );

    let bank0 = gpio::Bank0::new(pac.SIO, pac.IO_BANK0, pac.PADS_BANK0, &mut pac.RESETS);
    let (button, led) =
        bank0.configure::<{ config::BUTTON_PIN }, { config::LED_PIN }>(&hw.ports);

    let channel = defmt::unwrap!(cortex_m::singleton!(: TickChannel = TickChannel::new()));
    let (producer, consumer) = channel.split();
    cortex_m::interrupt::free(|cs| {
        TICK_PRODUCER.borrow(cs).replace(Some(producer));
    });

    // SAFETY: set before SysTick is enabled; no handler observes the change.
    unsafe { core.SCB.set_priority(SystemHandler::SysTick, config::SYSTICK_PRIORITY) };
    let mut systick = SysTickTimer::new(core.SYST);
    start_ticks(&mut systick, &hw.tick);
    defmt::println!(
        "Tick: {} cycles of {} ns",
        hw.tick.period,
        hw.clock.instruction_cycle_ns()
    );

    let mut peripherals = Peripherals {
        button: ActiveLowButton::new(button, config::BUTTON_DEBOUNCE_TICKS),
        led,
        ticks: consumer,
    };

    let cycle = CycleService::new();
    let tick_monitor = TickMonitorService::new();
    let services: [&dyn Service<Peripherals>; 2] = [&cycle, &tick_monitor];

    defmt::println!("Waiting for button on GP{}", config::BUTTON_PIN);

    loop {
        if let Some(tick) = peripherals.ticks.take() {
            run_tick(&services, &mut peripherals, tick);
        }

        // Checked with interrupts masked so a tick landing between the
        // check and the WFI still wakes the core.
        cortex_m::interrupt::free(|_| {
            if !peripherals.ticks.ready() {
                cortex_m::asm::wfi();
            }
        });
    }
}

#[exception]
fn SysTick() {
    let uptime = UPTIME_MS.load(Ordering::Relaxed);
    UPTIME_MS.store(uptime.wrapping_add(1), Ordering::Relaxed);

    cortex_m::interrupt::free(|cs| {
        if let Some(producer) = TICK_PRODUCER.borrow(cs).borrow_mut().as_mut() {
            // A full slot means the previous tick is unserviced; the channel counts it.
            let _ = producer.raise();
        }
    });
}
