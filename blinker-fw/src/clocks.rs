// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Crystal oscillator and PLL bring-up.

use blinker_common::ClockConfig;
use rp2040_hal::{
    clocks::{Clock, ClocksManager},
    fugit::RateExtU32,
    pac,
    pll::{common_configs::PLL_USB_48MHZ, setup_pll_blocking, PLLConfig},
    xosc::setup_xosc_blocking,
};

/// Starts the crystal, locks PLL_SYS to `config` and switches the system
/// clock over. Blocks until the PLLs report lock.
pub fn configure(
    config: &ClockConfig,
    xosc: pac::XOSC,
    clocks: pac::CLOCKS,
    pll_sys: pac::PLL_SYS,
    pll_usb: pac::PLL_USB,
    resets: &mut pac::RESETS,
) -> ClocksManager {
    let Some((post_div1, post_div2)) = config.post_divider_pair() else {
        defmt::panic!("N2 = {} cannot be split into two post dividers", config.n2);
    };

    let xosc = setup_xosc_blocking(xosc, config.reference_hz.Hz())
        .unwrap_or_else(|_| defmt::panic!("XOSC failed to stabilise"));

    let mut clocks = ClocksManager::new(clocks);

    let sys_pll = PLLConfig {
        vco_freq: config.vco_hz().Hz(),
        refdiv: config.n1,
        post_div1,
        post_div2,
    };
    let pll_sys = setup_pll_blocking(
        pll_sys,
        xosc.operating_frequency(),
        sys_pll,
        &mut clocks,
        resets,
    )
    .unwrap_or_else(|_| defmt::panic!("PLL_SYS failed to lock"));

    let pll_usb = setup_pll_blocking(
        pll_usb,
        xosc.operating_frequency(),
        PLL_USB_48MHZ,
        &mut clocks,
        resets,
    )
    .unwrap_or_else(|_| defmt::panic!("PLL_USB failed to lock"));

    clocks
        .init_default(&xosc, &pll_sys, &pll_usb)
        .unwrap_or_else(|_| defmt::panic!("Clock tree init failed"));

    let sys_hz = clocks.system_clock.freq().to_Hz();
    if sys_hz != config.fosc_hz() {
        defmt::panic!("clk_sys is {} Hz, expected {} Hz", sys_hz, config.fosc_hz());
    }

    defmt::println!(
        "Clock: {} Hz ref, M={} N1={} N2={} ({}x{}), VCO {} Hz, clk_sys {} Hz",
        config.reference_hz,
        config.m,
        config.n1,
        config.n2,
        post_div1,
        post_div2,
        config.vco_hz(),
        sys_hz
    );

    clocks
}
