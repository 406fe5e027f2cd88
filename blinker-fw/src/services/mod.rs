// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Service implementations for the blinker.

pub mod cycle;
pub mod tick_monitor;

pub use cycle::CycleService;
pub use tick_monitor::TickMonitorService;
