// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Hardware the services work with.

use crate::config::{BUTTON_PIN, LED_PIN};
use crate::gpio::{SioInput, SioOutput};
use blinker_common::{ActiveLowButton, TickConsumer};

pub type ButtonPin = SioInput<{ BUTTON_PIN }>;
pub type LedPin = SioOutput<{ LED_PIN }>;

pub struct Peripherals {
    pub button: ActiveLowButton<ButtonPin>,
    pub led: LedPin,
    pub ticks: TickConsumer<'static>,
}
