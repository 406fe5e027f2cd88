// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for tick period derivation and the tick signal.

use blinker_common::clock::ClockConfig;
use blinker_common::tick::{
    start_ticks, Prescale, TickChannel, TickError, TickEvent, TickSource, TickTimerConfig,
};

const ALL_PRESCALERS: [Prescale; 4] = [
    Prescale::Div1,
    Prescale::Div8,
    Prescale::Div64,
    Prescale::Div256,
];

fn frc_clock() -> ClockConfig {
    ClockConfig::new(7_372_800, 217, 8, 2, 2)
}

#[test]
fn test_reference_period_is_50000_cycles() {
    let config = TickTimerConfig::derive(&frc_clock(), 16, &[Prescale::Div1]).unwrap();

    assert_eq!(config.prescale, Prescale::Div1);
    assert_eq!(config.period, 50_000);
    assert_eq!(config.reload(), 49_999);
}

#[test]
fn test_rp2040_period_matches_reference() {
    let clock = ClockConfig::new(12_000_000, 125, 1, 30, 1);
    let config = TickTimerConfig::derive(&clock, 24, &[Prescale::Div1]).unwrap();

    assert_eq!(config.period, 50_000);
}

#[test]
fn test_period_follows_clock() {
    // 125 MHz: 8 ns cycles, 125 000 per tick, too wide for 16 bits at 1:1.
    let clock = ClockConfig::new(12_000_000, 125, 1, 12, 1);
    let config = TickTimerConfig::derive(&clock, 16, &ALL_PRESCALERS).unwrap();

    assert_eq!(config.prescale, Prescale::Div8);
    assert_eq!(config.period, 15_625);
}

#[test]
fn test_inexact_cycle_is_rejected() {
    // 33.33 MHz: 30 ns cycles do not divide 1 ms.
    let clock = ClockConfig::new(12_000_000, 100, 1, 36, 1);

    assert_eq!(
        TickTimerConfig::derive(&clock, 32, &ALL_PRESCALERS),
        Err(TickError::InexactPeriod)
    );
}

#[test]
fn test_period_out_of_range() {
    assert_eq!(
        TickTimerConfig::derive(&frc_clock(), 8, &ALL_PRESCALERS),
        Err(TickError::PeriodOutOfRange)
    );
    assert_eq!(
        TickTimerConfig::derive(&frc_clock(), 16, &[]),
        Err(TickError::PeriodOutOfRange)
    );
}

#[derive(Debug, PartialEq)]
enum TimerCall {
    Configure(u32),
    Start,
}

#[derive(Default)]
struct RecordingTimer {
    calls: Vec<TimerCall>,
}

impl TickSource for RecordingTimer {
    fn configure(&mut self, config: &TickTimerConfig) {
        self.calls.push(TimerCall::Configure(config.reload()));
    }

    fn start(&mut self) {
        self.calls.push(TimerCall::Start);
    }
}

#[test]
fn test_start_ticks_configures_before_enabling() {
    let config = TickTimerConfig::derive(&frc_clock(), 16, &[Prescale::Div1]).unwrap();
    let mut timer = RecordingTimer::default();

    start_ticks(&mut timer, &config);

    assert_eq!(
        timer.calls,
        vec![TimerCall::Configure(49_999), TimerCall::Start]
    );
}

#[test]
fn test_channel_starts_empty() {
    let mut channel = TickChannel::new();
    let (_producer, mut consumer) = channel.split();

    assert!(!consumer.ready());
    assert_eq!(consumer.take(), None);
    assert_eq!(consumer.missed(), 0);
}

#[test]
fn test_take_clears_pending_tick() {
    let mut channel = TickChannel::new();
    let (mut producer, mut consumer) = channel.split();

    assert_eq!(producer.raise(), Ok(()));
    assert!(consumer.ready());
    assert_eq!(consumer.take(), Some(TickEvent));
    assert!(!consumer.ready());
    assert_eq!(consumer.take(), None);
}

#[test]
fn test_at_most_one_tick_pending() {
    let mut channel = TickChannel::new();
    let (mut producer, mut consumer) = channel.split();

    assert_eq!(producer.raise(), Ok(()));
    assert_eq!(producer.raise(), Err(TickEvent));
    assert_eq!(producer.raise(), Err(TickEvent));

    assert_eq!(consumer.missed(), 2);
    assert_eq!(consumer.take(), Some(TickEvent));
    assert_eq!(consumer.take(), None);
}

#[test]
fn test_raise_after_take_succeeds() {
    let mut channel = TickChannel::new();
    let (mut producer, mut consumer) = channel.split();

    for _ in 0..10 {
        assert_eq!(producer.raise(), Ok(()));
        assert_eq!(consumer.take(), Some(TickEvent));
    }
    assert_eq!(consumer.missed(), 0);
}

#[test]
fn test_producer_on_another_thread() {
    let mut channel = TickChannel::new();
    let (mut producer, mut consumer) = channel.split();

    std::thread::scope(|s| {
        s.spawn(move || {
            let _ = producer.raise();
        })
        .join()
        .unwrap();
    });

    assert_eq!(consumer.take(), Some(TickEvent));
}
