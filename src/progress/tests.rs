// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::num::NonZeroU64;

use super::sink::{RecordingSink, SinkEvent};
use super::{DisplaySink, ProgressResult, ProgressSample, Projector, WriterSink};
use crate::error::ProgressError;

fn percent() -> Projector<RecordingSink> {
    Projector::percent(RecordingSink::default())
}

#[test]
fn test_half_then_full_then_finish() {
    let mut projector = percent();

    let half = projector.observe(5, Some(10)).unwrap();
    assert_eq!(half.map(|a| a.value), Some(50));

    let full = projector.observe(10, Some(10)).unwrap();
    assert_eq!(full.map(|a| a.value), Some(100));

    let finished = projector.finish().unwrap();
    assert_eq!(finished.value, 100);
    assert_eq!(projector.emitted(), 100);

    // Already at the maximum: finish only completes
    assert_eq!(
        projector.sink().events,
        vec![SinkEvent::Set(50), SinkEvent::Set(100), SinkEvent::Complete]
    );
}

#[test]
fn test_regression_is_clamped_to_floor() {
    let mut projector = percent();

    assert_eq!(projector.observe(3, Some(10)).unwrap().map(|a| a.value), Some(30));
    assert_eq!(projector.observe(1, Some(10)).unwrap(), None);
    assert_eq!(projector.emitted(), 30);
    assert_eq!(projector.sink().set_values(), vec![30]);
}

#[test]
fn test_absent_total_is_noop() {
    let mut projector = percent();
    projector.observe(4, Some(10)).unwrap();

    assert_eq!(projector.observe(9_999, None).unwrap(), None);
    assert_eq!(projector.emitted(), 40);
}

#[test]
fn test_zero_total_is_noop() {
    let mut projector = percent();
    projector.observe(4, Some(10)).unwrap();

    assert_eq!(projector.observe(7, Some(0)).unwrap(), None);
    assert_eq!(projector.observe(0, Some(0)).unwrap(), None);
    assert_eq!(projector.emitted(), 40);
}

#[test]
fn test_overshoot_is_capped() {
    let mut projector = percent();
    let advancement = projector.observe(25, Some(10)).unwrap().unwrap();
    assert_eq!(advancement.value, 100);
    assert_eq!(advancement.scale_max, 100);
}

#[test]
fn test_finish_forces_scale_max_once() {
    let mut projector = percent();
    projector.observe(2, Some(10)).unwrap();

    projector.finish().unwrap();
    projector.finish().unwrap();

    assert_eq!(projector.emitted(), 100);
    assert!(projector.is_finished());
    assert_eq!(projector.sink().set_values(), vec![20, 100]);
    assert_eq!(projector.sink().completions(), 1);
}

#[test]
fn test_observe_after_finish_does_not_decrease() {
    let mut projector = percent();
    projector.finish().unwrap();

    assert_eq!(projector.observe(1, Some(10)).unwrap(), None);
    assert_eq!(projector.emitted(), 100);
}

#[test]
fn test_phase_restart_keeps_floor() {
    // Receiving objects then resolving deltas, each counting from zero
    let mut projector = percent();
    let samples = [(10, 100), (60, 100), (100, 100), (1, 40), (20, 40), (40, 40)];
    for (current, total) in samples {
        projector.observe(current, Some(total)).unwrap();
    }
    assert_eq!(projector.sink().set_values(), vec![10, 60, 100]);
}

#[test]
fn test_monotonic_and_bounded_for_many_sequences() {
    for total in 1..=40_u64 {
        for scale in [1_u64, 7, 100, 1_000] {
            let scale_max = NonZeroU64::new(scale).unwrap();
            let mut projector = Projector::new(scale_max, RecordingSink::default());
            let mut last = 0;
            for current in 0..=total + 3 {
                projector.observe(current, Some(total)).unwrap();
                assert!(projector.emitted() >= last);
                assert!(projector.emitted() <= scale);
                last = projector.emitted();
            }
            assert_eq!(projector.emitted(), scale);
        }
    }
}

#[test]
fn test_large_values_do_not_overflow() {
    let sample = ProgressSample::new(u64::MAX, Some(u64::MAX));
    assert_eq!(sample.project(super::PERCENT), Some(100));

    let sample = ProgressSample::new(u64::MAX / 2, Some(u64::MAX));
    assert_eq!(sample.project(super::PERCENT), Some(49));
}

#[test]
fn test_independent_handles() {
    let mut a = percent();
    let mut b = percent();
    a.observe(9, Some(10)).unwrap();
    b.observe(1, Some(10)).unwrap();
    assert_eq!(a.emitted(), 90);
    assert_eq!(b.emitted(), 10);
}

#[test]
fn test_writer_sink_output() {
    let mut projector = Projector::percent(WriterSink::new(Vec::new(), "clone", 100));
    projector.observe(1, Some(4)).unwrap();
    projector.observe(3, Some(4)).unwrap();
    projector.finish().unwrap();

    let text = String::from_utf8(projector.into_sink().into_inner()).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    clone: 25/100
    clone: 75/100
    clone: 100/100
    clone: done
    ");
}

#[test]
fn test_writer_sink_advance_accumulates() {
    let mut sink = WriterSink::new(Vec::new(), "copy", 10);
    sink.advance(3).unwrap();
    sink.advance(4).unwrap();
    sink.complete().unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    copy: 3/10
    copy: 7/10
    copy: done
    ");
}

#[test]
fn test_busy_only_before_first_value() {
    let mut projector = percent();
    projector.busy().unwrap();
    projector.observe(1, Some(2)).unwrap();
    projector.busy().unwrap();
    projector.finish().unwrap();
    projector.busy().unwrap();

    assert_eq!(
        projector.sink().events,
        vec![
            SinkEvent::Busy,
            SinkEvent::Set(50),
            SinkEvent::Set(100),
            SinkEvent::Complete
        ]
    );
}

#[test]
fn test_writer_sink_busy_line() {
    let mut projector = Projector::percent(WriterSink::new(Vec::new(), "branches", 100));
    projector.busy().unwrap();
    projector.finish().unwrap();

    let text = String::from_utf8(projector.into_sink().into_inner()).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    branches: working
    branches: 100/100
    branches: done
    ");
}

struct BrokenSink;

impl DisplaySink for BrokenSink {
    fn set(&mut self, _value: u64) -> ProgressResult<()> {
        Err(ProgressError::SinkUnavailable {
            source: std::io::Error::from(std::io::ErrorKind::BrokenPipe),
        })
    }

    fn advance(&mut self, amount: u64) -> ProgressResult<()> {
        self.set(amount)
    }

    fn complete(&mut self) -> ProgressResult<()> {
        self.set(0)
    }
}

#[test]
fn test_sink_failure_propagates_and_keeps_state() {
    let mut projector = Projector::percent(BrokenSink);
    assert!(projector.observe(5, Some(10)).is_err());
    assert_eq!(projector.emitted(), 0);
    assert!(projector.finish().is_err());
    assert!(!projector.is_finished());
}
