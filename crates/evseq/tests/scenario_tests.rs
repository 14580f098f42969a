//! End-to-end trials on the standard page across platforms and devices

#![allow(clippy::unwrap_used, clippy::expect_used)]

use evseq::prelude::*;
use EventKind::*;

fn drive(target: &SimulatedTarget, device: PointerDeviceType, kinds: &[EventKind]) {
    for kind in kinds {
        target.raise(*kind, device);
    }
}

// ============================================================================
// Touch trials
// ============================================================================

#[test]
fn test_touch_trials_on_android() {
    let mut page = EventsSequencesPage::new(Platform::Android);
    let touch = page.device;
    assert_eq!(touch, PointerDeviceType::Touch);

    drive(
        &page.tap_target,
        touch,
        &[Entered, Pressed, Moved, Released, Tapped, Exited],
    );
    drive(
        &page.click_target,
        touch,
        &[Entered, Activated, CaptureLost, Tapped, Exited],
    );
    drive(&page.hyperlink_target, touch, &[Entered]);
    page.hyperlink_inner.raise_activation();
    drive(&page.hyperlink_target, touch, &[Released, Exited]);
    page.list_view_target.raise_activation();

    for (name, outcome) in page.validate_all().unwrap() {
        assert!(outcome.is_success(), "{name}: {:?}", outcome.report());
        assert_eq!(outcome.to_string(), "SUCCESS");
    }
}

#[test]
fn test_touch_hyperlink_release_order_on_windows() {
    let mut page = EventsSequencesPage::new(Platform::Windows);
    drive(&page.hyperlink_target, PointerDeviceType::Touch, &[Entered, Released]);
    page.hyperlink_inner.raise_activation();
    drive(&page.hyperlink_target, PointerDeviceType::Touch, &[Exited]);

    let table = page.table().clone();
    let outcome = page
        .hyperlink
        .validate(PointerDeviceType::Touch, &table)
        .unwrap();
    assert!(outcome.is_success());

    let skia = GrammarTable::for_platform(Platform::Skia);
    let outcome = page
        .hyperlink
        .validate(PointerDeviceType::Touch, &skia)
        .unwrap();
    assert_eq!(outcome.text(), "FAILED");
}

// ============================================================================
// Mouse and pen trials
// ============================================================================

#[test]
fn test_mouse_tap_with_capture_on_press() {
    let recorder = EventRecorder::new().with_capture_on_press(true);
    let mut page =
        EventsSequencesPage::with_table(GrammarTable::for_platform(Platform::Skia), recorder);
    let mouse = PointerDeviceType::Mouse;

    drive(&page.tap_target, mouse, &[Entered, Moved, Pressed]);
    assert_eq!(page.tap_target.captured_pointer(), Some(1));
    drive(&page.tap_target, mouse, &[Released, Tapped, Exited]);
    assert!(page.tap.buffer().diagnostics().contains("Captured: true"));

    let table = page.table().clone();
    assert!(page.tap.validate(mouse, &table).unwrap().is_success());
}

#[test]
fn test_pen_hover_follows_platform() {
    let kinds = [Entered, Moved, Pressed, Released, Tapped, Exited];
    let buffer = SequenceBuffer::from_kinds("pen", &kinds);

    let skia = GrammarTable::for_platform(Platform::Skia);
    let grammar = skia.lookup(PointerDeviceType::Pen, TargetShape::Element).unwrap();
    assert!(validate(&buffer, grammar));

    let ios = GrammarTable::for_platform(Platform::Ios);
    let grammar = ios.lookup(PointerDeviceType::Pen, TargetShape::Element).unwrap();
    assert!(!validate(&buffer, grammar));
}

// ============================================================================
// Reset and reuse
// ============================================================================

#[test]
fn test_reset_between_trials() {
    let mut page = EventsSequencesPage::new(Platform::Wasm);
    let mouse = PointerDeviceType::Mouse;
    let table = page.table().clone();

    drive(&page.tap_target, mouse, &[Entered, Pressed, Exited]);
    assert!(!page.tap.validate(mouse, &table).unwrap().is_success());

    page.reset_all();
    assert_eq!(page.tap.outcome().text(), NO_RESULT);
    assert!(page.tap.buffer().is_empty());

    drive(
        &page.tap_target,
        mouse,
        &[Entered, Moved, Pressed, Released, Tapped, Exited],
    );
    assert!(page.tap.validate(mouse, &table).unwrap().is_success());
}

#[test]
fn test_trace_from_scenario_validates_offline() {
    let page = EventsSequencesPage::new(Platform::Skia);
    drive(
        &page.click_target,
        PointerDeviceType::Mouse,
        &[Entered, Moved, Moved, Activated, CaptureLost, Tapped, Exited],
    );
    let trace = Trace::from_buffer(
        page.click.buffer(),
        Platform::Skia,
        PointerDeviceType::Mouse,
        TargetShape::Button,
    );
    let reloaded = Trace::from_json(&trace.to_json().unwrap()).unwrap();
    assert!(reloaded
        .check_with(&GrammarTable::for_platform(Platform::Skia))
        .unwrap()
        .passed);
}
