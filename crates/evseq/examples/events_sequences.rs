//! Example: Events Sequences
//!
//! Demonstrates: Recording tap, click, hyperlink and list view trials and
//! validating them against the reference grammars of each platform
//!
//! Run with: `cargo run --example events_sequences`

use evseq::prelude::*;

fn drive(target: &SimulatedTarget, device: PointerDeviceType, kinds: &[EventKind]) {
    for kind in kinds {
        target.raise(*kind, device);
    }
}

fn main() -> EvseqResult<()> {
    use EventKind::*;

    println!("=== Events Sequences Example ===\n");

    // 1. Print the grammars each platform expects for a touch tap
    println!("1. Touch grammars per platform...");
    for platform in Platform::ALL {
        let table = GrammarTable::for_platform(platform);
        for shape in TargetShape::ALL {
            let grammar = table.lookup(PointerDeviceType::Touch, shape)?;
            println!("   {:<8} {:<10} {grammar}", platform.name(), shape.name());
        }
    }

    // 2. Record a mouse session
    println!("\n2. Recording a mouse session on Skia...");
    let mut page = EventsSequencesPage::new(Platform::Skia);
    let mouse = PointerDeviceType::Mouse;
    drive(
        &page.tap_target,
        mouse,
        &[Entered, Moved, Pressed, Released, Tapped, Moved, Exited],
    );
    drive(
        &page.click_target,
        mouse,
        &[Entered, Moved, Activated, CaptureLost, Tapped, Exited],
    );
    drive(&page.hyperlink_target, mouse, &[Entered, Moved]);
    page.hyperlink_inner.raise_activation();
    drive(&page.hyperlink_target, mouse, &[Released, Exited]);
    drive(
        &page.list_view_target,
        mouse,
        &[Entered, Moved, Moved, Activated, Exited],
    );

    // 3. Validate
    println!("\n3. Validating...");
    for (name, outcome) in page.validate_all()? {
        println!("   {name:<10} {outcome}");
    }

    // 4. Diagnostics recorded by the tap scenario
    println!("\n4. Tap diagnostics:");
    for line in page.tap.buffer().diagnostics().lines() {
        println!("   {line}");
    }

    // 5. Validate with the wrong device
    println!("\n5. Validating the same trials as touch...");
    page.select_device(PointerDeviceType::Touch);
    for (name, outcome) in page.validate_all()? {
        match outcome.report().and_then(|report| report.failure) {
            Some(failure) => println!("   {name:<10} {outcome}: {failure}"),
            None => println!("   {name:<10} {outcome}"),
        }
    }

    // 6. Reset
    page.reset_all();
    println!("\n6. After reset: {}", page.tap.outcome());

    println!("\n=== Example Complete ===");
    Ok(())
}
