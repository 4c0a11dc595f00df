//! Minimal end-to-end loop: two presentations driven by the dispatcher
//! against the recording sink, printing what each tick did.

use anyhow::Result;

use stagecraft_presentation_core::{
    ActionText, BarColor, BarFrame, BarStyle, BossBar, Config, EmptyWorld, Registry,
    TickDispatcher, ViewerId,
};
use stagecraft_test_fixtures::RecordingSink;

fn main() -> Result<()> {
    let mut registry = Registry::new();
    let mut sink = RecordingSink::new();
    let viewer = ViewerId::new();

    ActionText::for_viewer(viewer)
        .add_frame("Welcome", 2)
        .add_frame("to the arena", 2)
        .start_playing()
        .build(&mut registry, &mut sink)?;

    BossBar::named("arena")
        .add_frame(
            BarFrame::new(BarColor::Purple, BarStyle::Segmented10, 1.0, "Round 1")?,
            2,
        )
        .add_frame(
            BarFrame::new(BarColor::Purple, BarStyle::Segmented10, 0.5, "Round 1")?,
            2,
        )
        .add_viewer(viewer)
        .start_playing()
        .build(&mut registry, &mut sink)?;

    let mut ticker = TickDispatcher::new(&Config::default())?;
    for _ in 0..4 {
        let report = ticker.tick(&mut registry, &mut sink, &EmptyWorld);
        println!(
            "tick {}: {} advanced, {} notices delivered",
            report.tick, report.advanced, report.notices.len()
        );
    }

    println!("rendered texts: {:?}", sink.texts());
    Ok(())
}
