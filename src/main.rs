use creature_hunt::{
    destination, ConfigurationManager, EventSource, FeedEvent, GeoPoint, HuntConfig, HuntEvent, HuntSession,
    IndicatorState, PlacementAction, RenderHandle, ScriptedFeed,
};
use log::info;

/// Walk towards the demo site, look around, pick the dragon and strike it
fn demo_script(config: &HuntConfig) -> ScriptedFeed {
    let mut feed = ScriptedFeed::new("demo");
    let site = config
        .targets
        .first()
        .map(|t| GeoPoint::new_unchecked(t.latitude, t.longitude))
        .unwrap_or(GeoPoint::new_unchecked(40.525206, -74.441388));

    // Approach from 100 m south in 20 m legs
    let start = destination(&site, 180.0, 100.0);
    feed.push_walk(start, 0.0, 20.0, 4);

    feed.push(FeedEvent::Select {
        identifier: "dragon".to_string(),
    });
    feed.push(FeedEvent::AttachRenderHandle {
        handle: RenderHandle(1),
    });

    // Turn from east back towards north; the last readings cross the 0/360 seam
    feed.push_sweep(90.0, 0.0, 15.0);
    feed.push_heading(350.0);
    feed.push_heading(5.0);

    feed.push(FeedEvent::Hit {
        identifier: "dragon".to_string(),
    });
    feed.push(FeedEvent::Hit {
        identifier: "wolf".to_string(),
    });
    feed
}

fn describe(state: IndicatorState) -> &'static str {
    match state {
        IndicatorState::ShowLeft => "<- turn left",
        IndicatorState::ShowRight => "turn right ->",
        IndicatorState::ShowNeither => "ahead",
    }
}

fn run(config: HuntConfig, mut feed: ScriptedFeed) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = HuntSession::new(config)?;
    session.register_callback(Box::new(|event| match event {
        HuntEvent::TargetSelected { identifier, distance_m } => {
            println!("Selected {} at {:.1} m", identifier, distance_m);
        }
        HuntEvent::IndicatorChanged { decision } => {
            println!(
                "Indicator: {} (bearing {:.1}, offset {:.1}, distance {:.1} m)",
                describe(decision.state),
                decision.target_bearing,
                decision.offset,
                decision.distance
            );
        }
        HuntEvent::TargetRemoved { target } => {
            println!("Defeated {}", target.identifier);
        }
        HuntEvent::AllTargetsDefeated => println!("All targets defeated"),
    }));

    info!("replaying {} events from '{}'", feed.queued_event_count(), feed.source_id());
    let summary = session.run(&mut feed)?;

    // Still hunting: report where the renderer should move the node
    if let Ok(PlacementAction::MoveTo { position, duration_s, .. }) = session.placement_action(true) {
        println!(
            "Target node: x={:.2}, y={:.2}, z={:.2} (animate {:.1} s)",
            position[0], position[1], position[2], duration_s
        );
    }

    println!(
        "Processed {} events, skipped {}, filtered {} headings; {} targets left",
        summary.processed,
        summary.skipped,
        summary.filtered,
        session.registry().len()
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("hunt-demo", |s| s.as_str());

    if args.len() == 2 && args[1] == "--demo" {
        let config = HuntConfig::default();
        let feed = demo_script(&config);
        return run(config, feed);
    }

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <config.json> [script.json]", program);
        eprintln!("   or: {} --demo", program);
        return Err("Invalid arguments".into());
    }

    let manager = ConfigurationManager::from_file(&args[1])?;
    let config = manager.config().clone();
    let feed = match args.get(2) {
        Some(path) => ScriptedFeed::from_file(path)?,
        None => demo_script(&config),
    };

    run(config, feed)
}
