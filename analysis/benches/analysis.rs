use analysis::calibration::MapCalibration;
use analysis::event::{Event, WorldPosition};

fn main() {
    divan::main();
}

fn synthetic_match(rounds: usize) -> Vec<Event> {
    let players: Vec<String> = (0..10).map(|i| format!("player{}", i)).collect();

    let mut events: Vec<Event> = players
        .iter()
        .map(|p| Event::PlayerConnect { player: p.clone() })
        .collect();
    events.push(Event::MatchStart);
    events.push(Event::RoundEnd);

    for round in 0..rounds {
        events.push(Event::RoundStart);
        for kill in 0..5 {
            let killer = &players[(round + kill) % 5];
            let victim = &players[5 + (round * 3 + kill) % 5];
            events.push(Event::Kill {
                killer: Some(killer.clone()),
                victim: victim.clone(),
                assister: None,
                weapon: "ak47".to_owned(),
                is_headshot: kill % 2 == 0,
                penetrated_objects: 0,
                killer_position: WorldPosition::new(kill as f64 * 100.0, round as f64 * 10.0),
                victim_position: WorldPosition::new(kill as f64 * 120.0, round as f64 * 12.0),
            });
        }
        events.push(Event::RoundEnd);
    }

    events
}

#[divan::bench(args = [12, 24, 30])]
fn stats(bencher: divan::Bencher, rounds: usize) {
    let events = synthetic_match(rounds);
    let calibration = *MapCalibration::for_map("de_dust2").unwrap();

    bencher.bench(|| {
        let mut aggregator = analysis::stats::Aggregator::new("bench", "de_dust2", calibration);
        for event in divan::black_box(&events) {
            aggregator.apply(event).unwrap();
        }
        aggregator.finalize()
    });
}

#[divan::bench(args = [12, 24, 30])]
fn heatmap(bencher: divan::Bencher, rounds: usize) {
    let events = synthetic_match(rounds);
    let calibration = *MapCalibration::for_map("de_dust2").unwrap();
    let base = image::DynamicImage::ImageRgba8(image::RgbaImage::new(1024, 1024));
    let renderer = analysis::heatmap::HeatmapRenderer::new(Default::default());

    bencher.bench(|| {
        let mut collector = analysis::points::PointCollector::new("player0", calibration);
        for event in divan::black_box(&events) {
            collector.apply(event).unwrap();
        }
        let (kills, _) = collector.into_series();
        renderer.render(&kills, &base, (1024, 1024))
    });
}
