use analysis::calibration::{MapCalibration, SpatialPoint};
use analysis::event::{Event, WorldPosition};
use analysis::points::{PointCollector, PointSeries};
use pretty_assertions::assert_eq;

fn kill(killer: Option<&str>, victim: &str, killer_pos: (f64, f64), victim_pos: (f64, f64)) -> Event {
    Event::Kill {
        killer: killer.map(|k| k.to_owned()),
        victim: victim.to_owned(),
        assister: None,
        weapon: "m4a1".to_owned(),
        is_headshot: false,
        penetrated_objects: 0,
        killer_position: WorldPosition::new(killer_pos.0, killer_pos.1),
        victim_position: WorldPosition::new(victim_pos.0, victim_pos.1),
    }
}

#[test]
fn collects_kills_and_deaths_of_tracked_player() {
    let calibration = MapCalibration {
        pos_x: -100.0,
        pos_y: 100.0,
        scale: 2.0,
    };
    let mut collector = PointCollector::new("me", calibration);

    let events = vec![
        // Warm-up kills are collected as well
        Event::PlayerConnect {
            player: "me".to_owned(),
        },
        kill(Some("me"), "other", (0.0, 0.0), (10.0, 10.0)),
        Event::MatchStart,
        kill(Some("other"), "me", (20.0, 20.0), (-100.0, 100.0)),
        kill(Some("other"), "third", (0.0, 0.0), (0.0, 0.0)),
        kill(None, "me", (500.0, 500.0), (100.0, -100.0)),
    ];
    for event in events.iter() {
        collector.apply(event).unwrap();
    }

    assert_eq!(
        &PointSeries::from(vec![SpatialPoint::new(50.0, 50.0)]),
        collector.kill_points()
    );
    assert_eq!(
        &PointSeries::from(vec![SpatialPoint::new(0.0, 0.0), SpatialPoint::new(100.0, 100.0)]),
        collector.death_points()
    );
}

#[test]
fn self_kill_lands_in_both_series() {
    let calibration = MapCalibration {
        pos_x: 0.0,
        pos_y: 0.0,
        scale: 1.0,
    };
    let mut collector = PointCollector::new("me", calibration);

    collector.apply(&kill(Some("me"), "me", (3.0, -4.0), (5.0, -6.0))).unwrap();

    let (kills, deaths) = collector.into_series();
    assert_eq!(PointSeries::from(vec![SpatialPoint::new(3.0, 4.0)]), kills);
    assert_eq!(PointSeries::from(vec![SpatialPoint::new(5.0, 6.0)]), deaths);
}

#[test]
fn untracked_positions_are_not_validated() {
    let calibration = MapCalibration {
        pos_x: 0.0,
        pos_y: 0.0,
        scale: 1.0,
    };
    let mut collector = PointCollector::new("me", calibration);

    collector
        .apply(&kill(Some("a"), "b", (f64::NAN, 0.0), (0.0, f64::INFINITY)))
        .unwrap();

    assert!(
        collector
            .apply(&kill(Some("me"), "b", (f64::NAN, 0.0), (0.0, 0.0)))
            .is_err()
    );
    assert!(collector.kill_points().is_empty());
}
