use super::*;

pub struct StatsAnalysis {}

impl StatsAnalysis {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for StatsAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl Analysis for StatsAnalysis {
    #[tracing::instrument(name = "Stats", skip(self, input))]
    fn analyse(&self, input: &AnalysisInput) -> Result<Deferred, crate::RunError> {
        tracing::info!("Aggregating {} events", input.events.len());

        let mut aggregator =
            analysis::stats::Aggregator::new(input.match_id.clone(), input.map.clone(), input.calibration);
        for event in input.events.iter() {
            aggregator.apply(event)?;
        }
        let payload = to_payload(aggregator.finalize());

        Ok(Box::new(move |sinks| {
            Box::pin(async move { sinks.publisher.publish(&payload).await })
        }))
    }
}

fn position(point: analysis::calibration::SpatialPoint) -> common::match_stats::Position {
    common::match_stats::Position {
        x: point.x,
        y: point.y,
    }
}

pub fn to_payload(result: analysis::stats::MatchAggregateResult) -> common::MatchStats {
    common::MatchStats {
        match_id: result.match_id,
        data: result
            .players
            .into_iter()
            .map(|player| common::match_stats::PlayerData {
                nickname: player.nickname,
                plants: player.bomb_plants,
                defusals: player.defusals,
                flashed: player.players_flashed,
                assists: player.assists,
                kills: player
                    .kills
                    .into_iter()
                    .map(|kill| common::match_stats::KillRecord {
                        victim: kill.victim,
                        killer_position: position(kill.killer_position),
                        victim_position: position(kill.victim_position),
                        wallbang: kill.was_wallbang,
                        headshot: kill.was_headshot,
                        entry: kill.was_entry,
                        weapon: kill.weapon,
                    })
                    .collect(),
                deaths: player
                    .deaths
                    .into_iter()
                    .map(|death| common::match_stats::DeathRecord {
                        killer: death.killer,
                        killer_position: position(death.killer_position),
                        victim_position: position(death.victim_position),
                        wallbang: death.was_wallbang,
                        headshot: death.was_headshot,
                        entry: death.was_entry,
                        weapon: death.weapon,
                    })
                    .collect(),
            })
            .collect(),
    }
}
