use crate::calibration::{MapCalibration, SpatialPoint};
use crate::event::{Event, Team, WorldPosition};
use crate::lifecycle::RoundLifecycle;

/// Flashes shorter than this (in seconds) are not considered effective.
pub const EFFECTIVE_FLASH_DURATION: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct KillEvent {
    pub victim: String,
    pub killer_position: SpatialPoint,
    pub victim_position: SpatialPoint,
    pub weapon: String,
    pub was_headshot: bool,
    pub was_wallbang: bool,
    pub was_entry: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeathEvent {
    pub killer: String,
    pub killer_position: SpatialPoint,
    pub victim_position: SpatialPoint,
    pub weapon: String,
    pub was_headshot: bool,
    pub was_wallbang: bool,
    pub was_entry: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub nickname: String,
    pub bomb_plants: usize,
    pub defusals: usize,
    pub players_flashed: usize,
    pub assists: usize,
    pub kills: Vec<KillEvent>,
    pub deaths: Vec<DeathEvent>,
}

impl PlayerRecord {
    fn new(nickname: String) -> Self {
        Self {
            nickname,
            bomb_plants: 0,
            defusals: 0,
            players_flashed: 0,
            assists: 0,
            kills: Vec::new(),
            deaths: Vec::new(),
        }
    }

    pub fn headshots(&self) -> usize {
        self.kills.iter().filter(|k| k.was_headshot).count()
    }

    pub fn entry_kills(&self) -> usize {
        self.kills.iter().filter(|k| k.was_entry).count()
    }

    /// Number of kills per weapon.
    pub fn weapon_usage(&self) -> std::collections::BTreeMap<&str, usize> {
        let mut usage = std::collections::BTreeMap::new();
        for kill in self.kills.iter() {
            *usage.entry(kill.weapon.as_str()).or_insert(0) += 1;
        }
        usage
    }
}

#[derive(Debug, PartialEq)]
pub struct MatchAggregateResult {
    pub match_id: String,
    pub map: String,
    /// In the order the players connected.
    pub players: Vec<PlayerRecord>,
}

impl MatchAggregateResult {
    pub fn player(&self, nickname: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.nickname == nickname)
    }
}

/// Folds the event stream of one match into per-player statistics.
///
/// Players are only tracked if they connected before the match started, and
/// nothing is counted until the warm-up round is over.
pub struct Aggregator {
    match_id: String,
    map: String,
    calibration: MapCalibration,
    lifecycle: RoundLifecycle,
    roster: Vec<String>,
    players: Vec<PlayerRecord>,
    player_index: std::collections::HashMap<String, usize>,
    event_index: usize,
}

impl Aggregator {
    pub fn new(match_id: impl Into<String>, map: impl Into<String>, calibration: MapCalibration) -> Self {
        Self {
            match_id: match_id.into(),
            map: map.into(),
            calibration,
            lifecycle: RoundLifecycle::new(),
            roster: Vec::new(),
            players: Vec::new(),
            player_index: std::collections::HashMap::new(),
            event_index: 0,
        }
    }

    pub fn apply(&mut self, event: &Event) -> Result<(), crate::Error> {
        let index = self.event_index;
        self.event_index += 1;

        let _tracing_guard = tracing::trace_span!("Event", index, kind = event.kind()).entered();

        match event {
            Event::PlayerConnect { player } => self.player_connect(player),
            Event::MatchStart => {
                self.lifecycle.on_match_start();
                self.freeze_roster();
            }
            Event::RoundStart => self.lifecycle.on_round_start(),
            Event::RoundEnd => self.lifecycle.on_round_end(),
            Event::BombPlanted { player } if self.lifecycle.counting_enabled() => {
                if let Some(record) = self.record_mut(player) {
                    record.bomb_plants += 1;
                }
            }
            Event::BombDefused { player } if self.lifecycle.counting_enabled() => {
                if let Some(record) = self.record_mut(player) {
                    record.defusals += 1;
                }
            }
            Event::PlayerFlashed {
                attacker,
                attacker_team,
                victim_team,
                flash_duration,
                ..
            } if self.lifecycle.counting_enabled() => {
                if is_effective_flash(*attacker_team, *victim_team, *flash_duration) {
                    if let Some(record) = self.record_mut(attacker) {
                        record.players_flashed += 1;
                    }
                }
            }
            Event::Kill {
                killer,
                victim,
                assister,
                weapon,
                is_headshot,
                penetrated_objects,
                killer_position,
                victim_position,
            } if self.lifecycle.counting_enabled() => {
                check_position(index, "victim_position", victim_position)?;

                let (killer_name, killer_position) = match killer {
                    Some(killer) => {
                        check_position(index, "killer_position", killer_position)?;
                        (killer.as_str(), killer_position)
                    }
                    None => (victim.as_str(), victim_position),
                };

                let killer_point = self.calibration.map_to_pixel(killer_position.x, killer_position.y);
                let victim_point = self.calibration.map_to_pixel(victim_position.x, victim_position.y);
                let was_entry = self.lifecycle.consume_entry_kill_flag();
                let was_wallbang = *penetrated_objects > 0;

                tracing::debug!(
                    "{} <{}{}{}> {}",
                    killer_name,
                    weapon,
                    if *is_headshot { " (HS)" } else { "" },
                    if was_wallbang { " (Wallbang)" } else { "" },
                    victim
                );

                if killer_name != victim.as_str() {
                    if let Some(record) = self.record_mut(killer_name) {
                        record.kills.push(KillEvent {
                            victim: victim.clone(),
                            killer_position: killer_point,
                            victim_position: victim_point,
                            weapon: weapon.clone(),
                            was_headshot: *is_headshot,
                            was_wallbang,
                            was_entry,
                        });
                    }
                }

                if let Some(record) = self.record_mut(victim) {
                    record.deaths.push(DeathEvent {
                        killer: killer_name.to_owned(),
                        killer_position: killer_point,
                        victim_position: victim_point,
                        weapon: weapon.clone(),
                        was_headshot: *is_headshot,
                        was_wallbang,
                        was_entry,
                    });
                }

                if let Some(assister) = assister
                    .as_deref()
                    .filter(|a| *a != killer_name && *a != victim.as_str())
                {
                    if let Some(record) = self.record_mut(assister) {
                        record.assists += 1;
                    }
                }
            }
            _ => {
                tracing::trace!("Not counting {} event", event.kind());
            }
        };

        Ok(())
    }

    pub fn finalize(self) -> MatchAggregateResult {
        for player in self.players.iter() {
            tracing::info!(
                "{}: {} kills ({} HS, {} entry) | {} assists | {} deaths | {} plants | {} defusals | {} flashed",
                player.nickname,
                player.kills.len(),
                player.headshots(),
                player.entry_kills(),
                player.assists,
                player.deaths.len(),
                player.bomb_plants,
                player.defusals,
                player.players_flashed,
            );
            tracing::debug!("{}: weapons {:?}", player.nickname, player.weapon_usage());
        }

        MatchAggregateResult {
            match_id: self.match_id,
            map: self.map,
            players: self.players,
        }
    }

    fn player_connect(&mut self, player: &str) {
        if self.lifecycle.counting_enabled() {
            tracing::debug!("Ignoring late connect of {:?}", player);
            return;
        }

        if !self.roster.iter().any(|p| p == player) {
            self.roster.push(player.to_owned());
        }
    }

    /// Creates a record for everyone who connected so far. Players connecting
    /// afterwards only get one on the next `MatchStart`.
    fn freeze_roster(&mut self) {
        let roster = std::mem::take(&mut self.roster);
        for nickname in roster.iter() {
            self.insert_record(nickname);
        }
        self.roster = roster;
    }

    fn insert_record(&mut self, nickname: &str) {
        if self.player_index.contains_key(nickname) {
            return;
        }

        self.player_index.insert(nickname.to_owned(), self.players.len());
        self.players.push(PlayerRecord::new(nickname.to_owned()));
    }

    fn record_mut(&mut self, nickname: &str) -> Option<&mut PlayerRecord> {
        match self.player_index.get(nickname) {
            Some(idx) => self.players.get_mut(*idx),
            None => {
                tracing::trace!("No record for {:?}", nickname);
                None
            }
        }
    }
}

fn is_effective_flash(attacker_team: Team, victim_team: Team, duration: f32) -> bool {
    attacker_team != victim_team && victim_team.is_playing() && duration > EFFECTIVE_FLASH_DURATION
}

fn check_position(
    event_index: usize,
    field: &'static str,
    position: &WorldPosition,
) -> Result<(), crate::Error> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(crate::Error::NonFinitePosition { event_index, field })
    }
}
