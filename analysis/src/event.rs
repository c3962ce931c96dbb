//! The decoded event stream of a single match, in chronological order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Team {
    Unassigned,
    Spectators,
    Terrorists,
    CounterTerrorists,
}

impl Team {
    /// Whether the team actually takes part in rounds, as opposed to observers.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Terrorists | Self::CounterTerrorists)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldPosition {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl WorldPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PlayerConnect {
        player: String,
    },
    MatchStart,
    RoundStart,
    RoundEnd,
    BombPlanted {
        player: String,
    },
    BombDefused {
        player: String,
    },
    PlayerFlashed {
        attacker: String,
        victim: String,
        attacker_team: Team,
        victim_team: Team,
        /// Seconds the victim stays blinded.
        flash_duration: f32,
    },
    Kill {
        /// Absent for world kills, e.g. fall damage or the bomb.
        #[serde(default)]
        killer: Option<String>,
        victim: String,
        #[serde(default)]
        assister: Option<String>,
        weapon: String,
        is_headshot: bool,
        penetrated_objects: u32,
        killer_position: WorldPosition,
        victim_position: WorldPosition,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PlayerConnect { .. } => "PlayerConnect",
            Self::MatchStart => "MatchStart",
            Self::RoundStart => "RoundStart",
            Self::RoundEnd => "RoundEnd",
            Self::BombPlanted { .. } => "BombPlanted",
            Self::BombDefused { .. } => "BombDefused",
            Self::PlayerFlashed { .. } => "PlayerFlashed",
            Self::Kill { .. } => "Kill",
        }
    }
}
