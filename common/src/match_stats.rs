//! Statistics payload published once a match has been analysed.

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchStats {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub data: Vec<PlayerData>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerData {
    pub nickname: String,
    pub plants: usize,
    pub defusals: usize,
    pub flashed: usize,
    #[serde(default)]
    pub assists: usize,
    pub kills: Vec<KillRecord>,
    pub deaths: Vec<DeathRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KillRecord {
    pub victim: String,
    #[serde(rename = "kPos")]
    pub killer_position: Position,
    #[serde(rename = "vPos")]
    pub victim_position: Position,
    #[serde(rename = "wb")]
    pub wallbang: bool,
    #[serde(rename = "hs")]
    pub headshot: bool,
    pub entry: bool,
    pub weapon: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeathRecord {
    pub killer: String,
    #[serde(rename = "kPos")]
    pub killer_position: Position,
    #[serde(rename = "vPos")]
    pub victim_position: Position,
    #[serde(rename = "wb")]
    pub wallbang: bool,
    #[serde(rename = "hs")]
    pub headshot: bool,
    pub entry: bool,
    pub weapon: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> MatchStats {
        MatchStats {
            match_id: "1-abc".to_owned(),
            data: vec![PlayerData {
                nickname: "me".to_owned(),
                plants: 2,
                defusals: 1,
                flashed: 4,
                assists: 3,
                kills: vec![KillRecord {
                    victim: "other".to_owned(),
                    killer_position: Position { x: 12.5, y: 300.0 },
                    victim_position: Position { x: 40.0, y: 310.25 },
                    wallbang: true,
                    headshot: false,
                    entry: true,
                    weapon: "AK-47".to_owned(),
                }],
                deaths: vec![DeathRecord {
                    killer: "other".to_owned(),
                    killer_position: Position { x: 1.0, y: 2.0 },
                    victim_position: Position { x: 3.0, y: 4.0 },
                    wallbang: false,
                    headshot: true,
                    entry: false,
                    weapon: "AWP".to_owned(),
                }],
            }],
        }
    }

    #[test]
    fn roundtrip() {
        let stats = sample();

        let encoded = serde_json::to_string(&stats).unwrap();
        let decoded: MatchStats = serde_json::from_str(&encoded).unwrap();

        assert_eq!(stats, decoded);
    }

    #[test]
    fn wire_names() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!("1-abc", value["matchId"]);
        let player = &value["data"][0];
        assert_eq!(2, player["plants"]);
        assert_eq!(4, player["flashed"]);
        assert_eq!(12.5, player["kills"][0]["kPos"]["X"]);
        assert_eq!(310.25, player["kills"][0]["vPos"]["Y"]);
        assert_eq!(true, player["kills"][0]["wb"]);
        assert_eq!(true, player["deaths"][0]["hs"]);
        assert_eq!("other", player["deaths"][0]["killer"]);
    }

    #[test]
    fn assists_are_optional() {
        let player: PlayerData = serde_json::from_str(
            r#"{"nickname": "me", "plants": 0, "defusals": 0, "flashed": 0, "kills": [], "deaths": []}"#,
        )
        .unwrap();

        assert_eq!(0, player.assists);
    }
}
