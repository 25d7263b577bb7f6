use serde::{Deserialize, Deserializer};
use serde_json::Value;

// --- API Response Structures ---
//
// Every struct is `#[serde(default)]` and every non-optional field goes
// through `null_as_default`: the API omits fields freely and sends `null`
// for some of them, so both cases collapse to the type default.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw player profile from `/players/{tag}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trophies: u32,
    #[serde(rename = "highestTrophies", deserialize_with = "null_as_default")]
    pub highest_trophies: u32,
    #[serde(rename = "expLevel", deserialize_with = "null_as_default")]
    pub exp_level: u32,
    #[serde(rename = "3vs3Victories", deserialize_with = "null_as_default")]
    pub victories_3v3: u32,
    #[serde(rename = "soloVictories", deserialize_with = "null_as_default")]
    pub victories_solo: u32,
    #[serde(rename = "duoVictories", deserialize_with = "null_as_default")]
    pub victories_duo: u32,
    pub club: Option<ClubRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub brawlers: Vec<PlayerBrawler>,
}

impl PlayerResponse {
    /// Club tag, `None` when the player is not in a club (the API sends `{}`)
    pub fn club_tag(&self) -> Option<&str> {
        self.club
            .as_ref()
            .map(|c| c.tag.as_str())
            .filter(|tag| !tag.is_empty())
    }

    pub fn club_name(&self) -> &str {
        self.club.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClubRef {
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerBrawler {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub power: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub rank: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub trophies: u32,
    #[serde(rename = "highestTrophies", deserialize_with = "null_as_default")]
    pub highest_trophies: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamedRef {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Raw brawler catalog from `/brawlers`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrawlerCatalogResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<BrawlerInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrawlerInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub rarity: Option<NamedRef>,
    pub class: Option<NamedRef>,
}

/// Raw battle log from `/players/{tag}/battlelog`.
///
/// Entries stay raw so one malformed battle does not sink the whole log.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BattleLogResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BattleEntry {
    #[serde(rename = "battleTime", deserialize_with = "null_as_default")]
    pub battle_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event: EventInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub battle: BattleDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub map: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BattleDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub map: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub battle_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub result: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(rename = "trophyChange", deserialize_with = "null_as_default")]
    pub trophy_change: i32,
    #[serde(rename = "starPlayer")]
    pub star_player: Option<BattlePlayer>,
    #[serde(deserialize_with = "null_as_default")]
    pub teams: Vec<Vec<BattlePlayer>>,
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<BattlePlayer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BattlePlayer {
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brawler: BattleBrawler,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BattleBrawler {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub power: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub trophies: u32,
}

/// Raw club from `/clubs/{tag}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClubResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Raw entries, parsed one by one into [`ClubMember`]
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClubMember {
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub trophies: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
}
