use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position of one celestial body: the sign it falls in and its degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub sign: String,
    pub degree: f64,
}

impl Planet {
    pub fn new(sign: impl Into<String>, degree: f64) -> Self {
        Self {
            sign: sign.into(),
            degree,
        }
    }
}

/// Planet placements of a chart.
///
/// The five inner bodies are always computed; the outer planets may be
/// omitted by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planets {
    pub sun: Planet,
    pub moon: Planet,
    pub mercury: Planet,
    pub venus: Planet,
    pub mars: Planet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jupiter: Option<Planet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturn: Option<Planet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uranus: Option<Planet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neptune: Option<Planet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pluto: Option<Planet>,
}

impl Planets {
    pub fn get(&self, name: PlanetName) -> Option<&Planet> {
        match name {
            PlanetName::Sun => Some(&self.sun),
            PlanetName::Moon => Some(&self.moon),
            PlanetName::Mercury => Some(&self.mercury),
            PlanetName::Venus => Some(&self.venus),
            PlanetName::Mars => Some(&self.mars),
            PlanetName::Jupiter => self.jupiter.as_ref(),
            PlanetName::Saturn => self.saturn.as_ref(),
            PlanetName::Uranus => self.uranus.as_ref(),
            PlanetName::Neptune => self.neptune.as_ref(),
            PlanetName::Pluto => self.pluto.as_ref(),
        }
    }

    /// Present placements in display order (Sun through Pluto).
    pub fn placements(&self) -> Vec<PlanetPlacement> {
        PlanetName::ALL
            .iter()
            .filter_map(|&name| {
                self.get(name).map(|p| PlanetPlacement {
                    name,
                    sign: p.sign.clone(),
                    degree: p.degree,
                })
            })
            .collect()
    }
}

/// The bodies a chart can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetName {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl PlanetName {
    pub const ALL: [PlanetName; 10] = [
        PlanetName::Sun,
        PlanetName::Moon,
        PlanetName::Mercury,
        PlanetName::Venus,
        PlanetName::Mars,
        PlanetName::Jupiter,
        PlanetName::Saturn,
        PlanetName::Uranus,
        PlanetName::Neptune,
        PlanetName::Pluto,
    ];

    /// Wire key used in the `planets` object.
    pub fn key(&self) -> &'static str {
        match self {
            PlanetName::Sun => "sun",
            PlanetName::Moon => "moon",
            PlanetName::Mercury => "mercury",
            PlanetName::Venus => "venus",
            PlanetName::Mars => "mars",
            PlanetName::Jupiter => "jupiter",
            PlanetName::Saturn => "saturn",
            PlanetName::Uranus => "uranus",
            PlanetName::Neptune => "neptune",
            PlanetName::Pluto => "pluto",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            PlanetName::Jupiter
                | PlanetName::Saturn
                | PlanetName::Uranus
                | PlanetName::Neptune
                | PlanetName::Pluto
        )
    }
}

impl std::fmt::Display for PlanetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = self.key();
        let mut chars = key.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// A flattened (body, sign, degree) row for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetPlacement {
    pub name: PlanetName,
    pub sign: String,
    pub degree: f64,
}

/// A birth chart as stored by the backend.
///
/// Charts only come into existence through server-side calculation; the
/// client never builds one except as a detached edit copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Stored date; either `YYYY-MM-DD` or a full RFC 3339 timestamp.
    pub birth_date: String,

    /// `HH:MM`, 24-hour.
    pub birth_time: String,

    pub birth_location: String,

    pub sun_sign: String,
    pub moon_sign: String,
    pub rising_sign: String,

    pub planets: Planets,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Chart {
    /// Notes to display; `None` when absent or blank.
    pub fn display_notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}
