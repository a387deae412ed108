use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Aircraft subtypes a crew is rated for.
///
/// The backend stores these comma-joined and usually splits them before responding, but
/// older payloads (and some create echoes) still carry the joined string. Both decode to
/// the same list; encoding is always a JSON list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifications(pub Vec<String>);

impl Qualifications {
    pub fn new<I, S>(subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(subtypes.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, subtype: &str) -> bool {
        self.0.iter().any(|q| q == subtype)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Serialize for Qualifications {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QualificationsRepr {
    List(Vec<String>),
    Joined(String),
}

impl<'de> Deserialize<'de> for Qualifications {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match QualificationsRepr::deserialize(deserializer)? {
            QualificationsRepr::List(list) => Qualifications(list),
            QualificationsRepr::Joined(joined) => Qualifications(
                joined
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crew {
    pub crew_id: String,
    pub qualifications: Qualifications,
    pub current_location: String,
    #[serde(with = "crate::instant")]
    pub available_from: DateTime<Utc>,
    #[serde(default)]
    pub duty_hours: f64,
    #[serde(default)]
    pub total_flights: u32,
}
