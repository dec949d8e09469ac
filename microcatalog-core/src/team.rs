use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Team owning one or more microservices.
///
/// Only the identifier and display name are interpreted here; whatever else
/// the backend sends is carried in `attributes` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Team {
    /// Bare reference carrying only the identifier.
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Label shown in a selector: the name, falling back to the id.
    pub fn label(&self) -> String {
        match (&self.name, self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => id.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl From<&Team> for Value {
    fn from(team: &Team) -> Self {
        let mut map = team.attributes.clone();
        if let Some(id) = team.id {
            map.insert("id".into(), Value::from(id));
        }
        if let Some(name) = &team.name {
            map.insert("name".into(), Value::from(name.clone()));
        }
        Value::Object(map)
    }
}
