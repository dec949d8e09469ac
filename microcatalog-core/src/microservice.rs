use crate::error::Result;
use crate::form::FormGroup;
use crate::team::Team;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Microservice catalog entry.
///
/// `id` is absent until the backend has persisted the entry; its presence is
/// what separates an update from a create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Microservice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Swagger / OpenAPI document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger_url: Option<String>,

    /// Source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
}

impl Microservice {
    /// Control names of the edit form, in display order.
    pub const FIELDS: [&'static str; 7] = [
        "id",
        "name",
        "description",
        "imageUrl",
        "swaggerUrl",
        "gitUrl",
        "team",
    ];

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Empty edit form. No validation rules are configured for this entity.
    pub fn form() -> FormGroup {
        Self::FIELDS
            .iter()
            .fold(FormGroup::new(), |form, name| form.control(*name, Vec::new()))
    }

    /// Every field as a `(control, value)` pair; absent fields become `null`.
    pub fn to_form_patch(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(self.id)),
            ("name", Value::from(self.name.clone())),
            ("description", Value::from(self.description.clone())),
            ("imageUrl", Value::from(self.image_url.clone())),
            ("swaggerUrl", Value::from(self.swagger_url.clone())),
            ("gitUrl", Value::from(self.git_url.clone())),
            ("team", self.team.as_ref().map_or(Value::Null, Value::from)),
        ]
    }

    /// Read an entity back out of an edit form.
    pub fn from_form(form: &FormGroup) -> Result<Self> {
        Ok(Self {
            id: form.get_as("id")?,
            name: form.get_as("name")?,
            description: form.get_as("description")?,
            image_url: form.get_as("imageUrl")?,
            swagger_url: form.get_as("swaggerUrl")?,
            git_url: form.get_as("gitUrl")?,
            team: form.get_as("team")?,
        })
    }
}
