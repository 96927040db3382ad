use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::fields;

/// Project entity - represents a project stored in MongoDB.
///
/// Field names follow the historical storage layout (Croatian keys);
/// the English names clients see are defined in [`crate::fields`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    /// Project name
    #[serde(rename = "naziv_projekta")]
    pub name: String,
    /// Project description
    #[serde(rename = "opis_projekta")]
    pub description: String,
    /// Free-form notes on completed work
    #[serde(rename = "obavljeni_poslovi")]
    pub jobs_done: String,
    /// Project price
    #[serde(rename = "cijena_projekta")]
    pub price: f64,
    /// Start of the engagement
    #[serde(rename = "datum_pocetka")]
    pub start_date: DateTime<Utc>,
    /// End of the engagement
    #[serde(rename = "datum_zavrsetka")]
    pub end_date: DateTime<Utc>,
    /// Member identifiers (may be empty)
    #[serde(rename = "clanovi", default)]
    pub members: Vec<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating or fully replacing a project.
///
/// Uses the external field names; the serde renames on [`Project`]
/// translate to the stored layout when the record is persisted.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 200))]
    pub project_name: String,
    #[validate(length(min = 1))]
    pub project_description: String,
    #[validate(length(min = 1))]
    pub jobs_done: String,
    pub project_price: f64,
    /// Start date as YYYY-MM-DD
    pub start_date: NaiveDate,
    /// End date as YYYY-MM-DD
    pub end_date: NaiveDate,
    /// Member identifiers; accepts a native array or a legacy
    /// JSON-in-a-string blob under `members[]`
    #[serde(
        default,
        alias = "members[]",
        deserialize_with = "deserialize_members"
    )]
    #[schema(value_type = Vec<String>)]
    pub members: Vec<String>,
}

/// Legacy form posts encode the members list as a serialized JSON array
/// inside a single text field (`members[]="[\"alice\",\"bob\"]"`).
/// This adapter accepts both that blob and a native array, so the core
/// validation never sees the encoding difference.
#[derive(Deserialize)]
#[serde(untagged)]
enum MembersInput {
    List(Vec<String>),
    Blob(String),
}

fn deserialize_members<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<MembersInput>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(MembersInput::List(members)) => Ok(members),
        Some(MembersInput::Blob(blob)) => serde_json::from_str(&blob).map_err(|e| {
            serde::de::Error::custom(format!("members must be a JSON array of strings: {}", e))
        }),
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl Project {
    /// Build a new project from validated input. The id is generated
    /// here, before the insert, and never changes afterwards.
    pub fn new(input: ProjectInput) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: input.project_name,
            description: input.project_description,
            jobs_done: input.jobs_done,
            price: input.project_price,
            start_date: start_of_day(input.start_date),
            end_date: start_of_day(input.end_date),
            members: input.members,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full-field replacement: every editable field takes the new
    /// value; only `id` and `created_at` survive from the original.
    pub fn replaced_with(&self, input: ProjectInput) -> Self {
        Self {
            id: self.id,
            name: input.project_name,
            description: input.project_description,
            jobs_done: input.jobs_done,
            price: input.project_price,
            start_date: start_of_day(input.start_date),
            end_date: start_of_day(input.end_date),
            members: input.members,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// Edit-form payload: external field names, dates flattened to
    /// `YYYY-MM-DD` strings for pre-filling a form. Display-only; the
    /// stored values keep their full timestamps.
    pub fn edit_form(&self) -> Result<serde_json::Value, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        let mut form = match value {
            serde_json::Value::Object(map) => fields::externalize(&map),
            _ => serde_json::Map::new(),
        };

        form.remove("_id");
        form.remove("created_at");
        form.remove("updated_at");
        form.insert("id".to_string(), json!(self.id.to_hex()));
        form.insert(
            "start_date".to_string(),
            json!(self.start_date.format("%Y-%m-%d").to_string()),
        );
        form.insert(
            "end_date".to_string(),
            json!(self.end_date.format("%Y-%m-%d").to_string()),
        );

        Ok(serde_json::Value::Object(form))
    }
}

/// Blank create-form payload: every external field name with an empty
/// value, ready for a client to render an empty form.
pub fn blank_form() -> serde_json::Value {
    let mut form = serde_json::Map::new();
    for (external, _) in fields::FIELD_PAIRS {
        let value = if external == "members" {
            json!([])
        } else {
            json!("")
        };
        form.insert(external.to_string(), value);
    }
    serde_json::Value::Object(form)
}
