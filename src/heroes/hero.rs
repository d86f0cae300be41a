//! Hero record
//!
//! Registry:
//!
//! | logical     | attribute    | type    | global |
//! |-------------|--------------|---------|--------|
//! | `id`        | `id`         | numeric | no     |
//! | `name`      | `name`       | text    | yes    |
//! | `power`     | `power`      | text    | yes    |
//! | `alterEgo`  | `alter_ego`  | text    | yes    |
//! | `rating`    | `rating`     | numeric | no     |
//! | `powerDate` | `power_date` | date    | no     |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::{Attribute, FieldRegistryBuilder, FieldValue, Filterable, Record};

/// Logical field used when a request carries no sort fields
pub const DEFAULT_SORT_FIELD: &str = "id";

/// A hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub power: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alter_ego: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_date: Option<DateTime<Utc>>,
}

impl Hero {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            power: String::new(),
            alter_ego: None,
            rating: None,
            power_date: None,
        }
    }

    pub fn with_power(mut self, power: impl Into<String>) -> Self {
        self.power = power.into();
        self
    }

    pub fn with_alter_ego(mut self, alter_ego: impl Into<String>) -> Self {
        self.alter_ego = Some(alter_ego.into());
        self
    }

    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_power_date(mut self, power_date: DateTime<Utc>) -> Self {
        self.power_date = Some(power_date);
        self
    }

    /// The nine-hero starting roster
    pub fn initial_roster() -> Vec<Hero> {
        const ROSTER: [(&str, i32); 9] = [
            ("Dr. Nice", 0),
            ("Bombasto", 4),
            ("Celeritas", 5),
            ("Magneta", 5),
            ("RubberMan", 5),
            ("Dynama", 5),
            ("Dr. IQ", 0),
            ("Magma", 0),
            ("Tornado", 3),
        ];

        ROSTER
            .iter()
            .zip(1..)
            .map(|(&(name, rating), id)| Hero::new(id, name).with_rating(rating))
            .collect()
    }
}

impl Record for Hero {
    fn attributes() -> &'static [Attribute] {
        const ATTRIBUTES: &[Attribute] = &[
            Attribute::numeric("id"),
            Attribute::text("name"),
            Attribute::text("power"),
            Attribute::text("alter_ego"),
            Attribute::numeric("rating"),
            Attribute::date("power_date"),
        ];
        ATTRIBUTES
    }

    fn value(&self, attribute: &str) -> FieldValue<'_> {
        match attribute {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "power" => (&self.power).into(),
            "alter_ego" => self.alter_ego.as_ref().into(),
            "rating" => self.rating.into(),
            "power_date" => self.power_date.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Filterable for Hero {
    fn declare_fields(builder: FieldRegistryBuilder) -> FieldRegistryBuilder {
        builder
            .numeric("id", "id", false)
            .text("name", "name", true)
            .text("power", "power", true)
            .text("alterEgo", "alter_ego", true)
            .numeric("rating", "rating", false)
            .date("powerDate", "power_date", false)
    }
}
