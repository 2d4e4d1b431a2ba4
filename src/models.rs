use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{entities::movie, store::StoreError};

/// A movie row as handed out by the store. Values are detached copies; writing
/// them back goes through [`crate::store::MovieStore`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: Timestamp,
    pub runtime: i32,
    pub mpaa_rating: String,
    pub description: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<movie::Model> for Movie {
    type Error = StoreError;

    fn try_from(row: movie::Model) -> Result<Self, Self::Error> {
        let release_date = row.release_date.parse::<Timestamp>().map_err(|err| {
            StoreError::Decode { id: row.id, reason: format!("release_date: {err}") }
        })?;
        let created_at = from_unix(row.id, "created_at", row.created_at)?;
        let updated_at = from_unix(row.id, "updated_at", row.updated_at)?;

        Ok(Self {
            id: row.id,
            title: row.title,
            release_date,
            runtime: row.runtime,
            mpaa_rating: row.mpaa_rating,
            description: row.description,
            image: row.image,
            created_at,
            updated_at,
        })
    }
}

fn from_unix(id: i64, column: &str, seconds: i64) -> Result<Timestamp, StoreError> {
    Timestamp::from_second(seconds)
        .map_err(|err| StoreError::Decode { id, reason: format!("{column}: {err}") })
}
