//! Restaurant records and payloads.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::RestaurantId;
use crate::record::{parsed, parsed_or, required, FieldMap, HashRecord};
use crate::validate::{require_non_blank, Validate, ValidationError};

/// Hash field holding the view counter.
pub const VIEW_COUNT_FIELD: &str = "viewCount";

/// A restaurant record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Restaurant ID.
    pub id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Free-form location.
    pub location: String,
    /// Number of times the restaurant has been fetched.
    ///
    /// Absent from freshly created hashes; reported as zero until the first read.
    #[serde(default)]
    pub view_count: i64,
}

impl Restaurant {
    /// Create a new restaurant with a fresh id and no views.
    #[must_use]
    pub fn new(input: NewRestaurant) -> Self {
        Self {
            id: RestaurantId::generate(),
            name: input.name,
            location: input.location,
            view_count: 0,
        }
    }
}

impl HashRecord for Restaurant {
    /// The view counter is owned by the increment path and never written here.
    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("id".to_string(), self.id.to_string()),
            ("name".to_string(), self.name.clone()),
            ("location".to_string(), self.location.clone()),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        Ok(Self {
            id: parsed(fields, "id")?,
            name: required(fields, "name")?.to_string(),
            location: required(fields, "location")?.to_string(),
            view_count: parsed_or(fields, VIEW_COUNT_FIELD, 0)?,
        })
    }
}

/// Create restaurant request body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewRestaurant {
    /// Display name.
    pub name: String,
    /// Free-form location.
    pub location: String,
}

impl Validate for NewRestaurant {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("location", &self.location)
    }
}
