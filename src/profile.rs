//! Profile fields requested from the provider.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::ProviderUserId;

/// A field that may be requested from the `/me` profile endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Id,
    FirstName,
    LastName,
    Email,
    Name,
    Birthday,
    Gender,
    Location,
    AgeRange,
}

impl ProfileField {
    pub const ALL: [Self; 9] = [
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Name,
        Self::Birthday,
        Self::Gender,
        Self::Location,
        Self::AgeRange,
    ];

    /// Graph API field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Name => "name",
            Self::Birthday => "birthday",
            Self::Gender => "gender",
            Self::Location => "location",
            Self::AgeRange => "age_range",
        }
    }

    /// Comma-joined `fields` query value.
    #[must_use]
    pub fn join(fields: &[Self]) -> String {
        fields
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::Config(format!("unknown profile field: {s:?}")))
    }
}

/// Place reference returned for the `location` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Location {
    #[serde(default)]
    pub id: Option<String>,
    /// Usually "City, State".
    pub name: String,
}

/// Bucketed age returned for the `age_range` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AgeRange {
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
}

/// Profile record built from one `/me` response.
///
/// Every field is optional: the provider omits fields the user has not
/// granted or that were not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ProfileDetails {
    #[serde(default)]
    pub id: Option<ProviderUserId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub age_range: Option<AgeRange>,
}

impl ProfileDetails {
    #[must_use]
    pub fn new(id: ProviderUserId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Identifier, ignoring an empty string.
    #[must_use]
    pub fn user_id(&self) -> Option<&ProviderUserId> {
        self.id.as_ref().filter(|id| !id.0.is_empty())
    }

    #[must_use]
    pub fn age_range_min(&self) -> Option<u32> {
        self.age_range.and_then(|r| r.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_fields() {
        assert_eq!(ProfileField::join(&[ProfileField::Id]), "id");
        assert_eq!(
            ProfileField::join(&[
                ProfileField::Id,
                ProfileField::FirstName,
                ProfileField::LastName,
                ProfileField::Email,
            ]),
            "id,first_name,last_name,email"
        );
    }

    #[test]
    fn parse_field_names() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>().unwrap(), field);
        }
        assert!("friends".parse::<ProfileField>().is_err());
    }

    #[test]
    fn deserialize_demographic_profile() {
        let json = r#"{
            "id": "10153",
            "name": "Peggy Zheng",
            "birthday": "08/15/1990",
            "email": "peggy@example.com",
            "gender": "female",
            "location": {"id": "108", "name": "Shenzhen, China"},
            "age_range": {"min": 21}
        }"#;
        let details: ProfileDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.user_id().unwrap().0, "10153");
        assert_eq!(details.age_range_min(), Some(21));
        assert_eq!(details.location.unwrap().name, "Shenzhen, China");
        assert!(details.first_name.is_none());
    }

    #[test]
    fn empty_id_is_not_an_identifier() {
        let details: ProfileDetails = serde_json::from_str(r#"{"id": ""}"#).unwrap();
        assert!(details.user_id().is_none());
        assert!(ProfileDetails::default().user_id().is_none());
    }
}
