//! Avatar record and its value types.
//!
//! An avatar record captures a user's chosen preset avatar: its type, the
//! renderable asset URL, and gender, plus an activity flag and timestamps.
//! The store keys records by the caller-supplied Active Directory user
//! identifier, holding at most one record per user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when constructing avatar value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarValidationError {
    EmptyUserId,
    EmptyAvatarUrl,
}

impl fmt::Display for AvatarValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUserId => write!(f, "adUserId must not be empty"),
            Self::EmptyAvatarUrl => write!(f, "avatarUrl must not be empty"),
        }
    }
}

impl std::error::Error for AvatarValidationError {}

/// Caller-supplied Active Directory user identifier used as the store key.
///
/// The identifier is opaque: beyond being non-empty once trimmed, no format
/// is imposed on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdUserId(String);

impl AdUserId {
    /// Validate and construct an [`AdUserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, AvatarValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AvatarValidationError::EmptyUserId);
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for AdUserId {
    type Error = AvatarValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AdUserId> for String {
    fn from(value: AdUserId) -> Self {
        value.0
    }
}

impl fmt::Display for AdUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque record identifier assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvatarId(String);

impl AvatarId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(format!("avatar_{}", Uuid::new_v4().simple()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a renderable 3D asset. Required and opaque beyond being
/// non-empty; the rendering client that consumes it lives outside this
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Validate and construct an [`AvatarUrl`].
    pub fn new(url: impl Into<String>) -> Result<Self, AvatarValidationError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(AvatarValidationError::EmptyAvatarUrl);
        }
        Ok(Self(url))
    }

    /// Borrow the URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for AvatarUrl {
    type Error = AvatarValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AvatarUrl> for String {
    fn from(value: AvatarUrl) -> Self {
        value.0
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed two-value gender enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown gender string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGenderError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseGenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gender: {}", self.input)
    }
}

impl std::error::Error for ParseGenderError {}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(ParseGenderError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Closed enumeration of preset avatar variants, split by gender.
///
/// # Examples
///
/// ```
/// # use avatar_backend::domain::{AvatarType, Gender};
/// assert_eq!(AvatarType::Male1.as_str(), "male1");
/// assert_eq!(AvatarType::Female2.gender(), Gender::Female);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarType {
    Male1,
    Male2,
    Male3,
    Female1,
    Female2,
}

impl AvatarType {
    /// Returns the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male1 => "male1",
            Self::Male2 => "male2",
            Self::Male3 => "male3",
            Self::Female1 => "female1",
            Self::Female2 => "female2",
        }
    }

    /// The gender encoded in the preset variant.
    pub fn gender(&self) -> Gender {
        match self {
            Self::Male1 | Self::Male2 | Self::Male3 => Gender::Male,
            Self::Female1 | Self::Female2 => Gender::Female,
        }
    }
}

impl fmt::Display for AvatarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown avatar type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAvatarTypeError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseAvatarTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown avatar type: {}", self.input)
    }
}

impl std::error::Error for ParseAvatarTypeError {}

impl FromStr for AvatarType {
    type Err = ParseAvatarTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male1" => Ok(Self::Male1),
            "male2" => Ok(Self::Male2),
            "male3" => Ok(Self::Male3),
            "female1" => Ok(Self::Female1),
            "female2" => Ok(Self::Female2),
            _ => Err(ParseAvatarTypeError {
                input: s.to_owned(),
            }),
        }
    }
}

/// The mutable field set of a record: everything an update may replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarSelection {
    pub avatar_type: AvatarType,
    pub avatar_url: AvatarUrl,
    pub gender: Gender,
}

/// Stored representation of a user's chosen avatar.
///
/// ## Invariants
/// - `id` is assigned at creation and never changes.
/// - `avatar_url` and `gender` are always present.
/// - Deletion is logical: retired records keep `is_active = false` and are
///   never physically removed.
/// - `updated_at` is refreshed on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRecord {
    pub id: AvatarId,
    pub user_id: AdUserId,
    pub avatar_type: AvatarType,
    pub avatar_url: AvatarUrl,
    pub gender: Gender,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AvatarRecord {
    /// Synthesize a fresh active record with both timestamps stamped to `now`.
    pub fn create(user_id: AdUserId, selection: AvatarSelection, now: DateTime<Utc>) -> Self {
        Self {
            id: AvatarId::random(),
            user_id,
            avatar_type: selection.avatar_type,
            avatar_url: selection.avatar_url,
            gender: selection.gender,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable selection fields, preserving identity, creation
    /// time, key, and the active flag.
    pub fn with_selection(mut self, selection: AvatarSelection, now: DateTime<Utc>) -> Self {
        self.avatar_type = selection.avatar_type;
        self.avatar_url = selection.avatar_url;
        self.gender = selection.gender;
        self.updated_at = now;
        self
    }

    /// Retire the record (logical delete). There is no transition back.
    pub fn retired(mut self, now: DateTime<Utc>) -> Self {
        self.is_active = false;
        self.updated_at = now;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn sample_selection() -> AvatarSelection {
        AvatarSelection {
            avatar_type: AvatarType::Male1,
            avatar_url: AvatarUrl::new("http://x/a.glb").expect("valid url"),
            gender: Gender::Male,
        }
    }

    #[rstest]
    #[case::blank("")]
    #[case::whitespace("  ")]
    fn ad_user_id_rejects_blank_input(#[case] input: &str) {
        assert_eq!(
            AdUserId::new(input),
            Err(AvatarValidationError::EmptyUserId)
        );
    }

    #[rstest]
    fn ad_user_id_keeps_opaque_values_verbatim() {
        let id = AdUserId::new("DOMAIN\\jdoe").expect("opaque id accepted");
        assert_eq!(id.as_str(), "DOMAIN\\jdoe");
    }

    #[rstest]
    #[case::male1("male1", AvatarType::Male1, Gender::Male)]
    #[case::male3("male3", AvatarType::Male3, Gender::Male)]
    #[case::female2("female2", AvatarType::Female2, Gender::Female)]
    fn avatar_type_parses_presets(
        #[case] input: &str,
        #[case] expected: AvatarType,
        #[case] gender: Gender,
    ) {
        let parsed: AvatarType = input.parse().expect("valid avatar type");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.gender(), gender);
        assert_eq!(parsed.as_str(), input);
    }

    #[rstest]
    #[case::unknown("male4")]
    #[case::empty("")]
    #[case::capitalised("Male1")]
    fn avatar_type_rejects_unknown_presets(#[case] input: &str) {
        let result: Result<AvatarType, _> = input.parse();
        assert!(result.is_err());
    }

    #[rstest]
    #[case::male("male", Gender::Male)]
    #[case::female("female", Gender::Female)]
    fn gender_parses_valid_strings(#[case] input: &str, #[case] expected: Gender) {
        let parsed: Gender = input.parse().expect("valid gender");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn avatar_type_serde_matches_parse() {
        for preset in [
            AvatarType::Male1,
            AvatarType::Male2,
            AvatarType::Male3,
            AvatarType::Female1,
            AvatarType::Female2,
        ] {
            let json = serde_json::to_string(&preset).expect("serialise");
            assert_eq!(json, format!("\"{}\"", preset.as_str()));
        }
    }

    #[rstest]
    fn create_stamps_an_active_record() {
        let now = Utc::now();
        let user_id = AdUserId::new("u1").expect("valid id");
        let record = AvatarRecord::create(user_id.clone(), sample_selection(), now);

        assert_eq!(record.user_id, user_id);
        assert!(record.is_active);
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now);
        assert!(record.id.as_str().starts_with("avatar_"));
    }

    #[rstest]
    fn with_selection_preserves_identity_and_creation_time() {
        let created = Utc::now();
        let record = AvatarRecord::create(
            AdUserId::new("u1").expect("valid id"),
            sample_selection(),
            created,
        );
        let id = record.id.clone();

        let later = created + chrono::Duration::seconds(5);
        let updated = record.with_selection(
            AvatarSelection {
                avatar_type: AvatarType::Male2,
                avatar_url: AvatarUrl::new("http://x/b.glb").expect("valid url"),
                gender: Gender::Male,
            },
            later,
        );

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.avatar_type, AvatarType::Male2);
        assert_eq!(updated.avatar_url.as_str(), "http://x/b.glb");
        assert!(updated.is_active);
    }

    #[rstest]
    fn retired_flips_the_active_flag_only() {
        let created = Utc::now();
        let record = AvatarRecord::create(
            AdUserId::new("u1").expect("valid id"),
            sample_selection(),
            created,
        );
        let later = created + chrono::Duration::seconds(5);

        let retired = record.clone().retired(later);
        assert!(!retired.is_active);
        assert_eq!(retired.updated_at, later);
        assert_eq!(retired.id, record.id);
        assert_eq!(retired.avatar_url, record.avatar_url);
    }

    #[rstest]
    fn record_serialises_with_camel_case_wire_names() {
        let record = AvatarRecord::create(
            AdUserId::new("u1").expect("valid id"),
            sample_selection(),
            Utc::now(),
        );
        let value = serde_json::to_value(&record).expect("serialise");

        assert_eq!(value["userId"], serde_json::json!("u1"));
        assert_eq!(value["avatarType"], serde_json::json!("male1"));
        assert_eq!(value["isActive"], serde_json::json!(true));
        assert!(value.get("createdAt").is_some());
    }
}
