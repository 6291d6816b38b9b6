//! Shared validation helpers for the HTTP adapter.
//!
//! Handlers only check presence and enum membership; anything deeper is the
//! store's business. Every failure carries structured details naming the
//! offending field.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{AdUserId, AvatarType, Error, Gender};

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("Bad request: missing required field {field}"))
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

pub(crate) fn parse_ad_user_id(raw: &str) -> Result<AdUserId, Error> {
    AdUserId::new(raw).map_err(|_| {
        Error::invalid_request("Bad request: missing adUserId")
            .with_details(json!({ "field": "adUserId", "code": "missing_field" }))
    })
}

pub(crate) fn parse_avatar_type(raw: &str) -> Result<AvatarType, Error> {
    AvatarType::from_str(raw).map_err(|_| {
        Error::invalid_request("avatar must be one of the preset types").with_details(json!({
            "field": "avatar",
            "value": raw,
            "code": "invalid_avatar_type",
        }))
    })
}

pub(crate) fn parse_gender(raw: &str) -> Result<Gender, Error> {
    Gender::from_str(raw).map_err(|_| {
        Error::invalid_request("gender must be male or female").with_details(json!({
            "field": "gender",
            "value": raw,
            "code": "invalid_gender",
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn missing_field_errors_name_the_field() {
        let err = missing_field_error("avatar");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], json!("avatar"));
    }

    #[rstest]
    #[case::blank("")]
    #[case::whitespace("   ")]
    fn blank_user_ids_are_rejected(#[case] raw: &str) {
        let err = parse_ad_user_id(raw).expect_err("blank id rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("adUserId"));
    }

    #[rstest]
    fn unknown_avatar_types_carry_the_offending_value() {
        let err = parse_avatar_type("male9").expect_err("unknown preset rejected");
        let details = err.details().expect("details");
        assert_eq!(details["value"], json!("male9"));
    }

    #[rstest]
    fn genders_parse_case_sensitively() {
        assert!(parse_gender("male").is_ok());
        assert!(parse_gender("Male").is_err());
    }
}
