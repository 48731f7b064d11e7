use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::ApiError;
use crate::users::dto::{RegisterRequest, UpdateProfileRequest};
use crate::users::repo_types::ProfilePatch;

const PHONE_PREFIX: &str = "+62";

pub fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    validate_phone(&req.phone)?;
    validate_name(&req.name)?;
    validate_password(&req.password)
}

/// Trims both optional fields, treats empty-after-trim as absent, and
/// returns the patch to apply. Fails when nothing usable was supplied.
pub fn validate_update(req: &UpdateProfileRequest) -> Result<ProfilePatch, ApiError> {
    let phone = req.phone.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let name = req.name.as_deref().map(str::trim).filter(|s| !s.is_empty());

    if phone.is_none() && name.is_none() {
        return Err(ApiError::validation(
            "nothing to update: supply phone and/or name",
        ));
    }
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }
    if let Some(name) = name {
        validate_name(name)?;
    }

    Ok(ProfilePatch {
        phone: phone.map(str::to_string),
        name: name.map(str::to_string),
    })
}

fn validate_phone(phone: &str) -> Result<(), ApiError> {
    let len = phone.chars().count();
    if !(10..=13).contains(&len) {
        return Err(ApiError::validation("phone must be 10-13 characters"));
    }
    if !phone.starts_with(PHONE_PREFIX) {
        return Err(ApiError::validation("phone must start with +62"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ApiError> {
    let len = name.chars().count();
    if !(3..=60).contains(&len) {
        return Err(ApiError::validation("name must be 3-60 characters"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    let len = password.chars().count();
    if !(6..=64).contains(&len) {
        return Err(ApiError::validation("password must be 6-64 characters"));
    }

    let mut has_digit = false;
    let mut has_upper = false;
    let mut has_symbol = false;
    for c in password.chars() {
        match get_general_category(c) {
            GeneralCategory::DecimalNumber => has_digit = true,
            GeneralCategory::UppercaseLetter => has_upper = true,
            cat if is_punct_or_symbol(cat) => has_symbol = true,
            _ => {}
        }
    }
    if !(has_digit && has_upper && has_symbol) {
        return Err(ApiError::validation(
            "password needs a digit, an uppercase letter and a symbol",
        ));
    }
    Ok(())
}

/// The P* and S* general categories. Marks, separators and format
/// characters do not count as symbols.
fn is_punct_or_symbol(cat: GeneralCategory) -> bool {
    use GeneralCategory::*;
    matches!(
        cat,
        ConnectorPunctuation
            | DashPunctuation
            | OpenPunctuation
            | ClosePunctuation
            | InitialPunctuation
            | FinalPunctuation
            | OtherPunctuation
            | MathSymbol
            | CurrencySymbol
            | ModifierSymbol
            | OtherSymbol
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(phone: &str, name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            phone: phone.into(),
            name: name.into(),
            password: password.into(),
        }
    }

    fn update(phone: Option<&str>, name: Option<&str>) -> UpdateProfileRequest {
        UpdateProfileRequest {
            phone: phone.map(str::to_string),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn valid_registration_passes() {
        let req = register("+62821111121", "Budi Santoso", "Test123456!");
        assert!(validate_registration(&req).is_ok());
    }

    #[test]
    fn phone_without_country_prefix_fails() {
        let req = register("0821", "Budi Santoso", "Test123456!");
        assert!(validate_registration(&req).is_err());

        // right length, wrong prefix
        let req = register("08211111219", "Budi Santoso", "Test123456!");
        assert!(validate_registration(&req).is_err());
    }

    #[test]
    fn phone_length_bounds_are_inclusive() {
        assert!(validate_phone("+628211111").is_ok()); // 10 chars
        assert!(validate_phone("+6282111112134").is_err()); // 14 chars
        assert!(validate_phone("+62821111").is_err()); // 9 chars
    }

    #[test]
    fn name_length_is_enforced() {
        assert!(validate_name("Bud").is_ok());
        assert!(validate_name("Bu").is_err());
        assert!(validate_name(&"a".repeat(60)).is_ok());
        assert!(validate_name(&"a".repeat(61)).is_err());
    }

    #[test]
    fn password_needs_digit_upper_and_symbol() {
        assert!(validate_password("Test123456!").is_ok());
        assert!(validate_password("test123456!").is_err()); // no uppercase
        assert!(validate_password("Testtesttest!").is_err()); // no digit
        assert!(validate_password("Test123456").is_err()); // no symbol
        assert!(validate_password("T1!").is_err()); // too short
    }

    #[test]
    fn combining_marks_and_format_chars_are_not_symbols() {
        // combining acute accent (Mn) and zero-width space (Cf)
        assert!(validate_password("Test123456\u{0301}").is_err());
        assert!(validate_password("Test123456\u{200B}").is_err());
    }

    #[test]
    fn non_ascii_punctuation_and_symbols_count() {
        assert!(validate_password("Test123456¡").is_ok()); // Po
        assert!(validate_password("Test123456€").is_ok()); // Sc
    }

    #[test]
    fn only_decimal_digits_satisfy_the_digit_rule() {
        assert!(validate_password("Test½half!!").is_err()); // vulgar fraction is No, not Nd
        assert!(validate_password("Test\u{0661}half!!").is_ok()); // Arabic-Indic one is Nd
    }

    #[test]
    fn update_with_nothing_supplied_fails() {
        assert!(validate_update(&update(None, None)).is_err());
        assert!(validate_update(&update(Some("   "), Some(""))).is_err());
    }

    #[test]
    fn update_with_only_name_leaves_phone_out_of_the_patch() {
        let patch = validate_update(&update(None, Some("  Budi Santoso  "))).expect("valid");
        assert_eq!(patch.name.as_deref(), Some("Budi Santoso"));
        assert!(patch.phone.is_none());
    }

    #[test]
    fn update_validates_present_fields() {
        assert!(validate_update(&update(Some("0821"), None)).is_err());
        assert!(validate_update(&update(Some("+62821111121"), Some("Bu"))).is_err());
        let patch =
            validate_update(&update(Some("+62821111121"), Some("Budi"))).expect("valid");
        assert_eq!(patch.phone.as_deref(), Some("+62821111121"));
        assert_eq!(patch.name.as_deref(), Some("Budi"));
    }
}
