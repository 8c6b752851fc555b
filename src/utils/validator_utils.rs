use validator::ValidationError;

use crate::utils::slug_utils::is_valid_slug;

pub fn validate_required(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_required");
        error.message = Some(std::borrow::Cow::from("This field is required"));
        Err(error)
    } else {
        Ok(())
    }
}

pub fn validate_slug(value: &String) -> Result<(), ValidationError> {
    if is_valid_slug(value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_slug");
        error.message = Some(std::borrow::Cow::from(
            "Slug may only contain lowercase letters, digits and single hyphens",
        ));
        Err(error)
    }
}
