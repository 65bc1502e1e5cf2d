use crate::error::{MebelError, MebelResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> MebelResult<()> {
    model.validate().map_err(MebelError::from)
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match (&error.message, error.code.as_ref()) {
                (Some(message), _) => format!("{}: {}", field, message),
                (None, "range") => format!("Value out of range for field '{}'", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

/// Normalizes an ISO 4217 currency code to upper case.
pub fn validate_currency_code(code: &str) -> MebelResult<String> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(MebelError::validation(
            "currency",
            format!("Invalid currency code '{}'. Expected three letters, e.g. RUB", code),
        ));
    }
    Ok(code.to_ascii_uppercase())
}

pub fn validate_file_type(file_name: &str, allowed_types: &[&str]) -> MebelResult<()> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !allowed_types.contains(&extension.to_lowercase().as_str()) {
        return Err(MebelError::validation(
            "file_type",
            format!(
                "File type '{}' not allowed. Allowed types: {}",
                extension,
                allowed_types.join(", ")
            ),
        ));
    }

    Ok(())
}

pub fn validate_file_size(file_size: u64, max_size: u64) -> MebelResult<()> {
    if file_size > max_size {
        return Err(MebelError::validation(
            "file_size",
            format!(
                "File size {} bytes exceeds maximum allowed size {} bytes",
                file_size, max_size
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mebel_models::PaintJobSpec;

    #[test]
    fn test_validate_currency_code() {
        assert_eq!(validate_currency_code(" usd ").unwrap(), "USD");
        assert!(validate_currency_code("RUBL").is_err());
        assert!(validate_currency_code("R1B").is_err());
    }

    #[test]
    fn test_validate_file_type() {
        let allowed_types = &["xlsx", "xls", "csv"];
        assert!(validate_file_type("техкарта.XLSX", allowed_types).is_ok());
        assert!(validate_file_type("price.pdf", allowed_types).is_err());
    }

    #[test]
    fn test_validate_model_reports_field_message() {
        let job = PaintJobSpec {
            width_mm: -1.0,
            height_mm: 800.0,
            depth_mm: 150.0,
            layers: 1,
            loss_percent: 0.0,
            complexity_coeff: 1.0,
        };
        let error = validate_model(&job).unwrap_err();
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert!(error.to_string().contains("width_mm"));
    }
}
