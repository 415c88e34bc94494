use crate::utils::error::{Result, TopologyError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(TopologyError::config(format!("{} cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(TopologyError::config(format!(
            "{} contains null bytes: {:?}",
            field_name, path
        )));
    }

    Ok(())
}

/// Absent and blank values both report `-<flag> missing`.
pub fn validate_required_field<'a>(flag: &str, value: &'a Option<String>) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| TopologyError::config(format!("-{} missing", flag)))
}
