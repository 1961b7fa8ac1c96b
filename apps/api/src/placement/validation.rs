use serde::Deserialize;

use crate::errors::AppError;

const MAX_CGPA: f64 = 10.0;
const MAX_YEAR: i32 = 6;
const MAX_USERNAME_LEN: usize = 64;

/// Form body of `POST /coordinator`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub base: String,
    pub cgpa: f64,
    pub role: String,
}

/// JSON body of `PUT /students/:username/profile`. Absent fields are cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub course: Option<String>,
    pub year: Option<i32>,
    pub cgpa: Option<f64>,
    pub backlog: Option<i32>,
    pub resume: Option<String>,
}

pub fn validate_company(company: &NewCompany) -> Result<(), AppError> {
    require_text("name", &company.name)?;
    require_text("base", &company.base)?;
    require_text("role", &company.role)?;
    validate_cgpa(company.cgpa)
}

pub fn validate_profile(update: &ProfileUpdate) -> Result<(), AppError> {
    if let Some(name) = &update.name {
        require_text("name", name)?;
    }
    if let Some(cgpa) = update.cgpa {
        validate_cgpa(cgpa)?;
    }
    if let Some(year) = update.year {
        if !(1..=MAX_YEAR).contains(&year) {
            return Err(AppError::Validation(format!(
                "year must be between 1 and {MAX_YEAR}"
            )));
        }
    }
    if matches!(update.backlog, Some(b) if b < 0) {
        return Err(AppError::Validation(
            "backlog cannot be negative".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), AppError> {
    let valid = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("invalid username '{username}'")))
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}

fn validate_cgpa(cgpa: f64) -> Result<(), AppError> {
    if cgpa.is_finite() && (0.0..=MAX_CGPA).contains(&cgpa) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "cgpa must be between 0 and {MAX_CGPA}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company() -> NewCompany {
        NewCompany {
            name: "Acme Robotics".to_string(),
            base: "Pune".to_string(),
            cgpa: 7.5,
            role: "Graduate Engineer Trainee".to_string(),
        }
    }

    #[test]
    fn test_valid_company_passes() {
        assert!(validate_company(&company()).is_ok());
    }

    #[test]
    fn test_company_blank_name_fails() {
        let c = NewCompany {
            name: "  ".to_string(),
            ..company()
        };
        assert!(matches!(validate_company(&c), Err(AppError::Validation(m)) if m.contains("name")));
    }

    #[test]
    fn test_company_cgpa_out_of_range_fails() {
        for cgpa in [-0.1, 10.5, f64::NAN] {
            let c = NewCompany { cgpa, ..company() };
            assert!(validate_company(&c).is_err(), "cgpa {cgpa} accepted");
        }
    }

    #[test]
    fn test_company_deserializes() {
        let c: NewCompany =
            serde_json::from_value(serde_json::json!({"name": "A", "base": "B", "cgpa": 6.0, "role": "R"}))
                .unwrap();
        assert_eq!(c.cgpa, 6.0);
    }

    #[test]
    fn test_empty_profile_update_passes() {
        assert!(validate_profile(&ProfileUpdate::default()).is_ok());
    }

    #[test]
    fn test_profile_year_bounds() {
        let ok = ProfileUpdate {
            year: Some(4),
            ..Default::default()
        };
        let bad = ProfileUpdate {
            year: Some(0),
            ..Default::default()
        };
        assert!(validate_profile(&ok).is_ok());
        assert!(validate_profile(&bad).is_err());
    }

    #[test]
    fn test_profile_negative_backlog_fails() {
        let update = ProfileUpdate {
            backlog: Some(-1),
            ..Default::default()
        };
        assert!(validate_profile(&update).is_err());
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("asha.k_2025").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(65)).is_err());
    }
}
