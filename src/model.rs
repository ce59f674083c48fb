// The user record, BMI math and the validators applied to typed input.

use std::fmt;

use crate::error::ValidationError;

/// One registered account. `username` is the store key.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub username: String,
    pub password: String,
    pub age: u32,
    /// Meters.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub subscribed: bool,
    /// Empty means no override.
    pub custom_plan: String,
}

/// Fields collected at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
    pub height: f64,
    pub weight: f64,
    pub username: String,
    pub password: String,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        Self {
            name: new.name,
            username: new.username,
            password: new.password,
            age: new.age,
            height: new.height,
            weight: new.weight,
            subscribed: false,
            custom_plan: String::new(),
        }
    }
}

impl User {
    pub fn bmi(&self) -> f64 {
        bmi(self.weight, self.height)
    }

    pub fn category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi())
    }

    pub fn has_custom_plan(&self) -> bool {
        !self.custom_plan.is_empty()
    }
}

/// weight(kg) / height(m)^2
pub fn bmi(weight: f64, height: f64) -> f64 {
    weight / (height * height)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
}

impl BmiCategory {
    /// Below 18.5 is underweight, 18.5 through 24.9 inclusive is normal,
    /// anything above 24.9 is overweight.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi <= 24.9 {
            BmiCategory::Normal
        } else {
            BmiCategory::Overweight
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_text("Name", name)
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    validate_text("Username", username)?;
    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::ContainsWhitespace { field: "Username" });
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    validate_text("Password", password)
}

/// Custom plans may be empty (clears the override) but must stay on one line.
pub fn validate_custom_plan(plan: &str) -> Result<(), ValidationError> {
    if plan.contains(['\n', '\r']) {
        return Err(ValidationError::MultiLine { field: "Custom plan" });
    }
    Ok(())
}

/// One log line per entry.
pub fn validate_exercise(exercise: &str) -> Result<(), ValidationError> {
    validate_text("Exercise", exercise)
}

pub fn validate_height(height: f64) -> Result<(), ValidationError> {
    validate_positive("Height", height)
}

pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    validate_positive("Weight", weight)
}

fn validate_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.contains(['\n', '\r']) {
        return Err(ValidationError::MultiLine { field });
    }
    Ok(())
}

// NaN fails the comparison as well.
fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(height: f64, weight: f64) -> User {
        User::from(NewUser {
            name: "Ana".into(),
            age: 30,
            height,
            weight,
            username: "ana".into(),
            password: "pw".into(),
        })
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49999), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.90001), BmiCategory::Overweight);
    }

    #[test]
    fn test_category_from_measurements() {
        assert_eq!(user(1.80, 50.0).category(), BmiCategory::Underweight);
        assert_eq!(user(1.75, 70.0).category(), BmiCategory::Normal);
        assert_eq!(user(1.60, 90.0).category(), BmiCategory::Overweight);
    }

    #[test]
    fn test_bmi_value() {
        let bmi = user(2.0, 80.0).bmi();
        assert!((bmi - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_new_user_defaults() {
        let u = user(1.7, 60.0);
        assert!(!u.subscribed);
        assert!(!u.has_custom_plan());
    }

    #[test]
    fn test_validators() {
        assert!(validate_height(1.8).is_ok());
        assert_eq!(validate_height(0.0), Err(ValidationError::NotPositive { field: "Height" }));
        assert!(validate_weight(-3.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());

        assert!(validate_username("ana").is_ok());
        assert_eq!(
            validate_username("ana maria"),
            Err(ValidationError::ContainsWhitespace { field: "Username" })
        );
        assert_eq!(validate_name("  "), Err(ValidationError::Empty { field: "Name" }));
        assert!(validate_name("Ana Maria").is_ok());
        assert!(validate_password("a\nb").is_err());

        assert!(validate_custom_plan("").is_ok());
        assert!(validate_custom_plan("run 5k: daily").is_ok());
        assert!(validate_custom_plan("one\ntwo").is_err());

        assert!(validate_exercise("Deadlift 3x5").is_ok());
        assert_eq!(
            validate_exercise("Squats\nJo: fake entry"),
            Err(ValidationError::MultiLine { field: "Exercise" })
        );
    }
}
