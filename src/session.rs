// What a user can do before and after logging in.
//
// `FitnessSystem` holds no user state: the UI keeps the logged-in `User`
// as a working copy and every mutating operation here writes it back to
// the store and refreshes the readable export before returning.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{SessionError, StoreError};
use crate::exercise_log::ExerciseLog;
use crate::model::{self, BmiCategory, NewUser, User};
use crate::plan::PlanView;
use crate::store::{UpsertOutcome, UserStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionChange {
    Activated,
    AlreadyActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    NotSubscribed,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Active => f.write_str("Active"),
            SubscriptionStatus::NotSubscribed => f.write_str("Not Subscribed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReport {
    pub bmi: f64,
    pub category: BmiCategory,
}

#[derive(Debug, Clone)]
pub struct FitnessSystem {
    store: UserStore,
    readable_path: PathBuf,
    exercise_log: ExerciseLog,
}

impl FitnessSystem {
    pub fn new(store: UserStore, readable_path: impl Into<PathBuf>, exercise_log: ExerciseLog) -> Self {
        Self {
            store,
            readable_path: readable_path.into(),
            exercise_log,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            UserStore::from_config(config),
            config.readable_file.clone(),
            ExerciseLog::new(config.exercise_log_file.clone()),
        )
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Unknown usernames and wrong passwords are reported the same way.
    pub fn login(&self, username: &str, password: &str) -> Result<User, SessionError> {
        match self.store.find(username)? {
            Some(user) if user.password == password => {
                info!(username, "login succeeded");
                Ok(user)
            }
            _ => {
                warn!(username, "login rejected");
                Err(SessionError::InvalidCredentials)
            }
        }
    }

    /// Create a new account with no subscription and no custom plan.
    pub fn register(&self, new_user: NewUser) -> Result<User, SessionError> {
        model::validate_name(&new_user.name)?;
        model::validate_username(&new_user.username)?;
        model::validate_password(&new_user.password)?;
        model::validate_height(new_user.height)?;
        model::validate_weight(new_user.weight)?;

        if self.store.contains(&new_user.username)? {
            return Err(SessionError::UsernameTaken(new_user.username));
        }

        let user = User::from(new_user);
        self.save(&user)?;
        info!(username = %user.username, "user registered");
        Ok(user)
    }

    /// Write the working copy back to the store and refresh the readable export.
    pub fn save(&self, user: &User) -> Result<UpsertOutcome, StoreError> {
        let outcome = self.store.upsert(user)?;
        self.store.export_readable(&self.readable_path)?;
        Ok(outcome)
    }

    pub fn activate_subscription(&self, user: &mut User) -> Result<SubscriptionChange, SessionError> {
        if user.subscribed {
            return Ok(SubscriptionChange::AlreadyActive);
        }
        user.subscribed = true;
        self.save(user)?;
        Ok(SubscriptionChange::Activated)
    }

    pub fn subscription_status(&self, user: &User) -> SubscriptionStatus {
        if user.subscribed {
            SubscriptionStatus::Active
        } else {
            SubscriptionStatus::NotSubscribed
        }
    }

    pub fn view_workout<'a>(&self, user: &'a User) -> PlanView<'a> {
        PlanView::for_user(user)
    }

    /// Set the custom plan. Empty text removes the override.
    pub fn edit_plan(&self, user: &mut User, plan: &str) -> Result<(), SessionError> {
        model::validate_custom_plan(plan)?;
        user.custom_plan = plan.to_string();
        self.save(user)?;
        Ok(())
    }

    pub fn bmi_report(&self, user: &User) -> BmiReport {
        BmiReport {
            bmi: user.bmi(),
            category: user.category(),
        }
    }

    pub fn update_measurements(&self, user: &mut User, height: f64, weight: f64) -> Result<(), SessionError> {
        model::validate_height(height)?;
        model::validate_weight(weight)?;
        user.height = height;
        user.weight = weight;
        self.save(user)?;
        Ok(())
    }

    /// Members only.
    pub fn log_exercise(&self, user: &User, exercise: &str) -> Result<(), SessionError> {
        if !user.subscribed {
            return Err(SessionError::NotSubscribed);
        }
        model::validate_exercise(exercise)?;
        self.exercise_log
            .append(&user.username, exercise)
            .map_err(StoreError::from)?;
        Ok(())
    }

    pub fn exercise_history(&self, user: &User) -> Result<Vec<String>, SessionError> {
        Ok(self
            .exercise_log
            .entries_for(&user.username)
            .map_err(StoreError::from)?)
    }
}

/// The "View Profile" screen.
pub fn profile_text(user: &User) -> String {
    let mut out = format!(
        "--- Profile ---\nName: {}\nAge: {}\nHeight: {}\nWeight: {}\nBMI: {:.2} ({})\nSubscription: {}\n",
        user.name,
        user.age,
        user.height,
        user.weight,
        user.bmi(),
        user.category(),
        if user.subscribed { "Active" } else { "Not Subscribed" },
    );
    if user.has_custom_plan() {
        out.push_str(&format!("Custom Plan: {}\n", user.custom_plan));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(custom_plan: &str) -> User {
        User {
            name: "Ana".into(),
            username: "ana".into(),
            password: "pw".into(),
            age: 30,
            height: 2.0,
            weight: 80.0,
            subscribed: false,
            custom_plan: custom_plan.into(),
        }
    }

    #[test]
    fn test_profile_text() {
        let text = profile_text(&user(""));
        assert!(text.contains("BMI: 20.00 (Normal)\n"));
        assert!(text.contains("Subscription: Not Subscribed\n"));
        assert!(!text.contains("Custom Plan"));

        let text = profile_text(&user("Hike"));
        assert!(text.ends_with("Custom Plan: Hike\n"));
    }

    #[test]
    fn test_subscription_status_display() {
        assert_eq!(SubscriptionStatus::Active.to_string(), "Active");
        assert_eq!(SubscriptionStatus::NotSubscribed.to_string(), "Not Subscribed");
    }
}
