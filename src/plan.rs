// Workout plan selection.
//
// Plans are a closed set keyed by BMI category. A user's custom plan text,
// when set, always replaces the derived plan.

use std::fmt;

use crate::model::{BmiCategory, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutPlan {
    Bulk,
    Maintain,
    Cut,
}

impl WorkoutPlan {
    pub fn for_category(category: BmiCategory) -> Self {
        match category {
            BmiCategory::Underweight => WorkoutPlan::Bulk,
            BmiCategory::Normal => WorkoutPlan::Maintain,
            BmiCategory::Overweight => WorkoutPlan::Cut,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WorkoutPlan::Bulk => "Workout Plan for Underweight (Bulk)",
            WorkoutPlan::Maintain => "Workout Plan for Normal (Maintain)",
            WorkoutPlan::Cut => "Workout Plan for Overweight (Cut)",
        }
    }

    pub fn items(&self) -> &'static [&'static str] {
        match self {
            WorkoutPlan::Bulk => &["Heavy weight training", "High calorie diet", "Protein surplus"],
            WorkoutPlan::Maintain => &["Balanced cardio & strength", "Normal diet", "Regular routine"],
            WorkoutPlan::Cut => &["High cardio", "Calorie deficit", "Light weights"],
        }
    }
}

impl fmt::Display for WorkoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.title())?;
        for item in self.items() {
            writeln!(f, "- {item}")?;
        }
        Ok(())
    }
}

/// What "View Workout Plan" shows for a user.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanView<'a> {
    Custom(&'a str),
    Standard(WorkoutPlan),
}

impl<'a> PlanView<'a> {
    pub fn for_user(user: &'a User) -> Self {
        if user.has_custom_plan() {
            return PlanView::Custom(&user.custom_plan);
        }
        PlanView::Standard(WorkoutPlan::for_category(user.category()))
    }
}

impl fmt::Display for PlanView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanView::Custom(text) => writeln!(f, "--- Your Custom Workout Plan ---\n{text}"),
            PlanView::Standard(plan) => fmt::Display::fmt(plan, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(height: f64, weight: f64, custom_plan: &str) -> User {
        User {
            name: "Sam".into(),
            username: "sam".into(),
            password: "pw".into(),
            age: 41,
            height,
            weight,
            subscribed: false,
            custom_plan: custom_plan.into(),
        }
    }

    #[test]
    fn test_plan_per_category() {
        assert_eq!(WorkoutPlan::for_category(BmiCategory::Underweight), WorkoutPlan::Bulk);
        assert_eq!(WorkoutPlan::for_category(BmiCategory::Normal), WorkoutPlan::Maintain);
        assert_eq!(WorkoutPlan::for_category(BmiCategory::Overweight), WorkoutPlan::Cut);
    }

    #[test]
    fn test_custom_plan_wins_for_every_category() {
        for (height, weight) in [(1.9, 50.0), (1.75, 70.0), (1.5, 110.0)] {
            let u = user(height, weight, "Swim 30 minutes");
            assert_eq!(PlanView::for_user(&u), PlanView::Custom("Swim 30 minutes"));
        }
    }

    #[test]
    fn test_derived_plan_without_override() {
        let u = user(1.5, 110.0, "");
        assert_eq!(PlanView::for_user(&u), PlanView::Standard(WorkoutPlan::Cut));
    }

    #[test]
    fn test_display() {
        let rendered = WorkoutPlan::Maintain.to_string();
        assert!(rendered.starts_with("--- Workout Plan for Normal (Maintain) ---"));
        assert!(rendered.contains("- Balanced cardio & strength\n"));

        let u = user(1.75, 70.0, "Yoga");
        assert_eq!(
            PlanView::for_user(&u).to_string(),
            "--- Your Custom Workout Plan ---\nYoga\n"
        );
    }
}
