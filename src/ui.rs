// UI layer: interactive menus built on `dialoguer`.
// The outer loop is the login screen; a successful login enters the main
// menu, and signing out drops back to the login screen.

use crate::config::Config;
use crate::error::SessionError;
use crate::model::{self, NewUser, User};
use crate::session::{profile_text, FitnessSystem, SubscriptionChange, SubscriptionStatus};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

const MAIN_MENU: [&str; 10] = [
    "View Profile",
    "View Workout Plan",
    "Activate Subscription",
    "View Subscription Status",
    "Edit Workout Plan",
    "BMI Calculator",
    "Update Weight/Height",
    "Log Exercise",
    "Sign Out",
    "Exit",
];

/// Typed text that ends the exercise logging prompt.
const STOP_WORD: &str = "stop";

enum MenuExit {
    SignOut,
    Exit,
}

/// Run the login screen and main menu until the user chooses "Exit".
pub fn main_menu(system: FitnessSystem, config: &Config) -> Result<()> {
    let delay = config.typing_delay;
    loop {
        let Some(mut user) = login_screen(&system, delay)? else {
            return Ok(());
        };
        loop {
            let exit = user_menu(&system, &mut user, delay)?;
            if !finish_session(&system, &user) {
                continue;
            }
            match exit {
                MenuExit::SignOut => break,
                MenuExit::Exit => return Ok(()),
            }
        }
    }
}

/// Write the working copy back before leaving the session. A failed save is
/// shown and the user stays signed in with their changes.
fn finish_session(system: &FitnessSystem, user: &User) -> bool {
    match with_spinner("Saving...", || system.save(user)) {
        Ok(_) => true,
        Err(e) => {
            println!("{}", format!("Save failed: {e}").red());
            false
        }
    }
}

/// Login / Register / Exit. Returns the logged-in user, or `None` on Exit.
fn login_screen(system: &FitnessSystem, delay: Duration) -> Result<Option<User>> {
    loop {
        println!("\n--- Login / Register ---");
        let items = ["Login", "Register", "Exit"];
        let selection = Select::new().items(&items[..]).default(0).interact()?;
        match selection {
            0 => {
                if let Some(user) = handle_login(system)? {
                    println!("{}", "Login successful!".green());
                    return Ok(Some(user));
                }
            }
            1 => handle_register(system, delay)?,
            _ => return Ok(None),
        }
    }
}

fn handle_login(system: &FitnessSystem) -> Result<Option<User>> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password: String = Password::new().with_prompt("Password").interact()?;

    match system.login(username.trim(), &password) {
        Ok(user) => Ok(Some(user)),
        Err(e) => {
            println!("{}", e.to_string().red());
            Ok(None)
        }
    }
}

/// Collect the registration fields. Numeric prompts re-ask until the
/// input parses and passes validation.
fn handle_register(system: &FitnessSystem, delay: Duration) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Enter name")
        .validate_with(|s: &String| model::validate_name(s))
        .interact_text()?;
    let age: u32 = Input::new().with_prompt("Enter age").interact_text()?;
    let height: f64 = Input::new()
        .with_prompt("Enter height (m)")
        .validate_with(|h: &f64| model::validate_height(*h))
        .interact_text()?;
    let weight: f64 = Input::new()
        .with_prompt("Enter weight (kg)")
        .validate_with(|w: &f64| model::validate_weight(*w))
        .interact_text()?;
    let username: String = Input::new()
        .with_prompt("Create username")
        .validate_with(|s: &String| model::validate_username(s))
        .interact_text()?;
    let password: String = Password::new()
        .with_prompt("Create password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let new_user = NewUser {
        name: name.trim().to_string(),
        age,
        height,
        weight,
        username: username.trim().to_string(),
        password,
    };

    match with_spinner("Registering...", || system.register(new_user)) {
        Ok(_) => type_out("Registration successful! Login now.\n", delay)?,
        Err(e) => println!("{}", format!("Register failed: {e}").red()),
    }
    Ok(())
}

fn user_menu(system: &FitnessSystem, user: &mut User, delay: Duration) -> Result<MenuExit> {
    loop {
        println!("\n--- Main Menu ---");
        let selection = Select::new().items(&MAIN_MENU[..]).default(0).interact()?;
        match selection {
            0 => print!("\n{}", profile_text(user)),
            1 => print!("\n{}", system.view_workout(user)),
            2 => match system.activate_subscription(user) {
                Ok(SubscriptionChange::Activated) => println!("{}", "Subscription activated!".green()),
                Ok(SubscriptionChange::AlreadyActive) => println!("Subscription already active."),
                Err(e) => report(&e),
            },
            3 => println!("Status: {}", system.subscription_status(user)),
            4 => handle_edit_plan(system, user)?,
            5 => {
                let bmi = system.bmi_report(user);
                println!("Your BMI: {:.2}", bmi.bmi);
                println!("Category: {}", bmi.category);
            }
            6 => handle_update(system, user)?,
            7 => handle_log_exercise(system, user, delay)?,
            8 => return Ok(MenuExit::SignOut),
            _ => return Ok(MenuExit::Exit),
        }
    }
}

fn handle_edit_plan(system: &FitnessSystem, user: &mut User) -> Result<()> {
    let plan: String = Input::new()
        .with_prompt("Enter your custom workout plan (single line, empty to clear)")
        .allow_empty(true)
        .interact_text()?;

    match system.edit_plan(user, plan.trim()) {
        Ok(()) if user.has_custom_plan() => println!("{}", "Custom workout plan saved.".green()),
        Ok(()) => println!("Custom workout plan cleared."),
        Err(e) => report(&e),
    }
    Ok(())
}

fn handle_update(system: &FitnessSystem, user: &mut User) -> Result<()> {
    let height: f64 = Input::new()
        .with_prompt("Enter new height (m)")
        .with_initial_text(user.height.to_string())
        .validate_with(|h: &f64| model::validate_height(*h))
        .interact_text()?;
    let weight: f64 = Input::new()
        .with_prompt("Enter new weight (kg)")
        .with_initial_text(user.weight.to_string())
        .validate_with(|w: &f64| model::validate_weight(*w))
        .interact_text()?;

    match system.update_measurements(user, height, weight) {
        Ok(()) => println!("{}", "Updated successfully.".green()),
        Err(e) => report(&e),
    }
    Ok(())
}

fn handle_log_exercise(system: &FitnessSystem, user: &User, delay: Duration) -> Result<()> {
    if system.subscription_status(user) == SubscriptionStatus::NotSubscribed {
        report(&SessionError::NotSubscribed);
        return Ok(());
    }

    match system.exercise_history(user) {
        Ok(history) => {
            if let Some(last) = history.last() {
                println!("You have {} logged exercises. Most recent: {last}", history.len());
            }
        }
        Err(e) => report(&e),
    }

    type_out(&format!("Enter exercise (type '{STOP_WORD}' to finish):\n"), delay)?;
    loop {
        let exercise: String = Input::new().with_prompt(">").allow_empty(true).interact_text()?;
        let exercise = exercise.trim();
        if exercise == STOP_WORD {
            return Ok(());
        }
        if exercise.is_empty() {
            continue;
        }
        match system.log_exercise(user, exercise) {
            Ok(()) => println!("Logged: {exercise}"),
            Err(e) => {
                report(&e);
                return Ok(());
            }
        }
    }
}

fn report(e: &SessionError) {
    println!("{}", e.to_string().red());
}

/// Print `text` one character at a time. A zero delay prints it at once.
pub fn type_out(text: &str, delay: Duration) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    if delay.is_zero() {
        stdout.write_all(text.as_bytes())?;
        return stdout.flush();
    }
    for c in text.chars() {
        write!(stdout, "{c}")?;
        stdout.flush()?;
        thread::sleep(delay);
    }
    Ok(())
}

/// Show a spinner while `work` runs.
fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = work();
    spinner.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_log::ExerciseLog;
    use crate::store::UserStore;

    fn user() -> User {
        User {
            name: "Ana".into(),
            username: "ana".into(),
            password: "pw".into(),
            age: 30,
            height: 1.7,
            weight: 60.0,
            subscribed: false,
            custom_plan: String::new(),
        }
    }

    #[test]
    fn test_finish_session_saves() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_data_dir(dir.path());
        let system = FitnessSystem::from_config(&config);

        assert!(finish_session(&system, &user()));
        assert_eq!(system.store().find("ana").unwrap(), Some(user()));
    }

    #[test]
    fn test_finish_session_keeps_user_on_failed_save() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the store file should be makes every read fail.
        let system = FitnessSystem::new(
            UserStore::new(dir.path()),
            dir.path().join("users_readable.txt"),
            ExerciseLog::new(dir.path().join("exercise_log.txt")),
        );

        assert!(!finish_session(&system, &user()));
        assert!(!dir.path().join("users_readable.txt").exists());
    }
}
