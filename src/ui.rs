// UI layer: the question screen as an interactive terminal flow built on
// `dialoguer`. State lives in `Screen`; this module only renders it and
// forwards user actions.

use crate::api::ApiClient;
use crate::screen::{Screen, ScreenError, ScreenState, SAMPLE_QUESTIONS};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Main interactive menu. Checks the backend once on entry, then loops
/// until the user chooses "Exit".
pub fn main_menu(api: ApiClient) -> Result<()> {
    let mut screen = Screen::new();
    println!("{}", "🌾 Gujarat Kisan AI".bold());
    println!("ગુજરાત કિસાન સહાયક");
    test_connection(&mut screen, &api);

    loop {
        let items = vec!["Ask a question", "Try a sample question", "Check connection", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_ask(&mut screen, &api)?,
            1 => {
                let pick = Select::new()
                    .with_prompt("Try these questions")
                    .items(&SAMPLE_QUESTIONS)
                    .default(0)
                    .interact()?;
                // Fills the prompt; the user can still edit before sending.
                screen.set_draft(SAMPLE_QUESTIONS[pick])?;
                handle_ask(&mut screen, &api)?;
            }
            2 => {
                test_connection(&mut screen, &api);
                show_service_health(&api);
            }
            3 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Run the health check and print the connection badge.
fn test_connection(screen: &mut Screen, api: &ApiClient) {
    if screen.refresh_connection(api) {
        println!("{}", "✓ Connected".green());
    } else {
        println!("{}", "✗ Not Connected".red());
        println!(
            "Backend Not Connected: make sure your backend at {} is running on the same network.",
            api.base_url()
        );
    }
}

/// Ask the backend's AI health endpoint for details.
fn show_service_health(api: &ApiClient) {
    match api.service_health() {
        Ok(health) if health.is_healthy() => {
            let model = health.model.as_deref().unwrap_or("unknown model");
            println!("AI service: {} ({})", "connected".green(), model);
        }
        Ok(health) => {
            let reason = health.error.as_deref().unwrap_or("no details");
            println!("AI service: {} ({})", health.status.as_str().red(), reason);
        }
        Err(e) => println!("AI service: {} ({})", "unavailable".red(), e),
    }
}

/// Prompt for a question, submit it with a spinner, then show the answer
/// view. A failed request returns to the menu with the question kept for
/// the next attempt.
fn handle_ask(screen: &mut Screen, api: &ApiClient) -> Result<()> {
    loop {
        let question: String = Input::new()
            .with_prompt("💬 Ask your question (Gujarati or English)")
            .with_initial_text(screen.draft())
            .allow_empty(true)
            .interact_text()?;

        let request = match screen.submit(&question) {
            Ok(req) => req,
            Err(ScreenError::EmptyQuestion) => {
                println!("Empty Question: {}", ScreenError::EmptyQuestion);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message("Getting answer...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let outcome = api.ask(&request);
        spinner.finish_and_clear();

        match screen.complete(outcome) {
            Ok(()) => {}
            Err(e @ ScreenError::Failed(_)) => {
                println!("{} {}", "Error:".red(), e);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        if !show_answer(screen)? {
            return Ok(());
        }
    }
}

/// Answer view. Returns `true` when the user wants to ask another question.
fn show_answer(screen: &mut Screen) -> Result<bool> {
    if let ScreenState::ShowingAnswer { question, answer } = screen.state() {
        println!();
        println!("{}", "Your Question:".bold());
        println!("{}", question);
        println!();
        println!("{}", "📝 Answer:".bold());
        println!("{}", answer.answer);
        println!();
    }
    let items = vec!["Ask another question", "← Back"];
    let choice = Select::new().items(&items).default(0).interact()?;
    screen.acknowledge();
    Ok(choice == 0)
}
