use std::{io::Write, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use chrono::Local;
use inquire::{InquireError, Text};
use weather_core::{SearchController, SearchView, WeatherGateway};

use crate::render::{self, SUBMIT_DISABLED};

/// One edit + submit, wait for the outcome, render it.
///
/// Returns whether a report was shown.
pub async fn show<W: Write>(
    gateway: Arc<dyn WeatherGateway>,
    city: &str,
    out: &mut W,
) -> Result<bool> {
    let (mut controller, mut completions) = SearchController::new(gateway);

    controller.edit_query(city);
    if !controller.submit() {
        writeln!(out, "{SUBMIT_DISABLED}").context("Failed to write output")?;
        return Ok(false);
    }

    controller.settle(&mut completions).await;

    if let Some(text) = render::render(controller.view()) {
        writeln!(out, "{text}").context("Failed to write output")?;
    }

    Ok(matches!(controller.view(), SearchView::Report(_)))
}

/// Prompt loop. Ctrl-C while loading cancels the lookup; Esc at the prompt quits.
pub async fn interactive(gateway: Arc<dyn WeatherGateway>) -> Result<ExitCode> {
    let (mut controller, mut completions) = SearchController::new(gateway);

    println!("Weather App");

    while let Some(text) = prompt_city(controller.state().query().to_string()).await? {
        controller.edit_query(text);

        if !controller.submit() {
            println!("{SUBMIT_DISABLED}");
            continue;
        }
        println!("{}", render::LOADING);

        while controller.state().is_in_flight() {
            tokio::select! {
                completion = completions.recv() => match completion {
                    Some(completion) => {
                        controller.apply(completion);
                    }
                    None => break,
                },
                signal = tokio::signal::ctrl_c() => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    controller.cancel();
                    println!("Search cancelled.");
                }
            }
        }

        match controller.view() {
            SearchView::Report(report) => {
                println!("{}", render::render_report(report));
                println!("(as of {})", Local::now().format("%H:%M:%S"));
            }
            view => {
                if let Some(text) = render::render(view) {
                    println!("{text}");
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Read a city name, prefilled with the previous query. `None` ends the session.
async fn prompt_city(previous: String) -> Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(move || {
        Text::new("Enter city name")
            .with_initial_value(&previous)
            .with_help_message("Enter to search, Esc to quit")
            .prompt()
    })
    .await
    .context("Prompt task panicked")?;

    match answer {
        Ok(text) => Ok(Some(text)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err).context("Failed to read city name"),
    }
}
