//! Plain-text rendering of dashboard snapshots

use std::fmt::Write;

use urc_core::{DashboardView, DriverRecord, ResolutionState};

pub const TITLE: &str = "URC Announcing Dashboard";
pub const LOADING_TEXT: &str = "Loading driver data...";
pub const PROMPT_TEXT: &str = "Enter a car number above to see driver details.";
pub const SELECT_TEXT: &str = "Select a division to load its drivers.";
pub const STATS_PLACEHOLDER: &str = "Driver stats will appear here.";

/// Anchor printed when the result region is brought into view
pub const RESULT_ANCHOR: &str = "#driver-details";

/// Render a full dashboard screen
///
/// `reveal` is the consumed reveal-result signal; when set the driver card
/// is preceded by the result anchor line.
pub fn render(view: &DashboardView, reveal: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", TITLE);
    let _ = writeln!(out, "Division: {}", view.selected.name);
    let _ = writeln!(out, "Car Number: {}", view.query);
    let _ = writeln!(out);

    match &view.state {
        ResolutionState::Idle => {
            let _ = writeln!(out, "{}", SELECT_TEXT);
        }
        ResolutionState::Loading => {
            let _ = writeln!(out, "{}", LOADING_TEXT);
        }
        ResolutionState::Error(message) => {
            let _ = writeln!(out, "Error: {}", message);
        }
        ResolutionState::NoQuery => {
            let _ = writeln!(out, "{}", PROMPT_TEXT);
            render_stats(&mut out, None);
        }
        ResolutionState::NotFound(query) => {
            let _ = writeln!(out, "Driver not found for car number \"{}\".", query);
            render_stats(&mut out, Some("Driver not found. Please check the car number."));
        }
        ResolutionState::Found(driver) => {
            if reveal {
                let _ = writeln!(out, "{}", RESULT_ANCHOR);
            }
            render_driver(&mut out, driver);
            render_stats(&mut out, driver.stats.as_deref());
        }
    }

    out
}

fn render_driver(out: &mut String, driver: &DriverRecord) {
    let _ = writeln!(out, "--- Driver Details ---");
    let _ = writeln!(out, "Hometown: {}", driver.hometown);
    let _ = writeln!(out, "Car Owner: {}", driver.car_owner);
    let _ = writeln!(out, "Sponsors: {}", driver.sponsors);
    let _ = writeln!(out, "Engine: {}", driver.engine_manufacture);
    let _ = writeln!(out, "Chassis: {}", driver.chassis_manufacture);
    let _ = writeln!(out, "Car Number: {}", driver.car_number);
    let _ = writeln!(out, "Nickname: \"{}\"", driver.nickname);
    let _ = writeln!(out, "Name: {}", driver.name);
}

fn render_stats(out: &mut String, stats: Option<&str>) {
    let _ = writeln!(out);
    let _ = writeln!(out, "--- Driver Stats ---");
    let _ = writeln!(out, "{}", stats.unwrap_or(STATS_PLACEHOLDER));
}

/// Division list, one per line, current selection marked
pub fn render_divisions(view: &DashboardView) -> String {
    view.sources
        .iter()
        .map(|entry| {
            let marker = if *entry == view.selected { "*" } else { " " };
            format!("{} {}", marker, entry.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
