use weather_core::{SearchView, WeatherReport};

pub const LOADING: &str = "Loading...";
pub const SUBMIT_DISABLED: &str = "Search is disabled until you enter a city name.";

/// Text for whatever the view currently shows; `None` when there is nothing yet.
pub fn render(view: SearchView<'_>) -> Option<String> {
    match view {
        SearchView::Empty => None,
        SearchView::Loading => Some(LOADING.to_string()),
        SearchView::Failure(message) => Some(message.to_string()),
        SearchView::Report(report) => Some(render_report(report)),
    }
}

pub fn render_report(report: &WeatherReport) -> String {
    [
        format!("{}, {}", report.city, report.country),
        report.description.clone(),
        format!("Temperature: {}°C", report.temperature),
        format!("Humidity: {}%", report.humidity),
        format!("Pressure: {} hPa", report.pressure),
        format!("Wind Speed: {} m/s", report.wind_speed),
    ]
    .join("\n")
}
