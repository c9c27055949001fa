//! Terminal rendering. Every function takes the active [`Palette`].

use crossterm::style::{Color, Stylize};
use deskapps_core::{Contact, DailyForecast, Palette, WeatherSnapshot, theme::Rgb};
use std::fmt::Write as _;

fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

/// "broken clouds" -> "Broken Clouds"
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}

/// Plain text cells of one forecast row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRow {
    pub day_name: String,
    pub date: String,
    pub condition: String,
    pub high: String,
    pub low: String,
    pub icon: String,
}

impl From<&DailyForecast> for ForecastRow {
    fn from(day: &DailyForecast) -> Self {
        Self {
            day_name: day.date.format("%A").to_string(),
            date: day.date.format("%b %d").to_string(),
            condition: title_case(day.condition()),
            high: format!("↑{:.0}°", day.high()),
            low: format!("↓{:.0}°", day.low()),
            icon: day.icon().to_string(),
        }
    }
}

pub fn heading(text: &str, palette: &Palette) -> String {
    format!("{}", text.with(color(palette.title)).on(color(palette.background)).bold())
}

pub fn error(text: &str, palette: &Palette) -> String {
    format!("{}", text.with(color(palette.error)))
}

fn divider(palette: &Palette) -> String {
    format!("{}", "─".repeat(40).with(color(palette.divider)))
}

pub fn current_weather(now: &WeatherSnapshot, palette: &Palette) -> String {
    let primary = color(palette.text_primary);
    let secondary = color(palette.text_secondary);
    let accent = color(palette.accent);

    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(&format!("{}, {}", now.city, now.country), palette));
    let _ = writeln!(out, "{}", divider(palette));
    let _ = writeln!(
        out,
        "{}  {}",
        format!("{:.1}°C", now.temperature_c).with(color(palette.temperature)).bold(),
        title_case(&now.description).with(primary),
    );
    let _ = writeln!(out, "{}", format!("Feels like {:.1}°C", now.feels_like_c).with(secondary));
    let _ = writeln!(out, "{}", icon_url(&now.icon).with(secondary));

    let cards = [
        ("Humidity", format!("{}%", now.humidity_pct)),
        ("Wind Speed", format!("{:.1} m/s", now.wind_speed_mps)),
        ("Pressure", format!("{:.0} hPa", now.pressure_hpa)),
        ("Cloudiness", format!("{}%", now.cloudiness_pct)),
    ];
    for (label, value) in cards {
        let _ = writeln!(out, "  {}{}", format!("{label:<12}").with(accent), value.with(primary));
    }
    out
}

pub fn forecast(days: &[DailyForecast], palette: &Palette) -> String {
    let primary = color(palette.text_primary);
    let secondary = color(palette.text_secondary);

    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("5-Day Forecast", palette));
    let _ = writeln!(out, "{}", divider(palette));
    if days.is_empty() {
        let _ = writeln!(out, "{}", "No forecast data".with(secondary));
        return out;
    }

    for day in days {
        let row = ForecastRow::from(day);
        let _ = writeln!(
            out,
            "{} {} {} {} {} {}",
            format!("{:<10}", row.day_name).with(primary).bold(),
            format!("{:<7}", row.date).with(secondary),
            format!("{:<20}", row.condition).with(secondary),
            row.high.with(color(palette.temperature)).bold(),
            row.low.with(secondary),
            row.icon.with(secondary),
        );
    }
    out
}

pub fn contact_list(contacts: &[Contact], searched: bool, palette: &Palette) -> String {
    let primary = color(palette.text_primary);
    let secondary = color(palette.text_secondary);

    if contacts.is_empty() {
        let message = if searched { "No contacts found" } else { "No contacts yet. Add your first contact!" };
        return format!("{}\n", message.with(secondary));
    }

    let mut out = String::new();
    for contact in contacts {
        let _ = writeln!(
            out,
            "{}  {}",
            format!("{:>4}", contact.id).with(secondary),
            contact.name.as_str().with(primary).bold()
        );
        let _ = writeln!(out, "      {}", contact.phone.as_deref().unwrap_or("No phone").with(secondary));
        let _ = writeln!(out, "      {}", contact.email.as_deref().unwrap_or("No email").with(secondary));
    }
    out
}

/// Title line plus message, the terminal stand-in for an alert dialog.
pub fn dialog(title: &str, message: &str, palette: &Palette) -> String {
    format!("{}\n{}\n", heading(title, palette), message.with(color(palette.text_primary)))
}
