//! Text rendering for the two weather screens, mirroring the app's Italian
//! labels.

use chrono::NaiveDateTime;
use meteo_core::{
    GeocodeResult, Units, WeatherError, WeatherSnapshot,
    format::{self, DEFAULT_LOCALE},
};

/// Current-conditions screen.
pub fn current_screen(place: &str, snapshot: &WeatherSnapshot, units: Units) {
    let info = format::describe_weather_code(snapshot.current.weather_code);
    let observed = parse_observation_time(&snapshot.current.time);

    match observed {
        Some(t) => {
            let date_text = t.date().format("%Y-%m-%d").to_string();
            let weekday = format::day_name(&date_text, DEFAULT_LOCALE)
                .unwrap_or_else(|_| date_text.clone());
            println!("Oggi · {weekday} {}", t.date().format("%d/%m/%Y"));
        }
        None => println!("Oggi"),
    }
    println!("{place} ({})", snapshot.timezone);
    println!();
    println!(
        "  {}  {}",
        format::format_temperature(snapshot.current.temperature_c, units.temperature),
        info.description
    );
    println!(
        "  Percepita: {}",
        format::format_temperature(snapshot.current.feels_like_c, units.temperature)
    );
    println!();
    println!("  Umidità      {}%", snapshot.current.humidity_pct);
    println!(
        "  Vento        {}",
        format::format_wind_speed(snapshot.current.wind_speed_kmh, units.wind_speed)
    );
    println!("  Pressione    {} hPa", snapshot.current.pressure_hpa.round() as i64);
    println!(
        "  Visibilità   {} km",
        (snapshot.current.visibility_m / 1000.0).round() as i64
    );
    println!("  Indice UV    {}", snapshot.current.uv_index.round() as i64);
    if let Some(t) = observed {
        println!("  Aggiornato   {}", t.format("%H:%M"));
    }
}

/// 7-day forecast screen, one row per day. The first row is today.
pub fn forecast_screen(place: &str, snapshot: &WeatherSnapshot, units: Units) {
    println!("Previsioni a 7 giorni · {place} ({})", snapshot.timezone);
    println!();

    for (index, day) in snapshot.daily.days().enumerate() {
        let info = format::describe_weather_code(day.weather_code);
        let label = if index == 0 {
            "Oggi".to_string()
        } else {
            format::short_day_name(day.date, DEFAULT_LOCALE)
                .unwrap_or_else(|_| day.date.to_string())
        };

        println!(
            "  {label:<6} {:<10} {:<24} Pioggia: {:>3}%  {:>5} / {:<5}  Vento: {}",
            day.date,
            info.description,
            day.precipitation_probability_pct,
            format::format_temperature(day.temperature_max_c, units.temperature),
            format::format_temperature(day.temperature_min_c, units.temperature),
            format::format_wind_speed(day.wind_speed_max_kmh, units.wind_speed),
        );
    }
}

/// Listing for `meteo search`.
pub fn search_results(matches: &[GeocodeResult]) {
    for result in matches {
        let country = if result.country.is_empty() { "-" } else { result.country.as_str() };
        println!(
            "  {:<28} {:>9.4}, {:>9.4}  {country} ({})",
            result.name, result.latitude, result.longitude, result.timezone
        );
    }
}

/// User-facing message for a failed operation, mirroring the app's localized
/// error strings.
pub fn error_message(err: &WeatherError) -> String {
    match err {
        WeatherError::PermissionDenied => "Permesso di localizzazione negato".to_string(),
        WeatherError::Unknown(_) => "Errore sconosciuto".to_string(),
        other => other.to_string(),
    }
}

/// Observation times arrive in the snapshot's timezone as ISO 8601, with or
/// without seconds.
fn parse_observation_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_time_parses_with_and_without_seconds() {
        assert!(parse_observation_time("2026-02-02T14:30").is_some());
        assert!(parse_observation_time("2026-02-02T14:30:00").is_some());
        assert!(parse_observation_time("yesterday").is_none());
    }

    #[test]
    fn permission_denied_is_localized() {
        assert_eq!(
            error_message(&WeatherError::PermissionDenied),
            "Permesso di localizzazione negato"
        );
    }

    #[test]
    fn unknown_errors_collapse_to_a_generic_message() {
        assert_eq!(
            error_message(&WeatherError::Unknown("whatever".into())),
            "Errore sconosciuto"
        );
    }

    #[test]
    fn upstream_errors_keep_their_status_text() {
        let msg = error_message(&WeatherError::Upstream("502 Bad Gateway".into()));
        assert!(msg.contains("502 Bad Gateway"));
    }
}
