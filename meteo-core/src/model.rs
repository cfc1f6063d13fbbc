use serde::{Deserialize, Serialize};

/// One fetched weather state: current conditions plus the 7-day forecast for
/// a coordinate pair. Never mutated; every refresh produces a fresh snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier resolved by the provider, e.g. "Europe/Rome".
    pub timezone: String,
    pub current: CurrentConditions,
    pub daily: DailyForecast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    /// WMO weather interpretation code.
    pub weather_code: i32,
    pub wind_speed_kmh: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub visibility_m: f64,
    pub feels_like_c: f64,
    pub uv_index: f64,
    /// Observation time in the snapshot's timezone, ISO 8601.
    pub time: String,
}

/// Daily aggregates as parallel ordered sequences.
///
/// Invariant: all sequences have equal length (7 for a full forecast) and
/// share index alignment, so entry `i` of each sequence describes the same
/// calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    /// ISO `YYYY-MM-DD` dates.
    pub time: Vec<String>,
    pub weather_code: Vec<i32>,
    pub temperature_max_c: Vec<f64>,
    pub temperature_min_c: Vec<f64>,
    pub precipitation_probability_pct: Vec<u8>,
    pub wind_speed_max_kmh: Vec<f64>,
}

impl DailyForecast {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// True when all parallel sequences have the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.time.len();
        self.weather_code.len() == n
            && self.temperature_max_c.len() == n
            && self.temperature_min_c.len() == n
            && self.precipitation_probability_pct.len() == n
            && self.wind_speed_max_kmh.len() == n
    }

    /// Zip the parallel sequences into per-day views, in calendar order.
    ///
    /// Relies on the alignment invariant upheld by [`crate::WeatherClient`].
    pub fn days(&self) -> impl Iterator<Item = DayForecast<'_>> {
        (0..self.len()).map(|i| DayForecast {
            date: &self.time[i],
            weather_code: self.weather_code[i],
            temperature_max_c: self.temperature_max_c[i],
            temperature_min_c: self.temperature_min_c[i],
            precipitation_probability_pct: self.precipitation_probability_pct[i],
            wind_speed_max_kmh: self.wind_speed_max_kmh[i],
        })
    }
}

/// Borrowed view over one calendar day of a [`DailyForecast`].
#[derive(Debug, Clone, Copy)]
pub struct DayForecast<'a> {
    pub date: &'a str,
    pub weather_code: i32,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub precipitation_probability_pct: u8,
    pub wind_speed_max_kmh: f64,
}

/// A single geocoding match for a free-text place query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    /// Empty string when the provider reports no country.
    pub country: String,
    /// IANA timezone identifier; "UTC" when the provider reports none.
    pub timezone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_daily() -> DailyForecast {
        DailyForecast {
            time: vec!["2026-02-02".into(), "2026-02-03".into(), "2026-02-04".into()],
            weather_code: vec![0, 61, 3],
            temperature_max_c: vec![8.1, 6.4, 9.0],
            temperature_min_c: vec![-1.2, 0.8, 2.3],
            precipitation_probability_pct: vec![5, 80, 30],
            wind_speed_max_kmh: vec![12.0, 25.5, 18.2],
        }
    }

    #[test]
    fn days_yields_aligned_views() {
        let daily = sample_daily();
        let days: Vec<_> = daily.days().collect();

        assert_eq!(days.len(), daily.len());
        assert_eq!(days[1].date, "2026-02-03");
        assert_eq!(days[1].weather_code, 61);
        assert_eq!(days[1].precipitation_probability_pct, 80);
        assert_eq!(days[2].temperature_max_c, 9.0);
    }

    #[test]
    fn alignment_check_detects_mismatch() {
        let mut daily = sample_daily();
        assert!(daily.is_aligned());

        daily.weather_code.pop();
        assert!(!daily.is_aligned());
    }
}
