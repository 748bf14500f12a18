use std::fmt;

/// Free-text location as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl LocationQuery {
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self { city: city.into(), state: state.into(), country: country.into() }
    }

    /// The `q` parameter for the geocoding endpoint: `city,state,country`.
    /// Empty parts are kept so the position of each part never shifts.
    pub fn query_string(&self) -> String {
        format!("{},{},{}", self.city, self.state, self.country)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    /// City name as reported by the weather provider, not the queried one.
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub description: String,
}

impl fmt::Display for WeatherSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City: {}, {}", self.city, self.country)?;
        writeln!(f, "Temperature: {}°C", self.temperature_c)?;
        write!(f, "Weather: {}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_keeps_empty_state() {
        let q = LocationQuery::new("London", "", "GB");
        assert_eq!(q.query_string(), "London,,GB");
    }

    #[test]
    fn query_string_joins_all_parts() {
        let q = LocationQuery::new("Austin", "TX", "US");
        assert_eq!(q.query_string(), "Austin,TX,US");
    }

    #[test]
    fn summary_renders_three_lines() {
        let summary = WeatherSummary {
            city: "Paris".into(),
            country: "FR".into(),
            temperature_c: 18.5,
            description: "clear sky".into(),
        };

        assert_eq!(
            summary.to_string(),
            "City: Paris, FR\nTemperature: 18.5°C\nWeather: clear sky"
        );
    }

    #[test]
    fn whole_degrees_have_no_fraction() {
        let summary = WeatherSummary {
            city: "Oslo".into(),
            country: "NO".into(),
            temperature_c: -3.0,
            description: "snow".into(),
        };

        assert!(summary.to_string().contains("Temperature: -3°C"));
    }
}
