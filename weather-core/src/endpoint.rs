use std::fmt;

pub const DEFAULT_BASE_URL: &str = "http://dataservice.accuweather.com";

pub const SUBJECT_PLACEHOLDER: &str = "{subject}";
pub const API_KEY_PLACEHOLDER: &str = "{api_key}";

/// Provider endpoints consumed by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Autocomplete,
    CurrentConditions,
    DailyForecast,
    UvIndex,
    HourlyForecast,
    Historical,
}

impl Endpoint {
    /// Path and query relative to the base URL, with `{subject}` and
    /// `{api_key}` placeholders.
    pub const fn template(self) -> &'static str {
        match self {
            Endpoint::Autocomplete => {
                "/locations/v1/cities/autocomplete?apikey={api_key}&q={subject}"
            }
            Endpoint::CurrentConditions => "/currentconditions/v1/{subject}?apikey={api_key}",
            Endpoint::DailyForecast => {
                "/forecasts/v1/daily/5day/{subject}?apikey={api_key}&metric=true"
            }
            Endpoint::UvIndex => "/indices/v1/daily/1day/{subject}/-15?apikey={api_key}",
            Endpoint::HourlyForecast => {
                "/forecasts/v1/hourly/12hour/{subject}?apikey={api_key}&metric=true"
            }
            Endpoint::Historical => "/currentconditions/v1/{subject}/historical?apikey={api_key}",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Endpoint::Autocomplete => "autocomplete",
            Endpoint::CurrentConditions => "current conditions",
            Endpoint::DailyForecast => "5-day forecast",
            Endpoint::UvIndex => "UV index",
            Endpoint::HourlyForecast => "12-hour forecast",
            Endpoint::Historical => "historical conditions",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Autocomplete,
            Endpoint::CurrentConditions,
            Endpoint::DailyForecast,
            Endpoint::UvIndex,
            Endpoint::HourlyForecast,
            Endpoint::Historical,
        ]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_carries_both_placeholders() {
        for endpoint in Endpoint::all() {
            let template = endpoint.template();
            assert!(template.contains(SUBJECT_PLACEHOLDER), "{endpoint}: {template}");
            assert!(template.contains(API_KEY_PLACEHOLDER), "{endpoint}: {template}");
            assert!(template.starts_with('/'));
        }
    }

    #[test]
    fn metric_units_only_on_forecasts() {
        let metric: Vec<_> = Endpoint::all()
            .iter()
            .filter(|e| e.template().contains("metric=true"))
            .copied()
            .collect();

        assert_eq!(metric, vec![Endpoint::DailyForecast, Endpoint::HourlyForecast]);
    }
}
