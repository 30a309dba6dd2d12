//! Trip & Day Plan Building Blocks
//!
//! Date-window resolution, weather-conditioned day shaping, and the
//! Markdown renderers used by the composite planning tools.

use chrono::{Duration, NaiveDate, Utc};

use crate::budget::{BudgetEstimator, BudgetMode};

const DATE_FMT: &str = "%Y-%m-%d";

/// The resolved travel window for one trip
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripWindow {
    pub origin: String,
    pub destination: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TripWindow {
    /// Resolve dates from optional user input.
    ///
    /// Start defaults to tomorrow, end to start + 4 days. A window whose
    /// duration is not at least one day is rejected with a user-facing
    /// message, not an error type.
    pub fn resolve(
        origin: &str,
        destination: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, String> {
        let start = match start_date {
            Some(s) => parse_date(s)?,
            None => Utc::now().date_naive() + Duration::days(1),
        };
        let end = match end_date {
            Some(s) => parse_date(s)?,
            None => start + Duration::days(4),
        };

        let window = Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            start,
            end,
        };

        if window.duration_days() <= 0 {
            return Err("Invalid date range. End date must be after start date.".into());
        }

        Ok(window)
    }

    /// Trip duration in days, inclusive of both endpoints
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT)
        .map_err(|_| format!("Could not parse date '{s}'. Use YYYY-MM-DD."))
}

/// Weather-conditioned day policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayShape {
    /// Rain, storms or showers: bias indoors
    Indoor,
    /// Cloud cover: mix indoor and light outdoor
    Mixed,
    /// Anything else: bias outdoors
    Outdoor,
}

impl DayShape {
    /// Case-insensitive substring match over the weather description
    pub fn from_weather(weather: &str) -> Self {
        let w = weather.to_lowercase();
        if w.contains("rain") || w.contains("storm") || w.contains("showers") {
            Self::Indoor
        } else if w.contains("cloud") {
            Self::Mixed
        } else {
            Self::Outdoor
        }
    }
}

/// Narrative for one day, fixed per policy
struct DayNarrative {
    morning: String,
    afternoon: String,
    evening: &'static str,
    tip: &'static str,
}

fn narrate(shape: DayShape, morning_spot: &str, afternoon_spot: &str) -> DayNarrative {
    match shape {
        DayShape::Indoor => DayNarrative {
            morning: format!("Visit {morning_spot} (indoor). Carry an umbrella!"),
            afternoon: format!("Indoor visit to {afternoon_spot} or explore a local cafe."),
            evening: "Chill indoors with books, jazz bars, or a warm meal nearby.",
            tip: "Rainy day: plan mostly indoor activities and bring weather gear.",
        },
        DayShape::Mixed => DayNarrative {
            morning: format!("Visit {morning_spot}. Keep flexible in case of drizzle."),
            afternoon: format!("Optional walk to {afternoon_spot} or relax in a cafe."),
            evening: "Evening stroll or indoor performance nearby.",
            tip: "Cloudy skies: mix of indoor and light outdoor activities.",
        },
        DayShape::Outdoor => DayNarrative {
            morning: format!("Start with outdoor visit to {morning_spot}."),
            afternoon: format!("Continue to {afternoon_spot}, enjoy walking or biking."),
            evening: "Enjoy city nightlife, rooftop dining, or river walk.",
            tip: "Sunny day: perfect for full outdoor sightseeing.",
        },
    }
}

/// Char-aware preview truncation (adds an ellipsis when cut)
pub fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Preview length applied to hotel/weather/restaurant text blocks
pub const PREVIEW_LEN: usize = 300;

/// Render the full trip-plan document: arrival day, flight block, hotel
/// preview, weather preview.
pub fn render_trip_plan(
    window: &TripWindow,
    flights: &str,
    hotel_info: &str,
    weather_forecast: &str,
) -> String {
    let hotel_line = hotel_info
        .lines()
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("Hotel info not available");

    let start = window.start.format(DATE_FMT);
    let end = window.end.format(DATE_FMT);
    let city = &window.destination;
    let origin = &window.origin;

    format!(
        "# Trip Plan for {city}\n\
         \n\
         **Duration:** {duration} Days ({start} to {end})\n\
         **From:** {origin}\n\
         **To:** {city}\n\
         \n\
         ---\n\
         \n\
         ## Travel & Arrival - {start}\n\
         \n\
         - Depart from: {origin}\n\
         - Arrive at: {city}\n\
         - Suggested Hotel: {hotel_line}\n\
         - Check-in and rest\n\
         - Optional: Light walk nearby or dinner at a local spot\n\
         \n\
         ### Flights\n\
         {flights}\n\
         \n\
         ### Hotel Info\n\
         {hotel_preview}\n\
         \n\
         ---\n\
         \n\
         ### Weather Forecast for {city}\n\
         {weather_preview}\n",
        duration = window.duration_days(),
        hotel_preview = preview(hotel_info, PREVIEW_LEN),
        weather_preview = preview(weather_forecast, PREVIEW_LEN),
    )
}

/// Inputs for a single day's itinerary
pub struct DayPlanInput<'a> {
    pub city: &'a str,
    pub day_number: i64,
    pub weather: &'a str,
    pub attractions: &'a str,
    pub restaurants: Option<&'a str>,
    pub total_budget: rust_decimal::Decimal,
    pub num_days: i64,
    pub mode: BudgetMode,
}

/// Render one day: weather-shaped morning/afternoon/evening blocks plus
/// the per-day cost section.
pub fn render_day_plan(input: &DayPlanInput<'_>) -> String {
    let spots: Vec<&str> = input
        .attractions
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    let morning_spot = spots.first().copied().unwrap_or("local museum");
    let afternoon_spot = spots.get(1).copied().unwrap_or("historic walking trail");

    let narrative = narrate(
        DayShape::from_weather(input.weather),
        morning_spot,
        afternoon_spot,
    );

    let dinner = input
        .restaurants
        .filter(|r| !r.trim().is_empty())
        .map(|r| preview(r, PREVIEW_LEN))
        .unwrap_or_else(|| "a recommended local restaurant".into());

    let estimator = BudgetEstimator::new(input.total_budget, input.num_days, input.mode);
    let breakdown = estimator.breakdown();

    format!(
        "### Day {day} in {city}\n\
         Weather: {weather}\n\
         \n\
         **Morning:**\n\
         - {morning}\n\
         \n\
         **Afternoon:**\n\
         - {afternoon}\n\
         \n\
         **Evening:**\n\
         - {evening}\n\
         - Dinner at: {dinner}.\n\
         \n\
         **Tips:** {tip}\n\
         \n\
         **Estimated Cost:** ${daily}\n\
         {cost_block}",
        day = input.day_number,
        city = input.city,
        weather = input.weather,
        morning = narrative.morning,
        afternoon = narrative.afternoon,
        evening = narrative.evening,
        tip = narrative.tip,
        daily = estimator.daily(),
        cost_block = breakdown.lines("- "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_window_duration_inclusive() {
        let window =
            TripWindow::resolve("Delhi", "Paris", Some("2026-09-10"), Some("2026-09-12")).unwrap();
        assert_eq!(window.duration_days(), 3);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = TripWindow::resolve("Delhi", "Paris", Some("2026-09-12"), Some("2026-09-10"))
            .unwrap_err();
        assert!(err.contains("Invalid date range"));
    }

    #[test]
    fn test_default_window_is_five_days() {
        let window = TripWindow::resolve("Delhi", "Paris", None, None).unwrap();
        assert_eq!(window.duration_days(), 5);
        assert_eq!(window.start, Utc::now().date_naive() + Duration::days(1));
    }

    #[test]
    fn test_unparseable_date_rejected() {
        assert!(TripWindow::resolve("Delhi", "Paris", Some("next tuesday"), None).is_err());
    }

    #[test]
    fn test_day_shape_policies() {
        assert_eq!(DayShape::from_weather("Light Rain"), DayShape::Indoor);
        assert_eq!(DayShape::from_weather("thunderSTORM"), DayShape::Indoor);
        assert_eq!(DayShape::from_weather("scattered showers"), DayShape::Indoor);
        assert_eq!(DayShape::from_weather("broken clouds"), DayShape::Mixed);
        assert_eq!(DayShape::from_weather("clear sky"), DayShape::Outdoor);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "é".repeat(400);
        let cut = preview(&text, PREVIEW_LEN);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_LEN + 3);
    }

    #[test]
    fn test_day_plan_defaults_anchors() {
        let input = DayPlanInput {
            city: "Paris",
            day_number: 2,
            weather: "clear sky",
            attractions: "",
            restaurants: None,
            total_budget: dec!(900),
            num_days: 3,
            mode: BudgetMode::Standard,
        };
        let plan = render_day_plan(&input);

        assert!(plan.contains("Day 2 in Paris"));
        assert!(plan.contains("local museum"));
        assert!(plan.contains("historic walking trail"));
        assert!(plan.contains("a recommended local restaurant"));
        assert!(plan.contains("$300"));
    }

    #[test]
    fn test_day_plan_uses_first_two_attractions() {
        let input = DayPlanInput {
            city: "Paris",
            day_number: 1,
            weather: "light rain",
            attractions: "Louvre, Musee d'Orsay, Eiffel Tower",
            restaurants: Some("Chez Marie"),
            total_budget: dec!(900),
            num_days: 3,
            mode: BudgetMode::Standard,
        };
        let plan = render_day_plan(&input);

        assert!(plan.contains("Louvre (indoor)"));
        assert!(plan.contains("Musee d'Orsay"));
        assert!(!plan.contains("Eiffel Tower"));
        assert!(plan.contains("umbrella"));
        assert!(plan.contains("Chez Marie"));
    }

    #[test]
    fn test_trip_plan_contains_previews() {
        let window =
            TripWindow::resolve("Delhi", "Paris", Some("2026-09-10"), Some("2026-09-12")).unwrap();
        let hotels = format!("Hotel Lux - city centre\n{}", "h".repeat(400));
        let plan = render_trip_plan(&window, "Flights from $420", &hotels, "mild all week");

        assert!(plan.contains("# Trip Plan for Paris"));
        assert!(plan.contains("**Duration:** 3 Days"));
        assert!(plan.contains("Suggested Hotel: Hotel Lux - city centre"));
        assert!(plan.contains("Flights from $420"));
        // hotel block was cut to the preview length
        assert!(plan.contains("..."));
    }
}
