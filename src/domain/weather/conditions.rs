use crate::cli::IconMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Foggy,
}

impl ConditionCategory {
    pub const ALL: [Self; 6] = [
        Self::Sunny,
        Self::Cloudy,
        Self::Rainy,
        Self::Snowy,
        Self::Stormy,
        Self::Foggy,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Stormy => "stormy",
            Self::Foggy => "foggy",
        }
    }
}

// Storm keywords are checked first so "thundery rain" or "sunny, storms
// later" still classify as stormy.
const CATEGORY_KEYWORDS: &[(ConditionCategory, &[&str])] = &[
    (ConditionCategory::Stormy, &["thunder", "storm"]),
    (ConditionCategory::Sunny, &["sunny", "clear"]),
    (ConditionCategory::Cloudy, &["cloud", "overcast"]),
    (ConditionCategory::Rainy, &["rain", "drizzle"]),
    (ConditionCategory::Snowy, &["snow", "blizzard"]),
    (ConditionCategory::Foggy, &["fog", "mist"]),
];

const PARTLY_CLOUDY_KEYWORDS: &[&str] = &["partly", "few clouds", "scattered", "broken clouds"];

/// Maps free condition text onto a category. Total: text matching no
/// keyword (including the empty string) is `Cloudy`.
#[must_use]
pub fn classify_condition(text: &str) -> ConditionCategory {
    let lower = text.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find_map(|(category, keywords)| {
            keywords
                .iter()
                .any(|keyword| lower.contains(keyword))
                .then_some(*category)
        })
        .unwrap_or(ConditionCategory::Cloudy)
}

#[must_use]
pub fn is_partly_cloudy(text: &str) -> bool {
    let lower = text.to_lowercase();
    PARTLY_CLOUDY_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}

#[must_use]
pub fn condition_icon(category: ConditionCategory, mode: IconMode, is_night: bool) -> &'static str {
    let (ascii, emoji, unicode) = icon_tokens(category, is_night);
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}

fn icon_tokens(
    category: ConditionCategory,
    is_night: bool,
) -> (&'static str, &'static str, &'static str) {
    match category {
        ConditionCategory::Sunny if is_night => ("MON", "🌙", "☾"),
        ConditionCategory::Sunny => ("SUN", "☀️", "☀"),
        ConditionCategory::Cloudy => ("CLD", "☁️", "☁"),
        ConditionCategory::Rainy => ("RAN", "🌧️", "☂"),
        ConditionCategory::Snowy => ("SNW", "🌨️", "❄"),
        ConditionCategory::Stormy => ("THN", "⛈️", "⚡"),
        ConditionCategory::Foggy => ("FOG", "🌫️", "░"),
    }
}
