//! Indicator Module
//! Statistical metrics offered by the dropdowns and where their data lives.

use std::fmt;

/// Where the values of an indicator come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Built-in table compiled into the application.
    Table,
    /// JSON data file, relative to the configured indicator data location.
    File(&'static str),
}

/// A named statistical metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    HappinessIndex,
    Education,
    Gdp,
    Economy,
    HappinessScore,
    Freedom,
    GdpPerCapita,
    SocialSupport,
    Generosity,
    Health,
    GdpGrowth,
}

impl Indicator {
    /// Choices of the Countries view, default first.
    pub const COUNTRY_VIEW: [Indicator; 4] = [
        Indicator::Education,
        Indicator::Gdp,
        Indicator::Economy,
        Indicator::HappinessIndex,
    ];

    /// Choices of the India view, default first.
    pub const INDIA_VIEW: [Indicator; 6] = [
        Indicator::Freedom,
        Indicator::GdpPerCapita,
        Indicator::SocialSupport,
        Indicator::Generosity,
        Indicator::Health,
        Indicator::GdpGrowth,
    ];

    /// Stable key, as used by the indicator data files.
    pub fn key(&self) -> &'static str {
        match self {
            Indicator::HappinessIndex => "Happiness",
            Indicator::Education => "Education",
            Indicator::Gdp => "GDP",
            Indicator::Economy => "Economy",
            Indicator::HappinessScore => "Happiness_score",
            Indicator::Freedom => "Freedom",
            Indicator::GdpPerCapita => "GDP_per_capita",
            Indicator::SocialSupport => "Social_support",
            Indicator::Generosity => "Generosity",
            Indicator::Health => "Health",
            Indicator::GdpGrowth => "GDP_Growth",
        }
    }

    /// Child-friendly name used in titles and axis labels.
    pub fn friendly_name(&self) -> &'static str {
        match self {
            Indicator::HappinessIndex => "Happiness Index",
            Indicator::Education => "Education",
            Indicator::Gdp => "GDP",
            Indicator::Economy => "Economy",
            Indicator::HappinessScore => "Happiness Score",
            Indicator::Freedom => "Freedom to make choices",
            Indicator::GdpPerCapita => "Money per person",
            Indicator::SocialSupport => "Support from family & friends",
            Indicator::Generosity => "Generosity",
            Indicator::Health => "Health",
            Indicator::GdpGrowth => "GDP Growth",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Indicator::HappinessIndex | Indicator::HappinessScore => "😊",
            Indicator::Education => "📚",
            Indicator::Gdp => "💰",
            Indicator::Economy => "📈",
            Indicator::Freedom => "🗽",
            Indicator::GdpPerCapita => "💵",
            Indicator::SocialSupport => "👪",
            Indicator::Generosity => "🎁",
            Indicator::Health => "🏥",
            Indicator::GdpGrowth => "📈",
        }
    }

    /// Dropdown label.
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji(), self.friendly_name())
    }

    pub fn location(&self) -> Location {
        match self {
            Indicator::Education => Location::File("Education_Indicator.json"),
            Indicator::Gdp => Location::File("GDP_Indicator.json"),
            Indicator::Economy => Location::File("Economy_Indicator.json"),
            _ => Location::Table,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
