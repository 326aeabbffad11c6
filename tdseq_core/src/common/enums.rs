use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Input series names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DataField {
    #[strum(serialize = "time_key")]
    Time,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl DataField {
    /// Map a CSV header (or DataFrame column name) onto a field
    pub fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_ascii_lowercase().as_str() {
            "time_key" | "time" | "date" | "fecha" | "timestamp" | "datetime" => Some(Self::Time),
            "open" => Some(Self::Open),
            "high" => Some(Self::High),
            "low" => Some(Self::Low),
            "close" => Some(Self::Close),
            "volume" | "vol" => Some(Self::Volume),
            _ => None,
        }
    }
}

/// Side of a setup/countdown sequence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

/// Phase of the TD Sequential a marker belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Countdown,
}

/// Marker kinds handed to the rendering layer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum MarkerKind {
    #[strum(serialize = "setup-buy")]
    #[serde(rename = "setup-buy")]
    SetupBuy,
    #[strum(serialize = "setup-sell")]
    #[serde(rename = "setup-sell")]
    SetupSell,
    #[strum(serialize = "countdown-buy")]
    #[serde(rename = "countdown-buy")]
    CountdownBuy,
    #[strum(serialize = "countdown-sell")]
    #[serde(rename = "countdown-sell")]
    CountdownSell,
}

impl MarkerKind {
    pub fn new(phase: Phase, dir: Direction) -> Self {
        match (phase, dir) {
            (Phase::Setup, Direction::Buy) => Self::SetupBuy,
            (Phase::Setup, Direction::Sell) => Self::SetupSell,
            (Phase::Countdown, Direction::Buy) => Self::CountdownBuy,
            (Phase::Countdown, Direction::Sell) => Self::CountdownSell,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::SetupBuy | Self::SetupSell => Phase::Setup,
            Self::CountdownBuy | Self::CountdownSell => Phase::Countdown,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::SetupBuy | Self::CountdownBuy => Direction::Buy,
            Self::SetupSell | Self::CountdownSell => Direction::Sell,
        }
    }
}

/// Where a marker sits relative to its bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum MarkerPosition {
    #[strum(serialize = "aboveBar")]
    #[serde(rename = "aboveBar")]
    AboveBar,
    #[strum(serialize = "belowBar")]
    #[serde(rename = "belowBar")]
    BelowBar,
}

/// What a setup does once it has counted to 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SetupExtension {
    /// back to 0, a new flip is needed
    Reset,
    /// latch at 9 until the opposite flip
    Freeze,
    /// keep printing 9 while the comparison holds
    Extend,
}

/// How an unfinished countdown is shown when only complete runs are requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PendingDisplay {
    Full,
    Last,
}

/// Marker filter per phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ShowMode {
    #[strum(serialize = "all")]
    All,
    #[strum(serialize = "terminal")]
    TerminalOnly,
    #[strum(serialize = "none")]
    Hidden,
}
