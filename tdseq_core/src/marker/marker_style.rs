use serde::{Deserialize, Serialize};

use crate::common::{
    enums::{Direction, MarkerKind, MarkerPosition, Phase},
    utils::circled_digit,
};
use crate::marker::marker::Marker;

/// Cosmetic settings for one marker kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: String,
    /// shape drawn on the terminal marker (9 / 13)
    pub terminal_shape: Option<String>,
    pub terminal_size: Option<u32>,
}

impl MarkerStyle {
    pub fn new(color: &str, terminal_shape: Option<&str>, terminal_size: Option<u32>) -> Self {
        Self {
            color: color.to_string(),
            terminal_shape: terminal_shape.map(str::to_string),
            terminal_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyles {
    pub setup_buy: MarkerStyle,
    pub setup_sell: MarkerStyle,
    pub countdown_buy: MarkerStyle,
    pub countdown_sell: MarkerStyle,
    /// ①..⑨ instead of 1..9 on setup markers
    pub circled_setup_labels: bool,
}

impl Default for MarkerStyles {
    fn default() -> Self {
        Self {
            setup_buy: MarkerStyle::new("#00FF00", Some("circle"), None),
            setup_sell: MarkerStyle::new("#AA0000", Some("circle"), None),
            countdown_buy: MarkerStyle::new("#008000", Some("arrowUp"), Some(1)),
            countdown_sell: MarkerStyle::new("#800000", Some("arrowDown"), Some(1)),
            circled_setup_labels: false,
        }
    }
}

impl MarkerStyles {
    pub fn get(&self, kind: MarkerKind) -> &MarkerStyle {
        match kind {
            MarkerKind::SetupBuy => &self.setup_buy,
            MarkerKind::SetupSell => &self.setup_sell,
            MarkerKind::CountdownBuy => &self.countdown_buy,
            MarkerKind::CountdownSell => &self.countdown_sell,
        }
    }

    pub fn get_mut(&mut self, kind: MarkerKind) -> &mut MarkerStyle {
        match kind {
            MarkerKind::SetupBuy => &mut self.setup_buy,
            MarkerKind::SetupSell => &mut self.setup_sell,
            MarkerKind::CountdownBuy => &mut self.countdown_buy,
            MarkerKind::CountdownSell => &mut self.countdown_sell,
        }
    }

    /// Config key for one style attribute of `kind`, e.g. `buy_setup_color`
    pub fn style_key(kind: MarkerKind, attr: &str) -> String {
        let dir = match kind.direction() {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        };
        let phase = match kind.phase() {
            Phase::Setup => "setup",
            Phase::Countdown => "countdown",
        };
        format!("{}_{}_{}", dir, phase, attr)
    }

    pub fn overlay(&self, marker: &Marker) -> OverlayMarker {
        let style = self.get(marker.kind);
        let text = if marker.is_setup() && self.circled_setup_labels {
            circled_digit(marker.count)
        } else {
            marker.label.clone()
        };
        let (shape, size) = if marker.is_terminal {
            (style.terminal_shape.clone(), style.terminal_size)
        } else {
            (None, None)
        };
        OverlayMarker {
            time: marker.time.timestamp,
            position: marker.position(),
            color: style.color.clone(),
            shape,
            size,
            text,
        }
    }

    pub fn overlay_all(&self, markers: &[Marker]) -> Vec<OverlayMarker> {
        markers.iter().map(|m| self.overlay(m)).collect()
    }
}

/// Marker record in the shape a chart widget consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayMarker {
    pub time: i64,
    pub position: MarkerPosition,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub text: String,
}
