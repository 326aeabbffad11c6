pub mod analyzer;
pub mod bar;
pub mod common;
pub mod config;
pub mod countdown;
pub mod exhaustion;
pub mod marker;
pub mod math;
pub mod setup;

pub use analyzer::analyzer::{AnalysisResult, Analyzer};
pub use bar::{bar_list::BarList, price_bar::PriceBar};
pub use common::td_exception::{ErrCode, TdException};
pub use config::td_config::TdConfig;
pub use marker::marker::Marker;
