pub mod demarker;
pub mod rsi;
