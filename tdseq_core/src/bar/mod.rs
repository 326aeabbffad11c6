pub mod bar_list;
pub mod price_bar;
