//! Display module for formatted CLI output

pub mod colors;
pub mod format;
pub mod icons;
pub mod table;

pub use colors::ColorTheme;
pub use format::{extract_kind_from_base64, format_date, format_time_ago, format_timestamp};
pub use icons::StateIcon;
pub use table::TableRenderer;
