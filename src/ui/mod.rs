pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, muted, section, success, summary_row, warn};
pub use table::{expenses_table, summary_table};
pub use theme::{theme, Theme};
