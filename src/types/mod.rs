pub mod error;
pub mod utils;

pub use error::{Result, ResultExt, ScribeError};
pub use utils::{json_str_items, json_string, pretty_json, truncate_chars};
