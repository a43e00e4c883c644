//! Two small, unrelated utilities:
//!  -  [`guard`]: runtime type-checking of call arguments against a declared
//!     parameter schema, before the wrapped function runs.
//!  -  [`scrape`]: a sequential paginated scraper that walks a wiki category
//!     listing and counts entries per first letter.

mod error;
mod parse;
mod request;

pub mod guard;
pub mod scrape;

pub use error::{Error, Result};
pub use scrape::{CategoryScraper, ScraperConfig};

pub const BASE_URL: &str = "https://ru.wikipedia.org/wiki/Категория:Животные_по_алфавиту";
/// Per-request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;
pub const FILE_PATH: &str = "beasts.csv";
/// The 33 lowercase letters of the Russian alphabet, ё included.
pub const RUSSIAN_LOWER: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";
