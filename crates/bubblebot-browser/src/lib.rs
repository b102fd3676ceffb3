// Bubble map screenshots through the Chrome DevTools Protocol

mod capture;
mod chrome_finder;
mod error;
mod profile;

pub use capture::{BubblemapCapture, CaptureSettings, MapCapture, Screenshot, CANVAS_SELECTOR};
pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use profile::TempProfile;
