pub mod error_banner;
pub mod loader;

pub use error_banner::{ErrorBanner, ERROR_BANNER_DURATION};
pub use loader::LoadingIndicator;
