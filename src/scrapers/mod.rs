pub mod chromium;
pub mod detail;
pub mod mock_session;
mod session;

pub use chromium::ChromiumLauncher;
pub use detail::DetailRunner;
pub use mock_session::{MockLauncher, MockPage};
pub use session::{BrowserSession, SessionLauncher};
