pub mod analytics;
pub mod badges;
pub mod logs;
pub mod matches;
pub mod ocr;
pub mod response;
pub mod sessions;
pub mod system_config;
pub mod user;
pub mod wallet;

pub use analytics::*;
pub use badges::*;
pub use logs::*;
pub use matches::*;
pub use ocr::*;
pub use response::*;
pub use sessions::*;
pub use system_config::*;
pub use user::*;
pub use wallet::*;
