pub mod navigation;
pub mod resolve;
pub mod update;

pub use navigation::{History, Navigator};
pub use resolve::{MicroserviceResolver, MicroserviceRoute};
pub use update::MicroserviceUpdate;
