mod lobby;
mod lobby_command;
mod matchmaker;
mod registry;
mod router;
mod synthetic;
mod waiting_pool;

pub use lobby::*;
pub use lobby_command::*;
pub use matchmaker::*;
pub use registry::*;
pub use router::*;
pub use synthetic::*;
pub use waiting_pool::*;
