mod runner;
mod stage;
mod state;

pub use runner::{GraphError, QueryGraph};
pub use stage::Stage;
pub use state::RunState;
