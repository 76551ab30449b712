pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod remote;
pub mod state;
pub mod stats;
pub mod sync;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use errors::VoteError;
pub use remote::VoteApi;
pub use state::AppState;
pub use stats::derive_percentages;
pub use sync::{Poller, VoteSync};
