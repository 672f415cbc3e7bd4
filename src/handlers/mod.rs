mod chaos;
mod health;
mod metrics;
mod values;

pub use chaos::{immediate_echo, jittered_echo, randomized_outcome, slow_echo};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use values::{create_value, delete_value, get_value, list_values, update_value};
