pub mod analysis;
pub mod backup;
pub mod biases;
pub mod settings;
pub mod stats;
pub mod trades;

pub use analysis::*;
pub use backup::*;
pub use biases::*;
pub use settings::*;
pub use stats::*;
pub use trades::*;
