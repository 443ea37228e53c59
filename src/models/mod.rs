// Pose input and swing analysis output models

pub mod pose;
pub mod swing_analysis;
pub mod feedback;

pub use pose::*;
pub use swing_analysis::*;
pub use feedback::*;
