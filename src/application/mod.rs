// Application layer - sequencing of submissions and the view interface.
// The domain stays pure; everything that touches the output surface lives here.

pub mod error;
pub mod notice;
pub mod orchestrator;
pub mod view;

pub use error::*;
pub use notice::*;
pub use orchestrator::*;
pub use view::*;
