mod controller;
mod source;

pub use controller::{LoadingScreen, Outcome};
pub use source::{ChannelSource, MutationSource};
