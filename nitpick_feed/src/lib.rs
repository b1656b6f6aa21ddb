mod cache;
mod following;
mod pin;
mod settings;
mod strategy;
mod upstream;
#[cfg(test)]
mod test_util;

pub use cache::*;
pub use following::*;
pub use pin::*;
pub use settings::*;
pub use upstream::*;
