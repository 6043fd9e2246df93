pub mod correlation;
pub mod descriptive;
pub mod distributions;
pub mod histogram;
pub mod normality;
pub mod reliability;

pub use correlation::correlate;
pub use descriptive::{composite_summaries, item_summaries};
pub use histogram::{histogram, DEFAULT_BINS};
pub use normality::shapiro_wilk;
pub use reliability::cronbach_alpha;
