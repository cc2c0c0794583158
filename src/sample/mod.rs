mod random;
mod top;

pub use random::{sample_per_group, sample_per_group_seeded};
pub use top::top_per_group;
