pub use util::*;

mod util;

puzzles![d03, d04, d08, d13, d14, d16, d17, d19, d23, d24,];
