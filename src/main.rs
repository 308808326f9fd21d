use advent::{puzzles, Args, Parser};

fn main() {
    puzzles().run(&Args::parse());
}
