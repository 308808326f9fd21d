pub use {
    branch::*, cycle::*, grid::*, key::*, memoize::*, search::*, sparse::*, step::*, clap::Parser,
};

use {
    memmap::Mmap,
    nom::{
        bytes::complete::tag,
        character::complete::digit1,
        combinator::{map, map_res, opt, rest},
        sequence::tuple,
        IResult,
    },
    num::Integer,
    std::{
        any::type_name,
        cmp::Ordering,
        fmt::Debug,
        fs::File,
        io::{Error as IoError, ErrorKind, Result as IoResult},
        ops::Range,
        str::{from_utf8, FromStr, Utf8Error},
    },
};

mod branch;
mod cycle;
mod grid;
mod key;
mod memoize;
mod search;
mod sparse;
mod step;

#[allow(dead_code, unused_imports, unused_variables)]
mod template;

#[derive(Debug, Parser)]
pub struct PartArgs {
    /// Print extra information, if there is any
    #[arg(short, long, default_value_t)]
    pub verbose: bool,
}

/// Arguments for program execution
#[derive(Debug, Parser)]
pub struct Args {
    /// Input file path
    #[arg(short, long, default_value_t)]
    input_file_path: String,

    /// The day to run
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: u8,

    /// The part to run, both if omitted
    #[arg(short, long, default_value_t, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub part: u8,

    #[command(flatten)]
    pub part_args: PartArgs,
}

impl Args {
    fn try_to_intermediate<I>(&self) -> Option<I>
    where
        I: for<'a> TryFrom<&'a str>,
        for<'a> <I as TryFrom<&'a str>>::Error: Debug,
    {
        let default_file_path: String;
        let file_path: &str = if self.input_file_path.is_empty() {
            default_file_path = format!("input/d{:02}.txt", self.day);

            &default_file_path
        } else {
            &self.input_file_path
        };

        // SAFETY: This isn't truly safe, we're just hoping nobody touches our file before we're
        // done parsing it
        unsafe {
            open_utf8_file(file_path, |s| {
                s.try_into().map_or_else(
                    |error| {
                        eprintln!(
                            "Failed to convert file \"{file_path}\" to type {}:\n{error:#?}",
                            type_name::<I>()
                        );

                        None
                    },
                    Some,
                )
            })
        }
        .unwrap_or_else(|error| {
            eprintln!("Failed to open UTF-8 file \"{file_path}\":\n{error}");

            None
        })
    }
}

pub trait RunParts
where
    Self: Sized + for<'a> TryFrom<&'a str>,
    for<'a> <Self as TryFrom<&'a str>>::Error: Debug,
{
    fn p2_internal(&mut self, args: &PartArgs);
    fn p1_internal(&mut self, args: &PartArgs);

    fn p1(args: &Args) {
        if let Some(mut intermediate) = args.try_to_intermediate::<Self>() {
            intermediate.p1_internal(&args.part_args);
        }
    }

    fn p2(args: &Args) {
        if let Some(mut intermediate) = args.try_to_intermediate::<Self>() {
            intermediate.p2_internal(&args.part_args);
        }
    }

    fn both(args: &Args) {
        if let Some(mut intermediate) = args.try_to_intermediate::<Self>() {
            intermediate.p1_internal(&args.part_args);
            intermediate.p2_internal(&args.part_args);
        }
    }
}

#[derive(Clone)]
pub struct Day {
    pub p1: fn(&Args),
    pub p2: fn(&Args),
    pub both: fn(&Args),
}

impl Day {
    fn run(&self, args: &Args) {
        match args.part {
            0 => (self.both)(args),
            1 => (self.p1)(args),
            2 => (self.p2)(args),
            part => unreachable!(
                "A valid Args will have a part value in the range 0..=2, but {part} was \
                encountered.\n\
                Args:\n\
                {args:#?}"
            ),
        }
    }
}

pub struct DayParams<'a> {
    pub string: &'a str,
    pub option: Option<u8>,
    pub day: Day,
}

fn parse_tagged_int<'i, I: FromStr>(t: &str, input: &'i str) -> IResult<&'i str, I> {
    map(tuple((tag(t), map_res(rest, I::from_str))), |(_, i)| i)(input)
}

#[derive(Default)]
pub struct Puzzles {
    days: Vec<Option<Day>>,
    min: u8,
}

impl Puzzles {
    pub fn run(&self, args: &Args) {
        match args
            .day
            .checked_sub(self.min)
            .and_then(|day| self.days.get(day as usize))
        {
            None => panic!(
                "Queried day {} is out of the range of valid days, {}..{}.\n\
                Args:\n\
                {args:#?}",
                args.day,
                self.min,
                self.min as usize + self.days.len()
            ),
            Some(None) => panic!(
                "Queried day {} has no registered parts.\n\
                Args:\n\
                {args:#?}",
                args.day
            ),
            Some(Some(day)) => day.run(args),
        }
    }

    pub fn try_from_day_params(mut day_params: Vec<DayParams>) -> Option<Self> {
        let (min, max): (u8, u8) = day_params
            .iter_mut()
            .filter_map(|DayParams { string, option, .. }| {
                parse_tagged_int("d", string).map_or_else(
                    |error| {
                        eprintln!(
                            "Invalid day string \"{}\"\n\
                            Error:\n\
                            {error}",
                            string
                        );

                        None
                    },
                    |(_, day)| {
                        *option = Some(day);

                        Some(day)
                    },
                )
            })
            .fold((u8::MAX, u8::MIN), |(min, max), day| {
                (min.min(day), max.max(day))
            });

        if min == u8::MAX {
            None
        } else {
            let size: usize = (max + 1 - min) as usize;
            let mut days: Vec<Option<Day>> = Vec::with_capacity(size);

            days.resize_with(size, || None);

            for DayParams { option, day, .. } in day_params.into_iter() {
                days[(option.unwrap() - min) as usize] = Some(day);
            }

            Some(Puzzles { days, min })
        }
    }
}

#[macro_export]
macro_rules! puzzles {
    [ $( $day:ident ),* $(,)? ] => {
        $(
            pub mod $day;
        )*

        pub fn puzzles() -> &'static Puzzles {
            static ONCE_LOCK: std::sync::OnceLock<Puzzles> = std::sync::OnceLock::new();

            ONCE_LOCK.get_or_init(|| Puzzles::try_from_day_params(vec![ $(
                DayParams {
                    string: stringify!($day),
                    option: None,
                    day: Day {
                        p1: $day::Solution::p1,
                        p2: $day::Solution::p2,
                        both: $day::Solution::both,
                    }
                },
            )* ]).unwrap_or_else(Puzzles::default))
        }
    };
}

#[macro_export]
macro_rules! pretty_assert_eq {
    ($left:expr, $right:expr) => {{
        let left = $left;
        let right = $right;

        if left != right {
            panic!(
                "pretty assertion failed: `(left == right)`\nleft: {left:#?}\nright: {right:#?}"
            );
        }
    }};
}

/// Opens a memory-mapped UTF-8 file at a specified path, and passes in a `&str` over the file to a
/// provided callback function
///
/// # Errors
///
/// This function returns a `Result::Err`-wrapped `std::io::Error` if `std::fs::File::open` or
/// `memmap::Mmap::map` fails, or if the file is not valid UTF-8.
///
/// # Safety
///
/// This function uses `Mmap::map`, which is an unsafe function. There is no guarantee that an
/// external process won't modify the file after it is opened as read-only, which would be UB while
/// this function refers to it as an immutable string slice.
pub unsafe fn open_utf8_file<T, F: FnOnce(&str) -> T>(file_path: &str, f: F) -> IoResult<T> {
    let file: File = File::open(file_path)?;

    // SAFETY: This operation is unsafe
    let mmap: Mmap = Mmap::map(&file)?;
    let bytes: &[u8] = &mmap;
    let utf8_str: &str = from_utf8(bytes).map_err(|utf8_error: Utf8Error| -> IoError {
        IoError::new(ErrorKind::InvalidData, utf8_error)
    })?;

    Ok(f(utf8_str))
}

pub fn try_intersection<T: Ord + Copy>(range1: Range<T>, range2: Range<T>) -> Option<Range<T>> {
    match (range1.start.cmp(&range1.end), range2.start.cmp(&range2.end)) {
        (Ordering::Less, Ordering::Less) => (range1.end >= range2.start
            && range1.start <= range2.end)
            .then_some(range1.start.max(range2.start)..range1.end.min(range2.end)),
        (Ordering::Less, Ordering::Equal) => range1.contains(&range2.start).then_some(range2),
        (Ordering::Equal, Ordering::Less) => range2.contains(&range1.start).then_some(range1),
        (Ordering::Equal, Ordering::Equal) => (range1.start == range2.start).then_some(range1),
        _ => None,
    }
}

pub fn try_non_empty_intersection<T: Ord + Copy>(
    range1: Range<T>,
    range2: Range<T>,
) -> Option<Range<T>> {
    try_intersection(range1, range2).filter(|range| !range.is_empty())
}

pub fn parse_integer<'i, I: FromStr + Integer>(input: &'i str) -> IResult<&'i str, I> {
    map(
        tuple((
            map(opt(tag("-")), |minus| {
                if minus.is_some() {
                    I::zero() - I::one()
                } else {
                    I::one()
                }
            }),
            map_res(digit1, I::from_str),
        )),
        |(sign, bound)| sign * bound,
    )(input)
}

pub trait Parse: Sized {
    fn parse(input: &str) -> IResult<&str, Self>;
}

pub const fn triangle_number(n: usize) -> usize {
    n * (n + 1_usize) / 2_usize
}

pub const LOWERCASE_A_OFFSET: u8 = b'a';
pub const UPPERCASE_A_OFFSET: u8 = b'A';
pub const ZERO_OFFSET: u8 = b'0';

#[macro_export]
macro_rules! define_cell {
    {
        #[repr(u8)]
        $(#[$attr:meta])*
        $pub:vis enum $cell:ident { $(
            $(#[$variant_attr:meta])*
            $variant:ident = $variant_const:ident = $variant_u8:expr
        ),* $(,)? }
    } => {
        #[repr(u8)]
        $(#[$attr])*
        $pub enum $cell { $(
            $(#[$variant_attr])*
            $variant = Self::$variant_const,
        )* }

        impl $cell {
            $(
                const $variant_const: u8 = $variant_u8;
            )*
        }

        unsafe impl IsValidAscii for $cell {}

        impl TryFrom<u8> for $cell {
            type Error = ();

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $(
                        Self::$variant_const => Ok(Self::$variant),
                    )*
                    _ => Err(()),
                }
            }
        }

        impl TryFrom<char> for $cell {
            type Error = ();

            fn try_from(value: char) -> Result<Self, Self::Error> {
                (value as u8).try_into()
            }
        }
    }
}
