use {
    super::parse_integer,
    glam::{IVec2, IVec3},
    nom::{
        bytes::complete::tag,
        combinator::all_consuming,
        error::Error as NomError,
        sequence::{separated_pair, tuple},
        Finish,
    },
};

/// Canonical string keys for integer positions, in the form `"x,y"` / `"x,y,z"`.
///
/// The comma delimiter cannot appear in a rendered integer, so encoding is lossless for all
/// representable components, negative ones included. Decoding a string that was not produced by
/// the corresponding encode function is unsupported input.

pub fn pos_2d_key(pos: IVec2) -> String {
    format!("{},{}", pos.x, pos.y)
}

pub fn pos_3d_key(pos: IVec3) -> String {
    format!("{},{},{}", pos.x, pos.y, pos.z)
}

pub fn key_2d_pos(key: &str) -> IVec2 {
    let (_, (x, y)): (&str, (i32, i32)) = all_consuming(separated_pair(
        parse_integer::<i32>,
        tag(","),
        parse_integer::<i32>,
    ))(key)
    .finish()
    .unwrap_or_else(|error: NomError<&str>| {
        panic!("\"{key}\" is not a valid 2D position key: {error:?}")
    });

    IVec2::new(x, y)
}

pub fn key_3d_pos(key: &str) -> IVec3 {
    let (_, (x, _, y, _, z)): (&str, (i32, &str, i32, &str, i32)) = all_consuming(tuple((
        parse_integer::<i32>,
        tag(","),
        parse_integer::<i32>,
        tag(","),
        parse_integer::<i32>,
    )))(key)
    .finish()
    .unwrap_or_else(|error: NomError<&str>| {
        panic!("\"{key}\" is not a valid 3D position key: {error:?}")
    });

    IVec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_2d_key_round_trip() {
        for pos in [
            IVec2::ZERO,
            IVec2::new(3_i32, -7_i32),
            IVec2::new(-500_i32, 123_456_i32),
            IVec2::new(i32::MAX, i32::MAX),
        ] {
            assert_eq!(key_2d_pos(&pos_2d_key(pos)), pos);
        }

        assert_eq!(pos_2d_key(IVec2::new(-1_i32, 2_i32)), "-1,2");
    }

    #[test]
    fn test_pos_3d_key_round_trip() {
        for pos in [
            IVec3::ZERO,
            IVec3::new(1_i32, -2_i32, 3_i32),
            IVec3::new(-40_i32, -50_i32, -60_i32),
        ] {
            assert_eq!(key_3d_pos(&pos_3d_key(pos)), pos);
        }

        assert_eq!(pos_3d_key(IVec3::new(7_i32, 0_i32, -9_i32)), "7,0,-9");
    }
}
