//! Names for tiles of a two-level tiling.
//!
//! A tile is addressed by its group (letters, base 26) and its index within
//! all tiles (decimal digits). Both parts are padded so names sort in id
//! order, and a part is omitted when there is only one value for it:
//!
//! | groups | tiles | group, tile | name |
//! |--------|-------|-------------|------|
//! | 3 | 12 | 1, 7 | `b_07` |
//! | 30 | 1 | 27, 0 | `bb` |
//! | 1 | 5 | 0, 4 | `4` |
//! | 1 | 1 | 0, 0 | `` |

/// Smallest `w` with `base^w >= n`.
fn width(n: usize, base: usize) -> usize {
    let mut w = 0;
    let mut reach = 1usize;
    while reach < n {
        reach = reach.saturating_mul(base);
        w += 1;
    }
    w
}

/// Lowercase base-26 letters for `n`, left-padded with `a` to `width`.
fn letters(mut n: usize, width: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    while out.len() < width {
        out.push(b'a');
    }
    out.iter().rev().map(|&b| b as char).collect()
}

/// Name of tile `tile` in group `group`.
pub fn tile_name(group: usize, tile: usize, num_groups: usize, num_tiles: usize) -> String {
    let prefix = if num_groups > 1 {
        letters(group, width(num_groups, 26))
    } else {
        String::new()
    };
    let digits = if num_tiles > 1 {
        format!("{:0w$}", tile, w = width(num_tiles, 10))
    } else {
        String::new()
    };

    match (prefix.is_empty(), digits.is_empty()) {
        (false, false) => format!("{}_{}", prefix, digits),
        (true, _) => digits,
        (_, true) => prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits() {
        assert_eq!(tile_name(1, 7, 3, 12), "b_07");
        assert_eq!(tile_name(0, 0, 2, 2), "a_0");
        assert_eq!(tile_name(2, 99, 26, 100), "c_99");
        assert_eq!(tile_name(26, 100, 27, 101), "ba_100");
    }

    #[test]
    fn parts_are_omitted_when_single() {
        assert_eq!(tile_name(27, 0, 30, 1), "bb");
        assert_eq!(tile_name(0, 4, 1, 5), "4");
        assert_eq!(tile_name(0, 0, 1, 1), "");
    }

    #[test]
    fn width_matches_power_boundaries() {
        assert_eq!(width(2, 10), 1);
        assert_eq!(width(10, 10), 1);
        assert_eq!(width(11, 10), 2);
        assert_eq!(width(26, 26), 1);
        assert_eq!(width(27, 26), 2);
    }
}
