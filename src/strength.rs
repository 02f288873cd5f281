//! Preflop hand-strength table.
//!
//! Every canonical hand class maps to a 0-100 percentile: the share of all
//! 1326 starting combos it outranks in 6-max preflop playability (all-in
//! equity against a random hand, plus suitedness and connectivity credit
//! for hands that realise equity well postflop). A cutoff of `x` therefore
//! selects roughly the top `100 - x` percent of hands.
//!
//! The table is fixed calibration data. Rows with the same high card are
//! monotone in the kicker, except that A5s-A2s keep their wheel bonus.

use crate::cards::HandClass;

/// Strength assigned to malformed or unknown hand notation.
pub const STRENGTH_FLOOR: u8 = 30;

/// Strength grid in 13x13 chart layout.
///
/// Row and column run A, K, Q, ..., 2. The diagonal holds pairs, cells above
/// it are suited hands (row = high card), cells below are offsuit hands
/// (column = high card).
#[rustfmt::skip]
const STRENGTH_GRID: [[u8; 13]; 13] = [
    //  A    K    Q    J    T    9    8    7    6    5    4    3    2
    [100,  97,  96,  95,  94,  88,  87,  86,  83,  86,  86,  84,  82],  // A
    [ 94,  99,  96,  95,  92,  85,  82,  78,  78,  75,  71,  69,  67],  // K
    [ 92,  90,  99,  94,  91,  82,  77,  71,  69,  63,  62,  59,  58],  // Q
    [ 91,  87,  83,  98,  92,  81,  71,  65,  59,  58,  56,  54,  50],  // J
    [ 88,  85,  80,  77,  98,  81,  74,  62,  54,  49,  45,  44,  42],  // T
    [ 79,  73,  66,  63,  60,  98,  75,  64,  53,  44,  39,  36,  33],  // 9
    [ 79,  68,  61,  56,  55,  51,  97,  67,  57,  44,  35,  29,  29],  // 8
    [ 76,  60,  50,  43,  40,  37,  36,  96,  58,  47,  38,  25,  21],  // 7
    [ 74,  57,  48,  38,  31,  28,  25,  26,  93,  52,  42,  30,  20],  // 6
    [ 72,  53,  45,  34,  24,  21,  19,  18,  17,  89,  46,  33,  22],  // 5
    [ 70,  52,  41,  32,  23,  16,  13,  11,  12,  15,  84,  39,  26],  // 4
    [ 68,  48,  41,  30,  22,  14,  10,   6,   5,   8,   9,  75,  29],  // 3
    [ 65,  46,  35,  27,  19,  10,   7,   3,   0,   4,   2,   1,  64],  // 2
];

/// Strength percentile (0-100) of a hand class.
pub fn strength_of(class: &HandClass) -> u8 {
    let high = 12 - class.rank1 as usize;
    let low = 12 - class.rank2 as usize;
    if class.suited {
        STRENGTH_GRID[high][low]
    } else {
        // Pairs sit on the diagonal, offsuit hands below it.
        STRENGTH_GRID[low][high]
    }
}

/// Strength of a hand given in canonical notation ("AKs", "72o", "TT").
///
/// Malformed notation resolves to [`STRENGTH_FLOOR`].
pub fn strength_of_name(name: &str) -> u8 {
    HandClass::parse(name)
        .map(|hc| strength_of(&hc))
        .unwrap_or(STRENGTH_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(name: &str) -> u8 {
        strength_of_name(name)
    }

    #[test]
    fn test_all_classes_in_range() {
        for class in HandClass::all() {
            assert!(strength_of(&class) <= 100, "{} out of range", class);
        }
        assert_eq!(s("AA"), 100);
    }

    #[test]
    fn test_representative_ordering() {
        assert!(s("AA") > s("AKo"));
        assert!(s("AKo") > s("72o"));
        assert!(s("KK") > s("AKs"));
        assert!(s("AKs") > s("AKo"));
        assert!(s("QQ") > s("AQo"));
    }

    #[test]
    fn test_suited_never_below_offsuit() {
        for class in HandClass::all().filter(|c| c.suited) {
            let offsuit = HandClass::new(class.rank1, class.rank2, false);
            assert!(
                strength_of(&class) >= strength_of(&offsuit),
                "{} ranks below {}",
                class,
                offsuit
            );
        }
    }

    #[test]
    fn test_pairs_beat_weaker_offsuit_of_same_high_card() {
        // A pair outranks every offsuit hand whose high card is the pair rank or lower.
        for rank in 0..13u8 {
            let pair = strength_of(&HandClass::new(rank, rank, false));
            for low in 0..rank {
                let offsuit = strength_of(&HandClass::new(rank, low, false));
                assert!(pair > offsuit, "pair rank {} vs offsuit kicker {}", rank, low);
            }
        }
    }

    #[test]
    fn test_malformed_defaults_to_floor() {
        assert_eq!(s("XYz"), STRENGTH_FLOOR);
        assert_eq!(s(""), STRENGTH_FLOOR);
        assert_eq!(s("AK"), STRENGTH_FLOOR);
    }
}
