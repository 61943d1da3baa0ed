// Construction options and their validation.

use skipmap::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, Error, Options, SkipMap};

#[test]
fn defaults() {
    let opts = Options::default();
    assert_eq!(opts.max_level, DEFAULT_MAX_LEVEL);
    assert_eq!(opts.probability, DEFAULT_PROBABILITY);
    assert_eq!(opts.seed, None);
    assert!(opts.validate().is_ok());

    let map: SkipMap<u8, u8> = SkipMap::new();
    assert_eq!(map.max_level(), 32);
    assert_eq!(map.probability(), 0.5);
}

#[test]
fn custom_options_are_kept() {
    let map: SkipMap<u8, u8> = SkipMap::with_options(Options {
        max_level: 12,
        probability: 0.25,
        seed: Some(7),
    })
    .unwrap();
    assert_eq!(map.max_level(), 12);
    assert_eq!(map.probability(), 0.25);
}

#[test]
fn out_of_range_max_level_is_rejected() {
    for max_level in [0, 65, 1000] {
        let result = SkipMap::<u8, u8>::with_options(Options {
            max_level,
            ..Options::default()
        });
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }
}

#[test]
fn out_of_range_probability_is_rejected() {
    for probability in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
        let opts = Options {
            probability,
            ..Options::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().starts_with("Invalid options: probability"));
    }
}

#[test]
fn comparator_with_options() {
    let map = SkipMap::with_comparator_and_options(
        |a: &i64, b: &i64| b.cmp(a),
        Options {
            max_level: 4,
            ..Options::default()
        },
    )
    .unwrap();
    for k in 0..100 {
        map.put(k, k);
    }
    assert_eq!(map.min(), Some((99, 99)));
    assert_eq!(map.max(), Some((0, 0)));
    assert_eq!(map.max_level(), 4);
}
