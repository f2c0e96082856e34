/// Finds the index of the last element in an ascending slice which is less than or equal to the
/// test value. Values before the second element return 0 and values at or beyond the last
/// element return the last index, so the result is always a valid index into a non-empty slice.
pub fn preceding_index_search<N: PartialOrd + Copy>(slice: &[N], test_value: N) -> usize {
    if slice.len() <= 1 || slice[1] > test_value {
        return 0;
    }

    let mut a = 1;
    let mut b = slice.len() - 1;
    if slice[b] <= test_value {
        return b;
    }

    while b > a + 1 {
        let check = (a + b) / 2;
        if test_value >= slice[check] {
            a = check;
        } else {
            b = check;
        }
    }
    a
}

/// Finds the index of the interval `[slice[i], slice[i + 1]]` which should be used to evaluate
/// a piecewise function at the test value. Values outside the slice map to the first or last
/// interval. The slice must have at least two elements.
pub fn segment_index(slice: &[f64], test_value: f64) -> usize {
    preceding_index_search(slice, test_value).min(slice.len().saturating_sub(2))
}

/// Generates `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use test_case::test_case;

    fn naive(slice: &[f64], test_value: f64) -> usize {
        if slice.len() <= 1 || slice[1] > test_value {
            return 0;
        }

        if slice[slice.len() - 1] <= test_value {
            return slice.len() - 1;
        }

        for (i, v) in slice.iter().skip(1).enumerate() {
            if *v > test_value {
                return i;
            }
        }

        slice.len() - 1
    }

    #[test_case(0, -1.0)]
    #[test_case(0, 0.05)]
    #[test_case(1, 0.1)]
    #[test_case(2, 0.25)]
    #[test_case(4, 0.5)]
    fn test_naive_search(e: usize, v: f64) {
        let test = [0.0, 0.1, 0.2, 0.3, 0.4];
        assert_eq!(e, naive(&test, v));
    }

    #[test_case(0, -1.0)]
    #[test_case(0, 0.05)]
    #[test_case(1, 0.1)]
    #[test_case(2, 0.25)]
    #[test_case(4, 0.5)]
    fn test_simple_binary_search(e: usize, v: f64) {
        let test = [0.0, 0.1, 0.2, 0.3, 0.4];
        assert_eq!(e, preceding_index_search(&test, v));
    }

    #[test_case(0, -1.0)]
    #[test_case(1, 0.1)]
    #[test_case(3, 0.4)]
    #[test_case(3, 2.0)]
    fn test_segment_index(e: usize, v: f64) {
        let test = [0.0, 0.1, 0.2, 0.3, 0.4];
        assert_eq!(e, segment_index(&test, v));
    }

    #[test]
    fn test_binary_search_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let count: usize = rng.gen_range(2..200);
            let mut values: Vec<f64> = (0..count).map(|_| rng.gen_range(-10.0..10.0)).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());

            for _ in 0..100 {
                let test = rng.gen_range(-11.0..11.0);
                let r0 = naive(&values, test);
                let r1 = preceding_index_search(&values, test);
                assert_eq!(r0, r1);
            }
        }
    }

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(0.0, 10.0, 3);
        assert_eq!(vec![0.0, 5.0, 10.0], values);
    }

    #[test]
    fn test_linspace_spacing() {
        let values = linspace(1.0, 2.0, 11);
        assert_eq!(11, values.len());
        for (i, v) in values.iter().enumerate() {
            assert_relative_eq!(1.0 + 0.1 * i as f64, *v, epsilon = 1e-12);
        }
    }

    #[test_case(0, 0)]
    #[test_case(1, 1)]
    fn test_linspace_degenerate(count: usize, e: usize) {
        assert_eq!(e, linspace(0.0, 1.0, count).len());
    }
}
