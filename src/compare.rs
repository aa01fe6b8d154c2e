use num_traits::Float;

/// The reduced chi-square of `observed` against `expected` with per-point
/// uncertainties `sigma`, taking only points where all three are positive.
///
/// Returns `None` when the slices differ in length or no point qualifies.
pub fn reduced_chi_square<T: Float>(observed: &[T], expected: &[T], sigma: &[T]) -> Option<T> {
    if observed.len() != expected.len() || observed.len() != sigma.len() {
        return None;
    }
    let zero = T::zero();
    let (total, count) = observed
        .iter()
        .zip(expected.iter())
        .zip(sigma.iter())
        .filter(|((o, e), s)| **o > zero && **e > zero && **s > zero)
        .fold((zero, 0usize), |(total, count), ((o, e), s)| {
            let pull = (*o - *e) / *s;
            (total + pull * pull, count + 1)
        });
    if count == 0 {
        None
    } else {
        T::from(count).map(|n| total / n)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reduced_chi_square() {
        let observed = [1.0, 2.0, 3.0, 0.0];
        let expected = [1.5, 2.0, 2.0, 1.0];
        let sigma = [0.5, 1.0, 1.0, 1.0];
        let chi2 = reduced_chi_square(&observed, &expected, &sigma).unwrap();
        assert!((chi2 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_points() {
        assert_eq!(reduced_chi_square::<f64>(&[], &[], &[]), None);
        assert_eq!(reduced_chi_square(&[1.0f32], &[1.0, 2.0], &[1.0]), None);
        assert_eq!(reduced_chi_square(&[-1.0], &[1.0], &[1.0]), None);
    }
}
