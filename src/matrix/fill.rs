use rand::Rng;

use super::storage::Matrix;

/// Fill `matrix` then `vector` with independent samples from [0, 1).
///
/// The random source is passed in, so a seeded `StdRng` gives
/// reproducible inputs and every rank of a group can draw the same data.
///
/// # Panics
///
/// Panics if `vector.len() != matrix.cols()`.
pub fn fill_random<R: Rng>(matrix: &mut Matrix, vector: &mut [f64], rng: &mut R) {
    assert_eq!(
        vector.len(),
        matrix.cols(),
        "vector: expected {} elements",
        matrix.cols()
    );

    for x in matrix.as_mut_slice() {
        *x = rng.random::<f64>();
    }
    for x in vector.iter_mut() {
        *x = rng.random::<f64>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_values_in_unit_interval() {
        let mut m = Matrix::zeros(16, 16).unwrap();
        let mut v = vec![0.0; 16];
        fill_random(&mut m, &mut v, &mut StdRng::seed_from_u64(7));
        assert!(m.as_slice().iter().chain(&v).all(|&x| (0.0..1.0).contains(&x)));
    }

    #[test]
    fn test_same_seed_same_data() {
        let mut a = Matrix::zeros(4, 5).unwrap();
        let mut b = Matrix::zeros(4, 5).unwrap();
        let (mut va, mut vb) = (vec![0.0; 5], vec![0.0; 5]);
        fill_random(&mut a, &mut va, &mut StdRng::seed_from_u64(42));
        fill_random(&mut b, &mut vb, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(va, vb);
    }
}
