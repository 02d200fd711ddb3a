use log::debug;
use rand::seq::SliceRandom;

use crate::config::RespondentOrder;

/// The order in which respondents are visited.
///
/// Every index in `0..count` appears exactly once.
pub fn respondent_order(count: usize, order: RespondentOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).collect();
    match order {
        RespondentOrder::Forward => {}
        RespondentOrder::Reverse => indices.reverse(),
        RespondentOrder::Random(Some(seed)) => {
            indices = permutation_crypto(count, seed);
        }
        RespondentOrder::Random(None) => {
            let mut rng = rand::thread_rng();
            indices.shuffle(&mut rng);
        }
    }
    debug!("respondent_order: {:?} -> {:?}", order, indices);
    indices
}

/// A permutation that is hard to guess in advance but fully determined by the seed.
/// The indices are sorted by the SHA-256 digest of the seed and the index.
fn permutation_crypto(count: usize, seed: u32) -> Vec<usize> {
    let mut data: Vec<(usize, String)> = (0..count)
        .map(|idx| {
            let key = format!("{:08}{:08}", seed, idx);
            (idx, sha256::digest(key.as_str()))
        })
        .collect();
    data.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    data.iter().map(|p| p.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(v: &[usize], count: usize) -> bool {
        let mut sorted = v.to_vec();
        sorted.sort_unstable();
        sorted == (0..count).collect::<Vec<usize>>()
    }

    #[test]
    fn forward_and_reverse() {
        assert_eq!(respondent_order(4, RespondentOrder::Forward), vec![0, 1, 2, 3]);
        assert_eq!(respondent_order(4, RespondentOrder::Reverse), vec![3, 2, 1, 0]);
        assert!(respondent_order(0, RespondentOrder::Reverse).is_empty());
    }

    #[test]
    fn random_is_permutation() {
        for count in [0, 1, 2, 17, 100] {
            let v = respondent_order(count, RespondentOrder::Random(None));
            assert!(is_permutation(&v, count));
        }
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = respondent_order(50, RespondentOrder::Random(Some(42)));
        let b = respondent_order(50, RespondentOrder::Random(Some(42)));
        assert_eq!(a, b);
        assert!(is_permutation(&a, 50));
        let c = respondent_order(50, RespondentOrder::Random(Some(43)));
        assert!(is_permutation(&c, 50));
        assert_ne!(a, c);
    }
}
