//! 무작위 시행 기반 베이즈 스코어링
//!
//! 시행마다 균등 분포에서 시작해 섞인 순서로 모든 n-gram의 언어별 확률을 곱하고,
//! 시행 결과를 평균합니다. 본 적 없는 n-gram의 하한값에는 시행마다 정규분포 잡음이 더해집니다.

use rand::seq::SliceRandom;
use rand::Rng;

use super::config::DetectorConfig;

/// 하한값 분모 (하한 = alpha / BASE_FREQUENCY)
const BASE_FREQUENCY: f64 = 10_000.0;

/// 이 개수의 n-gram을 곱할 때마다 정규화
///
/// 정규화 직후 최댓값은 1/언어수 이상이고 한 번 곱할 때 최소 하한값만큼 줄어드므로
/// 이 간격 안에서는 언더플로가 생기지 않습니다.
const RENORMALIZE_INTERVAL: usize = 5;

/// 잡음이 더해진 alpha의 최솟값 (floor_alpha 대비 비율)
const MIN_ALPHA_RATIO: f64 = 0.1;

/// 시행 결과
#[derive(Debug, Clone)]
pub(crate) struct TrialOutcome {
    /// 언어별 평균 확률 (합 1)
    pub probabilities: Vec<f64>,
    /// 수행한 시행 수
    pub trials: usize,
}

/// 시행 반복
///
/// `features[j][i]`는 j번째 n-gram의 i번째 언어 확률입니다.
/// `min_trials` 이후 선두 언어의 평균 확률 변화가 `convergence_threshold`보다 작아지면 멈춥니다.
pub(crate) fn run_trials<R: Rng + ?Sized>(
    features: &[&[f64]],
    languages: usize,
    config: &DetectorConfig,
    rng: &mut R,
) -> TrialOutcome {
    let mut sum = vec![0.0; languages];
    let mut average = vec![0.0; languages];
    let mut previous = vec![0.0; languages];
    let mut order: Vec<usize> = (0..features.len()).collect();
    let mut trials = 0;

    for trial in 1..=config.max_trials {
        order.shuffle(rng);
        let floor = trial_floor(config, rng);
        let probabilities = fold_features(features, &order, languages, floor);

        previous.copy_from_slice(&average);
        for ((avg, total), p) in average.iter_mut().zip(sum.iter_mut()).zip(&probabilities) {
            *total += p;
            *avg = *total / trial as f64;
        }
        trials = trial;

        if trial >= config.min_trials.max(2) {
            let leader = leader_index(&average);
            if (average[leader] - previous[leader]).abs() < config.convergence_threshold {
                break;
            }
        }
    }

    TrialOutcome {
        probabilities: average,
        trials,
    }
}

/// 시행 하나: 균등 분포에서 시작해 `order` 순서로 n-gram 확률을 곱함
fn fold_features(features: &[&[f64]], order: &[usize], languages: usize, floor: f64) -> Vec<f64> {
    let mut probabilities = vec![1.0 / languages as f64; languages];

    for (step, &j) in order.iter().enumerate() {
        // 본 적 없는 언어(0.0)도 하한값이 남아 한 번의 누락으로 0이 되지 않음
        for (p, &q) in probabilities.iter_mut().zip(features[j]) {
            *p *= q + floor;
        }
        if (step + 1) % RENORMALIZE_INTERVAL == 0 {
            normalize(&mut probabilities);
        }
    }

    normalize(&mut probabilities);
    probabilities
}

/// 합이 1이 되도록 정규화 (합이 0이거나 유한하지 않으면 균등 분포)
fn normalize(probabilities: &mut [f64]) {
    let sum: f64 = probabilities.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        for p in probabilities.iter_mut() {
            *p /= sum;
        }
    } else {
        let uniform = 1.0 / probabilities.len() as f64;
        probabilities.fill(uniform);
    }
}

/// 시행별 하한값: (floor_alpha + N(0,1) * floor_alpha_width) / BASE_FREQUENCY
fn trial_floor<R: Rng + ?Sized>(config: &DetectorConfig, rng: &mut R) -> f64 {
    let alpha = config.floor_alpha + standard_normal(rng) * config.floor_alpha_width;
    alpha.max(config.floor_alpha * MIN_ALPHA_RATIO) / BASE_FREQUENCY
}

/// 표준 정규분포 표본 (Box-Muller)
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // (0, 1] 범위로 ln(0) 방지
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// 최댓값 인덱스 (같으면 앞쪽)
pub(crate) fn leader_index(probabilities: &[f64]) -> usize {
    let mut leader = 0;
    for (i, &p) in probabilities.iter().enumerate().skip(1) {
        if p > probabilities[leader] {
            leader = i;
        }
    }
    leader
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fold_sums_to_one() {
        let a = [0.5, 0.1];
        let b = [0.2, 0.3];
        let features: Vec<&[f64]> = vec![&a[..], &b[..]];
        let probabilities = fold_features(&features, &[0, 1], 2, 0.0);

        // (0.5*0.2) : (0.1*0.3) = 0.1 : 0.03
        assert!(close(probabilities[0], 0.1 / 0.13));
        assert!(close(probabilities.iter().sum::<f64>(), 1.0));
    }

    #[test]
    fn test_fold_order_independent() {
        let a = [0.5, 0.1, 0.0];
        let b = [0.2, 0.3, 0.1];
        let c = [0.0, 0.4, 0.2];
        let features: Vec<&[f64]> = vec![&a[..], &b[..], &c[..]];

        let forward = fold_features(&features, &[0, 1, 2], 3, 5e-5);
        let backward = fold_features(&features, &[2, 1, 0], 3, 5e-5);
        for (x, y) in forward.iter().zip(&backward) {
            assert!(close(*x, *y));
        }
    }

    #[test]
    fn test_floor_prevents_zero() {
        let a = [0.5, 0.0];
        let features: Vec<&[f64]> = vec![&a[..]];
        let probabilities = fold_features(&features, &[0], 2, 5e-5);
        assert!(probabilities[1] > 0.0);
        assert!(probabilities[0] > probabilities[1]);
    }

    #[test]
    fn test_no_underflow_on_long_input() {
        // 작은 확률을 수천 번 곱해도 0이나 NaN이 되지 않아야 함
        let a = [1e-4, 2e-4];
        let features: Vec<&[f64]> = vec![&a[..]; 5000];
        let order: Vec<usize> = (0..features.len()).collect();
        let probabilities = fold_features(&features, &order, 2, 5e-5);

        assert!(probabilities.iter().all(|p| p.is_finite()));
        assert!(close(probabilities.iter().sum::<f64>(), 1.0));
        assert!(probabilities[1] > 0.99);
    }

    #[test]
    fn test_run_trials_converges_early() {
        let a = [0.9, 0.01];
        let features: Vec<&[f64]> = vec![&a[..]; 10];
        let config = DetectorConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let outcome = run_trials(&features, 2, &config, &mut rng);
        assert!(outcome.trials >= config.min_trials);
        assert!(outcome.trials < config.max_trials);
        assert!(outcome.probabilities[0] > 0.99);
    }

    #[test]
    fn test_run_trials_respects_max() {
        let a = [0.3, 0.2];
        let features: Vec<&[f64]> = vec![&a[..]];
        // 수렴 임계값 0이면 끝까지 수행
        let config = DetectorConfig::new()
            .with_trials(1, 25)
            .with_convergence_threshold(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = run_trials(&features, 2, &config, &mut rng);
        assert_eq!(outcome.trials, 25);
    }

    #[test]
    fn test_run_trials_deterministic() {
        let a = [0.3, 0.2, 0.1];
        let b = [0.0, 0.2, 0.4];
        let features: Vec<&[f64]> = vec![&a[..], &b[..], &a[..]];
        let config = DetectorConfig::default();

        let first = run_trials(&features, 3, &config, &mut ChaCha8Rng::seed_from_u64(99));
        let second = run_trials(&features, 3, &config, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(first.probabilities, second.probabilities);
        assert_eq!(first.trials, second.trials);
    }

    #[test]
    fn test_trial_floor_positive() {
        let config = DetectorConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let floor = trial_floor(&config, &mut rng);
            assert!(floor > 0.0);
            assert!(floor < 1e-3);
        }
    }

    #[test]
    fn test_leader_index() {
        assert_eq!(leader_index(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(leader_index(&[0.5, 0.5]), 0);
        assert_eq!(leader_index(&[1.0]), 0);
    }
}
