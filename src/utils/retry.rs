//! 선형 백오프 재시도
//!
//! n번째 재시도 전에 `n * delay`만큼 기다립니다. 재시도 여부는 호출자가
//! 에러를 보고 판단합니다 (예: 4xx 응답은 재시도하지 않음).

use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 최초 시도 이후 재시도 횟수
    pub retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// `attempt`번째(1부터) 재시도 전 대기 시간
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt)
    }
}

/// `operation`을 실행하고, `should_retry`가 참인 에러에 한해 재시도합니다.
///
/// 재시도를 모두 소진하거나 재시도 불가능한 에러가 나면 마지막 에러를 반환합니다.
pub async fn with_linear_retry<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: FnMut(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= policy.retries || !should_retry(&error) {
                    return Err(error);
                }

                attempt += 1;
                let delay = policy.backoff(attempt);
                log::warn!(
                    "Retry attempt {}/{} in {:?}: {}",
                    attempt,
                    policy.retries,
                    delay,
                    error
                );
                actix_web::rt::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::from_millis(1))
    }

    #[test]
    fn test_backoff_is_linear() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));

        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff(2), Duration::from_millis(2000));
        assert_eq!(policy.backoff(3), Duration::from_millis(3000));
    }

    #[actix_web::test]
    async fn test_success_after_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result = with_linear_retry(&fast_policy(3), |_: &String| true, move || {
            let count = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if count < 2 {
                    Err("temporary".to_string())
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[actix_web::test]
    async fn test_gives_up_after_configured_retries() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result: Result<(), String> = with_linear_retry(&fast_policy(3), |_| true, move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("down".to_string()) }
        })
        .await;

        assert_eq!(result, Err("down".to_string()));
        // 최초 시도 1회 + 재시도 3회
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[actix_web::test]
    async fn test_non_retryable_error_stops_immediately() {
        let counter = Arc::new(AtomicU32::new(0));
        let calls = counter.clone();

        let result: Result<(), String> = with_linear_retry(
            &fast_policy(3),
            |error: &String| error != "bad request",
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("bad request".to_string()) }
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
