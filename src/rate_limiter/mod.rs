use log::debug;
use std::time::Duration;
use tokio::time::sleep;

/// Paces sequential page requests so the ranking site is not hammered.
///
/// The first page goes out immediately; every later page waits `delay`.
pub struct PageDelay {
    delay: Duration,
    pages_started: usize,
}

impl PageDelay {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pages_started: 0,
        }
    }

    pub async fn before_page(&mut self) {
        if self.should_wait() {
            debug!("Waiting {:?} before next page", self.delay);
            sleep(self.delay).await;
        }
        self.pages_started += 1;
    }

    pub fn pages_started(&self) -> usize {
        self.pages_started
    }

    fn should_wait(&self) -> bool {
        self.pages_started > 0 && !self.delay.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn first_page_is_not_delayed() {
        let mut delay = PageDelay::new(Duration::from_secs(60));
        let started = Instant::now();
        delay.before_page().await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(delay.pages_started(), 1);
    }

    #[tokio::test]
    async fn later_pages_wait_for_delay() {
        let mut delay = PageDelay::new(Duration::from_millis(30));
        delay.before_page().await;

        let started = Instant::now();
        delay.before_page().await;

        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(delay.pages_started(), 2);
    }
}
