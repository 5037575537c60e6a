//! Pending-learn context: the element the user last pointed at.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use formfill_protocols::ElementId;

/// Default lifetime of a capture before it is considered stale.
pub const DEFAULT_CAPTURE_TTL: Duration = Duration::from_secs(30);

/// Holds at most one captured element for a single pending learn request.
///
/// A capture is consumed by [`take`](Self::take) and expires after `ttl`.
pub struct TargetCapture {
    ttl: Duration,
    pending: Mutex<Option<(ElementId, Instant)>>,
}

impl TargetCapture {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Mutex::new(None),
        }
    }

    /// Record `element` as the current target, replacing any earlier one.
    pub fn capture(&self, element: ElementId) {
        *self.pending.lock() = Some((element, Instant::now()));
    }

    /// Consume the captured element if it is still fresh.
    pub fn take(&self) -> Option<ElementId> {
        let (element, captured_at) = self.pending.lock().take()?;
        if captured_at.elapsed() > self.ttl {
            debug!("Discarding stale capture of {}", element);
            return None;
        }
        Some(element)
    }

    pub fn clear(&self) {
        self.pending.lock().take();
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }
}

impl Default for TargetCapture {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_capture() {
        let capture = TargetCapture::default();
        capture.capture(ElementId(3));
        assert!(capture.has_pending());
        assert_eq!(capture.take(), Some(ElementId(3)));
        assert_eq!(capture.take(), None);
    }

    #[test]
    fn test_latest_capture_wins() {
        let capture = TargetCapture::default();
        capture.capture(ElementId(1));
        capture.capture(ElementId(2));
        assert_eq!(capture.take(), Some(ElementId(2)));
    }

    #[test]
    fn test_stale_capture_is_discarded() {
        let capture = TargetCapture::new(Duration::from_millis(1));
        capture.capture(ElementId(1));
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(capture.take(), None);
        assert!(!capture.has_pending());
    }

    #[test]
    fn test_clear() {
        let capture = TargetCapture::default();
        capture.capture(ElementId(1));
        capture.clear();
        assert_eq!(capture.take(), None);
    }
}
