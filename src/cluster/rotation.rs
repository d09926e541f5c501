//! Sticky round-robin rotation.
//!
//! One pass visits every host exactly once, starting from the host that
//! last accepted a connection.

/// Visiting order for one pass over `len` hosts starting at `start`.
#[derive(Debug, Clone)]
pub struct RotationOrder {
    start: usize,
    len: usize,
    step: usize,
}

impl RotationOrder {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len, step: 0 }
    }
}

impl Iterator for RotationOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.step >= self.len {
            return None;
        }
        let index = (self.start + self.step) % self.len;
        self.step += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RotationOrder {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps() {
        let order: Vec<usize> = RotationOrder::new(2, 4).collect();
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_rotation_visits_each_host_once() {
        for len in 1..6 {
            for start in 0..len {
                let mut order: Vec<usize> = RotationOrder::new(start, len).collect();
                assert_eq!(order.len(), len);
                assert_eq!(order[0], start);
                order.sort_unstable();
                assert_eq!(order, (0..len).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_exact_size() {
        let mut order = RotationOrder::new(1, 3);
        assert_eq!(order.len(), 3);
        order.next();
        assert_eq!(order.len(), 2);
    }
}
