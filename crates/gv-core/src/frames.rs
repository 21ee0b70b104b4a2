//! Frame-indexed element collections.

/// A collection of values indexed by a float frame key (time, pressure
/// level, ensemble member, ...). Frames keep insertion order; the plot
/// layer only relies on [`FrameSequence::last`].
#[derive(Debug, Clone)]
pub struct FrameSequence<T> {
    frames: Vec<(f64, T)>,
}

impl<T> Default for FrameSequence<T> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<T> FrameSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: f64, value: T) {
        self.frames.push((key, value));
    }

    /// The most recently inserted frame.
    pub fn last(&self) -> Option<&T> {
        self.frames.last().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> {
        self.frames.iter().map(|(k, v)| (*k, v))
    }
}

impl<T> FromIterator<(f64, T)> for FrameSequence<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_returns_most_recent_frame() {
        let mut frames = FrameSequence::new();
        assert!(frames.last().is_none());
        frames.push(0.0, "a");
        frames.push(1.0, "b");
        assert_eq!(frames.last(), Some(&"b"));
        assert_eq!(frames.len(), 2);
    }
}
