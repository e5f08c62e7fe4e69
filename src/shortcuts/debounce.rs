use super::Decode;
use crate::core::prelude::*;
use std::fmt;

/// Rate-limits any [`Decode`] implementation.
///
/// Bursts are tracked per output: the first output of a burst is emitted,
/// repeats of the same output arriving within `window` of the previous one
/// are dropped, and each dropped repeat extends the burst. A different output
/// always starts a new burst, so undo followed quickly by redo emits both.
/// Events the inner decoder ignores don't touch the timer. A zero window lets
/// everything through.
pub struct Debounced<D: Decode> {
    inner: D,
    window: Duration,
    last_seen: Option<(D::Output, Instant)>,
}

impl<D> Debounced<D>
where
    D: Decode,
    D::Output: PartialEq + Clone,
{
    pub fn new(inner: D, window: Duration) -> Self {
        Self {
            inner,
            window,
            last_seen: None,
        }
    }

    pub fn decode_at(&mut self, event: &D::Event, now: Instant) -> Option<D::Output> {
        let output = self.inner.decode(event)?;

        let repeated = self.last_seen.as_ref().is_some_and(|(previous, last)| {
            *previous == output && now.saturating_duration_since(*last) < self.window
        });
        self.last_seen = Some((output.clone(), now));

        if repeated {
            log::debug!("Debounced: dropped repeat within {:?}", self.window);
            return None;
        }
        Some(output)
    }

    pub fn reset(&mut self) {
        self.last_seen = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D> Decode for Debounced<D>
where
    D: Decode,
    D::Output: PartialEq + Clone,
{
    type Event = D::Event;
    type Output = D::Output;

    fn decode(&mut self, event: &Self::Event) -> Option<Self::Output> {
        self.decode_at(event, Instant::now())
    }
}

impl<D: Decode + fmt::Debug> fmt::Debug for Debounced<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("inner", &self.inner)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
