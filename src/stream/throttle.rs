//! Rate limiting for frame streams

use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::Duration;

use futures::Stream;
use pin_project_lite::pin_project;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Adds [`throttle`](ThrottleExt::throttle) to every [`Stream`].
pub trait ThrottleExt: Stream {
    /// Cap the stream at one item per `period`, keeping only the newest.
    ///
    /// Items that arrive between emissions overwrite each other, so the
    /// consumer always gets the latest one. A period with no items emits
    /// nothing; the stream ends only when the source does.
    fn throttle(self, period: Duration) -> Throttle<Self>
    where
        Self: Sized,
    {
        Throttle::new(self, period)
    }
}

impl<S: Stream> ThrottleExt for S {}

pin_project! {
    /// Latest-wins rate limiter over an inner stream.
    pub struct Throttle<S: Stream> {
        #[pin]
        source: S,
        ticker: Interval,
        latest: Option<S::Item>,
    }
}

impl<S: Stream> Throttle<S> {
    pub fn new(source: S, period: Duration) -> Self {
        let mut ticker = time::interval(period);
        // A stalled consumer is not paid back with a burst of stale frames
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { source, ticker, latest: None }
    }
}

impl<S: Stream> Stream for Throttle<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        ready!(this.ticker.poll_tick(cx));

        // Take everything the source has ready, remembering only the newest
        while let Poll::Ready(next) = this.source.as_mut().poll_next(cx) {
            match next {
                Some(item) => *this.latest = Some(item),
                // Source is done; hand over whatever is held, then end
                None => return Poll::Ready(this.latest.take()),
            }
        }

        match this.latest.take() {
            Some(item) => Poll::Ready(Some(item)),
            // Quiet period. Keep waiting instead of ending the stream; the
            // next item from the source wakes this task again.
            None => Poll::Pending,
        }
    }
}
