/*!

Waiting for a deleted object to disappear.

Once the API server accepts a delete request the object can linger for a while, e.g. until its
finalizers have run. [`wait_for_deletion`] polls the object until it is gone or the `WaitSpec`
timeout elapses. The delete itself has already happened by the time this runs, so a timeout does
not undo or retry it.

!*/

use crate::clients::{self, ResourceClient};
use crate::constants::MIN_POLL_INTERVAL_SECS;
use crate::{CrdExt, ResourceIdentity, WaitSpec};
use log::{debug, trace, warn};
use snafu::{ResultExt, Snafu};
use std::time::Duration;
use tokio::time::Instant;

pub type Result<T> = std::result::Result<T, Error>;

/// Deadline used when a timeout does not fit in an `Instant`. About 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "{} '{}' still exists after waiting {}s for it to be deleted",
        kind,
        identity,
        timeout.as_secs()
    ))]
    TimeoutExceeded {
        kind: String,
        identity: ResourceIdentity,
        timeout: Duration,
    },

    #[snafu(display(
        "Unable to check whether {} '{}' has been deleted: {}",
        kind,
        identity,
        source
    ))]
    Check {
        kind: String,
        identity: ResourceIdentity,
        source: clients::Error,
    },
}

/// What the poller observed when it stopped without an error.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WaitOutcome {
    /// The object is gone.
    Deleted,
    /// The object still existed. Only returned when the timeout is zero, since a single check was
    /// requested and no waiting happens.
    StillPresent,
}

/// Poll `client` until the object `id` no longer exists.
///
/// - A zero timeout performs exactly one check and returns what it saw.
/// - Otherwise the object is checked every `poll_interval_seconds` until it is gone, or until the
///   timeout has elapsed, in which case `Error::TimeoutExceeded` is returned. The last sleep is
///   shortened so that no check happens after the deadline.
/// - A zero poll interval is raised to one second.
/// - Any error from `get` other than not-found ends the wait with `Error::Check`.
pub async fn wait_for_deletion<C>(
    client: &C,
    id: &ResourceIdentity,
    wait: &WaitSpec,
) -> Result<WaitOutcome>
where
    C: ResourceClient,
    C::Object: CrdExt,
{
    if wait.timeout_seconds == 0 {
        let outcome = check(client, id).await?;
        debug!(
            "not waiting for {} '{}' to be deleted, observed {:?}",
            client.kind(),
            id,
            outcome
        );
        return Ok(outcome);
    }

    let min_poll_interval = Duration::from_secs(MIN_POLL_INTERVAL_SECS);
    let poll_interval = if wait.poll_interval() < min_poll_interval {
        warn!(
            "poll interval of {}s is too short, polling every {}s instead",
            wait.poll_interval_seconds, MIN_POLL_INTERVAL_SECS
        );
        min_poll_interval
    } else {
        wait.poll_interval()
    };

    let start = Instant::now();
    let deadline = match start.checked_add(wait.timeout()) {
        Some(deadline) => deadline,
        None => {
            warn!(
                "timeout of {}s is too long, waiting at most {}s instead",
                wait.timeout_seconds,
                FAR_FUTURE.as_secs()
            );
            start + FAR_FUTURE
        }
    };
    debug!(
        "waiting up to {}s for {} '{}' to be deleted",
        wait.timeout_seconds,
        client.kind(),
        id
    );
    loop {
        if check(client, id).await? == WaitOutcome::Deleted {
            debug!(
                "{} '{}' was deleted after {:?}",
                client.kind(),
                id,
                start.elapsed()
            );
            return Ok(WaitOutcome::Deleted);
        }
        let now = Instant::now();
        if now >= deadline {
            return TimeoutExceededSnafu {
                kind: client.kind(),
                identity: id.clone(),
                timeout: wait.timeout(),
            }
            .fail();
        }
        let next_check = now
            .checked_add(poll_interval)
            .map_or(deadline, |next| next.min(deadline));
        tokio::time::sleep_until(next_check).await;
    }
}

async fn check<C>(client: &C, id: &ResourceIdentity) -> Result<WaitOutcome>
where
    C: ResourceClient,
    C::Object: CrdExt,
{
    let object = client.get(id).await.context(CheckSnafu {
        kind: client.kind(),
        identity: id.clone(),
    })?;
    match object {
        None => Ok(WaitOutcome::Deleted),
        Some(object) => {
            if object.is_delete_requested() && object.has_finalizers() {
                trace!(
                    "{} '{}' is terminating and waiting on finalizers",
                    client.kind(),
                    id
                );
            }
            Ok(WaitOutcome::StillPresent)
        }
    }
}
