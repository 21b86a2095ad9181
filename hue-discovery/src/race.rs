//! First-arrival racing of discovery strategies.

use std::future::Future;
use std::time::Duration;

use crate::error::{DiscoveryError, Result};
use crate::portal::PortalClient;
use crate::{upnp, BridgeDescriptor};

/// Run both discovery strategies and report whichever settles first.
///
/// Neither strategy is reliably faster or more dependable than the other,
/// so both start together and the first to finish wins. The first outcome
/// counts whether it is a success or a failure; the loser is dropped
/// unobserved. A losing failure therefore never surfaces, and a failing
/// race wraps the first-arriving error in `AllDiscoveryFailed`.
// TODO: honor a HUE_HOST override and skip discovery entirely when it is set
pub(crate) async fn discover(timeout: Duration) -> Result<BridgeDescriptor> {
    first_arrival(
        upnp::discover(timeout),
        PortalClient::new(timeout).discover(),
    )
    .await
    .map_err(all_failed)
}

/// Resolve two attempts to whichever completes first.
///
/// The losing future is dropped, which closes any socket it holds. This is
/// first-arrival, not first-success: a fast failure pre-empts a slower
/// would-be success.
async fn first_arrival<T, A, B>(a: A, b: B) -> T
where
    A: Future<Output = T>,
    B: Future<Output = T>,
{
    tokio::select! {
        outcome = a => outcome,
        outcome = b => outcome,
    }
}

fn all_failed(first: DiscoveryError) -> DiscoveryError {
    DiscoveryError::AllDiscoveryFailed(Box::new(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test(start_paused = true)]
    async fn test_first_success_wins() {
        let fast = async {
            time::sleep(Duration::from_millis(10)).await;
            Ok::<&str, DiscoveryError>("fast")
        };
        let slow = async {
            time::sleep(Duration::from_millis(50)).await;
            Ok("slow")
        };

        let outcome = first_arrival(fast, slow).await;
        assert_eq!(outcome.unwrap(), "fast");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_failure_preempts_slow_success() {
        let failing = async {
            time::sleep(Duration::from_millis(10)).await;
            Err::<&str, DiscoveryError>(DiscoveryError::NoBridgesFound)
        };
        let succeeding = async {
            time::sleep(Duration::from_millis(50)).await;
            Ok("bridge")
        };

        let outcome = first_arrival(failing, succeeding).await;
        assert!(matches!(outcome, Err(DiscoveryError::NoBridgesFound)));
    }

    #[tokio::test]
    async fn test_immediate_outcomes_resolve() {
        let outcome = first_arrival(async { 1 }, async { 2 }).await;
        assert!(outcome == 1 || outcome == 2);
    }

    #[test]
    fn test_all_failed_preserves_the_first_error() {
        let wrapped = all_failed(DiscoveryError::Timeout);

        match wrapped {
            DiscoveryError::AllDiscoveryFailed(source) => {
                assert!(matches!(*source, DiscoveryError::Timeout));
            }
            other => panic!("Expected AllDiscoveryFailed, got {:?}", other),
        }
    }
}
