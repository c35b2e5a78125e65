//! Optimistic local mutations confirmed by a remote call.

use std::future::Future;

/// Pre-mutation copy of some state, restorable verbatim.
#[derive(Clone, Debug)]
pub struct Snapshot<S>(S);

impl<S: Clone> Snapshot<S> {
    /// Takes a new [`Snapshot`] of the provided `state`.
    #[must_use]
    pub fn take(state: &S) -> Self {
        Self(state.clone())
    }

    /// Restores the provided `state` to this [`Snapshot`].
    pub fn restore(self, state: &mut S) {
        *state = self.0;
    }
}

/// Applies the `mutate` function to the `state` right away, then confirms the
/// mutated state with the `remote` call.
///
/// # Errors
///
/// If the `remote` call fails, in which case the `state` is restored to what
/// it was before the `mutate` function ran.
pub async fn attempt<S, T, E, Fut>(
    state: &mut S,
    mutate: impl FnOnce(&mut S),
    remote: impl FnOnce(S) -> Fut,
) -> Result<T, E>
where
    S: Clone,
    Fut: Future<Output = Result<T, E>>,
{
    let snapshot = Snapshot::take(state);
    mutate(state);
    match remote(state.clone()).await {
        Ok(ok) => Ok(ok),
        Err(e) => {
            snapshot.restore(state);
            Err(e)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::attempt;

    #[tokio::test]
    async fn keeps_mutation_on_success() {
        let mut state = vec![1, 2];

        let res: Result<usize, ()> = attempt(
            &mut state,
            |s| s.push(3),
            |s| async move { Ok(s.len()) },
        )
        .await;

        assert_eq!(res, Ok(3));
        assert_eq!(state, [1, 2, 3]);
    }

    #[tokio::test]
    async fn restores_snapshot_on_failure() {
        let mut state = vec![1, 2];

        let res: Result<(), &str> = attempt(
            &mut state,
            |s| {
                s.clear();
                s.push(42);
            },
            |s| async move {
                assert_eq!(s, [42]);
                Err("refused")
            },
        )
        .await;

        assert_eq!(res, Err("refused"));
        assert_eq!(state, [1, 2]);
    }
}
