use std::future::Future;

use futures::future::join_all;

/// Run `task` for every input concurrently and wait for the whole batch.
///
/// Results come back in submission order, not completion order. There is
/// no cap on in-flight tasks: a batch of N inputs issues N requests at once.
pub async fn fan_out<I, T, F, Fut>(inputs: I, task: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    join_all(inputs.into_iter().map(task)).await
}
