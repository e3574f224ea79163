//! Shared LIFO work stack drained by a scoped thread pool.
//!
//! Workers pop an item, may push follow-up items, and exit once the stack is
//! empty *and* no other worker is still processing an item that could push
//! more. Each popped item is tracked by a [`Ticket`]; dropping the ticket
//! (normally or while unwinding) publishes its pushes and wakes waiters.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

struct StackState<W> {
    pending: Vec<W>,
    in_flight: usize,
}

pub(crate) struct WorkStack<W> {
    state: Mutex<StackState<W>>,
    ready: Condvar,
}

impl<W> WorkStack<W> {
    pub(crate) fn new(seed: Vec<W>) -> Self {
        Self {
            state: Mutex::new(StackState {
                pending: seed,
                in_flight: 0,
            }),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StackState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until an item is available or all work is done.
    fn pop(&self) -> Option<(W, Ticket<'_, W>)> {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.pending.pop() {
                state.in_flight += 1;
                let ticket = Ticket {
                    stack: self,
                    produced: Vec::new(),
                };
                return Some((item, ticket));
            }
            if state.in_flight == 0 {
                return None;
            }
            state = self.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Marks one popped item as in flight until dropped.
pub(crate) struct Ticket<'a, W> {
    stack: &'a WorkStack<W>,
    produced: Vec<W>,
}

impl<W> Ticket<'_, W> {
    pub(crate) fn push(&mut self, item: W) {
        self.produced.push(item);
    }
}

impl<W> Drop for Ticket<'_, W> {
    fn drop(&mut self) {
        let mut state = self.stack.lock();
        state.in_flight -= 1;
        state.pending.append(&mut self.produced);
        drop(state);
        self.stack.ready.notify_all();
    }
}

/// Runs `work` on `workers` scoped threads until `stack` is exhausted.
///
/// Each worker owns a local accumulator created by `init`; the accumulators
/// are returned in worker order. A panicking worker is re-raised here after
/// the remaining workers finish.
pub(crate) fn drain<W, L, I, F>(stack: &WorkStack<W>, workers: usize, init: I, work: F) -> Vec<L>
where
    W: Send,
    L: Send,
    I: Fn() -> L + Sync,
    F: Fn(W, &mut Ticket<'_, W>, &mut L) + Sync,
{
    let workers = workers.max(1);

    thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let init = &init;
                let work = &work;

                s.spawn(move || {
                    let mut local = init();
                    while let Some((item, mut ticket)) = stack.pop() {
                        work(item, &mut ticket, &mut local);
                    }
                    local
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(local) => local,
                Err(e) => std::panic::resume_unwind(e),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_seed_and_pushed_items() {
        // Each n > 0 pushes n - 1: seeding with 10 visits 10 + 9 + ... + 0.
        let stack = WorkStack::new(vec![10u32]);
        let locals = drain(&stack, 4, Vec::new, |n, ticket, seen: &mut Vec<u32>| {
            seen.push(n);
            if n > 0 {
                ticket.push(n - 1);
            }
        });
        assert_eq!(locals.len(), 4);
        let mut all: Vec<u32> = locals.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_tree_fan_out() {
        // Binary fan-out to depth 6 yields 2^7 - 1 items.
        let stack = WorkStack::new(vec![0usize]);
        let counts = drain(&stack, 3, || 0usize, |depth, ticket, count| {
            *count += 1;
            if depth < 6 {
                ticket.push(depth + 1);
                ticket.push(depth + 1);
            }
        });
        assert_eq!(counts.iter().sum::<usize>(), 127);
    }

    #[test]
    fn test_empty_stack_returns_immediately() {
        let stack: WorkStack<u8> = WorkStack::new(Vec::new());
        let locals = drain(&stack, 2, || 0u8, |_, _, _| unreachable!());
        assert_eq!(locals, vec![0, 0]);
    }

    #[test]
    fn test_zero_workers_runs_one() {
        let stack = WorkStack::new(vec![1, 2, 3]);
        let sums = drain(&stack, 0, || 0, |n, _, sum| *sum += n);
        assert_eq!(sums, vec![6]);
    }

    #[test]
    #[should_panic(expected = "worker failed")]
    fn test_worker_panic_is_resumed() {
        let stack = WorkStack::new(vec![1, 2, 3, 4]);
        drain(&stack, 2, || (), |n, _, _| {
            if n == 3 {
                panic!("worker failed");
            }
        });
    }
}
