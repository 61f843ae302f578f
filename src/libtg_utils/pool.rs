// Copyright 2019 The Tengen Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// A thread-safe FIFO with a blocking dequeue.
struct SafeQueue<T> {
    queue: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    is_empty: Condvar
}

impl<T> SafeQueue<T> {
    fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
            is_empty: Condvar::new()
        }
    }

    fn enqueue(&self, value: T) {
        let mut queue = self.queue.lock().expect("could not acquire lock");

        queue.push_back(value);
        self.not_empty.notify_one();
    }

    /// Removes and returns the front element, blocking while the queue is
    /// empty.
    fn dequeue(&self) -> T {
        let mut queue = self.queue.lock().expect("could not acquire lock");

        while queue.is_empty() {
            queue = self.not_empty.wait(queue).expect("could not acquire lock");
        }

        let value = queue.pop_front().expect("queue is empty");

        if queue.is_empty() {
            self.is_empty.notify_all();
        }

        value
    }

    /// Blocks the calling thread until the queue is empty.
    fn wait_until_empty(&self) {
        let mut queue = self.queue.lock().expect("could not acquire lock");

        while !queue.is_empty() {
            queue = self.is_empty.wait(queue).expect("could not acquire lock");
        }
    }
}

/// A fixed-size pool of worker threads sharing one blocking task queue.
///
/// Dropping the pool enqueues one shutdown sentinel per worker and joins
/// them, so every task scheduled before the drop is run to completion.
pub struct ThreadPool {
    queue: Arc<SafeQueue<Option<Task>>>,
    handles: Vec<JoinHandle<()>>
}

impl ThreadPool {
    pub fn new(num_threads: usize) -> Self {
        assert!(num_threads > 0);

        let queue = Arc::new(SafeQueue::new());
        let handles = (0..num_threads).map(|_| {
            let queue = queue.clone();

            thread::spawn(move || work_loop(queue))
        }).collect();

        Self { queue, handles }
    }

    /// Schedules a task to be run on one of the worker threads.
    pub fn schedule<F: FnOnce() + Send + 'static>(&self, task: F) {
        self.queue.enqueue(Some(Box::new(task)));
    }

    /// Blocks until every scheduled task has been picked up by a worker.
    pub fn wait_until_empty(&self) {
        self.queue.wait_until_empty();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        for _ in &self.handles {
            self.queue.enqueue(None);
        }

        for handle in self.handles.drain(..) {
            handle.join().expect("could not join worker thread");
        }
    }
}

fn work_loop(queue: Arc<SafeQueue<Option<Task>>>) {
    while let Some(task) = queue.dequeue() {
        task();
    }
}
